//! Team score tracking

use serde::{Deserialize, Serialize};

/// Which side a score adjustment applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Own,
    Opponent,
}

/// A single non-negative score counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Score(u32);

impl Score {
    pub fn value(self) -> u32 {
        self.0
    }

    pub fn increase(&mut self, step: u32) {
        self.0 = self.0.saturating_add(step);
    }

    /// Decrease by `step`, floored at zero
    pub fn decrease(&mut self, step: u32) {
        self.0 = self.0.saturating_sub(step);
    }
}

/// Both team scores. The two counters share nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    pub own: Score,
    pub opponent: Score,
}

impl Scoreboard {
    pub fn score(&self, team: Team) -> Score {
        match team {
            Team::Own => self.own,
            Team::Opponent => self.opponent,
        }
    }

    fn score_mut(&mut self, team: Team) -> &mut Score {
        match team {
            Team::Own => &mut self.own,
            Team::Opponent => &mut self.opponent,
        }
    }

    pub fn increase(&mut self, team: Team, step: u32) -> u32 {
        let score = self.score_mut(team);
        score.increase(step);
        score.value()
    }

    pub fn decrease(&mut self, team: Team, step: u32) -> u32 {
        let score = self.score_mut(team);
        score.decrease(step);
        score.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn teams_are_independent() {
        let mut board = Scoreboard::default();
        board.increase(Team::Own, 10);
        board.increase(Team::Own, 10);
        board.increase(Team::Opponent, 10);
        board.decrease(Team::Opponent, 10);
        assert_eq!(board.score(Team::Own).value(), 20);
        assert_eq!(board.score(Team::Opponent).value(), 0);
    }

    #[test]
    fn decrease_floors_at_zero() {
        let mut board = Scoreboard::default();
        assert_eq!(board.decrease(Team::Own, 10), 0);
        board.increase(Team::Own, 10);
        assert_eq!(board.decrease(Team::Own, 25), 0);
    }

    fn adjustment() -> impl Strategy<Value = (bool, bool)> {
        (any::<bool>(), any::<bool>())
    }

    proptest! {
        #[test]
        fn score_never_negative(ops in prop::collection::vec(adjustment(), 0..64)) {
            let mut board = Scoreboard::default();
            let mut own = 0i64;
            for (own_side, up) in ops {
                let team = if own_side { Team::Own } else { Team::Opponent };
                if up {
                    board.increase(team, 10);
                } else {
                    board.decrease(team, 10);
                }
                if own_side {
                    own = if up { own + 10 } else { (own - 10).max(0) };
                }
            }
            prop_assert_eq!(i64::from(board.own.value()), own);
        }

        #[test]
        fn increase_then_decrease_round_trips(start in 0u32..10_000) {
            let mut board = Scoreboard::default();
            board.increase(Team::Opponent, start);
            board.increase(Team::Opponent, 10);
            board.decrease(Team::Opponent, 10);
            prop_assert_eq!(board.opponent.value(), start);
        }
    }
}
