//! Timer list view
//!
//! The rendered rows carry the player-number field a user may be typing into.
//! Every render folds those uncommitted edits back into the registry before
//! rebuilding the rows, so a re-render caused by another timer's tick never
//! throws away input.

use serde::Serialize;
use tracing::debug;

use super::registry::ViolationRegistry;
use super::scheduler::TickHandle;
use super::violation::{CardCategory, TimerId, ViolationTimer};
use crate::utils::format_mm_ss;

/// One line of the rendered timer list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerRow {
    pub id: TimerId,
    pub category: CardCategory,
    pub label: String,
    /// Remaining time as `MM:SS`
    pub remaining: String,
    pub remaining_seconds: u32,
    pub player_number: String,
    /// Set while `player_number` holds an edit not yet written to the model
    #[serde(skip)]
    edited: bool,
}

impl TimerRow {
    fn from_timer(timer: &ViolationTimer) -> Self {
        Self {
            id: timer.id,
            category: timer.category,
            label: timer.label.clone(),
            remaining: format_mm_ss(u64::from(timer.remaining)),
            remaining_seconds: timer.remaining,
            player_number: timer.player_number.clone(),
            edited: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct ViewSynchronizer {
    rows: Vec<TimerRow>,
    renders: u64,
}

impl ViewSynchronizer {
    pub fn rows(&self) -> &[TimerRow] {
        &self.rows
    }

    /// Number of renders so far
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Record an in-progress edit of a row's player-number field.
    ///
    /// Returns false if no row is shown for the timer.
    pub fn edit(&mut self, id: TimerId, text: &str) -> bool {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.player_number = text.to_string();
                row.edited = true;
                true
            }
            None => false,
        }
    }

    /// Show a committed player number, superseding any pending edit
    pub fn accept(&mut self, id: TimerId, text: &str) {
        if let Some(row) = self.rows.iter_mut().find(|row| row.id == id) {
            row.player_number = text.to_string();
            row.edited = false;
        }
    }

    /// Rebuild the rows from the registry, keeping uncommitted edits
    pub fn render<H: TickHandle>(&mut self, registry: &mut ViolationRegistry<H>) {
        for row in self.rows.iter().filter(|row| row.edited) {
            if registry.set_player_number(row.id, &row.player_number) {
                debug!("Kept player number edit for timer {}", row.id);
            }
        }

        self.rows = registry
            .ordered()
            .into_iter()
            .map(TimerRow::from_timer)
            .collect();
        self.renders += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::scheduler::manual::{ManualHandle, ManualScheduler};
    use crate::state::scheduler::TickTarget;
    use crate::state::registry::CountdownTick;

    fn registry_with_two() -> (ViolationRegistry<ManualHandle>, TimerId, TimerId) {
        let mut registry = ViolationRegistry::default();
        let red = registry.add_timer(CardCategory::Red, 120, "Red card");
        let blue = registry.add_timer(CardCategory::Blue, 60, "Blue card");
        (registry, red, blue)
    }

    #[test]
    fn rows_are_ordered_and_formatted() {
        let (mut registry, red, blue) = registry_with_two();
        let mut view = ViewSynchronizer::default();
        view.render(&mut registry);

        let ids: Vec<TimerId> = view.rows().iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![blue, red]);
        assert_eq!(view.rows()[0].remaining, "01:00");
        assert_eq!(view.rows()[1].remaining, "02:00");
        assert_eq!(view.renders(), 1);
    }

    #[test]
    fn pending_edit_survives_unrelated_tick() {
        let (mut registry, red, blue) = registry_with_two();
        let mut scheduler = ManualScheduler::default();
        registry.start_countdown(blue, &mut scheduler);
        let mut view = ViewSynchronizer::default();
        view.render(&mut registry);

        assert!(view.edit(red, "23"));
        for tick in registry.live_ticks() {
            if let TickTarget::Violation(id) = tick.target {
                assert!(matches!(
                    registry.apply_tick(id, tick.ticket),
                    CountdownTick::Counted { .. }
                ));
            }
        }
        view.render(&mut registry);

        let row = view.rows().iter().find(|row| row.id == red).unwrap();
        assert_eq!(row.player_number, "23");
        assert_eq!(registry.get(red).unwrap().player_number, "23");
    }

    #[test]
    fn committed_value_is_not_overwritten_by_stale_row() {
        let (mut registry, red, _) = registry_with_two();
        let mut view = ViewSynchronizer::default();
        view.render(&mut registry);

        view.edit(red, "9");
        registry.set_player_number(red, "10");
        view.accept(red, "10");
        view.render(&mut registry);

        assert_eq!(registry.get(red).unwrap().player_number, "10");
    }

    #[test]
    fn edit_of_missing_row_is_ignored() {
        let (mut registry, red, _) = registry_with_two();
        let mut view = ViewSynchronizer::default();
        view.render(&mut registry);
        view.edit(red, "5");
        registry.delete_timer(red);
        view.render(&mut registry);

        assert!(!view.edit(red, "6"));
        assert_eq!(view.rows().len(), 1);
    }
}
