//! The panel controller
//!
//! `MatchPanel` is the single owner of all match state: clocks, scores,
//! penalty timers, the rendered timer list, plus the scheduler that drives
//! ticks and the notifier that shows banners. Every activation and every tick
//! goes through it.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::clock::ClockEngine;
use super::control::Control;
use super::notifier::Notifier;
use super::registry::{CountdownTick, ViolationRegistry};
use super::scheduler::{Tick, TickScheduler, TickTarget};
use super::score::{Scoreboard, Team};
use super::settings::PanelSettings;
use super::snapshot::{Banner, PanelSnapshot};
use super::view::{TimerRow, ViewSynchronizer};
use super::violation::{CardCategory, TimerId};

pub struct MatchPanel<S: TickScheduler, N> {
    settings: PanelSettings,
    clock: ClockEngine<S::Handle>,
    registry: ViolationRegistry<S::Handle>,
    scores: Scoreboard,
    view: ViewSynchronizer,
    scheduler: S,
    notifier: N,
}

impl<S: TickScheduler, N: Notifier> MatchPanel<S, N> {
    pub fn new(settings: PanelSettings, scheduler: S, notifier: N) -> Self {
        Self {
            settings,
            clock: ClockEngine::default(),
            registry: ViolationRegistry::default(),
            scores: Scoreboard::default(),
            view: ViewSynchronizer::default(),
            scheduler,
            notifier,
        }
    }

    pub fn clock(&self) -> &ClockEngine<S::Handle> {
        &self.clock
    }

    pub fn registry(&self) -> &ViolationRegistry<S::Handle> {
        &self.registry
    }

    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    pub fn rows(&self) -> &[TimerRow] {
        self.view.rows()
    }

    /// Start the real time and match clocks. Penalty countdowns added before
    /// the first start begin running now.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if !self.clock.start(now, &mut self.scheduler) {
            return false;
        }
        if self.registry.resume_all(&mut self.scheduler) > 0 {
            self.render();
        }
        true
    }

    pub fn adjust_time(&mut self, delta_secs: i64) -> u64 {
        self.clock.adjust(delta_secs)
    }

    pub fn increase_time(&mut self) -> u64 {
        self.adjust_time(i64::from(self.settings.time_step_secs))
    }

    pub fn decrease_time(&mut self) -> u64 {
        self.adjust_time(-i64::from(self.settings.time_step_secs))
    }

    /// Pause the match clock and every penalty countdown with it
    pub fn pause(&mut self) -> bool {
        if !self.clock.pause() {
            return false;
        }
        self.registry.pause_all();
        self.render();
        true
    }

    /// Resume the match clock and every penalty with time left
    pub fn resume(&mut self) -> bool {
        if !self.clock.resume(&mut self.scheduler) {
            return false;
        }
        self.registry.resume_all(&mut self.scheduler);
        self.render();
        true
    }

    pub fn add_card(&mut self, category: CardCategory) -> TimerId {
        let duration = self.settings.card_duration(category);
        self.add_timer(category, duration, category.label())
    }

    /// Create a penalty timer, counting down immediately if the match clock runs
    pub fn add_timer(&mut self, category: CardCategory, duration: u32, label: &str) -> TimerId {
        let id = self.registry.add_timer(category, duration, label);
        if self.clock.is_running() {
            self.registry.start_countdown(id, &mut self.scheduler);
        }
        self.render();
        id
    }

    /// Remove a timer without a finished notification. Unknown ids are ignored.
    pub fn delete_timer(&mut self, id: TimerId) -> bool {
        let removed = self.registry.delete_timer(id).is_some();
        if removed {
            self.render();
        }
        removed
    }

    /// Commit a player number for a timer
    pub fn set_player_number(&mut self, id: TimerId, text: &str) -> bool {
        let updated = self.registry.set_player_number(id, text);
        if updated {
            self.view.accept(id, text);
        }
        updated
    }

    /// Record text typed into a timer's player-number field. It is written
    /// to the timer on the next render.
    pub fn edit_player_number(&mut self, id: TimerId, text: &str) -> bool {
        self.view.edit(id, text)
    }

    pub fn increase_score(&mut self, team: Team) -> u32 {
        self.scores.increase(team, self.settings.score_step)
    }

    pub fn decrease_score(&mut self, team: Team) -> u32 {
        self.scores.decrease(team, self.settings.score_step)
    }

    /// Apply a named control
    pub fn activate(&mut self, control: Control, now: DateTime<Utc>) {
        info!("Activated {}", control.name());
        match control {
            Control::StartRealTime => {
                self.start(now);
            }
            Control::IncreaseTime => {
                self.increase_time();
            }
            Control::DecreaseTime => {
                self.decrease_time();
            }
            Control::PauseGameTime => {
                self.pause();
            }
            Control::ResumeGameTime => {
                self.resume();
            }
            Control::IncreaseOwnScore => {
                self.increase_score(Team::Own);
            }
            Control::DecreaseOwnScore => {
                self.decrease_score(Team::Own);
            }
            Control::IncreaseOpponentScore => {
                self.increase_score(Team::Opponent);
            }
            Control::DecreaseOpponentScore => {
                self.decrease_score(Team::Opponent);
            }
            Control::RedCard => {
                self.add_card(CardCategory::Red);
            }
            Control::YellowCard => {
                self.add_card(CardCategory::Yellow);
            }
            Control::BlueCard => {
                self.add_card(CardCategory::Blue);
            }
        }
    }

    /// Apply a tick from a scheduled source. Returns whether anything visible
    /// changed; stale ticks change nothing.
    pub fn apply_tick(&mut self, tick: Tick) -> bool {
        match tick.target {
            TickTarget::MatchClock | TickTarget::WallClock => self.clock.apply_tick(tick),
            TickTarget::Violation(id) => match self.registry.apply_tick(id, tick.ticket) {
                CountdownTick::Stale => false,
                CountdownTick::Counted { .. } => {
                    self.render();
                    true
                }
                CountdownTick::Expired(timer) => {
                    self.notifier
                        .notify(timer.finished_message(), self.settings.notification_duration);
                    self.render();
                    true
                }
            },
        }
    }

    /// Every tick the live sources would deliver in one period
    pub fn live_ticks(&self) -> Vec<Tick> {
        let mut ticks = self.clock.live_ticks();
        ticks.extend(self.registry.live_ticks());
        ticks
    }

    pub fn snapshot(&self, now: DateTime<Utc>, banner: Option<Banner>) -> PanelSnapshot {
        let match_clock = self.clock.match_clock();
        PanelSnapshot {
            match_time: match_clock.display(),
            match_elapsed_seconds: match_clock.elapsed(),
            match_phase: match_clock.phase(),
            real_time: self.clock.wall_clock().display(now),
            scores: self.scores,
            timers: self.view.rows().to_vec(),
            banner,
        }
    }

    fn render(&mut self) {
        self.view.render(&mut self.registry);
        debug!("Rendered {} timers", self.view.rows().len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::notifier::recording::RecordingNotifier;
    use crate::state::scheduler::manual::ManualScheduler;
    use chrono::TimeZone;

    type TestPanel = MatchPanel<ManualScheduler, RecordingNotifier>;

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap()
    }

    fn panel() -> TestPanel {
        MatchPanel::new(
            PanelSettings::default(),
            ManualScheduler::default(),
            RecordingNotifier::default(),
        )
    }

    fn started_panel() -> TestPanel {
        let mut panel = panel();
        assert!(panel.start(kickoff()));
        panel
    }

    /// Let `secs` seconds pass, delivering one tick per live source per second
    fn advance(panel: &mut TestPanel, secs: u32) {
        for _ in 0..secs {
            for tick in panel.live_ticks() {
                panel.apply_tick(tick);
            }
        }
    }

    fn remaining(panel: &TestPanel, id: TimerId) -> Option<u32> {
        panel.registry().get(id).map(|timer| timer.remaining)
    }

    #[test]
    fn timer_fires_once_after_its_duration() {
        let mut panel = started_panel();
        let id = panel.add_timer(CardCategory::Yellow, 10, "Yellow card");

        advance(&mut panel, 9);
        assert_eq!(remaining(&panel, id), Some(1));
        assert!(panel.notifier.messages().is_empty());

        advance(&mut panel, 1);
        assert_eq!(remaining(&panel, id), None);
        assert_eq!(panel.notifier.messages(), vec!["Yellow card timer finished"]);

        advance(&mut panel, 5);
        assert_eq!(panel.notifier.messages().len(), 1);
        assert!(panel.rows().is_empty());
    }

    #[test]
    fn delete_emits_no_notification() {
        let mut panel = started_panel();
        let id = panel.add_card(CardCategory::Red);
        assert!(panel.delete_timer(id));
        advance(&mut panel, 200);

        assert!(panel.notifier.messages().is_empty());
        assert!(!panel.delete_timer(id));
    }

    #[test]
    fn red_and_blue_added_together() {
        let mut panel = started_panel();
        let red = panel.add_card(CardCategory::Red);
        let blue = panel.add_card(CardCategory::Blue);

        advance(&mut panel, 60);

        assert_eq!(panel.notifier.messages(), vec!["Blue card timer finished"]);
        assert_eq!(remaining(&panel, blue), None);
        assert_eq!(remaining(&panel, red), Some(60));
        assert_eq!(panel.rows().len(), 1);
        assert_eq!(panel.rows()[0].remaining, "01:00");
    }

    #[test]
    fn yellow_holds_while_paused() {
        let mut panel = started_panel();
        let yellow = panel.add_card(CardCategory::Yellow);

        advance(&mut panel, 10);
        assert_eq!(remaining(&panel, yellow), Some(50));

        assert!(panel.pause());
        advance(&mut panel, 5);
        assert_eq!(remaining(&panel, yellow), Some(50));
        assert_eq!(panel.clock().match_clock().elapsed(), 10);

        assert!(panel.resume());
        advance(&mut panel, 49);
        assert_eq!(remaining(&panel, yellow), Some(1));
        assert!(panel.notifier.messages().is_empty());

        advance(&mut panel, 1);
        assert_eq!(panel.notifier.messages(), vec!["Yellow card timer finished"]);
    }

    #[test]
    fn pause_then_resume_without_ticks_keeps_remaining() {
        let mut panel = started_panel();
        let red = panel.add_card(CardCategory::Red);
        let blue = panel.add_card(CardCategory::Blue);
        advance(&mut panel, 3);

        panel.pause();
        panel.resume();

        assert_eq!(remaining(&panel, red), Some(117));
        assert_eq!(remaining(&panel, blue), Some(57));
    }

    #[test]
    fn card_added_while_paused_waits_for_resume() {
        let mut panel = started_panel();
        panel.pause();
        let blue = panel.add_card(CardCategory::Blue);
        advance(&mut panel, 5);
        assert_eq!(remaining(&panel, blue), Some(60));

        panel.resume();
        advance(&mut panel, 5);
        assert_eq!(remaining(&panel, blue), Some(55));
    }

    #[test]
    fn card_added_before_start_runs_from_start() {
        let mut panel = panel();
        let red = panel.add_card(CardCategory::Red);
        advance(&mut panel, 5);
        assert_eq!(remaining(&panel, red), Some(120));

        panel.start(kickoff());
        advance(&mut panel, 5);
        assert_eq!(remaining(&panel, red), Some(115));
    }

    #[test]
    fn new_shorter_timer_moves_to_front() {
        let mut panel = started_panel();
        let red = panel.add_card(CardCategory::Red);
        let yellow = panel.add_card(CardCategory::Yellow);
        advance(&mut panel, 20);
        let blue = panel.add_timer(CardCategory::Blue, 10, "Blue card");

        let order: Vec<TimerId> = panel.rows().iter().map(|row| row.id).collect();
        assert_eq!(order, vec![blue, yellow, red]);
    }

    #[test]
    fn player_number_edit_survives_tick() {
        let mut panel = started_panel();
        let red = panel.add_card(CardCategory::Red);
        let blue = panel.add_card(CardCategory::Blue);

        assert!(panel.edit_player_number(red, "14"));
        advance(&mut panel, 1);

        let row = panel.rows().iter().find(|row| row.id == red).unwrap();
        assert_eq!(row.player_number, "14");
        assert_eq!(panel.registry().get(red).unwrap().player_number, "14");
        assert_eq!(panel.rows().iter().find(|row| row.id == blue).unwrap().player_number, "");
    }

    #[test]
    fn committed_player_number_is_shown() {
        let mut panel = started_panel();
        let red = panel.add_card(CardCategory::Red);
        assert!(panel.set_player_number(red, "7"));
        assert_eq!(panel.rows()[0].player_number, "7");
        advance(&mut panel, 2);
        assert_eq!(panel.rows()[0].player_number, "7");
        assert!(!panel.set_player_number(TimerId(404), "1"));
    }

    #[test]
    fn controls_drive_clock_and_scores() {
        let mut panel = panel();
        panel.activate(Control::StartRealTime, kickoff());
        panel.activate(Control::IncreaseTime, kickoff());
        panel.activate(Control::IncreaseTime, kickoff());
        panel.activate(Control::DecreaseTime, kickoff());
        panel.activate(Control::IncreaseOwnScore, kickoff());
        panel.activate(Control::IncreaseOpponentScore, kickoff());
        panel.activate(Control::DecreaseOpponentScore, kickoff());
        panel.activate(Control::DecreaseOpponentScore, kickoff());
        panel.activate(Control::BlueCard, kickoff());

        assert_eq!(panel.scores().own.value(), 10);
        let snapshot = panel.snapshot(kickoff() + chrono::Duration::seconds(42), None);
        assert_eq!(snapshot.match_elapsed_seconds, 30);
        assert_eq!(snapshot.match_time, "00:00:30");
        assert_eq!(snapshot.real_time.as_deref(), Some("00:00:42"));
        assert_eq!(snapshot.scores.own.value(), 10);
        assert_eq!(snapshot.scores.opponent.value(), 0);
        assert_eq!(snapshot.timers.len(), 1);
        assert_eq!(snapshot.timers[0].remaining, "01:00");
    }

    #[test]
    fn decrease_time_floors_at_zero() {
        let mut panel = started_panel();
        advance(&mut panel, 10);
        assert_eq!(panel.decrease_time(), 0);
        assert_eq!(panel.increase_time(), 30);
    }

    #[test]
    fn stale_tick_after_delete_is_silent() {
        let mut panel = started_panel();
        let red = panel.add_card(CardCategory::Red);
        let ticks = panel.live_ticks();
        panel.delete_timer(red);

        let renders = panel.view.renders();
        for tick in ticks.into_iter().filter(|t| t.target == TickTarget::Violation(red)) {
            assert!(!panel.apply_tick(tick));
        }
        assert_eq!(panel.view.renders(), renders);
    }
}
