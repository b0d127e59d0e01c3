//! Timer-driven game session
//!
//! A `Session` owns the store and exactly one timer handle. Store operations
//! return effects; the session runs them against its `TimerDriver` and then
//! re-evaluates the end conditions (all tubes blocked, overshoot).

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::score::ScoreReport;
use crate::sim::{Effect, GameStatus, GameStore, TickOutcome, TubeId};
use crate::view::Snapshot;

/// A repeating timer the session can arm and cancel
pub trait TimerDriver {
    /// Install a repeating timer. Callers cancel any previous one first.
    fn arm(&mut self, period_ms: u32);
    fn cancel(&mut self);
    fn is_armed(&self) -> bool;
}

/// Virtual timer: nothing fires on its own, the owner calls
/// [`Session::on_timer_fired`]. Counts arms, cancels and overlapping arms.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    period_ms: Option<u32>,
    pub arms: u32,
    pub cancels: u32,
    /// Arms while another timer was still active
    pub overlaps: u32,
}

impl ManualTimer {
    pub fn period_ms(&self) -> Option<u32> {
        self.period_ms
    }
}

impl TimerDriver for ManualTimer {
    fn arm(&mut self, period_ms: u32) {
        if self.period_ms.is_some() {
            self.overlaps += 1;
        }
        self.period_ms = Some(period_ms);
        self.arms += 1;
    }

    fn cancel(&mut self) {
        if self.period_ms.take().is_some() {
            self.cancels += 1;
        }
    }

    fn is_armed(&self) -> bool {
        self.period_ms.is_some()
    }
}

/// Why the last game finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Countdown reached zero
    TimeUp,
    /// Player weight went over the target
    Overshoot,
    /// Every tube was blocked
    AllBlocked,
    /// `end_game` called directly
    Manual,
}

pub struct Session<T: TimerDriver> {
    store: GameStore,
    timer: T,
    scoreboard: Option<ScoreReport>,
    end_reason: Option<EndReason>,
}

impl<T: TimerDriver> Session<T> {
    pub fn new(store: GameStore, timer: T) -> Self {
        Self {
            store,
            timer,
            scoreboard: None,
            end_reason: None,
        }
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut GameStore {
        &mut self.store
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn status(&self) -> GameStatus {
        self.store.state().status()
    }

    /// Set once the game is finished, cleared on restart
    pub fn scoreboard(&self) -> Option<&ScoreReport> {
        self.scoreboard.as_ref()
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn start_game(&mut self) {
        let effects = self.store.start_game();
        self.run(effects);
        self.evaluate();
    }

    /// Pause/resume toggle
    pub fn pause_game(&mut self) {
        let effects = self.store.pause_game();
        self.run(effects);
        self.evaluate();
    }

    pub fn end_game(&mut self) {
        self.finish(EndReason::Manual);
    }

    /// Unknown ids are a caller bug and fail; ignored clicks are not errors
    pub fn click_tube(&mut self, id: TubeId) -> Result<(), GameError> {
        if self.store.click_tube(id)? {
            self.evaluate();
        }
        Ok(())
    }

    /// Timer callback
    pub fn on_timer_fired(&mut self) {
        match self.store.tick() {
            TickOutcome::Idle => {
                // a stale callback after a pause or finish
                self.timer.cancel();
            }
            TickOutcome::TimeUp => self.finish(EndReason::TimeUp),
            TickOutcome::Advanced { .. } => self.evaluate(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.store.state(), self.scoreboard, self.end_reason)
    }

    fn finish(&mut self, reason: EndReason) {
        let effects = self.store.end_game();
        if effects.is_empty() {
            return;
        }
        self.end_reason = Some(reason);
        log::info!("Game over: {:?}", reason);
        self.run(effects);
    }

    /// End conditions, checked after every change while running
    fn evaluate(&mut self) {
        let state = self.store.state();
        if state.status() != GameStatus::Started {
            return;
        }
        if state.is_overshoot() {
            self.finish(EndReason::Overshoot);
        } else if state.all_tubes_blocked() {
            self.finish(EndReason::AllBlocked);
        }
    }

    fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ArmTimer => {
                    self.timer.cancel();
                    self.timer.arm(self.store.tuning().tick_ms);
                }
                Effect::CancelTimer => self.timer.cancel(),
                Effect::HideScoreboard => {
                    self.scoreboard = None;
                    self.end_reason = None;
                }
                Effect::RevealScoreboard => {
                    let state = self.store.state();
                    let report = ScoreReport::compute(
                        state.player_weight(),
                        state.target_weight(),
                        state.time_left_ms(),
                        self.store.tuning().good_score_threshold,
                    );
                    log::info!(
                        "Final: {} / {} g, {} ms left, score {:.2} ({:?})",
                        report.player_weight,
                        report.target_weight,
                        report.time_left_ms,
                        report.score,
                        report.verdict()
                    );
                    self.scoreboard = Some(report);
                }
                Effect::ResetGame => {
                    // applied by the store before effects reach us
                    log::warn!("Unexpected ResetGame effect");
                }
            }
        }
    }
}

impl<T: TimerDriver> Drop for Session<T> {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}
