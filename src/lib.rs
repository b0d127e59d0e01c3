//! Heavy Tubes - a timed arcade game about locking tubes before they get too heavy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tubes, game state, reducer, tick)
//! - `scheduler`: Timer-driven session that interprets simulation effects
//! - `score`: End-of-game score calculation
//! - `tuning`: Data-driven game balance
//! - `view`: Read-only snapshot for the UI layer

pub mod error;
pub mod scheduler;
pub mod score;
pub mod sim;
pub mod tuning;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::GameError;
pub use scheduler::{EndReason, ManualTimer, Session, TimerDriver};
pub use score::{ScoreReport, Verdict};
pub use tuning::{Tuning, WeightRange};
pub use view::Snapshot;

/// Game configuration constants
pub mod consts {
    /// One second in milliseconds (tick period)
    pub const ONE_SECOND_MS: u32 = 1000;
    /// Countdown at the start of every game
    pub const DEFAULT_TIMER_MS: u32 = ONE_SECOND_MS * 30;

    /// Tubes per game
    pub const NR_TUBES: usize = 3;

    /// Tube starting weight (grams)
    pub const MIN_TUBE_WEIGHT: u32 = 1000;
    pub const MAX_TUBE_WEIGHT: u32 = 1000 * 15;

    /// Target weight (grams)
    pub const MIN_TARGET_WEIGHT: u32 = 1000 * 100;
    pub const MAX_TARGET_WEIGHT: u32 = 1000 * 150;

    /// Per-tick growth of an unblocked tube (grams)
    pub const MIN_INCREMENT_WEIGHT: u32 = 1000 * 2;
    pub const MAX_INCREMENT_WEIGHT: u32 = 1000 * 5;

    /// Score points per accuracy percent
    pub const ACCURACY_MULTIPLIER: f64 = 2000.0;
    /// Scores above this are "good"
    pub const GOOD_SCORE_THRESHOLD: f64 = 150_000.0;
}

/// Grams to kilograms for display
#[inline]
pub fn grams_to_kg(grams: u32) -> f64 {
    f64::from(grams) / 1000.0
}

/// Milliseconds to seconds for display
#[inline]
pub fn ms_to_secs(ms: u32) -> f64 {
    f64::from(ms) / 1000.0
}
