//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time only advances through explicit ticks
//! - No rendering or platform dependencies

pub mod machine;
pub mod state;
pub mod store;
pub mod tick;
pub mod tube;

pub use machine::{Command, Effect, Transition, transition};
pub use state::{GameState, GameStatus};
pub use store::GameStore;
pub use tick::{TickOutcome, apply_tick, draw_increments};
pub use tube::{Tube, TubeFactory, TubeId};
