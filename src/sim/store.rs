//! Single source of truth for a game
//!
//! Owns the state, the seeded RNG and the tube factory. Every mutation goes
//! through here.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::machine::{Command, Effect, transition};
use super::state::{GameState, GameStatus};
use super::tick::{TickOutcome, apply_tick, draw_increments};
use super::tube::{Tube, TubeFactory, TubeId};
use crate::error::GameError;
use crate::tuning::Tuning;

pub struct GameStore {
    seed: u64,
    tuning: Tuning,
    rng: Pcg32,
    factory: TubeFactory,
    state: GameState,
}

impl GameStore {
    /// Store with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, GameError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            factory: TubeFactory::new(),
            state: GameState::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Start button. Returns the scheduling effects left for the caller.
    pub fn start_game(&mut self) -> Vec<Effect> {
        self.dispatch(Command::Start)
    }

    /// Pause button: pauses while running, (re)starts otherwise
    pub fn pause_game(&mut self) -> Vec<Effect> {
        self.dispatch(Command::TogglePause)
    }

    pub fn end_game(&mut self) -> Vec<Effect> {
        self.dispatch(Command::End)
    }

    fn dispatch(&mut self, command: Command) -> Vec<Effect> {
        let previous = self.state.status();
        let transition = transition(previous, command);
        self.state.set_status(transition.status);

        let mut effects = Vec::with_capacity(transition.effects.len());
        for effect in transition.effects {
            match effect {
                Effect::ResetGame => self.reset(),
                other => effects.push(other),
            }
        }

        if previous != transition.status {
            log::info!("Game {} -> {}", previous.as_str(), transition.status.as_str());
        }
        effects
    }

    fn reset(&mut self) {
        let tubes = self
            .factory
            .create_batch(&mut self.rng, self.tuning.tube_weight, self.tuning.nr_tubes);
        let target_weight = self.tuning.target_weight.sample(&mut self.rng);
        self.state.reset(tubes, target_weight, self.tuning.round_ms);

        log::info!(
            "New game: target {} g, starting weight {} g, {} ms on the clock",
            target_weight,
            self.state.player_weight(),
            self.tuning.round_ms
        );
    }

    /// Returns false when no tube has that id
    pub fn update_tube(&mut self, tube: Tube) -> bool {
        self.state.update_tube(tube)
    }

    pub fn set_tubes(&mut self, tubes: Vec<Tube>) {
        self.state.set_tubes(tubes);
    }

    pub fn set_target_weight(&mut self, grams: u32) {
        self.state.set_target_weight(grams);
    }

    pub fn set_time_left(&mut self, ms: u32) {
        self.state.set_time_left(ms);
    }

    /// Block a tube. `Ok(false)` when the click is ignored (tube already
    /// blocked or game not running).
    pub fn click_tube(&mut self, id: TubeId) -> Result<bool, GameError> {
        let tube = self.state.tube(id).ok_or(GameError::TubeNotFound(id))?;

        if tube.blocked || self.state.status() != GameStatus::Started {
            log::warn!("Ignored click on tube {} ({})", id, self.state.status().as_str());
            return Ok(false);
        }

        let blocked = tube.clone().into_blocked();
        log::info!("Blocked tube {} at {} g", id, blocked.weight);
        self.state.update_tube(blocked);
        Ok(true)
    }

    /// Advance one tick with freshly drawn increments
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.status() != GameStatus::Started {
            return TickOutcome::Idle;
        }
        let increments = draw_increments(self.state.tubes(), self.tuning.increment, &mut self.rng);
        self.tick_with(&increments)
    }

    /// Advance one tick with the given per-tube increments
    pub fn tick_with(&mut self, increments: &[u32]) -> TickOutcome {
        let outcome = apply_tick(&mut self.state, increments, self.tuning.tick_ms);
        if let TickOutcome::Advanced { time_left_ms } = outcome {
            log::debug!(
                "Tick: {} / {} g, {} ms left",
                self.state.player_weight(),
                self.state.target_weight(),
                time_left_ms
            );
        }
        outcome
    }
}
