//! Tube entities and the factory that spawns them

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::WeightRange;

/// Unique tube identifier, never reused within a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TubeId(pub u32);

impl fmt::Display for TubeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A tube that keeps getting heavier until the player blocks it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tube {
    pub id: TubeId,
    /// Grams
    pub weight: u32,
    /// Blocked tubes no longer grow
    pub blocked: bool,
}

impl Tube {
    pub fn new(id: TubeId, weight: u32) -> Self {
        Self {
            id,
            weight,
            blocked: false,
        }
    }

    /// Copy of this tube with `blocked` set
    pub fn into_blocked(self) -> Self {
        Self {
            blocked: true,
            ..self
        }
    }

    /// Add weight unless blocked
    pub fn grow(&mut self, grams: u32) {
        if !self.blocked {
            self.weight = self.weight.saturating_add(grams);
        }
    }
}

/// Creates tubes with fresh ids and randomized starting weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TubeFactory {
    next_id: u32,
}

impl Default for TubeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TubeFactory {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    fn next_tube_id(&mut self) -> TubeId {
        let id = TubeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// A single unblocked tube weighing a uniform draw from `weight`
    pub fn create_tube<R: Rng>(&mut self, rng: &mut R, weight: WeightRange) -> Tube {
        let id = self.next_tube_id();
        Tube::new(id, weight.sample(rng))
    }

    /// `count` tubes in display order
    pub fn create_batch<R: Rng>(&mut self, rng: &mut R, weight: WeightRange, count: usize) -> Vec<Tube> {
        (0..count).map(|_| self.create_tube(rng, weight)).collect()
    }
}
