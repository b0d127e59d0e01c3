//! Game balance
//!
//! Defaults are the fixed constants in [`crate::consts`]. The native runner can
//! override any subset of them from a JSON file; the web build always plays
//! with the defaults.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Inclusive integer range in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: u32,
    pub max: u32,
}

impl WeightRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, weight: u32) -> bool {
        (self.min..=self.max).contains(&weight)
    }

    /// Uniform draw from `[min, max]`
    pub fn sample<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.random_range(self.min..=self.max)
    }

    fn validate(&self, name: &str) -> Result<(), GameError> {
        if self.min > self.max {
            return Err(GameError::InvalidTuning(format!(
                "{name} range is empty ({} > {})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Tubes created at the start of every game
    pub nr_tubes: usize,
    /// Timer period
    pub tick_ms: u32,
    /// Countdown at game start
    pub round_ms: u32,
    /// Initial tube weight
    pub tube_weight: WeightRange,
    /// Weight the player must approach without exceeding
    pub target_weight: WeightRange,
    /// Growth per tick of every unblocked tube
    pub increment: WeightRange,
    /// Scores strictly above this are "good"
    pub good_score_threshold: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            nr_tubes: NR_TUBES,
            tick_ms: ONE_SECOND_MS,
            round_ms: DEFAULT_TIMER_MS,
            tube_weight: WeightRange::new(MIN_TUBE_WEIGHT, MAX_TUBE_WEIGHT),
            target_weight: WeightRange::new(MIN_TARGET_WEIGHT, MAX_TARGET_WEIGHT),
            increment: WeightRange::new(MIN_INCREMENT_WEIGHT, MAX_INCREMENT_WEIGHT),
            good_score_threshold: GOOD_SCORE_THRESHOLD,
        }
    }
}

impl Tuning {
    /// Parse and validate. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning ({} tubes, {} ms round)", tuning.nr_tubes, tuning.round_ms);
        Ok(tuning)
    }

    /// Read a tuning file. See [`Tuning::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Heaviest possible total: every tube at max weight, growing by the max
    /// increment on every tick of the round. `None` if it overflows `u32`.
    pub fn max_total_weight(&self) -> Option<u32> {
        let ticks = self.round_ms / self.tick_ms.max(1);
        let per_tube = ticks
            .checked_mul(self.increment.max)?
            .checked_add(self.tube_weight.max)?;
        u32::try_from(self.nr_tubes).ok()?.checked_mul(per_tube)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.nr_tubes == 0 {
            return Err(GameError::InvalidTuning("at least one tube is required".into()));
        }
        if self.tick_ms == 0 {
            return Err(GameError::InvalidTuning("tick period must be nonzero".into()));
        }
        if self.round_ms < self.tick_ms {
            return Err(GameError::InvalidTuning(format!(
                "round ({} ms) is shorter than one tick ({} ms)",
                self.round_ms, self.tick_ms
            )));
        }
        self.tube_weight.validate("tube weight")?;
        self.target_weight.validate("target weight")?;
        self.increment.validate("increment")?;
        if self.max_total_weight().is_none() {
            return Err(GameError::InvalidTuning(
                "tube weights could exceed the representable total".into(),
            ));
        }
        if !self.good_score_threshold.is_finite() {
            return Err(GameError::InvalidTuning("good score threshold must be finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.nr_tubes, 3);
        assert_eq!(tuning.target_weight, WeightRange::new(100_000, 150_000));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "round_ms": 5000 }"#).unwrap();
        assert_eq!(tuning.round_ms, 5000);
        assert_eq!(tuning.tick_ms, ONE_SECOND_MS);
        assert_eq!(tuning.increment, WeightRange::new(2000, 5000));
    }

    #[test]
    fn test_rejects_empty_range() {
        let err = Tuning::from_json(r#"{ "increment": { "min": 10, "max": 5 } }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidTuning(_)));
    }

    #[test]
    fn test_rejects_round_shorter_than_tick() {
        let err = Tuning::from_json(r#"{ "round_ms": 500 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidTuning(_)));
    }

    #[test]
    fn test_rejects_overflowing_tuning() {
        let err = Tuning::from_json(r#"{ "tube_weight": { "min": 2000000000, "max": 2000000000 } }"#)
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidTuning(_)));

        let err = Tuning::from_json(r#"{ "increment": { "min": 1, "max": 100000000 } }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidTuning(_)));

        let err = Tuning::from_json(r#"{ "nr_tubes": 5000000000 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidTuning(_)));
    }

    #[test]
    fn test_default_max_total_weight() {
        // 3 tubes * (15000 + 30 ticks * 5000)
        assert_eq!(Tuning::default().max_total_weight(), Some(495_000));
    }

    #[test]
    fn test_from_path_reads_file() {
        let path = std::env::temp_dir().join(format!("heavy-tubes-tuning-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "nr_tubes": 4 }"#).unwrap();
        let tuning = Tuning::from_path(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(tuning.unwrap().nr_tubes, 4);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = Tuning::from_path("/nonexistent/heavy-tubes/tuning.json").unwrap_err();
        assert!(matches!(err, GameError::IO(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ nope").unwrap_err();
        assert!(matches!(err, GameError::TuningFormat(_)));
    }

    #[test]
    fn test_sample_stays_in_range() {
        let range = WeightRange::new(2000, 5000);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(range.contains(range.sample(&mut rng)));
        }
        let fixed = WeightRange::new(42, 42);
        assert_eq!(fixed.sample(&mut rng), 42);
    }
}
