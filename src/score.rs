//! End-of-game scoring
//!
//! Pure function of the terminal values; never touches game state.

use serde::{Deserialize, Serialize};

use crate::consts::ACCURACY_MULTIPLIER;

/// How the scoreboard should present a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Went over the target: loss screen, no score shown
    Overshoot,
    /// Score above the threshold
    Good,
    /// Stayed under the target but scored low
    Fair,
}

/// Scoreboard data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: f64,
    /// Percent of the target reached, unbounded above
    pub accuracy: f64,
    pub is_game_over: bool,
    pub is_good_score: bool,
    pub player_weight: u32,
    pub target_weight: u32,
    pub time_left_ms: u32,
}

impl ScoreReport {
    pub fn compute(
        player_weight: u32,
        target_weight: u32,
        time_left_ms: u32,
        good_score_threshold: f64,
    ) -> Self {
        // A game ended before it ever started has no target
        let accuracy = if target_weight == 0 {
            0.0
        } else {
            f64::from(player_weight) / f64::from(target_weight) * 100.0
        };
        let score = accuracy * ACCURACY_MULTIPLIER + f64::from(time_left_ms);

        Self {
            score,
            accuracy,
            is_game_over: player_weight > target_weight,
            is_good_score: score > good_score_threshold,
            player_weight,
            target_weight,
            time_left_ms,
        }
    }

    pub fn verdict(&self) -> Verdict {
        if self.is_game_over {
            Verdict::Overshoot
        } else if self.is_good_score {
            Verdict::Good
        } else {
            Verdict::Fair
        }
    }

    /// Score to display; `None` on a loss
    pub fn shown_score(&self) -> Option<f64> {
        (!self.is_game_over).then_some(self.score)
    }
}
