//! One-second simulation step
//!
//! Increments are drawn separately from being applied so a tick can be
//! replayed with fixed values.

use rand::Rng;

use super::state::{GameState, GameStatus};
use super::tube::Tube;
use crate::tuning::WeightRange;

/// Result of a single timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, nothing changed
    Idle,
    /// Countdown reached zero; no growth on this tick
    TimeUp,
    /// Tubes grew and the countdown moved on
    Advanced { time_left_ms: u32 },
}

/// One increment per tube, index-aligned. Blocked tubes get 0 and consume no
/// randomness.
pub fn draw_increments<R: Rng>(tubes: &[Tube], range: WeightRange, rng: &mut R) -> Vec<u32> {
    tubes
        .iter()
        .map(|t| if t.blocked { 0 } else { range.sample(rng) })
        .collect()
}

/// Advance the state by one tick of `tick_ms` using the given increments.
///
/// Missing increments count as zero.
pub fn apply_tick(state: &mut GameState, increments: &[u32], tick_ms: u32) -> TickOutcome {
    if state.status() != GameStatus::Started {
        return TickOutcome::Idle;
    }

    if state.time_left_ms() <= tick_ms {
        state.set_time_left(0);
        return TickOutcome::TimeUp;
    }

    for (tube, grams) in state.tubes_mut().iter_mut().zip(increments) {
        tube.grow(*grams);
    }

    let time_left_ms = state.time_left_ms() - tick_ms;
    state.set_time_left(time_left_ms);
    TickOutcome::Advanced { time_left_ms }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::tube::TubeId;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn started_state() -> GameState {
        let mut state = GameState::new();
        state.set_status(GameStatus::Started);
        state.set_tubes(vec![
            Tube::new(TubeId(1), 5000),
            Tube::new(TubeId(2), 6000),
            Tube::new(TubeId(3), 4000),
        ]);
        state.set_target_weight(120_000);
        state.set_time_left(DEFAULT_TIMER_MS);
        state
    }

    #[test]
    fn test_tick_grows_and_counts_down() {
        let mut state = started_state();
        let outcome = apply_tick(&mut state, &[3000, 3000, 3000], ONE_SECOND_MS);

        assert_eq!(outcome, TickOutcome::Advanced { time_left_ms: 29_000 });
        assert_eq!(state.player_weight(), 24_000);
        assert_eq!(state.time_left_ms(), 29_000);
    }

    #[test]
    fn test_tick_skips_blocked_tubes() {
        let mut state = started_state();
        let blocked = state.tubes()[1].clone().into_blocked();
        state.update_tube(blocked);

        apply_tick(&mut state, &[1000, 1000, 1000], ONE_SECOND_MS);
        let weights: Vec<u32> = state.tubes().iter().map(|t| t.weight).collect();
        assert_eq!(weights, vec![6000, 6000, 5000]);
    }

    #[test]
    fn test_last_second_ends_without_growth() {
        let mut state = started_state();
        state.set_time_left(ONE_SECOND_MS);

        assert_eq!(apply_tick(&mut state, &[3000, 3000, 3000], ONE_SECOND_MS), TickOutcome::TimeUp);
        assert_eq!(state.time_left_ms(), 0);
        assert_eq!(state.player_weight(), 15_000);
    }

    #[test]
    fn test_partial_last_tick_clamps_to_zero() {
        let mut state = started_state();
        state.set_time_left(1500);

        assert_eq!(
            apply_tick(&mut state, &[1000, 1000, 1000], ONE_SECOND_MS),
            TickOutcome::Advanced { time_left_ms: 500 }
        );
        assert_eq!(state.player_weight(), 18_000);

        assert_eq!(apply_tick(&mut state, &[1000, 1000, 1000], ONE_SECOND_MS), TickOutcome::TimeUp);
        assert_eq!(state.time_left_ms(), 0);
        assert_eq!(state.player_weight(), 18_000);
    }

    #[test]
    fn test_idle_when_not_started() {
        let mut state = started_state();
        state.set_status(GameStatus::Paused);

        assert_eq!(apply_tick(&mut state, &[3000, 3000, 3000], ONE_SECOND_MS), TickOutcome::Idle);
        assert_eq!(state.time_left_ms(), DEFAULT_TIMER_MS);
        assert_eq!(state.player_weight(), 15_000);
    }

    #[test]
    fn test_draw_increments_in_range_and_zero_for_blocked() {
        let mut state = started_state();
        let blocked = state.tubes()[0].clone().into_blocked();
        state.update_tube(blocked);

        let range = WeightRange::new(MIN_INCREMENT_WEIGHT, MAX_INCREMENT_WEIGHT);
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            let increments = draw_increments(state.tubes(), range, &mut rng);
            assert_eq!(increments[0], 0);
            assert!(increments[1..].iter().all(|g| range.contains(*g)));
        }
    }
}
