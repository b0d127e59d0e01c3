//! Game state and status
//!
//! Player weight is never stored: it is always the sum of the current tubes.

use serde::{Deserialize, Serialize};

use super::tube::{Tube, TubeId};

/// Current status of the game, governs all behavior gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Idle, nothing generated yet
    #[default]
    NotStarted,
    /// Timer running, tubes growing
    Started,
    /// Countdown frozen
    Paused,
    /// Scoreboard shown
    Finished,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::NotStarted => "NOT_STARTED",
            GameStatus::Started => "STARTED",
            GameStatus::Paused => "PAUSED",
            GameStatus::Finished => "FINISHED",
        }
    }

    /// Label of the button that (re)starts play; `None` while running since
    /// only the pause button is shown then
    pub fn start_label(&self) -> Option<&'static str> {
        match self {
            GameStatus::NotStarted => Some("START"),
            GameStatus::Paused => Some("RESUME"),
            GameStatus::Finished => Some("RESTART"),
            GameStatus::Started => None,
        }
    }

    /// Starting from here regenerates tubes and target weight
    pub fn starts_fresh_game(&self) -> bool {
        matches!(self, GameStatus::NotStarted | GameStatus::Finished)
    }
}

/// Canonical game state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    status: GameStatus,
    /// Display order
    tubes: Vec<Tube>,
    target_weight: u32,
    time_left_ms: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    pub fn tube(&self, id: TubeId) -> Option<&Tube> {
        self.tubes.iter().find(|t| t.id == id)
    }

    pub fn target_weight(&self) -> u32 {
        self.target_weight
    }

    pub fn time_left_ms(&self) -> u32 {
        self.time_left_ms
    }

    /// Sum of all tube weights, saturating like [`Tube::grow`]
    pub fn player_weight(&self) -> u32 {
        self.tubes.iter().fold(0u32, |sum, t| sum.saturating_add(t.weight))
    }

    pub fn is_overshoot(&self) -> bool {
        self.player_weight() > self.target_weight
    }

    /// True for an empty tube list as well
    pub fn all_tubes_blocked(&self) -> bool {
        self.tubes.iter().all(|t| t.blocked)
    }

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    pub fn set_tubes(&mut self, tubes: Vec<Tube>) {
        self.tubes = tubes;
    }

    pub fn set_target_weight(&mut self, grams: u32) {
        self.target_weight = grams;
    }

    pub fn set_time_left(&mut self, ms: u32) {
        self.time_left_ms = ms;
    }

    pub(crate) fn tubes_mut(&mut self) -> &mut [Tube] {
        &mut self.tubes
    }

    /// Replace the tube with the same id. Blocking is sticky and a blocked
    /// tube keeps its weight. Returns false when no tube matches.
    pub fn update_tube(&mut self, tube: Tube) -> bool {
        match self.tubes.iter_mut().find(|t| t.id == tube.id) {
            Some(current) => {
                if current.blocked {
                    return true;
                }
                *current = tube;
                true
            }
            None => false,
        }
    }

    /// Wholesale reset for a new game
    pub(crate) fn reset(&mut self, tubes: Vec<Tube>, target_weight: u32, time_left_ms: u32) {
        *self = Self {
            status: self.status,
            tubes,
            target_weight,
            time_left_ms,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_tubes() -> Vec<Tube> {
        vec![
            Tube::new(TubeId(1), 5000),
            Tube::new(TubeId(2), 6000),
            Tube::new(TubeId(3), 4000),
        ]
    }

    #[test]
    fn test_player_weight_is_sum_of_tubes() {
        let mut state = GameState::new();
        assert_eq!(state.player_weight(), 0);

        state.set_tubes(three_tubes());
        assert_eq!(state.player_weight(), 15000);

        state.tubes_mut()[0].grow(1000);
        assert_eq!(state.player_weight(), 16000);
    }

    #[test]
    fn test_player_weight_saturates() {
        let mut state = GameState::new();
        state.set_tubes(vec![
            Tube::new(TubeId(1), u32::MAX - 10),
            Tube::new(TubeId(2), 2_000_000_000),
        ]);
        assert_eq!(state.player_weight(), u32::MAX);
        assert!(state.is_overshoot());
    }

    #[test]
    fn test_update_tube_replaces_matching_id() {
        let mut state = GameState::new();
        state.set_tubes(three_tubes());

        let blocked = state.tube(TubeId(2)).cloned().unwrap().into_blocked();
        assert!(state.update_tube(blocked));
        assert!(state.tube(TubeId(2)).unwrap().blocked);
        assert!(!state.tube(TubeId(1)).unwrap().blocked);
        // order is preserved
        let ids: Vec<u32> = state.tubes().iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_update_tube_unknown_id_is_noop() {
        let mut state = GameState::new();
        state.set_tubes(three_tubes());
        assert!(!state.update_tube(Tube::new(TubeId(99), 1).into_blocked()));
        assert_eq!(state.tubes(), three_tubes().as_slice());
    }

    #[test]
    fn test_update_tube_cannot_unblock() {
        let mut state = GameState::new();
        state.set_tubes(three_tubes());
        state.update_tube(Tube::new(TubeId(1), 5000).into_blocked());
        state.update_tube(Tube::new(TubeId(1), 9000));

        let tube = state.tube(TubeId(1)).unwrap();
        assert!(tube.blocked);
        assert_eq!(tube.weight, 5000);
    }

    #[test]
    fn test_all_tubes_blocked() {
        let mut state = GameState::new();
        state.set_tubes(three_tubes());
        assert!(!state.all_tubes_blocked());

        for id in 1..=3 {
            let tube = state.tube(TubeId(id)).cloned().unwrap();
            state.update_tube(tube.into_blocked());
        }
        assert!(state.all_tubes_blocked());
    }

    #[test]
    fn test_start_labels() {
        assert_eq!(GameStatus::NotStarted.start_label(), Some("START"));
        assert_eq!(GameStatus::Paused.start_label(), Some("RESUME"));
        assert_eq!(GameStatus::Finished.start_label(), Some("RESTART"));
        assert_eq!(GameStatus::Started.start_label(), None);
    }
}
