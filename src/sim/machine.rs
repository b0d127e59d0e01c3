//! Status transitions as a pure reducer
//!
//! `transition` never touches state or time. The store applies `ResetGame`
//! itself; the session interprets the remaining effects against its timer.

use super::state::GameStatus;

/// Player- or scheduler-issued status commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start button
    Start,
    /// Pause button (toggle)
    TogglePause,
    /// Time up, overshoot or all tubes blocked
    End,
}

/// Side effects requested by a transition, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Fresh tubes, target weight and countdown
    ResetGame,
    HideScoreboard,
    /// Cancel any running timer, then install a new one
    ArmTimer,
    CancelTimer,
    RevealScoreboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub status: GameStatus,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(status: GameStatus) -> Self {
        Self {
            status,
            effects: Vec::new(),
        }
    }
}

pub fn transition(status: GameStatus, command: Command) -> Transition {
    use super::GameStatus::*;

    match (status, command) {
        (Started, Command::Start) => Transition::stay(Started),
        (Started, Command::TogglePause) => Transition {
            status: Paused,
            effects: vec![Effect::CancelTimer],
        },
        (Paused, Command::Start | Command::TogglePause) => Transition {
            status: Started,
            effects: vec![Effect::ArmTimer],
        },
        (NotStarted, Command::Start | Command::TogglePause) => Transition {
            status: Started,
            effects: vec![Effect::ResetGame, Effect::ArmTimer],
        },
        (Finished, Command::Start | Command::TogglePause) => Transition {
            status: Started,
            effects: vec![Effect::ResetGame, Effect::HideScoreboard, Effect::ArmTimer],
        },
        (Finished, Command::End) => Transition::stay(Finished),
        (_, Command::End) => Transition {
            status: Finished,
            effects: vec![Effect::CancelTimer, Effect::RevealScoreboard],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameStatus::*;

    #[test]
    fn test_start_from_idle_resets_and_arms() {
        let t = transition(NotStarted, Command::Start);
        assert_eq!(t.status, Started);
        assert_eq!(t.effects, vec![Effect::ResetGame, Effect::ArmTimer]);
    }

    #[test]
    fn test_restart_hides_scoreboard() {
        let t = transition(Finished, Command::Start);
        assert_eq!(t.status, Started);
        assert!(t.effects.contains(&Effect::ResetGame));
        assert!(t.effects.contains(&Effect::HideScoreboard));
    }

    #[test]
    fn test_pause_is_a_toggle() {
        let paused = transition(Started, Command::TogglePause);
        assert_eq!(paused.status, Paused);
        assert_eq!(paused.effects, vec![Effect::CancelTimer]);

        let resumed = transition(Paused, Command::TogglePause);
        assert_eq!(resumed.status, Started);
        assert_eq!(resumed.effects, vec![Effect::ArmTimer]);
    }

    #[test]
    fn test_toggle_when_idle_starts_fresh() {
        assert_eq!(
            transition(NotStarted, Command::TogglePause),
            transition(NotStarted, Command::Start)
        );
    }

    #[test]
    fn test_start_while_running_is_noop() {
        assert_eq!(transition(Started, Command::Start), Transition::stay(Started));
    }

    #[test]
    fn test_end_is_idempotent() {
        for status in [NotStarted, Started, Paused] {
            let t = transition(status, Command::End);
            assert_eq!(t.status, Finished);
            assert_eq!(t.effects, vec![Effect::CancelTimer, Effect::RevealScoreboard]);
        }
        assert!(transition(Finished, Command::End).effects.is_empty());
    }
}
