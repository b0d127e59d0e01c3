//! Read-only view of a session for the UI layer

use serde::Serialize;

use crate::scheduler::EndReason;
use crate::score::{ScoreReport, Verdict};
use crate::sim::{GameState, GameStatus, TubeId};
use crate::{grams_to_kg, ms_to_secs};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TubeView {
    pub id: TubeId,
    pub weight: u32,
    pub blocked: bool,
    /// Clicking would block it
    pub clickable: bool,
}

/// Everything the UI renders, captured at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub status: GameStatus,
    /// Start/resume/restart button label; `None` while running
    pub start_label: Option<&'static str>,
    /// Pause button is shown only while running
    pub show_pause: bool,
    /// HUD (weights and countdown) is shown while running or paused
    pub show_hud: bool,
    pub tubes: Vec<TubeView>,
    pub target_weight: u32,
    pub player_weight: u32,
    pub time_left_ms: u32,
    pub end_reason: Option<EndReason>,
    pub scoreboard: Option<ScoreReport>,
}

impl Snapshot {
    pub fn capture(
        state: &GameState,
        scoreboard: Option<ScoreReport>,
        end_reason: Option<EndReason>,
    ) -> Self {
        let status = state.status();
        let running = status == GameStatus::Started;
        let show_hud = matches!(status, GameStatus::Started | GameStatus::Paused);

        Self {
            status,
            start_label: status.start_label(),
            show_pause: running,
            show_hud,
            // tubes are only on screen during play
            tubes: if show_hud {
                state
                    .tubes()
                    .iter()
                    .map(|t| TubeView {
                        id: t.id,
                        weight: t.weight,
                        blocked: t.blocked,
                        clickable: running && !t.blocked,
                    })
                    .collect()
            } else {
                Vec::new()
            },
            target_weight: state.target_weight(),
            player_weight: state.player_weight(),
            time_left_ms: state.time_left_ms(),
            end_reason,
            scoreboard,
        }
    }

    /// HUD lines as the original screen shows them
    pub fn hud_lines(&self) -> Vec<String> {
        if !self.show_hud {
            return Vec::new();
        }
        vec![
            format!("Target Weight: {} KG", grams_to_kg(self.target_weight)),
            format!("Your Weight: {} KG", grams_to_kg(self.player_weight)),
            format!("Time left {}s", ms_to_secs(self.time_left_ms)),
        ]
    }

    /// Scoreboard headline, `None` until the game is finished
    pub fn headline(&self) -> Option<String> {
        let report = self.scoreboard?;
        Some(match report.verdict() {
            Verdict::Overshoot => format!(
                "Too heavy! {} KG over a {} KG target",
                grams_to_kg(report.player_weight),
                grams_to_kg(report.target_weight)
            ),
            Verdict::Good => format!("Great lift! Score {:.0} ({:.1}%)", report.score, report.accuracy),
            Verdict::Fair => format!("Score {:.0} ({:.1}%)", report.score, report.accuracy),
        })
    }
}
