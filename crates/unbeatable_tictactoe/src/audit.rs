//! Exhaustive audit of the computer against every human strategy.
//!
//! Starting from a controller, every legal human move is tried at every
//! turn while the computer answers with its search. Each finished game is
//! tallied by outcome. A sound search never lets the human win.

use crate::controller::{TurnController, TurnState};
use crate::outcome::Outcome;
use crate::types::Player;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Tally of finished games in an audit.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct AuditReport {
    /// Distinct games played to the end.
    games: u64,
    /// Games won by the human (X).
    human_wins: u64,
    /// Games won by the computer (O).
    computer_wins: u64,
    /// Drawn games.
    draws: u64,
}

impl AuditReport {
    /// True when no human strategy beat the computer.
    pub fn computer_never_loses(&self) -> bool {
        self.human_wins == 0
    }

    fn record(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome.winner() {
            Some(Player::X) => self.human_wins += 1,
            Some(Player::O) => self.computer_wins += 1,
            None => self.draws += 1,
        }
    }
}

impl std::fmt::Display for AuditReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games: {} computer wins, {} draws, {} human wins",
            self.games, self.computer_wins, self.draws, self.human_wins
        )
    }
}

/// Plays out every human strategy from `controller`'s position.
///
/// The controller itself is not modified.
#[instrument(skip(controller), fields(board = %controller.board().to_compact()))]
pub fn audit_all_strategies(controller: &TurnController) -> AuditReport {
    let mut report = AuditReport::default();
    explore(controller.clone(), &mut report);
    info!(%report, "Audit complete");
    report
}

fn explore(mut controller: TurnController, report: &mut AuditReport) {
    match controller.state() {
        TurnState::GameOver => report.record(controller.outcome()),
        TurnState::ComputerThinking => match controller.request_computer_move() {
            Ok(_) => explore(controller, report),
            Err(e) => warn!(error = %e, "Computer failed to move during audit"),
        },
        TurnState::WaitingForHuman => {
            for pos in controller.board().empty_positions() {
                let mut next = controller.clone();
                if next.apply_human_move(pos.index()).is_ok() {
                    explore(next, report);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_position_counts_one_game() {
        let mut controller = TurnController::new();
        controller.apply_human_move(0).unwrap();
        controller.request_computer_move().unwrap();
        // Drive to the end along one line of play.
        while controller.state() != TurnState::GameOver {
            match controller.state() {
                TurnState::WaitingForHuman => {
                    let pos = controller.board().empty_positions().next().unwrap();
                    controller.apply_human_move(pos.index()).unwrap();
                }
                TurnState::ComputerThinking => {
                    controller.request_computer_move().unwrap();
                }
                TurnState::GameOver => {}
            }
        }

        let report = audit_all_strategies(&controller);
        assert_eq!(*report.games(), 1);
        assert!(report.computer_never_loses());
    }

    #[test]
    fn test_display() {
        let report = AuditReport {
            games: 3,
            human_wins: 0,
            computer_wins: 1,
            draws: 2,
        };
        assert_eq!(
            report.to_string(),
            "3 games: 1 computer wins, 2 draws, 0 human wins"
        );
    }
}
