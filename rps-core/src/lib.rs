mod predictor;

use std::{fmt, str::FromStr};

use thiserror::Error;

pub use predictor::{COLD_START_THRESHOLD, MoveCounts, predict_next_move};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RpsMove {
    Rock,
    Paper,
    Scissors,
    /// Placeholder for records that do not represent a played hand.
    Undefined,
}

impl RpsMove {
    /// Canonical order, also used to break ties in the predictor.
    pub const PLAYABLE: [RpsMove; 3] = [RpsMove::Rock, RpsMove::Paper, RpsMove::Scissors];

    pub fn is_playable(&self) -> bool {
        !matches!(self, RpsMove::Undefined)
    }

    /// The move that beats `self`.
    pub fn counter(&self) -> Result<RpsMove, UndefinedMoveError> {
        match self {
            RpsMove::Rock => Ok(RpsMove::Paper),
            RpsMove::Paper => Ok(RpsMove::Scissors),
            RpsMove::Scissors => Ok(RpsMove::Rock),
            RpsMove::Undefined => Err(UndefinedMoveError),
        }
    }

    pub fn beats(&self, other: &RpsMove) -> bool {
        matches!(
            (self, other),
            (RpsMove::Rock, RpsMove::Scissors)
                | (RpsMove::Paper, RpsMove::Rock)
                | (RpsMove::Scissors, RpsMove::Paper)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RpsMove::Rock => "ROCK",
            RpsMove::Paper => "PAPER",
            RpsMove::Scissors => "SCISSORS",
            RpsMove::Undefined => "UNDEFINED",
        }
    }
}

impl fmt::Display for RpsMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RpsMove {
    type Err = ParseRpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [
            RpsMove::Rock,
            RpsMove::Paper,
            RpsMove::Scissors,
            RpsMove::Undefined,
        ]
        .into_iter()
        .find(|mv| mv.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| ParseRpsError::UnknownMove(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RpsOutcome {
    Win,
    Lose,
    Draw,
    Quit,
}

impl RpsOutcome {
    pub const ALL: [RpsOutcome; 4] = [
        RpsOutcome::Win,
        RpsOutcome::Lose,
        RpsOutcome::Draw,
        RpsOutcome::Quit,
    ];

    /// Outcome from the player's point of view.
    pub fn determine(player_move: RpsMove, computer_move: RpsMove) -> RpsOutcome {
        if player_move == computer_move {
            RpsOutcome::Draw
        } else if player_move.beats(&computer_move) {
            RpsOutcome::Win
        } else {
            RpsOutcome::Lose
        }
    }

    /// Whether the outcome concludes a played round (counts towards games played).
    pub fn is_round_result(&self) -> bool {
        !matches!(self, RpsOutcome::Quit)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RpsOutcome::Win => "WIN",
            RpsOutcome::Lose => "LOSE",
            RpsOutcome::Draw => "DRAW",
            RpsOutcome::Quit => "QUIT",
        }
    }
}

impl fmt::Display for RpsOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RpsOutcome {
    type Err = ParseRpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RpsOutcome::ALL
            .into_iter()
            .find(|outcome| outcome.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseRpsError::UnknownOutcome(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RpsGameStatus {
    NotStarted,
    Started,
    Paused,
    Completed,
    Terminated,
}

impl RpsGameStatus {
    pub const ALL: [RpsGameStatus; 5] = [
        RpsGameStatus::NotStarted,
        RpsGameStatus::Started,
        RpsGameStatus::Paused,
        RpsGameStatus::Completed,
        RpsGameStatus::Terminated,
    ];

    pub fn is_terminal(&self) -> bool {
        matches!(self, RpsGameStatus::Completed | RpsGameStatus::Terminated)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RpsGameStatus::Started | RpsGameStatus::Paused)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RpsGameStatus::NotStarted => "NOT_STARTED",
            RpsGameStatus::Started => "STARTED",
            RpsGameStatus::Paused => "PAUSED",
            RpsGameStatus::Completed => "COMPLETED",
            RpsGameStatus::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for RpsGameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RpsGameStatus {
    type Err = ParseRpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RpsGameStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseRpsError::UnknownStatus(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseRpsError {
    #[error("unknown move: {0}")]
    UnknownMove(String),
    #[error("unknown outcome: {0}")]
    UnknownOutcome(String),
    #[error("unknown game status: {0}")]
    UnknownStatus(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("Cannot get counter move for undefined move.")]
pub struct UndefinedMoveError;
