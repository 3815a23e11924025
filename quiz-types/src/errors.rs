use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::RoundPhase;

/// Synchronous rejection of a session operation. The session is left
/// unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundError {
    InvalidPhase { phase: RoundPhase },
    AllPlayersAnswered,
    SubmissionInFlight,
    EmptyAnswer,
    QuestionHasNoPlayers,
    AlreadyFinalized,
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundError::InvalidPhase { phase } => {
                write!(f, "operation not allowed in phase {phase:?}")
            }
            RoundError::AllPlayersAnswered => write!(f, "every player already has an answer"),
            RoundError::SubmissionInFlight => write!(f, "a submission is already being processed"),
            RoundError::EmptyAnswer => write!(f, "submitted answer is empty"),
            RoundError::QuestionHasNoPlayers => write!(f, "question has no players"),
            RoundError::AlreadyFinalized => write!(f, "round result was already produced"),
        }
    }
}

impl Error for RoundError {}

/// Failure reported by an external collaborator (question store, validator,
/// ledger, club feed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LoadError {
    NotFound { id: String },
    Unavailable { message: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound { id } => write!(f, "not found: {id}"),
            LoadError::Unavailable { message } => write!(f, "unavailable: {message}"),
        }
    }
}

impl Error for LoadError {}
