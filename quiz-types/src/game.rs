use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub type QuestionId = Uuid;
pub type PlayerId = Uuid;

/// A football player presented during a round. Immutable once loaded into a
/// session; `display_order` defines the presentation sequence.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub current_club: String,
    pub photo_url: Option<String>,
    pub nationality: Option<String>,
    pub position: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub players: Vec<Player>,
}

impl Question {
    /// Build a question with its players ordered by `display_order`.
    pub fn new(id: QuestionId, title: impl Into<String>, mut players: Vec<Player>) -> Self {
        players.sort_by_key(|p| p.display_order);
        Self {
            id,
            title: title.into(),
            players,
        }
    }
}

/// Listing row for the question selection screen.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionSummary {
    pub id: QuestionId,
    pub title: String,
}

/// One submitted answer. At most one per player, recorded in player order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserAnswer {
    pub player_id: PlayerId,
    pub submitted_club_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundPhase {
    Selection, // choosing a question, no active clock
    Playing,   // clock running, answers accepted
    Completed, // terminal, scored exactly once
}

/// Final outcome of one round. Produced exactly once per session; identical
/// inputs always yield an identical result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundResult {
    pub correct_count: u32,
    pub total_players: u32,
    pub score: u32,
    pub cerises_earned: u32,
    pub streak_bonus: u32,
    pub time_bonus: u32,
    pub time_remaining_seconds: u32,
}

/// Client-safe view of a session. Never exposes the players' true clubs
/// while the round is running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundSnapshot {
    pub question_id: QuestionId,
    pub question_title: String,
    pub phase: RoundPhase,
    pub current_player_index: u32,
    pub total_players: u32,
    pub time_remaining_seconds: u32,
    pub streak_count: u32,
    pub answers: Vec<UserAnswer>,
    pub started_at: String, // ISO 8601 string
}
