use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub type ClubId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClubKind {
    Club,
    NationalTeam,
}

/// Static reference entry for one club, including the alternate spellings
/// the autocomplete index matches against.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub name_variations: Vec<String>,
    pub kind: ClubKind,
    pub country: Option<String>,
    pub league: Option<String>,
}

/// One ranked autocomplete hit. Derived per query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClubSuggestion {
    pub id: ClubId,
    pub name: String,
    pub league: Option<String>,
    pub relevance: f64,
}
