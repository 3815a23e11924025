use std::cmp::Ordering;

use quiz_types::{Club, ClubSuggestion};

/// Minimum trimmed query length before the index is consulted. Shorter
/// queries would match most of the reference set.
const MIN_QUERY_LEN: usize = 2;

const RELEVANCE_EXACT: f64 = 1.0;
const RELEVANCE_PREFIX: f64 = 0.8;
const RELEVANCE_SUBSTRING: f64 = 0.6;

/// In-memory snapshot of the club reference feed, queried for ranked
/// autocomplete suggestions.
pub struct ClubIndex {
    clubs: Vec<Club>,
}

impl ClubIndex {
    pub fn new(clubs: Vec<Club>) -> Self {
        Self { clubs }
    }

    /// An index with no reference data; every lookup returns no suggestions.
    pub fn empty() -> Self {
        Self { clubs: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.clubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty()
    }

    /// Ranked lookup over club names and their variations: relevance
    /// descending, name ascending on ties. Non-matching clubs are excluded
    /// outright rather than returned with zero relevance.
    pub fn lookup(&self, query: &str, limit: usize) -> Vec<ClubSuggestion> {
        let query = fold(query);
        if query.chars().count() < MIN_QUERY_LEN || limit == 0 {
            return Vec::new();
        }

        let mut hits: Vec<ClubSuggestion> = self
            .clubs
            .iter()
            .filter_map(|club| {
                let relevance = club_relevance(club, &query)?;
                Some(ClubSuggestion {
                    id: club.id,
                    name: club.name.clone(),
                    league: club.league.clone(),
                    relevance,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        hits.truncate(limit);
        hits
    }
}

/// Best relevance across the club's name and all of its variations, or
/// `None` when nothing matches.
fn club_relevance(club: &Club, query: &str) -> Option<f64> {
    std::iter::once(club.name.as_str())
        .chain(club.name_variations.iter().map(String::as_str))
        .filter_map(|candidate| candidate_relevance(candidate, query))
        .reduce(f64::max)
}

fn candidate_relevance(candidate: &str, query: &str) -> Option<f64> {
    let candidate = fold(candidate);
    if candidate == query {
        Some(RELEVANCE_EXACT)
    } else if candidate.starts_with(query) {
        Some(RELEVANCE_PREFIX)
    } else if candidate.contains(query) {
        Some(RELEVANCE_SUBSTRING)
    } else {
        None
    }
}

/// Case- and whitespace-insensitive matching form: lowercased, trimmed, with
/// interior whitespace runs collapsed to single spaces.
fn fold(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
