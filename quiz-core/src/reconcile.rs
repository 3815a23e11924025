use std::collections::HashMap;

use quiz_types::{Player, PlayerId, UserAnswer};

use crate::scoring::normalize_club_name;

/// Per-player correctness for a finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub correct_count: u32,
    pub per_player: HashMap<PlayerId, bool>,
}

pub struct ResultAggregator;

impl ResultAggregator {
    /// Reconcile recorded answers against the players' true clubs, using
    /// the same normalization rule as answer submission. Players without an
    /// answer appear in the map as incorrect. This is the review shown to
    /// the player, and the fallback when the remote validator is
    /// unreachable.
    pub fn reconcile(players: &[Player], answers: &[UserAnswer]) -> Reconciliation {
        let by_player: HashMap<PlayerId, &UserAnswer> =
            answers.iter().map(|a| (a.player_id, a)).collect();

        let mut correct_count = 0u32;
        let mut per_player = HashMap::with_capacity(players.len());
        for player in players {
            let correct = by_player
                .get(&player.id)
                .map(|answer| {
                    normalize_club_name(&answer.submitted_club_name)
                        == normalize_club_name(&player.current_club)
                })
                .unwrap_or(false);
            if correct {
                correct_count += 1;
            }
            per_player.insert(player.id, correct);
        }

        Reconciliation {
            correct_count,
            per_player,
        }
    }
}
