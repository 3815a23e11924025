use quiz_types::{Player, RoundResult, UserAnswer};

/// Canonical form used to compare a submitted club name against a player's
/// true club: trimmed and lowercased, nothing else. Accents and punctuation
/// are compared as typed.
pub fn normalize_club_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub struct ScoringEngine;

impl ScoringEngine {
    /// Cerises per correct answer; also the per-answer display score.
    pub const CERISES_PER_CORRECT: u32 = 10;

    /// Cap on the base + streak portion of the award. The time bonus is
    /// added after the cap.
    pub const BASE_AWARD_CAP: u32 = 200;

    /// Bonus earned at the moment a streak reaches `streak`. A streak that
    /// breaks and rebuilds crosses the low thresholds again and earns them
    /// again; nothing further accrues past 12 within one unbroken streak.
    pub fn threshold_bonus(streak: u32) -> u32 {
        match streak {
            3 | 6 => 10,
            9 | 12 => 15,
            _ => 0,
        }
    }

    /// Convert a finished round into its result. Pure: identical inputs
    /// always produce an identical `RoundResult`.
    ///
    /// Answers are replayed in player order to recompute correctness and the
    /// incremental streak-bonus accrual. Unanswered players count toward
    /// `total_players` only.
    pub fn score(
        players: &[Player],
        answers: &[UserAnswer],
        time_remaining_seconds: u32,
    ) -> RoundResult {
        let mut correct_count = 0u32;
        let mut streak = 0u32;
        let mut streak_bonus = 0u32;

        for (player, answer) in players.iter().zip(answers.iter()) {
            let correct = normalize_club_name(&answer.submitted_club_name)
                == normalize_club_name(&player.current_club);
            if correct {
                correct_count += 1;
                streak += 1;
                streak_bonus += Self::threshold_bonus(streak);
            } else {
                streak = 0;
            }
        }

        let base = correct_count * Self::CERISES_PER_CORRECT;
        let time_bonus = time_remaining_seconds;
        let cerises_earned = (base + streak_bonus).min(Self::BASE_AWARD_CAP) + time_bonus;

        RoundResult {
            correct_count,
            total_players: players.len() as u32,
            score: base,
            cerises_earned,
            streak_bonus,
            time_bonus,
            time_remaining_seconds,
        }
    }
}
