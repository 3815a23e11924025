use chrono::Utc;
use quiz_types::{
    Player, Question, RoundError, RoundPhase, RoundResult, RoundSnapshot, UserAnswer,
};
use tracing::info;

use crate::scoring::{ScoringEngine, normalize_club_name};

/// Round length used when the caller does not supply one.
pub const DEFAULT_ROUND_DURATION_SECONDS: u32 = 60;

/// What a single accepted submission did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub correct: bool,
    pub streak_count: u32,
    pub round_over: bool,
}

/// Effect of one clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining_seconds: u32 },
    Expired,
    Ignored,
}

/// One playthrough of a single question, from question selection to scored
/// completion. Mutated only by `submit_answer` and the per-second tick;
/// answers accumulate in lock-step with the current player index.
#[derive(Debug)]
pub struct RoundSession {
    question: Option<Question>,
    phase: RoundPhase,
    current_player_index: usize,
    answers: Vec<UserAnswer>,
    time_remaining_seconds: u32,
    streak_count: u32,
    streak_bonus_accrued: u32,
    finalized: bool,
    started_at: Option<String>,
}

impl RoundSession {
    pub fn new() -> Self {
        Self {
            question: None,
            phase: RoundPhase::Selection,
            current_player_index: 0,
            answers: Vec::new(),
            time_remaining_seconds: 0,
            streak_count: 0,
            streak_bonus_accrued: 0,
            finalized: false,
            started_at: None,
        }
    }

    /// Leave `Selection` and start playing `question` with a full clock.
    pub fn start(&mut self, question: Question, duration_seconds: u32) -> Result<(), RoundError> {
        if self.phase != RoundPhase::Selection {
            return Err(RoundError::InvalidPhase { phase: self.phase });
        }
        if question.players.is_empty() {
            return Err(RoundError::QuestionHasNoPlayers);
        }

        info!(question = %question.id, players = question.players.len(), "round started");
        self.question = Some(question);
        self.phase = RoundPhase::Playing;
        self.current_player_index = 0;
        self.answers.clear();
        self.time_remaining_seconds = duration_seconds;
        self.streak_count = 0;
        self.streak_bonus_accrued = 0;
        self.finalized = false;
        self.started_at = Some(Utc::now().to_rfc3339());
        Ok(())
    }

    /// Record the answer for the current player and advance. The submitted
    /// text and the player's true club are both compared as
    /// `trim().to_lowercase()`; no other normalization is applied.
    pub fn submit_answer(&mut self, raw: &str) -> Result<SubmitOutcome, RoundError> {
        if self.phase != RoundPhase::Playing {
            return Err(RoundError::InvalidPhase { phase: self.phase });
        }

        let (player_id, correct, total_players) = {
            let Some(question) = self.question.as_ref() else {
                return Err(RoundError::InvalidPhase { phase: self.phase });
            };
            let total_players = question.players.len();
            if self.current_player_index >= total_players {
                return Err(RoundError::AllPlayersAnswered);
            }
            if raw.trim().is_empty() {
                return Err(RoundError::EmptyAnswer);
            }

            let player = &question.players[self.current_player_index];
            let correct = normalize_club_name(raw) == normalize_club_name(&player.current_club);
            (player.id, correct, total_players)
        };

        self.answers.push(UserAnswer {
            player_id,
            submitted_club_name: raw.to_string(),
        });
        if correct {
            self.streak_count += 1;
            self.streak_bonus_accrued += ScoringEngine::threshold_bonus(self.streak_count);
        } else {
            self.streak_count = 0;
        }
        self.current_player_index += 1;

        let round_over =
            self.current_player_index == total_players || self.time_remaining_seconds == 0;
        if round_over {
            self.complete();
        }

        Ok(SubmitOutcome {
            correct,
            streak_count: self.streak_count,
            round_over,
        })
    }

    /// Advance the clock by one second. Once the session has completed,
    /// further ticks are ignored, so the clock reaches zero at most once.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != RoundPhase::Playing {
            return TickOutcome::Ignored;
        }

        self.time_remaining_seconds = self.time_remaining_seconds.saturating_sub(1);
        if self.time_remaining_seconds == 0 {
            self.complete();
            TickOutcome::Expired
        } else {
            TickOutcome::Running {
                remaining_seconds: self.time_remaining_seconds,
            }
        }
    }

    /// Discard an in-progress round and return to question selection. No
    /// result is ever produced for the abandoned round. A completed session
    /// stays completed; abandoning from `Selection` is a no-op.
    pub fn abandon(&mut self) {
        if self.phase != RoundPhase::Playing {
            return;
        }

        info!("round abandoned");
        self.question = None;
        self.phase = RoundPhase::Selection;
        self.current_player_index = 0;
        self.answers.clear();
        self.time_remaining_seconds = 0;
        self.streak_count = 0;
        self.streak_bonus_accrued = 0;
        self.started_at = None;
    }

    /// Score the completed round. Callable exactly once; the scoring engine
    /// is never invoked a second time for the same session.
    pub fn finalize(&mut self) -> Result<RoundResult, RoundError> {
        if self.phase != RoundPhase::Completed {
            return Err(RoundError::InvalidPhase { phase: self.phase });
        }
        if self.finalized {
            return Err(RoundError::AlreadyFinalized);
        }

        let result = match self.question.as_ref() {
            Some(question) => ScoringEngine::score(
                &question.players,
                &self.answers,
                self.time_remaining_seconds,
            ),
            None => return Err(RoundError::InvalidPhase { phase: self.phase }),
        };
        self.finalized = true;

        info!(
            correct = result.correct_count,
            cerises = result.cerises_earned,
            "round scored"
        );
        Ok(result)
    }

    /// Client-safe view of the session. `None` until a question is chosen.
    pub fn snapshot(&self) -> Option<RoundSnapshot> {
        let question = self.question.as_ref()?;
        Some(RoundSnapshot {
            question_id: question.id,
            question_title: question.title.clone(),
            phase: self.phase,
            current_player_index: self.current_player_index as u32,
            total_players: question.players.len() as u32,
            time_remaining_seconds: self.time_remaining_seconds,
            streak_count: self.streak_count,
            answers: self.answers.clone(),
            started_at: self.started_at.clone().unwrap_or_default(),
        })
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// The player awaiting an answer, if any.
    pub fn current_player(&self) -> Option<&Player> {
        self.question
            .as_ref()?
            .players
            .get(self.current_player_index)
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn total_players(&self) -> usize {
        self.question.as_ref().map_or(0, |q| q.players.len())
    }

    pub fn answers(&self) -> &[UserAnswer] {
        &self.answers
    }

    pub fn time_remaining_seconds(&self) -> u32 {
        self.time_remaining_seconds
    }

    pub fn streak_count(&self) -> u32 {
        self.streak_count
    }

    /// Streak bonus accrued so far, threshold by threshold, as the streak
    /// grew during this round.
    pub fn streak_bonus_accrued(&self) -> u32 {
        self.streak_bonus_accrued
    }

    fn complete(&mut self) {
        self.phase = RoundPhase::Completed;
        info!(
            answered = self.answers.len(),
            remaining_seconds = self.time_remaining_seconds,
            "round completed"
        );
    }
}

impl Default for RoundSession {
    fn default() -> Self {
        Self::new()
    }
}
