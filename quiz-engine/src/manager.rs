use std::collections::HashMap;
use std::sync::Arc;

use quiz_core::{ClubIndex, ResultAggregator, SubmitOutcome};
use quiz_types::{
    ClubSuggestion, LoadError, PlayerId, Question, QuestionId, QuestionSummary, RoundError,
    RoundResult, RoundSnapshot,
};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::ports::{AnswerValidator, CerisesLedger, ClubFeed, QuestionLoader};
use crate::runner::{RoundEvent, RoundRunner};
use crate::suggestion::SuggestionService;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("round rejected input: {0}")]
    Round(#[from] RoundError),
    #[error("collaborator failure: {0}")]
    Load(#[from] LoadError),
}

/// Everything the UI needs once a round is finished: the award plus the
/// per-player review shown on the results screen.
#[derive(Debug, Clone, Serialize)]
pub struct FinishedRound {
    pub result: RoundResult,
    pub per_player: HashMap<PlayerId, bool>,
}

/// Receivers the embedding UI consumes.
pub struct EngineChannels {
    pub events: mpsc::Receiver<RoundEvent>,
    pub suggestions: mpsc::Receiver<Vec<ClubSuggestion>>,
}

/// Front door of the engine: wires the question loader, the club reference
/// feed, the round runner and the remote validator/ledger together.
pub struct RoundManager {
    config: Config,
    questions: Arc<dyn QuestionLoader>,
    validator: Arc<dyn AnswerValidator>,
    ledger: Arc<dyn CerisesLedger>,
    runner: RoundRunner,
    suggestions: SuggestionService,
}

impl RoundManager {
    /// Build a manager, snapshotting the club reference feed into the
    /// autocomplete index. A feed outage degrades autocomplete to "no
    /// suggestions" instead of failing construction.
    pub async fn new(
        config: Config,
        questions: Arc<dyn QuestionLoader>,
        validator: Arc<dyn AnswerValidator>,
        ledger: Arc<dyn CerisesLedger>,
        feed: Arc<dyn ClubFeed>,
    ) -> (Self, EngineChannels) {
        let index = match feed.fetch_clubs().await {
            Ok(clubs) => {
                info!(clubs = clubs.len(), "club reference feed loaded");
                ClubIndex::new(clubs)
            }
            Err(err) => {
                warn!(error = %err, "club reference feed unavailable, autocomplete disabled");
                ClubIndex::empty()
            }
        };

        let (runner, events) = RoundRunner::new(Duration::from_millis(config.tick_interval_ms));
        let (suggestions, suggestion_results) = SuggestionService::new(
            Arc::new(index),
            Duration::from_millis(config.suggestion_debounce_ms),
            config.suggestion_limit,
        );

        (
            Self {
                config,
                questions,
                validator,
                ledger,
                runner,
                suggestions,
            },
            EngineChannels {
                events,
                suggestions: suggestion_results,
            },
        )
    }

    pub async fn list_questions(&self) -> Result<Vec<QuestionSummary>, EngineError> {
        Ok(self.questions.list_available_questions().await?)
    }

    pub async fn start_round(&mut self, id: QuestionId) -> Result<RoundSnapshot, EngineError> {
        let question = self.questions.load_question(id).await?;
        self.begin(question).await
    }

    pub async fn start_random_round(&mut self) -> Result<RoundSnapshot, EngineError> {
        let question = self.questions.load_random_question().await?;
        self.begin(question).await
    }

    /// Feed one keystroke's worth of autocomplete input; ranked suggestions
    /// arrive on the suggestions channel after the quiet period.
    pub fn update_suggestion_query(&mut self, text: &str) {
        self.suggestions.on_query_changed(text);
    }

    pub async fn submit_answer(&mut self, raw: &str) -> Result<SubmitOutcome, EngineError> {
        Ok(self.runner.submit_answer(raw).await?)
    }

    /// Abandon the in-progress round: the clock stops, pending suggestion
    /// lookups are cancelled, and no result is produced.
    pub async fn abandon_round(&mut self) {
        self.suggestions.cancel_pending();
        self.runner.abandon().await;
    }

    pub async fn snapshot(&self) -> Option<RoundSnapshot> {
        self.runner.snapshot().await
    }

    /// Score a completed round. The authoritative validator's result is
    /// preferred; when it is unreachable the locally computed result is used
    /// so a transient outage never withholds the player's result. The
    /// earned cerises are then reported to the ledger.
    pub async fn finish_round(&mut self, user_id: Uuid) -> Result<FinishedRound, EngineError> {
        let session = self.runner.session();
        let (local, question_id, players, answers, time_remaining, streak_count) = {
            let mut session = session.lock().await;
            let local = session.finalize()?;
            let Some(question) = session.question() else {
                return Err(EngineError::Round(RoundError::InvalidPhase {
                    phase: session.phase(),
                }));
            };
            (
                local,
                question.id,
                question.players.clone(),
                session.answers().to_vec(),
                session.time_remaining_seconds(),
                session.streak_count(),
            )
        };

        let result = match self
            .validator
            .validate(question_id, &answers, time_remaining, streak_count)
            .await
        {
            Ok(remote) => remote,
            Err(err) => {
                warn!(error = %err, "authoritative validation unavailable, using local scoring");
                local
            }
        };

        let per_player = ResultAggregator::reconcile(&players, &answers).per_player;

        if let Err(err) = self.ledger.credit(user_id, result.cerises_earned).await {
            warn!(error = %err, user = %user_id, "cerises credit failed");
        }

        info!(
            user = %user_id,
            cerises = result.cerises_earned,
            correct = result.correct_count,
            "round finished"
        );
        Ok(FinishedRound { result, per_player })
    }

    async fn begin(&mut self, question: Question) -> Result<RoundSnapshot, EngineError> {
        let snapshot = self
            .runner
            .start(question, self.config.round_duration_seconds)
            .await?;
        Ok(snapshot)
    }
}
