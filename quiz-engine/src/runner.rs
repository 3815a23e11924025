use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use quiz_core::{RoundSession, SubmitOutcome, TickOutcome};
use quiz_types::{PlayerId, Question, RoundError, RoundPhase, RoundSnapshot};
use serde::Serialize;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// Why a round reached `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompletionReason {
    AllPlayersAnswered,
    TimerExpired,
}

/// Typed notifications handed to the embedding UI. Results are passed
/// explicitly to the channel's consumer; there is no ambient broadcast.
#[derive(Debug, Clone, Serialize)]
pub enum RoundEvent {
    Tick {
        remaining_seconds: u32,
    },
    AnswerRecorded {
        player_id: PlayerId,
        correct: bool,
        streak_count: u32,
    },
    Completed {
        reason: CompletionReason,
    },
    Abandoned,
}

/// Drives one `RoundSession` with a periodic clock task. Exactly one timer
/// is active at a time: starting a new round cancels the previous timer,
/// and abandoning or dropping the runner stops it outright.
pub struct RoundRunner {
    session: Arc<Mutex<RoundSession>>,
    timer: Option<JoinHandle<()>>,
    tick_interval: Duration,
    submit_guard: Arc<AtomicBool>,
    events_tx: mpsc::Sender<RoundEvent>,
}

impl RoundRunner {
    pub fn new(tick_interval: Duration) -> (Self, mpsc::Receiver<RoundEvent>) {
        let (events_tx, events_rx) = mpsc::channel(32);
        (
            Self {
                session: Arc::new(Mutex::new(RoundSession::new())),
                timer: None,
                tick_interval,
                submit_guard: Arc::new(AtomicBool::new(false)),
                events_tx,
            },
            events_rx,
        )
    }

    /// Start playing `question` and spawn the clock task. A session whose
    /// previous round completed is discarded and replaced; a round still in
    /// progress must be abandoned first.
    pub async fn start(
        &mut self,
        question: Question,
        duration_seconds: u32,
    ) -> Result<RoundSnapshot, RoundError> {
        let snapshot = {
            let mut session = self.session.lock().await;
            if session.phase() == RoundPhase::Completed {
                *session = RoundSession::new();
            }
            session.start(question, duration_seconds)?;
            match session.snapshot() {
                Some(snapshot) => snapshot,
                None => return Err(RoundError::InvalidPhase {
                    phase: session.phase(),
                }),
            }
        };

        self.cancel_timer();
        let session = Arc::clone(&self.session);
        let events_tx = self.events_tx.clone();
        let tick_interval = self.tick_interval;
        self.timer = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_interval);
            interval.tick().await; // the first tick completes immediately
            loop {
                interval.tick().await;
                let outcome = session.lock().await.tick();
                let event = match outcome {
                    TickOutcome::Running { remaining_seconds } => {
                        RoundEvent::Tick { remaining_seconds }
                    }
                    TickOutcome::Expired => RoundEvent::Completed {
                        reason: CompletionReason::TimerExpired,
                    },
                    TickOutcome::Ignored => break,
                };
                let completed = matches!(event, RoundEvent::Completed { .. });
                if events_tx.send(event).await.is_err() || completed {
                    break;
                }
            }
        }));

        Ok(snapshot)
    }

    /// Record an answer for the current player. Submissions are serialized:
    /// an overlapping submission for the same slot is rejected, so answers
    /// always grow in strict player order.
    pub async fn submit_answer(&self, raw: &str) -> Result<SubmitOutcome, RoundError> {
        if self
            .submit_guard
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(RoundError::SubmissionInFlight);
        }

        let (result, player_id, all_answered) = {
            let mut session = self.session.lock().await;
            let result = session.submit_answer(raw);
            let player_id = session.answers().last().map(|a| a.player_id);
            let all_answered = session.current_player_index() == session.total_players();
            (result, player_id, all_answered)
        };
        self.submit_guard.store(false, Ordering::SeqCst);

        let outcome = result?;
        if let Some(player_id) = player_id {
            let _ = self
                .events_tx
                .send(RoundEvent::AnswerRecorded {
                    player_id,
                    correct: outcome.correct,
                    streak_count: outcome.streak_count,
                })
                .await;
        }
        if outcome.round_over {
            let reason = if all_answered {
                CompletionReason::AllPlayersAnswered
            } else {
                CompletionReason::TimerExpired
            };
            let _ = self
                .events_tx
                .send(RoundEvent::Completed { reason })
                .await;
        }

        Ok(outcome)
    }

    /// Abandon the in-progress round and stop the clock. No result is ever
    /// produced for the abandoned round.
    pub async fn abandon(&mut self) {
        self.cancel_timer();
        let was_playing = {
            let mut session = self.session.lock().await;
            let playing = session.phase() == RoundPhase::Playing;
            session.abandon();
            playing
        };
        if was_playing {
            let _ = self.events_tx.send(RoundEvent::Abandoned).await;
        }
    }

    pub async fn snapshot(&self) -> Option<RoundSnapshot> {
        self.session.lock().await.snapshot()
    }

    pub(crate) fn session(&self) -> Arc<Mutex<RoundSession>> {
        Arc::clone(&self.session)
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for RoundRunner {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
