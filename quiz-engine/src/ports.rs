use async_trait::async_trait;
use quiz_types::{Club, LoadError, Question, QuestionId, QuestionSummary, RoundResult, UserAnswer};
use uuid::Uuid;

/// Source of questions. Implemented by the hosted backend adapter; failures
/// surface to the caller without retry.
#[async_trait]
pub trait QuestionLoader: Send + Sync {
    async fn load_question(&self, id: QuestionId) -> Result<Question, LoadError>;
    async fn load_random_question(&self) -> Result<Question, LoadError>;
    async fn list_available_questions(&self) -> Result<Vec<QuestionSummary>, LoadError>;
}

/// Trusted remote validation mirroring the local scoring rules. Its result
/// is preferred when it is reachable; local scoring is the fallback.
#[async_trait]
pub trait AnswerValidator: Send + Sync {
    async fn validate(
        &self,
        question_id: QuestionId,
        answers: &[UserAnswer],
        time_remaining_seconds: u32,
        streak_count: u32,
    ) -> Result<RoundResult, LoadError>;
}

/// Credits earned cerises to a user's balance. The engine reports the
/// award; it never mutates a balance itself.
#[async_trait]
pub trait CerisesLedger: Send + Sync {
    async fn credit(&self, user_id: Uuid, cerises: u32) -> Result<(), LoadError>;
}

/// Read-only reference feed that populates the club index.
#[async_trait]
pub trait ClubFeed: Send + Sync {
    async fn fetch_clubs(&self) -> Result<Vec<Club>, LoadError>;
}
