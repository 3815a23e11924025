pub mod config;
pub mod manager;
pub mod ports;
pub mod runner;
pub mod suggestion;

pub use config::Config;
pub use manager::{EngineChannels, EngineError, FinishedRound, RoundManager};
pub use ports::{AnswerValidator, CerisesLedger, ClubFeed, QuestionLoader};
pub use runner::{CompletionReason, RoundEvent, RoundRunner};
pub use suggestion::SuggestionService;
