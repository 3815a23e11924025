pub mod club;
pub mod errors;
pub mod game;

// Re-export all types
pub use club::*;
pub use errors::*;
pub use game::*;
