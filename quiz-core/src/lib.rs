pub mod club_index;
pub mod reconcile;
pub mod scoring;
pub mod session;

// Re-export main components
pub use club_index::*;
pub use reconcile::*;
pub use scoring::*;
pub use session::*;
