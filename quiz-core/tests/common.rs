use quiz_core::RoundSession;
use quiz_types::{Player, Question};
use uuid::Uuid;

/// Creates a test player with the given true club and display order.
pub fn create_test_player(club: &str, order: i32) -> Player {
    Player {
        id: Uuid::new_v4(),
        name: format!("Player {order}"),
        current_club: club.to_string(),
        photo_url: None,
        nationality: None,
        position: None,
        display_order: order,
    }
}

/// Creates a question whose players' true clubs are `clubs`, in order.
pub fn create_test_question(clubs: &[&str]) -> Question {
    let players = clubs
        .iter()
        .enumerate()
        .map(|(i, club)| create_test_player(club, i as i32))
        .collect();
    Question::new(Uuid::new_v4(), "Club Actuel", players)
}

/// Creates a session already playing a question over `clubs`.
pub fn create_playing_session(clubs: &[&str], duration_seconds: u32) -> RoundSession {
    let mut session = RoundSession::new();
    session
        .start(create_test_question(clubs), duration_seconds)
        .expect("failed to start test session");
    session
}
