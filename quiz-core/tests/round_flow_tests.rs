mod common;

use common::*;
use quiz_core::{ResultAggregator, RoundSession, ScoringEngine, TickOutcome};
use quiz_types::{RoundError, RoundPhase};

#[test]
fn test_full_completion_answers_every_player() {
    let clubs = ["Arsenal", "Chelsea", "Lyon", "Marseille"];
    let mut session = create_playing_session(&clubs, 60);

    for club in &clubs {
        session.submit_answer(club).unwrap();
    }

    assert_eq!(session.phase(), RoundPhase::Completed);
    assert_eq!(session.answers().len(), clubs.len());

    let result = session.finalize().unwrap();
    assert_eq!(result.correct_count, 4);
    assert_eq!(result.total_players, 4);
    assert_eq!(result.score, 40);
}

#[test]
fn test_expiry_completion_keeps_partial_answers() {
    let clubs = ["Arsenal", "Chelsea", "Lyon"];
    let mut session = create_playing_session(&clubs, 5);

    session.submit_answer("Arsenal").unwrap();
    session.submit_answer("wrong").unwrap();

    let mut outcome = session.tick();
    while outcome != TickOutcome::Expired {
        assert!(matches!(outcome, TickOutcome::Running { .. }));
        outcome = session.tick();
    }

    assert_eq!(session.phase(), RoundPhase::Completed);
    assert!(session.answers().len() <= clubs.len());
    assert_eq!(session.answers().len(), 2);

    let result = session.finalize().unwrap();
    assert_eq!(result.total_players, 3);
    assert_eq!(result.correct_count, 1);
}

#[test]
fn test_correct_count_zero_implies_no_streak() {
    let clubs = ["Arsenal", "Chelsea"];
    let mut session = create_playing_session(&clubs, 60);

    session.submit_answer("wrong").unwrap();
    session.submit_answer("also wrong").unwrap();

    assert_eq!(session.streak_count(), 0);
    let result = session.finalize().unwrap();
    assert_eq!(result.correct_count, 0);
    assert_eq!(result.streak_bonus, 0);
}

#[test]
fn test_abandoned_session_can_start_a_new_round() {
    let mut session = create_playing_session(&["Arsenal", "Chelsea"], 60);
    session.submit_answer("Arsenal").unwrap();
    session.abandon();

    assert_eq!(session.phase(), RoundPhase::Selection);

    session.start(create_test_question(&["Lyon"]), 30).unwrap();
    assert_eq!(session.phase(), RoundPhase::Playing);
    assert_eq!(session.time_remaining_seconds(), 30);
    assert!(session.answers().is_empty());
    assert_eq!(session.streak_count(), 0);
}

#[test]
fn test_session_result_matches_standalone_scoring() {
    let clubs = ["Arsenal", "Chelsea", "Lyon", "Marseille", "Nice"];
    let mut session = create_playing_session(&clubs, 60);

    session.submit_answer("Arsenal").unwrap();
    session.submit_answer("nope").unwrap();
    session.submit_answer("Lyon").unwrap();
    session.submit_answer("Marseille").unwrap();
    session.submit_answer("Nice").unwrap();

    let players = session.question().unwrap().players.clone();
    let answers = session.answers().to_vec();
    let time_remaining = session.time_remaining_seconds();

    let result = session.finalize().unwrap();
    assert_eq!(result, ScoringEngine::score(&players, &answers, time_remaining));

    let reconciliation = ResultAggregator::reconcile(&players, &answers);
    assert_eq!(reconciliation.correct_count, result.correct_count);
    assert_eq!(reconciliation.per_player[&players[1].id], false);
}

#[test]
fn test_rejected_submissions_leave_session_unchanged() {
    let mut fresh = RoundSession::new();
    assert_eq!(
        fresh.submit_answer("Arsenal"),
        Err(RoundError::InvalidPhase {
            phase: RoundPhase::Selection
        })
    );

    let mut session = create_playing_session(&["Arsenal"], 60);
    assert_eq!(session.submit_answer(""), Err(RoundError::EmptyAnswer));
    assert_eq!(session.current_player_index(), 0);
    assert_eq!(session.streak_count(), 0);
    assert_eq!(session.time_remaining_seconds(), 60);
}
