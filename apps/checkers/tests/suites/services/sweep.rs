// Integration tests for the block-boundary expiry sweep.

use checkers::{AppError, ErrorCode, GameId, ModuleParams, TerminalRecordPolicy};
use checkers_test_support::accounts::{ALICE, BOB, CAROL, DAVE};
use time::Duration;

use crate::support::chain::{TestChain, STARTING_BALANCE};
use crate::support::queue::{assert_escrow_matches, assert_queue_consistent, queue_ids};

/// Three games created an hour apart: deadlines at 24h, 25h and 26h.
fn staggered() -> Result<TestChain, AppError> {
    let mut chain = TestChain::new();
    for (black, red) in [(BOB, CAROL), (CAROL, DAVE), (DAVE, ALICE)] {
        chain.create(ALICE, black, red, 10)?;
        chain.advance(Duration::hours(1));
    }
    Ok(chain)
}

fn ids(raw: &[u64]) -> Vec<GameId> {
    raw.iter().copied().map(GameId::new).collect()
}

#[test]
fn test_sweep_on_empty_queue_is_a_no_op() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    assert!(chain.sweep()?.is_empty());
    assert!(chain.events.is_empty());
    Ok(())
}

#[test]
fn test_sweep_leaves_live_games_alone() -> Result<(), AppError> {
    let mut chain = staggered()?;
    assert!(chain.sweep()?.is_empty());
    assert_eq!(queue_ids(&mut chain), [1, 2, 3]);
    Ok(())
}

#[test]
fn test_sweep_forfeits_only_the_expired_front() -> Result<(), AppError> {
    let mut chain = staggered()?;
    // now = 25h30m: games 1 and 2 have run out, game 3 has half an hour left
    chain.advance(Duration::hours(22) + Duration::minutes(30));

    assert_eq!(chain.sweep()?, ids(&[1, 2]));
    assert_eq!(chain.events.len(), 2);
    assert!(chain.events.iter().all(|e| e.kind == "game-forfeited"));

    assert_eq!(queue_ids(&mut chain), [3]);
    let now = chain.now();
    let head = chain.game(3).expect("stored");
    assert!(head.deadline >= now);

    // Black ran out of time in both: red wins each pot
    assert_eq!(chain.balance(CAROL), STARTING_BALANCE - 10 - 10 + 20);
    assert_eq!(chain.balance(DAVE), STARTING_BALANCE - 10 - 10 + 20);
    assert_queue_consistent(&mut chain);
    assert_escrow_matches(&mut chain);
    Ok(())
}

#[test]
fn test_sweep_skips_refreshed_games() -> Result<(), AppError> {
    let mut chain = staggered()?;
    // Game 1 gets a move in just before expiring
    chain.advance(Duration::hours(20));
    chain.play(BOB, "1", (1, 2), (2, 3))?;
    assert_eq!(queue_ids(&mut chain), [2, 3, 1]);

    chain.advance(Duration::hours(6));
    assert_eq!(chain.sweep()?, ids(&[2, 3]));
    assert_eq!(queue_ids(&mut chain), [1]);
    assert!(chain.game(1).expect("stored").winner.is_none());
    Ok(())
}

#[test]
fn test_sweep_all_then_again() -> Result<(), AppError> {
    let mut chain = staggered()?;
    chain.advance(Duration::days(3));

    assert_eq!(chain.sweep()?, ids(&[1, 2, 3]));
    assert_eq!(chain.stored_info().fifo_head_index, "-1");
    assert_eq!(chain.escrow(), 0);

    assert!(chain.sweep()?.is_empty());
    assert!(chain.events.is_empty());
    Ok(())
}

#[test]
fn test_sweep_with_delete_policy_removes_records() -> Result<(), AppError> {
    let params = ModuleParams {
        terminal_records: TerminalRecordPolicy::Delete,
        ..ModuleParams::default()
    };
    let mut chain = TestChain::with_params(params);
    chain.create(ALICE, BOB, CAROL, 10)?;
    chain.create(ALICE, CAROL, DAVE, 10)?;
    chain.advance(Duration::days(2));

    assert_eq!(chain.sweep()?.len(), 2);
    assert!(chain.all_games().is_empty());
    assert_eq!(chain.info().next_id, 3);
    Ok(())
}

#[test]
fn test_sweep_stops_on_corruption_keeping_earlier_forfeits() -> Result<(), AppError> {
    let mut chain = staggered()?;
    chain.advance(Duration::days(3));
    // Game 2 now links forward to a record that no longer exists
    chain.drop_record(3);

    let err = chain.sweep().unwrap_err();
    assert_eq!(err.code(), ErrorCode::QueueInconsistency);
    assert!(err.is_fatal());

    // Game 1 was settled before the bad link was reached and stays settled
    assert!(chain.game(1).expect("stored").winner.is_some());
    // Carol won game 1's pot but still has her game 2 stake escrowed
    assert_eq!(chain.balance(CAROL), STARTING_BALANCE);
    assert_eq!(chain.escrow(), 40);
    // Game 2 was rolled back as a whole
    let second = chain.game(2).expect("stored");
    assert!(second.winner.is_none());
    assert_eq!(chain.info().fifo_head, Some(GameId::new(2)));
    Ok(())
}

#[test]
fn test_sweep_with_missing_escrow_leaves_game_queued() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    chain.create(ALICE, BOB, CAROL, 10)?;
    chain.drain_escrow();
    chain.advance(Duration::days(2));

    let err = chain.sweep().unwrap_err();
    assert_eq!(err.code(), ErrorCode::FundsLedger);
    assert!(err.is_fatal());

    assert_eq!(queue_ids(&mut chain), vec![1]);
    assert!(chain.game(1).expect("stored").winner.is_none());
    assert_eq!(chain.info().fifo_head, Some(GameId::new(1)));
    assert!(chain.events.is_empty());
    Ok(())
}
