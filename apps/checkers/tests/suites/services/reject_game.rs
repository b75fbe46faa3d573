// Integration tests for rejecting games.
//
// - Who may reject, and until when
// - Refunds, record deletion and queue relinking
// - Gas refund

use checkers::{AppError, ErrorCode};
use checkers_test_support::accounts::{ALICE, BOB, CAROL, DAVE};

use crate::support::chain::{TestChain, STARTING_BALANCE};
use crate::support::queue::{assert_escrow_matches, assert_queue_consistent, queue_ids};

#[test]
fn test_black_rejects_fresh_game() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    chain.create(ALICE, BOB, CAROL, 45)?;
    chain.reject(BOB, "1")?;

    assert_eq!(chain.stored("1").unwrap_err().code(), ErrorCode::GameNotFound);
    assert_eq!(chain.balance(BOB), STARTING_BALANCE);
    assert_eq!(chain.balance(CAROL), STARTING_BALANCE);
    assert_eq!(chain.escrow(), 0);

    let info = chain.stored_info();
    assert_eq!(info.next_id, 2, "ids are never reused");
    assert_eq!(info.fifo_head_index, "-1");
    assert_eq!(info.fifo_tail_index, "-1");
    Ok(())
}

#[test]
fn test_reject_emits_event_without_payout() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    chain.create(ALICE, BOB, CAROL, 45)?;
    chain.reject(CAROL, "1")?;

    assert_eq!(chain.events.len(), 1);
    let event = &chain.events[0];
    assert_eq!(event.kind, "game-rejected");
    let attrs: Vec<(&str, &str)> = event
        .attributes
        .iter()
        .map(|a| (a.key.as_str(), a.value.as_str()))
        .collect();
    assert_eq!(attrs, [("creator", CAROL), ("game-index", "1"), ("refund", "45")]);
    Ok(())
}

#[test]
fn test_red_may_reject_after_first_black_move() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    chain.create(ALICE, BOB, CAROL, 45)?;
    chain.play(BOB, "1", (1, 2), (2, 3))?;

    let err = chain.reject(BOB, "1").unwrap_err();
    assert_eq!(err.code(), ErrorCode::WrongState);

    chain.reject(CAROL, "1")?;
    assert_eq!(chain.escrow(), 0);
    Ok(())
}

#[test]
fn test_nobody_rejects_after_red_played() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    chain.create(ALICE, BOB, CAROL, 45)?;
    chain.play(BOB, "1", (1, 2), (2, 3))?;
    chain.play(CAROL, "1", (0, 5), (1, 4))?;

    for player in [BOB, CAROL] {
        let err = chain.reject(player, "1").unwrap_err();
        assert_eq!(err.code(), ErrorCode::WrongState);
        assert!(!err.is_fatal());
    }
    assert_eq!(chain.escrow(), 90);
    Ok(())
}

#[test]
fn test_outsider_cannot_reject() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    chain.create(ALICE, BOB, CAROL, 45)?;

    let err = chain.reject(ALICE, "1").unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotAPlayer);
    assert!(chain.stored("1").is_ok());
    Ok(())
}

#[test]
fn test_reject_unknown_game() {
    let mut chain = TestChain::new();
    assert_eq!(chain.reject(BOB, "3").unwrap_err().code(), ErrorCode::GameNotFound);
}

#[test]
fn test_reject_middle_game_relinks_neighbours() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    chain.create(ALICE, BOB, CAROL, 1)?;
    chain.create(ALICE, CAROL, DAVE, 2)?;
    chain.create(ALICE, DAVE, BOB, 3)?;

    chain.reject(DAVE, "2")?;
    assert_eq!(queue_ids(&mut chain), [1, 3]);
    assert_eq!(chain.stored("1")?.after_index, "3");
    assert_eq!(chain.stored("3")?.before_index, "1");
    assert_queue_consistent(&mut chain);
    assert_escrow_matches(&mut chain);
    Ok(())
}

#[test]
fn test_reject_refunds_gas() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    chain.create(ALICE, BOB, CAROL, 45)?;
    let create_gas = chain.gas_used;

    chain.reject(BOB, "1")?;
    assert!(
        chain.gas_used < 14_000,
        "reject should be mostly refunded, used {}",
        chain.gas_used
    );
    assert!(chain.gas_used < create_gas);
    Ok(())
}
