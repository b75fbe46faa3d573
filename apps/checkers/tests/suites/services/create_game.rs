// Integration tests for game creation.
//
// - Id assignment and SystemInfo bookkeeping
// - Stored record shape
// - Creation event
// - Escrow and failure atomicity

use checkers::entities::{StoredGame, SystemInfo};
use checkers::domain::{parse_deadline, STARTING_BOARD};
use checkers::{AppError, ErrorCode, InMemoryLedger, ModuleParams};
use checkers_test_support::accounts::{ALICE, BOB, CAROL, DAVE};
use time::Duration;

use crate::support::chain::{TestChain, GENESIS_TIME, STARTING_BALANCE};
use crate::support::queue::{assert_escrow_matches, assert_queue_consistent, queue_ids};

#[test]
fn test_create_game() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    let created = chain.create(ALICE, BOB, CAROL, 45)?;
    assert_eq!(created.game_index, "1");
    Ok(())
}

#[test]
fn test_create_game_has_saved_it() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    chain.create(ALICE, BOB, CAROL, 45)?;

    assert_eq!(
        chain.stored_info(),
        SystemInfo {
            next_id: 2,
            fifo_head_index: "1".into(),
            fifo_tail_index: "1".into(),
        }
    );
    assert_eq!(
        chain.stored("1")?,
        StoredGame {
            index: "1".into(),
            board: STARTING_BOARD.into(),
            turn: "b".into(),
            black: BOB.into(),
            red: CAROL.into(),
            winner: "*".into(),
            deadline: "0001-01-02 00:00:00 +0000 UTC".into(),
            move_count: 0,
            before_index: "-1".into(),
            after_index: "-1".into(),
            wager: 45,
        }
    );
    Ok(())
}

#[test]
fn test_create_game_get_deadline() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    chain.create(ALICE, BOB, CAROL, 45)?;

    let deadline = parse_deadline(&chain.stored("1")?.deadline)?;
    assert_eq!(deadline, GENESIS_TIME + Duration::hours(24));
    Ok(())
}

#[test]
fn test_create_game_emitted_event() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    chain.create(ALICE, BOB, CAROL, 45)?;

    assert_eq!(chain.events.len(), 1);
    let event = &chain.events[0];
    assert_eq!(event.kind, "new-game-created");
    let attrs: Vec<(&str, &str)> = event
        .attributes
        .iter()
        .map(|a| (a.key.as_str(), a.value.as_str()))
        .collect();
    assert_eq!(
        attrs,
        [
            ("creator", ALICE),
            ("game-index", "1"),
            ("black", BOB),
            ("red", CAROL),
            ("wager", "45"),
        ]
    );
    Ok(())
}

#[test]
fn test_create_game_consumed_gas() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    chain.create(ALICE, BOB, CAROL, 45)?;
    assert!(chain.gas_used >= 25_000, "consumed only {}", chain.gas_used);
    Ok(())
}

#[test]
fn test_create_two_games_links_them() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    assert_eq!(chain.create(ALICE, BOB, CAROL, 1)?.game_index, "1");
    assert_eq!(chain.create(BOB, CAROL, ALICE, 2)?.game_index, "2");

    assert_eq!(
        chain.stored_info(),
        SystemInfo {
            next_id: 3,
            fifo_head_index: "1".into(),
            fifo_tail_index: "2".into(),
        }
    );
    let first = chain.stored("1")?;
    let second = chain.stored("2")?;
    assert_eq!((first.before_index.as_str(), first.after_index.as_str()), ("-1", "2"));
    assert_eq!((second.before_index.as_str(), second.after_index.as_str()), ("1", "-1"));
    Ok(())
}

#[test]
fn test_create_many_games_keeps_queue_and_escrow() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    let pairs = [(BOB, CAROL), (CAROL, DAVE), (DAVE, ALICE), (ALICE, BOB)];
    for (i, (black, red)) in pairs.into_iter().enumerate() {
        chain.advance(Duration::minutes(5));
        let created = chain.create(ALICE, black, red, 10 + i as u64)?;
        assert_eq!(created.game_index, (i + 1).to_string());
    }

    assert_eq!(queue_ids(&mut chain), [1, 2, 3, 4]);
    assert_queue_consistent(&mut chain);
    assert_escrow_matches(&mut chain);
    assert_eq!(chain.escrow(), 2 * (10 + 11 + 12 + 13));
    Ok(())
}

#[test]
fn test_create_game_escrows_both_players() -> Result<(), AppError> {
    let mut chain = TestChain::new();
    chain.create(ALICE, BOB, CAROL, 45)?;

    assert_eq!(chain.balance(BOB), STARTING_BALANCE - 45);
    assert_eq!(chain.balance(CAROL), STARTING_BALANCE - 45);
    assert_eq!(chain.balance(ALICE), STARTING_BALANCE, "creator does not pay");
    assert_eq!(chain.escrow(), 90);
    Ok(())
}

#[test]
fn test_create_game_rejects_same_player() {
    let mut chain = TestChain::new();
    let err = chain.create(ALICE, BOB, BOB, 45).unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidPlayers);
    assert!(chain.events.is_empty());
    assert_eq!(chain.info().next_id, 1);
}

#[test]
fn test_create_game_rejects_missing_player() {
    let mut chain = TestChain::new();
    let err = chain.create(ALICE, "", CAROL, 45).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidPlayers);
}

#[test]
fn test_create_game_insufficient_funds_rolls_back() {
    let funds = InMemoryLedger::new()
        .with_balance(BOB, 100)
        .with_balance(CAROL, 44);
    let mut chain = TestChain::bare(funds, ModuleParams::default());
    {
        let mut ctx = checkers::Context::new(&mut chain.store, chain.header);
        checkers::init_genesis(&mut ctx, &checkers::default_genesis()).unwrap();
    }

    let err = chain.create(ALICE, BOB, CAROL, 45).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InsufficientFunds);
    assert!(!err.is_fatal());

    assert_eq!(chain.balance(BOB), 100, "black's stake was returned");
    assert_eq!(chain.balance(CAROL), 44);
    assert_eq!(chain.escrow(), 0);
    assert!(chain.events.is_empty());
    assert_eq!(
        chain.stored_info(),
        SystemInfo::default(),
        "no id consumed, nothing queued"
    );
    assert_eq!(chain.stored("1").unwrap_err().code(), ErrorCode::GameNotFound);
}

#[test]
fn test_create_game_out_of_gas_rolls_back() {
    let mut chain = TestChain::new();
    let err = chain.create_with_gas_limit(20_000, BOB, CAROL, 45).unwrap_err();

    assert_eq!(err.code(), ErrorCode::OutOfGas);
    assert_eq!(chain.gas_used, 20_000);
    assert_eq!(chain.info().next_id, 1);
    assert_eq!(chain.escrow(), 0);
    assert_eq!(chain.balance(BOB), STARTING_BALANCE);
}

#[test]
fn test_create_game_without_genesis_fails() {
    let mut chain = TestChain::bare(InMemoryLedger::new(), ModuleParams::default());
    let err = chain.create(ALICE, BOB, CAROL, 0).unwrap_err();
    assert_eq!(err.code(), ErrorCode::SystemInfoNotFound);
}

#[test]
fn test_create_game_zero_wager_moves_no_funds() -> Result<(), AppError> {
    let mut chain = TestChain::bare(InMemoryLedger::new(), ModuleParams::default());
    {
        let mut ctx = checkers::Context::new(&mut chain.store, chain.header);
        checkers::init_genesis(&mut ctx, &checkers::default_genesis())?;
    }
    let created = chain.create(ALICE, BOB, CAROL, 0)?;
    assert_eq!(created.game_index, "1");
    assert_eq!(chain.escrow(), 0);
    Ok(())
}
