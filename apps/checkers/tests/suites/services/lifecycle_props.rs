//! Property tests over random command sequences.
//!
//! Properties tested:
//! - Ids are handed out consecutively and never reused
//! - The queue threads exactly the active games, in deadline order
//! - Escrow always equals the pots of the active games
//! - Business errors leave every invariant intact
//! - A sweep never forfeits a live game and leaves a live (or no) head

include!("../../common/proptest_prelude.rs");

use checkers::domain::{Move, MoveEngine, Player, Pos, StandardRules};
use checkers::Game;
use checkers_test_support::accounts::ALL;
use proptest::prelude::*;
use time::Duration;

use crate::support::chain::TestChain;
use crate::support::queue::{assert_escrow_matches, assert_queue_consistent};

#[derive(Debug, Clone)]
enum Op {
    Create { black: usize, red: usize, wager: u64 },
    Play { game: u64, pick: usize },
    Reject { game: u64, by_red: bool },
    Forfeit { game: u64, by_red: bool },
    Advance { minutes: i64 },
    Sweep,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..ALL.len(), 0..ALL.len(), 0u64..500)
            .prop_map(|(black, red, wager)| Op::Create { black, red, wager }),
        4 => (1u64..8, any::<usize>()).prop_map(|(game, pick)| Op::Play { game, pick }),
        1 => (1u64..8, any::<bool>()).prop_map(|(game, by_red)| Op::Reject { game, by_red }),
        1 => (1u64..8, any::<bool>()).prop_map(|(game, by_red)| Op::Forfeit { game, by_red }),
        2 => (1i64..(36 * 60)).prop_map(|minutes| Op::Advance { minutes }),
        1 => Just(Op::Sweep),
    ]
}

/// Every legal move for the side to move.
fn legal_moves(game: &Game) -> Vec<Move> {
    let Some(turn) = game.turn else {
        return Vec::new();
    };
    let mut moves = Vec::new();
    for (from, _) in game.board.pieces_of(turn) {
        for (dx, dy) in [(1i8, 1i8), (-1, 1), (1, -1), (-1, -1)] {
            for step in [1i8, 2] {
                if let Some(to) = from.offset(dx * step, dy * step) {
                    let mv = Move::new(from, to);
                    if StandardRules.apply(&game.board, mv, turn).is_ok() {
                        moves.push(mv);
                    }
                }
            }
        }
    }
    moves
}

fn coords(p: Pos) -> (u64, u64) {
    (p.x as u64, p.y as u64)
}

fn apply(chain: &mut TestChain, op: &Op) {
    let result = match *op {
        Op::Create { black, red, wager } => chain
            .create(ALL[0], ALL[black], ALL[red], wager)
            .map(|_| ()),
        Op::Play { game, pick } => match chain.game(game) {
            Some(g) => {
                let moves = legal_moves(&g);
                match (g.turn, moves.is_empty()) {
                    (Some(turn), false) => {
                        let mv = moves[pick % moves.len()];
                        chain
                            .play(g.account_of(turn), &game.to_string(), coords(mv.from), coords(mv.to))
                            .map(|_| ())
                    }
                    _ => Ok(()),
                }
            }
            None => Ok(()),
        },
        Op::Reject { game, by_red } => {
            let caller = chain.game(game).map(|g| {
                g.account_of(if by_red { Player::Red } else { Player::Black })
                    .to_string()
            });
            match caller {
                Some(caller) => chain.reject(&caller, &game.to_string()),
                None => Ok(()),
            }
        }
        Op::Forfeit { game, by_red } => {
            let caller = chain.game(game).map(|g| {
                g.account_of(if by_red { Player::Red } else { Player::Black })
                    .to_string()
            });
            match caller {
                Some(caller) => chain.forfeit(&caller, &game.to_string()).map(|_| ()),
                None => Ok(()),
            }
        }
        Op::Advance { minutes } => {
            chain.advance(Duration::minutes(minutes));
            Ok(())
        }
        Op::Sweep => {
            let now = chain.now();
            let before: Vec<Game> = chain.all_games();
            let swept = chain.sweep();
            if let Ok(ids) = &swept {
                for id in ids {
                    let g = before
                        .iter()
                        .find(|g| g.id == *id)
                        .expect("swept game existed");
                    assert!(g.deadline < now, "swept live game {id}");
                }
                let head = chain.info().fifo_head;
                if let Some(head) = head {
                    let g = chain.game(head.get()).expect("head stored");
                    assert!(g.deadline >= now, "expired game {head} left at head");
                }
            }
            swept.map(|_| ())
        }
    };

    if let Err(err) = result {
        assert!(!err.is_fatal(), "{op:?} failed fatally: {err:?}");
    }
}

proptest! {
    #![proptest_config(proptest_prelude_config())]

    /// Property: queue, ids and escrow stay consistent under any command sequence
    #[test]
    fn prop_lifecycle_invariants_hold(ops in prop::collection::vec(op(), 1..40)) {
        let mut chain = TestChain::new();
        let mut expected_next_id = 1u64;

        for op in &ops {
            let created_before = chain.info().next_id;
            apply(&mut chain, op);
            let next_id = chain.info().next_id;

            if let Op::Create { .. } = op {
                prop_assert!(next_id == created_before || next_id == created_before + 1);
            } else {
                prop_assert_eq!(next_id, created_before, "only creation allocates ids");
            }
            prop_assert!(next_id >= expected_next_id);
            expected_next_id = next_id;

            assert_queue_consistent(&mut chain);
            assert_escrow_matches(&mut chain);
        }
    }

    /// Property: successful creates return consecutive ids
    #[test]
    fn prop_created_ids_are_consecutive(count in 1usize..12) {
        let mut chain = TestChain::new();
        for i in 0..count {
            let created = chain.create(ALL[0], ALL[1], ALL[2], 1).expect("create succeeds");
            prop_assert_eq!(created.game_index, (i + 1).to_string());
        }
        prop_assert_eq!(chain.info().next_id, count as u64 + 1);
    }
}
