//! Expiry queue inspection for assertions.

use std::collections::BTreeSet;

use checkers::Game;

use super::chain::TestChain;

/// Ids from head to tail, following `next` links. Panics on cycles or broken links.
pub fn queue_ids(chain: &mut TestChain) -> Vec<u64> {
    let info = chain.info();
    let mut ids = Vec::new();
    let mut seen = BTreeSet::new();
    let mut prev = None;
    let mut cursor = info.fifo_head;

    while let Some(id) = cursor {
        assert!(seen.insert(id), "queue revisits game {id}");
        let game = chain
            .game(id.get())
            .unwrap_or_else(|| panic!("queue links to missing game {id}"));
        assert_eq!(game.prev, prev, "game {id} links back to the wrong game");
        ids.push(id.get());
        prev = Some(id);
        cursor = game.next;
    }
    assert_eq!(info.fifo_tail, prev, "tail does not end the chain");
    ids
}

/// Queue threads exactly the active games, in non-decreasing deadline order.
pub fn assert_queue_consistent(chain: &mut TestChain) {
    let ids = queue_ids(chain);
    let games = chain.all_games();

    let active: BTreeSet<u64> = games
        .iter()
        .filter(|g| !g.is_terminal())
        .map(|g| g.id.get())
        .collect();
    let queued: BTreeSet<u64> = ids.iter().copied().collect();
    assert_eq!(queued, active, "queued games differ from active games");
    assert_eq!(queued.len(), ids.len());

    for game in games.iter().filter(|g| g.is_terminal()) {
        assert_eq!(game.prev, None, "finished game {} keeps links", game.id);
        assert_eq!(game.next, None, "finished game {} keeps links", game.id);
        assert_eq!(game.turn, None);
    }

    let deadlines: Vec<_> = ids
        .iter()
        .map(|raw| deadline_of(&games, *raw))
        .collect();
    assert!(
        deadlines.windows(2).all(|w| w[0] <= w[1]),
        "queue out of deadline order: {deadlines:?}"
    );
}

fn deadline_of(games: &[Game], raw: u64) -> time::OffsetDateTime {
    games
        .iter()
        .find(|g| g.id.get() == raw)
        .map(|g| g.deadline)
        .unwrap_or_else(|| panic!("game {raw} not stored"))
}

/// Escrow pool holds exactly the pots of active games.
pub fn assert_escrow_matches(chain: &mut TestChain) {
    let expected: u64 = chain
        .all_games()
        .iter()
        .filter(|g| !g.is_terminal())
        .map(|g| g.wager * 2)
        .sum();
    assert_eq!(chain.escrow(), expected, "escrow out of step with active games");
}
