//! Genesis state: validation and loading into a fresh store.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::config::ModuleParams;
use crate::entities::{StoredGame, SystemInfo as StoredSystemInfo};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::infra::Context;
use crate::repos::games::{save_game, Game, GameId};
use crate::repos::{system_info, SystemInfo};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenesisState {
    pub system_info: StoredSystemInfo,
    #[serde(default)]
    pub stored_game_list: Vec<StoredGame>,
    #[serde(default)]
    pub params: ModuleParams,
}

impl Default for GenesisState {
    fn default() -> Self {
        default_genesis()
    }
}

/// Counter at 1, no games, empty queue.
pub fn default_genesis() -> GenesisState {
    GenesisState {
        system_info: StoredSystemInfo::default(),
        stored_game_list: Vec::new(),
        params: ModuleParams::default(),
    }
}

fn invalid(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::InvalidGenesis, detail)
}

impl GenesisState {
    /// Decode and cross-check every record. Returns the typed forms on success.
    fn decode(&self) -> Result<(SystemInfo, Vec<Game>), DomainError> {
        let info = SystemInfo::try_from(self.system_info.clone())
            .map_err(|e| invalid(format!("system info: {e}")))?;

        let mut games = BTreeMap::new();
        for stored in &self.stored_game_list {
            let game = Game::try_from(stored.clone())
                .map_err(|e| invalid(format!("stored game {}: {e}", stored.index)))?;
            if game.id.get() >= info.next_id {
                return Err(invalid(format!(
                    "game {} is not below next id {}",
                    game.id, info.next_id
                )));
            }
            if game.is_terminal() != game.turn.is_none() {
                return Err(invalid(format!(
                    "game {} must have either a turn or a winner",
                    game.id
                )));
            }
            if games.insert(game.id, game).is_some() {
                return Err(invalid(format!("duplicate game index {}", stored.index)));
            }
        }

        check_queue(&info, &games)?;
        Ok((info, games.into_values().collect()))
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.params.validate()?;
        self.decode()?;
        Ok(())
    }
}

/// The queue must thread exactly the active games, once each, with agreeing
/// links and non-decreasing deadlines.
fn check_queue(info: &SystemInfo, games: &BTreeMap<GameId, Game>) -> Result<(), DomainError> {
    let mut seen = BTreeSet::new();
    let mut prev: Option<GameId> = None;
    let mut prev_deadline: Option<OffsetDateTime> = None;
    let mut cursor = info.fifo_head;

    while let Some(id) = cursor {
        let game = games
            .get(&id)
            .ok_or_else(|| invalid(format!("queue references unknown game {id}")))?;
        if game.is_terminal() {
            return Err(invalid(format!("finished game {id} is queued")));
        }
        if game.prev != prev {
            return Err(invalid(format!("game {id} links back to the wrong game")));
        }
        if !seen.insert(id) {
            return Err(invalid(format!("queue revisits game {id}")));
        }
        if prev_deadline.is_some_and(|earlier| game.deadline < earlier) {
            return Err(invalid(format!(
                "game {id} is due before the game queued ahead of it"
            )));
        }
        prev = Some(id);
        prev_deadline = Some(game.deadline);
        cursor = game.next;
    }

    if info.fifo_tail != prev {
        return Err(invalid("queue tail does not end the chain"));
    }
    let active = games.values().filter(|g| !g.is_terminal()).count();
    if seen.len() != active {
        return Err(invalid(format!(
            "queue holds {} games but {} are active",
            seen.len(),
            active
        )));
    }
    if let Some(stray) = games
        .values()
        .find(|g| g.is_terminal() && (g.prev.is_some() || g.next.is_some()))
    {
        return Err(invalid(format!("finished game {} still has queue links", stray.id)));
    }
    Ok(())
}

/// Validate `genesis` and write it into the store.
pub fn init_genesis(ctx: &mut Context<'_>, genesis: &GenesisState) -> Result<(), AppError> {
    genesis.params.validate()?;
    let (info, games) = genesis.decode()?;

    system_info::save(ctx, &info)?;
    for game in &games {
        save_game(ctx, game)?;
    }
    info!(games = games.len(), next_id = info.next_id, "Genesis loaded");
    Ok(())
}
