use super::keys::stored_game_key;
use crate::entities::StoredGame;
use crate::errors::domain::DomainError;
use crate::infra::Context;

pub fn find_by_index(
    ctx: &mut Context<'_>,
    index: &str,
) -> Result<Option<StoredGame>, DomainError> {
    match ctx.kv_get(&stored_game_key(index))? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

pub fn save(ctx: &mut Context<'_>, game: &StoredGame) -> Result<(), DomainError> {
    let bytes = serde_json::to_vec(game)?;
    ctx.kv_set(&stored_game_key(&game.index), &bytes)
}

pub fn delete(ctx: &mut Context<'_>, index: &str) -> Result<(), DomainError> {
    ctx.kv_delete(&stored_game_key(index))
}
