use crate::adapters::system_info_kv;
use crate::entities;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::infra::Context;

use super::games::{link_to_str, parse_link, GameId};

/// Typed module singleton. Created at genesis, threaded explicitly through
/// every command that allocates ids or touches the queue ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub next_id: u64,
    pub fifo_head: Option<GameId>,
    pub fifo_tail: Option<GameId>,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            next_id: 1,
            fifo_head: None,
            fifo_tail: None,
        }
    }
}

impl SystemInfo {
    pub fn to_stored(&self) -> entities::SystemInfo {
        entities::SystemInfo {
            next_id: self.next_id,
            fifo_head_index: link_to_str(self.fifo_head),
            fifo_tail_index: link_to_str(self.fifo_tail),
        }
    }
}

impl TryFrom<entities::SystemInfo> for SystemInfo {
    type Error = DomainError;

    fn try_from(stored: entities::SystemInfo) -> Result<Self, Self::Error> {
        let info = Self {
            next_id: stored.next_id,
            fifo_head: parse_link(&stored.fifo_head_index)?,
            fifo_tail: parse_link(&stored.fifo_tail_index)?,
        };
        if info.fifo_head.is_some() != info.fifo_tail.is_some() {
            return Err(DomainError::queue_inconsistency(format!(
                "queue ends disagree: head {}, tail {}",
                stored.fifo_head_index, stored.fifo_tail_index
            )));
        }
        Ok(info)
    }
}

pub fn find(ctx: &mut Context<'_>) -> Result<Option<SystemInfo>, DomainError> {
    system_info_kv::find(ctx)?
        .map(SystemInfo::try_from)
        .transpose()
}

pub fn require(ctx: &mut Context<'_>) -> Result<SystemInfo, DomainError> {
    find(ctx)?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::SystemInfo, "system info not initialised")
    })
}

pub fn save(ctx: &mut Context<'_>, info: &SystemInfo) -> Result<(), DomainError> {
    system_info_kv::save(ctx, &info.to_stored())
}

/// Hand out the next game id and persist the advanced counter.
///
/// `info` is updated in place so the caller can keep working on it.
pub fn allocate_game_id(
    ctx: &mut Context<'_>,
    info: &mut SystemInfo,
) -> Result<GameId, DomainError> {
    let id = GameId::new(info.next_id);
    info.next_id = info.next_id.checked_add(1).ok_or_else(|| {
        DomainError::infra(InfraErrorKind::Overflow, "game id counter exhausted")
    })?;
    save(ctx, info)?;
    Ok(id)
}
