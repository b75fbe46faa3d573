use super::keys::SYSTEM_INFO_KEY;
use crate::entities::SystemInfo;
use crate::errors::domain::DomainError;
use crate::infra::Context;

pub fn find(ctx: &mut Context<'_>) -> Result<Option<SystemInfo>, DomainError> {
    match ctx.kv_get(SYSTEM_INFO_KEY)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

pub fn save(ctx: &mut Context<'_>, info: &SystemInfo) -> Result<(), DomainError> {
    let bytes = serde_json::to_vec(info)?;
    ctx.kv_set(SYSTEM_INFO_KEY, &bytes)
}
