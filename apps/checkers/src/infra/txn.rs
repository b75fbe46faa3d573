use tracing::debug;

use super::context::Context;
use super::events::EventManager;
use super::store::CacheStore;
use crate::error::AppError;

/// Execute a function against a branch of the context.
///
/// The closure sees a cache layered over the parent store and a fresh event
/// buffer. On `Ok` the cached writes are flushed and the events appended to
/// the parent; on `Err` both are dropped, so a failed command leaves no trace
/// in storage or in the event log. Gas burned inside the branch is charged to
/// the parent either way. Branches nest.
pub fn with_txn<R, F>(ctx: &mut Context<'_>, f: F) -> Result<R, AppError>
where
    F: FnOnce(&mut Context<'_>) -> Result<R, AppError>,
{
    let header = ctx.header;
    let gas_config = ctx.gas_config;
    let gas = std::mem::take(&mut ctx.gas);

    let mut cache = CacheStore::new(&mut *ctx.store);
    let (out, gas, events) = {
        let mut branch = Context {
            header,
            store: &mut cache,
            gas,
            gas_config,
            events: EventManager::default(),
        };
        let out = f(&mut branch);
        (out, branch.gas, branch.events)
    };
    ctx.gas = gas;

    match out {
        Ok(val) => {
            cache.write();
            ctx.events.extend(events);
            Ok(val)
        }
        Err(err) => {
            debug!(code = %err.code(), detail = err.detail(), "rolling back branch");
            Err(err)
        }
    }
}
