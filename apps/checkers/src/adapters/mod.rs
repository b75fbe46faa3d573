//! Store I/O for entities. Values are JSON encoded; decoding failures surface
//! as data corruption.

pub mod games_kv;
pub mod keys;
pub mod system_info_kv;
