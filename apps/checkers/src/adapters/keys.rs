pub const SYSTEM_INFO_KEY: &[u8] = b"SystemInfo/value/";
pub const STORED_GAME_PREFIX: &[u8] = b"StoredGame/value/";

pub fn stored_game_key(index: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(STORED_GAME_PREFIX.len() + index.len() + 1);
    key.extend_from_slice(STORED_GAME_PREFIX);
    key.extend_from_slice(index.as_bytes());
    key.push(b'/');
    key
}
