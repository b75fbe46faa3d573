use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredGame {
    pub index: String,
    pub board: String,
    pub turn: String,
    pub black: String,
    pub red: String,
    pub winner: String,
    pub deadline: String,
    pub move_count: u64,
    pub before_index: String,
    pub after_index: String,
    pub wager: u64,
}
