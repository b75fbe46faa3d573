use serde::{Deserialize, Serialize};

/// Coordinate reported when a move captured nothing.
pub const NO_CAPTURE: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgCreateGame {
    pub creator: String,
    pub black: String,
    pub red: String,
    pub wager: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgCreateGameResponse {
    pub game_index: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgPlayMove {
    pub creator: String,
    pub game_index: String,
    pub from_x: u64,
    pub from_y: u64,
    pub to_x: u64,
    pub to_y: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgPlayMoveResponse {
    pub captured_x: i64,
    pub captured_y: i64,
    /// `b`, `r`, or `*` while undecided
    pub winner: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgRejectGame {
    pub creator: String,
    pub game_index: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRejectGameResponse {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgForfeitGame {
    pub creator: String,
    pub game_index: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsgForfeitGameResponse {
    pub winner: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryCanPlayMove {
    pub game_index: String,
    /// `b` or `r`
    pub player: String,
    pub from_x: u64,
    pub from_y: u64,
    pub to_x: u64,
    pub to_y: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanPlayMoveResponse {
    pub possible: bool,
    pub reason: String,
}
