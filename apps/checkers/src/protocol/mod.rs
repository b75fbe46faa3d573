//! Command, query and response shapes exchanged with the host.

pub mod messages;

pub use messages::{
    CanPlayMoveResponse, MsgCreateGame, MsgCreateGameResponse, MsgForfeitGame,
    MsgForfeitGameResponse, MsgPlayMove, MsgPlayMoveResponse, MsgRejectGame,
    MsgRejectGameResponse, QueryCanPlayMove, NO_CAPTURE,
};
