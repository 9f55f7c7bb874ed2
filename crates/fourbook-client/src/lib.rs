//! Interaction core of the fourbook client.
//!
//! - [`board`] - decodes the engine's move string into a renderable grid
//! - [`protocol`] - requests, replies and the [`EngineLink`] seam
//! - [`controller`] - interaction state, refresh sequencing and error surfacing
//! - [`bridge`] - runs an [`EngineSession`](fourbook_engine::EngineSession) on a worker
//!   thread behind a channel link
//!
//! The client never decides game rules. It forwards user intent to the engine and
//! re-reads the engine's state after every change.

pub use fourbook_engine::{CAPACITY, Column, ColumnError, HEIGHT, WIDTH};

pub use self::{
    board::{Cell, DecodeError, EncodedBoard, Grid, Player, decode},
    controller::{BookState, Controller, InteractionState, Notice, Phase, ProtocolError, Submit},
    protocol::{
        EngineFailure, EngineLink, EngineReply, EngineRequest, EngineResponse, LinkError,
        RequestId,
    },
    scores::ColumnScores,
};

pub mod board;
pub mod bridge;
pub mod controller;
pub mod protocol;
mod scores;
