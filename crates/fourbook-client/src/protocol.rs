//! Command protocol between the client and the engine collaborator.
//!
//! Every request is tagged with a [`RequestId`] and answered by exactly one
//! [`EngineReply`] carrying the same id. Replies arrive asynchronously; how they are
//! delivered back to the controller is up to the [`EngineLink`] implementation.

use std::path::PathBuf;

use crate::{Column, ColumnScores};

/// Correlates a reply with the request it answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("#{_0}")]
pub struct RequestId(u64);

impl RequestId {
    pub const FIRST: Self = Self(1);

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineRequest {
    /// Load an opening book. Must succeed before any other request is meaningful.
    OpenBook { path: PathBuf },
    ColumnsScore,
    EncodedBoard,
    PlayColumn { column: Column },
    /// Retract the last move. A no-op on an empty board.
    BackMove,
    ResetGame,
}

impl EngineRequest {
    /// Command name, as used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenBook { .. } => "open_book",
            Self::ColumnsScore => "columns_score",
            Self::EncodedBoard => "get_encoded_board",
            Self::PlayColumn { .. } => "play_colm",
            Self::BackMove => "back_move",
            Self::ResetGame => "reset_game",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineResponse {
    /// Success for commands without output.
    Ack,
    Scores(ColumnScores),
    EncodedBoard(String),
}

/// Failure reported by the engine for a single request.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{message}")]
pub struct EngineFailure {
    pub message: String,
}

impl EngineFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineReply {
    pub id: RequestId,
    pub result: Result<EngineResponse, EngineFailure>,
}

/// Error returned when a request cannot be handed to the engine at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LinkError {
    #[display("engine request queue is full")]
    Full,
    #[display("engine worker is disconnected")]
    Disconnected,
}

/// Outbound half of the engine connection.
pub trait EngineLink {
    /// Queues `request`. The matching reply is delivered later, out of band.
    fn submit(&mut self, id: RequestId, request: EngineRequest) -> Result<(), LinkError>;
}
