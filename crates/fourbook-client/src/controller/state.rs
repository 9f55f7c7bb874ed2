use std::path::PathBuf;

use crate::{Column, ColumnScores, DecodeError, EncodedBoard, RequestId};

/// Whether a book has been loaded in this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Phase {
    NoBookLoaded,
    BookLoaded,
}

/// Progress of the one-shot book-open flow.
///
/// ```text
/// Idle --begin_open--> Picking --path--> Opening --ok--> Loaded
///   ^                     |                 |
///   +------- cancel ------+----- failure ---+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum BookState {
    #[default]
    Idle,
    /// Waiting for the user to choose a book file.
    Picking,
    /// `open_book` is in flight.
    Opening,
    Loaded,
}

impl BookState {
    #[must_use]
    pub fn phase(self) -> Phase {
        match self {
            Self::Loaded => Phase::BookLoaded,
            Self::Idle | Self::Picking | Self::Opening => Phase::NoBookLoaded,
        }
    }
}

/// The engine state last fetched by a complete refresh.
///
/// Board and scores always come from the same refresh.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub(super) encoded_board: EncodedBoard,
    pub(super) scores: ColumnScores,
}

impl InteractionState {
    #[must_use]
    pub fn encoded_board(&self) -> &EncodedBoard {
        &self.encoded_board
    }

    #[must_use]
    pub fn scores(&self) -> &ColumnScores {
        &self.scores
    }
}

/// Outcome of asking the controller to start an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Submit {
    /// The request was handed to the engine.
    Sent,
    /// Another request sequence is still in flight; nothing was sent.
    Busy,
    /// The operation is not available in the current book state.
    NotReady,
    /// The engine link refused the request.
    Unavailable,
}

/// User-facing message produced by the controller.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Notice {
    #[display("cannot play column {column}: {reason}")]
    MoveRejected { column: Column, reason: String },
    #[display("cannot open book {}: {reason}", path.display())]
    BookOpenFailed { path: PathBuf, reason: String },
    #[display("engine unavailable: {reason}")]
    EngineUnavailable { reason: String },
}

/// Engine and client disagree about the protocol. Not recoverable.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ProtocolError {
    #[display("reply {id} arrived while no request was pending")]
    UnsolicitedReply { id: RequestId },
    #[display("reply {id} does not answer pending request {expected}")]
    MismatchedReply { id: RequestId, expected: RequestId },
    #[display("reply {id} has the wrong shape for {command}")]
    UnexpectedResponse { id: RequestId, command: &'static str },
    #[display("engine reported a malformed board {encoded:?}: {source}")]
    MalformedBoard { encoded: String, source: DecodeError },
}
