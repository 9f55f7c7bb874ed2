//! Interaction controller.
//!
//! The controller owns the client-side view of the game ([`InteractionState`]) and is
//! the only component that talks to the engine. It follows a few rules:
//!
//! - At most one request sequence is in flight. Operations started while one is
//!   pending return [`Submit::Busy`] and send nothing.
//! - Every accepted `play_colm`, and every `back_move` or `reset_game`, is followed by
//!   exactly one refresh.
//! - A refresh fetches `columns_score` then `get_encoded_board` and replaces the state
//!   only when both have arrived. A failed fetch discards the refresh.
//! - A rejected move produces a [`Notice`] and leaves the state untouched.
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//!
//! use fourbook_client::{
//!     BookState, Controller, EngineLink, EngineReply, EngineRequest, EngineResponse,
//!     LinkError, RequestId, Submit,
//! };
//!
//! #[derive(Default)]
//! struct Outbox(Vec<(RequestId, EngineRequest)>);
//!
//! impl EngineLink for Outbox {
//!     fn submit(&mut self, id: RequestId, request: EngineRequest) -> Result<(), LinkError> {
//!         self.0.push((id, request));
//!         Ok(())
//!     }
//! }
//!
//! let mut controller = Controller::new(Outbox::default());
//! assert!(controller.begin_open());
//! assert!(!controller.begin_open());
//! assert_eq!(controller.finish_pick(Some(PathBuf::from("7x6.book"))), Submit::Sent);
//!
//! let (id, _) = controller.link().0[0].clone();
//! controller
//!     .on_reply(EngineReply { id, result: Ok(EngineResponse::Ack) })
//!     .unwrap();
//! assert_eq!(controller.book_state(), BookState::Loaded);
//! ```

use std::path::PathBuf;

use crate::{
    Column, ColumnScores, EncodedBoard, EngineFailure, EngineLink, EngineReply, EngineRequest,
    EngineResponse, RequestId,
};

pub use self::state::*;

mod state;

/// Why a refresh was started, reported alongside refresh failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
enum RefreshCause {
    #[display("book load")]
    BookLoaded,
    #[display("move")]
    Played,
    #[display("undo")]
    Undone,
    #[display("reset")]
    Reset,
    #[display("request")]
    Requested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    OpenBook {
        id: RequestId,
        path: PathBuf,
    },
    Play {
        id: RequestId,
        column: Column,
    },
    Undo {
        id: RequestId,
    },
    Reset {
        id: RequestId,
    },
    Scores {
        id: RequestId,
        cause: RefreshCause,
    },
    Board {
        id: RequestId,
        cause: RefreshCause,
        scores: ColumnScores,
    },
}

impl Pending {
    fn id(&self) -> RequestId {
        match self {
            Self::OpenBook { id, .. }
            | Self::Play { id, .. }
            | Self::Undo { id }
            | Self::Reset { id }
            | Self::Scores { id, .. }
            | Self::Board { id, .. } => *id,
        }
    }

    fn command(&self) -> &'static str {
        match self {
            Self::OpenBook { .. } => "open_book",
            Self::Play { .. } => "play_colm",
            Self::Undo { .. } => "back_move",
            Self::Reset { .. } => "reset_game",
            Self::Scores { .. } => "columns_score",
            Self::Board { .. } => "get_encoded_board",
        }
    }
}

/// Drives the engine on behalf of the UI.
#[derive(Debug)]
pub struct Controller<L> {
    link: L,
    next_id: RequestId,
    book: BookState,
    state: InteractionState,
    pending: Option<Pending>,
    notice: Option<Notice>,
}

impl<L> Controller<L>
where
    L: EngineLink,
{
    pub fn new(link: L) -> Self {
        Self {
            link,
            next_id: RequestId::FIRST,
            book: BookState::Idle,
            state: InteractionState::default(),
            pending: None,
            notice: None,
        }
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn phase(&self) -> Phase {
        self.book.phase()
    }

    pub fn book_state(&self) -> BookState {
        self.book
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Returns `true` while a request sequence is waiting for the engine.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// The most recent user-facing notice, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Starts the book-open flow.
    ///
    /// Returns `false` without doing anything if the flow has already started, is in
    /// progress, or has completed. The guard is taken here, before the file dialog runs.
    pub fn begin_open(&mut self) -> bool {
        if !self.book.is_idle() {
            tracing::debug!(state = ?self.book, "book open already in progress or done");
            return false;
        }
        self.book = BookState::Picking;
        true
    }

    /// Delivers the file dialog result.
    ///
    /// `None` (no selection) returns to [`BookState::Idle`] so the flow can be retried.
    pub fn finish_pick(&mut self, selection: Option<PathBuf>) -> Submit {
        if !self.book.is_picking() {
            return Submit::NotReady;
        }
        let Some(path) = selection else {
            tracing::info!("book selection cancelled");
            self.book = BookState::Idle;
            return Submit::NotReady;
        };

        self.book = BookState::Opening;
        let request = EngineRequest::OpenBook { path: path.clone() };
        let submit = self.send(request, |id| Pending::OpenBook { id, path });
        if !submit.is_sent() {
            self.book = BookState::Idle;
        }
        submit
    }

    pub fn play_column(&mut self, column: Column) -> Submit {
        if let Some(blocked) = self.check_ready() {
            return blocked;
        }
        self.notice = None;
        self.send(EngineRequest::PlayColumn { column }, |id| Pending::Play {
            id,
            column,
        })
    }

    pub fn undo(&mut self) -> Submit {
        if let Some(blocked) = self.check_ready() {
            return blocked;
        }
        self.notice = None;
        self.send(EngineRequest::BackMove, |id| Pending::Undo { id })
    }

    pub fn reset(&mut self) -> Submit {
        if let Some(blocked) = self.check_ready() {
            return blocked;
        }
        self.notice = None;
        self.send(EngineRequest::ResetGame, |id| Pending::Reset { id })
    }

    /// Re-reads scores and board from the engine. Safe to call at any time.
    pub fn refresh(&mut self) -> Submit {
        if let Some(blocked) = self.check_ready() {
            return blocked;
        }
        self.start_refresh(RefreshCause::Requested)
    }

    /// Applies an engine reply.
    ///
    /// Engine-side failures are handled here (notices, logs, skipped refreshes). An
    /// error is returned only when the reply itself breaks the protocol.
    pub fn on_reply(&mut self, reply: EngineReply) -> Result<(), ProtocolError> {
        let EngineReply { id, result } = reply;
        let Some(pending) = self.pending.take() else {
            return Err(ProtocolError::UnsolicitedReply { id });
        };
        if pending.id() != id {
            let expected = pending.id();
            self.pending = Some(pending);
            return Err(ProtocolError::MismatchedReply { id, expected });
        }
        let command = pending.command();

        match (pending, result) {
            (Pending::OpenBook { path, .. }, Ok(EngineResponse::Ack)) => {
                tracing::info!(path = %path.display(), "book loaded");
                self.book = BookState::Loaded;
                self.start_refresh(RefreshCause::BookLoaded);
            }
            (Pending::OpenBook { path, .. }, Err(failure)) => {
                tracing::warn!(path = %path.display(), %failure, "failed to open book");
                self.book = BookState::Idle;
                self.notice = Some(Notice::BookOpenFailed {
                    path,
                    reason: failure.message,
                });
            }
            (Pending::Play { column, .. }, Ok(EngineResponse::Ack)) => {
                tracing::debug!(%column, "move accepted");
                self.start_refresh(RefreshCause::Played);
            }
            (Pending::Play { column, .. }, Err(failure)) => {
                tracing::warn!(%column, %failure, "move rejected");
                self.notice = Some(Notice::MoveRejected {
                    column,
                    reason: failure.message,
                });
            }
            (Pending::Undo { .. }, result @ (Ok(EngineResponse::Ack) | Err(_))) => {
                log_command_failure(command, result.err());
                self.start_refresh(RefreshCause::Undone);
            }
            (Pending::Reset { .. }, result @ (Ok(EngineResponse::Ack) | Err(_))) => {
                log_command_failure(command, result.err());
                self.start_refresh(RefreshCause::Reset);
            }
            (Pending::Scores { cause, .. }, Ok(EngineResponse::Scores(scores))) => {
                self.send(EngineRequest::EncodedBoard, |id| Pending::Board {
                    id,
                    cause,
                    scores,
                });
            }
            (
                Pending::Scores { cause, .. } | Pending::Board { cause, .. },
                Err(failure),
            ) => {
                tracing::warn!(%cause, command, %failure, "refresh failed, keeping previous state");
            }
            (Pending::Board { scores, .. }, Ok(EngineResponse::EncodedBoard(encoded))) => {
                let encoded_board = EncodedBoard::new(encoded.as_str()).map_err(|source| {
                    tracing::error!(%source, %encoded, "engine reported a malformed board");
                    ProtocolError::MalformedBoard { encoded, source }
                })?;
                tracing::debug!(%encoded_board, "state refreshed");
                self.state = InteractionState {
                    encoded_board,
                    scores,
                };
            }
            (_, Ok(_)) => return Err(ProtocolError::UnexpectedResponse { id, command }),
        }
        Ok(())
    }

    fn check_ready(&self) -> Option<Submit> {
        if !self.book.is_loaded() {
            return Some(Submit::NotReady);
        }
        if let Some(pending) = &self.pending {
            tracing::debug!(pending = pending.command(), "engine busy, request ignored");
            return Some(Submit::Busy);
        }
        None
    }

    fn start_refresh(&mut self, cause: RefreshCause) -> Submit {
        self.send(EngineRequest::ColumnsScore, |id| Pending::Scores { id, cause })
    }

    fn send(
        &mut self,
        request: EngineRequest,
        pending: impl FnOnce(RequestId) -> Pending,
    ) -> Submit {
        let id = self.next_id;
        self.next_id = id.next();
        let command = request.name();

        match self.link.submit(id, request) {
            Ok(()) => {
                tracing::debug!(%id, command, "queued engine request");
                self.pending = Some(pending(id));
                Submit::Sent
            }
            Err(err) => {
                tracing::error!(%id, command, %err, "failed to queue engine request");
                self.notice = Some(Notice::EngineUnavailable {
                    reason: err.to_string(),
                });
                Submit::Unavailable
            }
        }
    }
}

fn log_command_failure(command: &'static str, failure: Option<EngineFailure>) {
    if let Some(failure) = failure {
        tracing::warn!(command, %failure, "engine command failed, refreshing anyway");
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{LinkError, Player};

    /// Records submitted requests for inspection.
    #[derive(Debug, Clone, Default)]
    struct RecordingLink {
        sent: Rc<RefCell<Vec<(RequestId, EngineRequest)>>>,
        refuse: bool,
    }

    impl RecordingLink {
        fn requests(&self) -> Vec<EngineRequest> {
            self.sent.borrow().iter().map(|(_, r)| r.clone()).collect()
        }

        fn last_id(&self) -> RequestId {
            self.sent.borrow().last().unwrap().0
        }

        fn count(&self) -> usize {
            self.sent.borrow().len()
        }
    }

    impl EngineLink for RecordingLink {
        fn submit(&mut self, id: RequestId, request: EngineRequest) -> Result<(), LinkError> {
            if self.refuse {
                return Err(LinkError::Disconnected);
            }
            self.sent.borrow_mut().push((id, request));
            Ok(())
        }
    }

    fn col(number: usize) -> Column {
        Column::new(number).unwrap()
    }

    fn scores(values: [Option<i32>; 7]) -> ColumnScores {
        ColumnScores::new(values)
    }

    fn reply(link: &RecordingLink, result: Result<EngineResponse, EngineFailure>) -> EngineReply {
        EngineReply {
            id: link.last_id(),
            result,
        }
    }

    fn ack(link: &RecordingLink) -> EngineReply {
        reply(link, Ok(EngineResponse::Ack))
    }

    fn fail(link: &RecordingLink, message: &str) -> EngineReply {
        reply(link, Err(EngineFailure::new(message)))
    }

    /// Answers a pending refresh with the given engine snapshot.
    fn answer_refresh(
        controller: &mut Controller<RecordingLink>,
        link: &RecordingLink,
        snapshot: (ColumnScores, &str),
    ) {
        assert_eq!(link.requests().last(), Some(&EngineRequest::ColumnsScore));
        controller
            .on_reply(reply(link, Ok(EngineResponse::Scores(snapshot.0))))
            .unwrap();
        assert_eq!(link.requests().last(), Some(&EngineRequest::EncodedBoard));
        controller
            .on_reply(reply(
                link,
                Ok(EngineResponse::EncodedBoard(snapshot.1.to_owned())),
            ))
            .unwrap();
        assert!(!controller.is_busy());
    }

    fn loaded_controller() -> (Controller<RecordingLink>, RecordingLink) {
        let link = RecordingLink::default();
        let mut controller = Controller::new(link.clone());
        assert!(controller.begin_open());
        assert_eq!(
            controller.finish_pick(Some(PathBuf::from("book.bin"))),
            Submit::Sent
        );
        controller.on_reply(ack(&link)).unwrap();
        answer_refresh(&mut controller, &link, (ColumnScores::ABSENT, ""));
        (controller, link)
    }

    #[test]
    fn test_initial_phase() {
        let controller = Controller::new(RecordingLink::default());
        assert_eq!(controller.phase(), Phase::NoBookLoaded);
        assert_eq!(controller.book_state(), BookState::Idle);
        assert_eq!(*controller.state(), InteractionState::default());
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_open_guard_is_one_shot() {
        let link = RecordingLink::default();
        let mut controller = Controller::new(link.clone());

        assert!(controller.begin_open());
        assert!(!controller.begin_open());
        assert_eq!(
            controller.finish_pick(Some(PathBuf::from("a.book"))),
            Submit::Sent
        );
        assert!(!controller.begin_open());
        assert_eq!(
            controller.finish_pick(Some(PathBuf::from("b.book"))),
            Submit::NotReady
        );

        let opens = link
            .requests()
            .into_iter()
            .filter(|r| matches!(r, EngineRequest::OpenBook { .. }))
            .count();
        assert_eq!(opens, 1);
        assert_eq!(
            link.requests()[0],
            EngineRequest::OpenBook {
                path: PathBuf::from("a.book")
            }
        );

        controller.on_reply(ack(&link)).unwrap();
        assert_eq!(controller.phase(), Phase::BookLoaded);
        assert!(!controller.begin_open());
    }

    #[test]
    fn test_cancelled_pick_allows_retry() {
        let link = RecordingLink::default();
        let mut controller = Controller::new(link.clone());

        assert!(controller.begin_open());
        assert_eq!(controller.finish_pick(None), Submit::NotReady);
        assert_eq!(controller.phase(), Phase::NoBookLoaded);
        assert_eq!(link.count(), 0);

        assert!(controller.begin_open());
        assert_eq!(
            controller.finish_pick(Some(PathBuf::from("book.bin"))),
            Submit::Sent
        );
    }

    #[test]
    fn test_failed_open_reports_and_allows_retry() {
        let link = RecordingLink::default();
        let mut controller = Controller::new(link.clone());
        controller.begin_open();
        controller.finish_pick(Some(PathBuf::from("missing.book")));
        controller.on_reply(fail(&link, "no such file")).unwrap();

        assert_eq!(controller.book_state(), BookState::Idle);
        assert_eq!(
            controller.notice(),
            Some(&Notice::BookOpenFailed {
                path: PathBuf::from("missing.book"),
                reason: "no such file".to_owned(),
            })
        );
        assert_eq!(link.count(), 1);
        assert!(controller.begin_open());
    }

    #[test]
    fn test_book_load_triggers_refresh() {
        let link = RecordingLink::default();
        let mut controller = Controller::new(link.clone());
        controller.begin_open();
        controller.finish_pick(Some(PathBuf::from("book.bin")));
        controller.on_reply(ack(&link)).unwrap();

        assert_eq!(controller.book_state(), BookState::Loaded);
        answer_refresh(
            &mut controller,
            &link,
            (scores([Some(1), None, None, None, None, None, None]), "44"),
        );
        assert_eq!(controller.state().encoded_board().as_str(), "44");
        assert_eq!(controller.state().scores().get(col(1)), Some(1));
    }

    #[test]
    fn test_failed_initial_refresh_keeps_defaults() {
        let link = RecordingLink::default();
        let mut controller = Controller::new(link.clone());
        controller.begin_open();
        controller.finish_pick(Some(PathBuf::from("book.bin")));
        controller.on_reply(ack(&link)).unwrap();
        controller.on_reply(fail(&link, "engine hiccup")).unwrap();

        assert_eq!(controller.phase(), Phase::BookLoaded);
        assert_eq!(*controller.state(), InteractionState::default());
        assert!(controller.notice().is_none());
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_operations_require_loaded_book() {
        let link = RecordingLink::default();
        let mut controller = Controller::new(link.clone());
        assert_eq!(controller.play_column(col(1)), Submit::NotReady);
        assert_eq!(controller.undo(), Submit::NotReady);
        assert_eq!(controller.reset(), Submit::NotReady);
        assert_eq!(controller.refresh(), Submit::NotReady);
        assert_eq!(link.count(), 0);
    }

    #[test]
    fn test_play_then_refresh() {
        let (mut controller, link) = loaded_controller();
        let before = link.count();

        assert_eq!(controller.play_column(col(4)), Submit::Sent);
        assert_eq!(
            link.requests().last(),
            Some(&EngineRequest::PlayColumn { column: col(4) })
        );
        controller.on_reply(ack(&link)).unwrap();

        let new_scores = scores([Some(-1), Some(0), Some(0), Some(2), Some(0), Some(0), Some(-1)]);
        answer_refresh(&mut controller, &link, (new_scores, "4"));

        assert_eq!(link.count(), before + 3);
        assert_eq!(controller.state().encoded_board().as_str(), "4");
        assert_eq!(*controller.state().scores(), new_scores);
        assert_eq!(controller.state().encoded_board().next_player(), Player::Two);
    }

    #[test]
    fn test_rejected_move_leaves_state_untouched() {
        let (mut controller, link) = loaded_controller();
        controller.play_column(col(1));
        controller.on_reply(ack(&link)).unwrap();
        answer_refresh(
            &mut controller,
            &link,
            (scores([Some(3), None, None, None, None, None, None]), "1"),
        );

        let before = controller.state().clone();
        let sent = link.count();

        assert_eq!(controller.play_column(col(1)), Submit::Sent);
        controller.on_reply(fail(&link, "column 1 is full")).unwrap();

        assert_eq!(*controller.state(), before);
        assert_eq!(link.count(), sent + 1, "refresh must be skipped");
        assert!(!controller.is_busy());
        assert_eq!(
            controller.notice(),
            Some(&Notice::MoveRejected {
                column: col(1),
                reason: "column 1 is full".to_owned(),
            })
        );
    }

    #[test]
    fn test_notice_cleared_by_next_action() {
        let (mut controller, link) = loaded_controller();
        controller.play_column(col(2));
        controller.on_reply(fail(&link, "game is already decided")).unwrap();
        assert!(controller.notice().is_some());

        controller.undo();
        assert!(controller.notice().is_none());
    }

    #[test]
    fn test_busy_controller_rejects_double_submission() {
        let (mut controller, link) = loaded_controller();
        let sent = link.count();

        assert_eq!(controller.play_column(col(3)), Submit::Sent);
        assert_eq!(controller.play_column(col(3)), Submit::Busy);
        assert_eq!(controller.undo(), Submit::Busy);
        assert_eq!(controller.reset(), Submit::Busy);
        assert_eq!(controller.refresh(), Submit::Busy);
        assert_eq!(link.count(), sent + 1);

        // Still busy while the follow-up refresh is in flight.
        controller.on_reply(ack(&link)).unwrap();
        assert_eq!(controller.play_column(col(3)), Submit::Busy);
        answer_refresh(&mut controller, &link, (ColumnScores::ABSENT, "3"));
        assert_eq!(controller.play_column(col(3)), Submit::Sent);
    }

    #[test]
    fn test_undo_refreshes_even_on_empty_board() {
        let (mut controller, link) = loaded_controller();
        assert_eq!(controller.undo(), Submit::Sent);
        assert_eq!(link.requests().last(), Some(&EngineRequest::BackMove));
        controller.on_reply(fail(&link, "no moves to undo")).unwrap();
        answer_refresh(&mut controller, &link, (ColumnScores::ABSENT, ""));
        assert_eq!(controller.state().encoded_board().as_str(), "");
    }

    #[test]
    fn test_reset_refreshes() {
        let (mut controller, link) = loaded_controller();
        controller.play_column(col(5));
        controller.on_reply(ack(&link)).unwrap();
        answer_refresh(&mut controller, &link, (ColumnScores::ABSENT, "5"));

        assert_eq!(controller.reset(), Submit::Sent);
        assert_eq!(link.requests().last(), Some(&EngineRequest::ResetGame));
        controller.on_reply(ack(&link)).unwrap();
        answer_refresh(&mut controller, &link, (ColumnScores::ABSENT, ""));
        assert_eq!(controller.state().encoded_board().moves(), 0);
    }

    #[test]
    fn test_failed_reset_still_refreshes() {
        let (mut controller, link) = loaded_controller();
        controller.play_column(col(2));
        controller.on_reply(ack(&link)).unwrap();
        answer_refresh(&mut controller, &link, (ColumnScores::ABSENT, "2"));

        assert_eq!(controller.reset(), Submit::Sent);
        let sent = link.count();
        controller.on_reply(fail(&link, "engine busy")).unwrap();
        assert_eq!(link.count(), sent + 1);
        assert!(controller.notice().is_none());

        // The engine kept its position; the refresh reports it as-is.
        answer_refresh(&mut controller, &link, (ColumnScores::ABSENT, "2"));
        assert_eq!(controller.state().encoded_board().as_str(), "2");
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_refresh_applies_scores_and_board_together() {
        let (mut controller, link) = loaded_controller();
        let before = controller.state().clone();

        controller.refresh();
        controller
            .on_reply(reply(
                &link,
                Ok(EngineResponse::Scores(scores([Some(9); 7]))),
            ))
            .unwrap();
        // Scores have arrived but the board has not: nothing is visible yet.
        assert_eq!(*controller.state(), before);

        controller
            .on_reply(reply(&link, Ok(EngineResponse::EncodedBoard("12".to_owned()))))
            .unwrap();
        assert_eq!(controller.state().encoded_board().as_str(), "12");
        assert_eq!(*controller.state().scores(), scores([Some(9); 7]));
    }

    #[test]
    fn test_failed_board_fetch_discards_refresh() {
        let (mut controller, link) = loaded_controller();
        let before = controller.state().clone();

        controller.refresh();
        controller
            .on_reply(reply(
                &link,
                Ok(EngineResponse::Scores(scores([Some(1); 7]))),
            ))
            .unwrap();
        controller.on_reply(fail(&link, "lost board")).unwrap();

        assert_eq!(*controller.state(), before);
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_malformed_board_is_protocol_error() {
        let (mut controller, link) = loaded_controller();
        let before = controller.state().clone();

        controller.refresh();
        controller
            .on_reply(reply(&link, Ok(EngineResponse::Scores(ColumnScores::ABSENT))))
            .unwrap();
        let err = controller
            .on_reply(reply(&link, Ok(EngineResponse::EncodedBoard("19".to_owned()))))
            .unwrap_err();

        assert!(matches!(err, ProtocolError::MalformedBoard { .. }));
        assert_eq!(*controller.state(), before);
    }

    #[test]
    fn test_unexpected_replies_are_protocol_errors() {
        let (mut controller, link) = loaded_controller();
        let stray = EngineReply {
            id: link.last_id(),
            result: Ok(EngineResponse::Ack),
        };
        assert_eq!(
            controller.on_reply(stray.clone()),
            Err(ProtocolError::UnsolicitedReply { id: stray.id })
        );

        controller.play_column(col(1));
        let expected = link.last_id();
        assert_eq!(
            controller.on_reply(stray.clone()),
            Err(ProtocolError::MismatchedReply {
                id: stray.id,
                expected,
            })
        );
        assert!(controller.is_busy());

        assert_eq!(
            controller.on_reply(reply(&link, Ok(EngineResponse::Scores(ColumnScores::ABSENT)))),
            Err(ProtocolError::UnexpectedResponse {
                id: expected,
                command: "play_colm",
            })
        );
    }

    #[test]
    fn test_link_failure_surfaces_notice() {
        let link = RecordingLink {
            refuse: true,
            ..RecordingLink::default()
        };
        let mut controller = Controller::new(link);
        controller.begin_open();
        assert_eq!(
            controller.finish_pick(Some(PathBuf::from("book.bin"))),
            Submit::Unavailable
        );
        assert_eq!(controller.book_state(), BookState::Idle);
        assert!(matches!(
            controller.notice(),
            Some(Notice::EngineUnavailable { .. })
        ));
        assert!(!controller.is_busy());
    }
}
