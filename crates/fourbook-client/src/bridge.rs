//! Runs an [`EngineSession`] on its own thread.
//!
//! Requests travel to the worker over a bounded channel; each one is executed in
//! arrival order and answered on the reply channel. The worker exits when either
//! channel is disconnected.

use std::{
    io,
    thread::{self, JoinHandle},
};

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use fourbook_engine::EngineSession;

use crate::{
    ColumnScores, EngineFailure, EngineLink, EngineReply, EngineRequest, EngineResponse,
    LinkError, RequestId,
};

/// Capacity of the request queue. The controller keeps at most one request in flight.
const REQUEST_QUEUE: usize = 16;

/// [`EngineLink`] backed by a channel to an engine worker.
#[derive(Debug, Clone)]
pub struct ChannelLink {
    requests: Sender<(RequestId, EngineRequest)>,
}

impl EngineLink for ChannelLink {
    fn submit(&mut self, id: RequestId, request: EngineRequest) -> Result<(), LinkError> {
        match self.requests.try_send((id, request)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(LinkError::Full),
            Err(TrySendError::Disconnected(_)) => Err(LinkError::Disconnected),
        }
    }
}

/// Spawns the engine worker thread.
///
/// Replies are sent to `replies`. Dropping the returned link stops the worker once it
/// has drained the queue.
pub fn spawn_engine_worker(
    session: EngineSession,
    replies: Sender<EngineReply>,
) -> io::Result<(ChannelLink, JoinHandle<()>)> {
    let (requests, inbox) = bounded(REQUEST_QUEUE);
    let handle = thread::Builder::new()
        .name("engine".to_owned())
        .spawn(move || serve(session, &inbox, &replies))?;
    Ok((ChannelLink { requests }, handle))
}

fn serve(
    mut session: EngineSession,
    inbox: &Receiver<(RequestId, EngineRequest)>,
    replies: &Sender<EngineReply>,
) {
    tracing::debug!("engine worker started");
    while let Ok((id, request)) = inbox.recv() {
        let command = request.name();
        let result = execute(&mut session, request);
        if let Err(failure) = &result {
            tracing::debug!(%id, command, %failure, "engine command failed");
        }
        if replies.send(EngineReply { id, result }).is_err() {
            tracing::debug!("reply channel closed");
            break;
        }
    }
    tracing::debug!("engine worker stopped");
}

/// Executes one request against `session`.
pub fn execute(
    session: &mut EngineSession,
    request: EngineRequest,
) -> Result<EngineResponse, EngineFailure> {
    match request {
        EngineRequest::OpenBook { path } => {
            session
                .open_book(&path)
                .map_err(|err| EngineFailure::new(err.to_string()))?;
            let entries = session.book().len();
            tracing::info!(path = %path.display(), entries, "engine opened book");
            Ok(EngineResponse::Ack)
        }
        EngineRequest::ColumnsScore => Ok(EngineResponse::Scores(ColumnScores::new(
            session.columns_score(),
        ))),
        EngineRequest::EncodedBoard => Ok(EngineResponse::EncodedBoard(
            session.encoded_board().to_owned(),
        )),
        EngineRequest::PlayColumn { column } => {
            session
                .play_column(column)
                .map_err(|err| EngineFailure::new(err.to_string()))?;
            Ok(EngineResponse::Ack)
        }
        EngineRequest::BackMove => {
            if !session.back_move() {
                tracing::debug!("no move to take back");
            }
            Ok(EngineResponse::Ack)
        }
        EngineRequest::ResetGame => {
            session.reset_game();
            Ok(EngineResponse::Ack)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use fourbook_engine::{OpeningBook, Position};

    use super::*;
    use crate::{BookState, Column, Controller, Submit};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn col(number: usize) -> Column {
        Column::new(number).unwrap()
    }

    fn write_book(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("book.bin");
        let mut book = OpeningBook::new();
        book.insert(&Position::from_moves("4").unwrap(), -1);
        book.insert(&Position::from_moves("44").unwrap(), 2);
        book.save(&path).unwrap();
        path
    }

    /// Feeds replies into the controller until it is idle again.
    fn settle(controller: &mut Controller<ChannelLink>, replies: &Receiver<EngineReply>) {
        while controller.is_busy() {
            let reply = replies.recv_timeout(TIMEOUT).unwrap();
            controller.on_reply(reply).unwrap();
        }
    }

    #[test]
    fn test_execute_maps_commands() {
        let mut session = EngineSession::new();
        assert_eq!(
            execute(&mut session, EngineRequest::PlayColumn { column: col(3) }),
            Ok(EngineResponse::Ack)
        );
        assert_eq!(
            execute(&mut session, EngineRequest::EncodedBoard),
            Ok(EngineResponse::EncodedBoard("3".to_owned()))
        );
        assert_eq!(
            execute(&mut session, EngineRequest::BackMove),
            Ok(EngineResponse::Ack)
        );
        assert_eq!(
            execute(&mut session, EngineRequest::BackMove),
            Ok(EngineResponse::Ack)
        );
        assert_eq!(session.encoded_board(), "");
    }

    #[test]
    fn test_execute_reports_failures() {
        let mut session = EngineSession::new();
        let missing = execute(
            &mut session,
            EngineRequest::OpenBook {
                path: PathBuf::from("/nonexistent/fourbook/book.bin"),
            },
        );
        assert!(missing.is_err());

        for _ in 0..6 {
            execute(&mut session, EngineRequest::PlayColumn { column: col(2) }).unwrap();
        }
        assert_eq!(
            execute(&mut session, EngineRequest::PlayColumn { column: col(2) }),
            Err(EngineFailure::new("column 2 is full"))
        );
    }

    #[test]
    fn test_worker_answers_in_order() {
        let (reply_tx, reply_rx) = crossbeam_channel::unbounded();
        let (mut link, handle) = spawn_engine_worker(EngineSession::new(), reply_tx).unwrap();

        let first = RequestId::FIRST;
        let second = first.next();
        link.submit(first, EngineRequest::PlayColumn { column: col(1) })
            .unwrap();
        link.submit(second, EngineRequest::EncodedBoard).unwrap();

        let reply = reply_rx.recv_timeout(TIMEOUT).unwrap();
        assert_eq!(reply.id, first);
        let reply = reply_rx.recv_timeout(TIMEOUT).unwrap();
        assert_eq!(reply.id, second);
        assert_eq!(reply.result, Ok(EngineResponse::EncodedBoard("1".to_owned())));

        drop(link);
        handle.join().unwrap();
    }

    #[test]
    fn test_link_reports_stopped_worker() {
        let (reply_tx, reply_rx) = crossbeam_channel::unbounded();
        let (mut link, handle) = spawn_engine_worker(EngineSession::new(), reply_tx).unwrap();
        drop(reply_rx);

        // The worker stops after failing to deliver its first reply.
        link.submit(RequestId::FIRST, EngineRequest::EncodedBoard)
            .unwrap();
        handle.join().unwrap();
        assert_eq!(
            link.submit(RequestId::FIRST.next(), EngineRequest::EncodedBoard),
            Err(LinkError::Disconnected)
        );
    }

    #[test]
    fn test_controller_session_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_book(&dir);

        let (reply_tx, reply_rx) = crossbeam_channel::unbounded();
        let (link, _handle) = spawn_engine_worker(EngineSession::new(), reply_tx).unwrap();
        let mut controller = Controller::new(link);

        assert!(controller.begin_open());
        assert_eq!(controller.finish_pick(Some(path)), Submit::Sent);
        settle(&mut controller, &reply_rx);
        assert_eq!(controller.book_state(), BookState::Loaded);
        assert_eq!(controller.state().scores().get(col(4)), Some(1));

        assert_eq!(controller.play_column(col(4)), Submit::Sent);
        settle(&mut controller, &reply_rx);
        assert_eq!(controller.state().encoded_board().as_str(), "4");
        assert_eq!(controller.state().scores().get(col(4)), Some(-2));

        for _ in 0..5 {
            controller.play_column(col(4));
            settle(&mut controller, &reply_rx);
        }
        let before = controller.state().clone();
        assert_eq!(before.encoded_board().as_str(), "444444");
        assert_eq!(before.scores().get(col(4)), None);

        controller.play_column(col(4));
        settle(&mut controller, &reply_rx);
        assert_eq!(*controller.state(), before);
        assert!(controller.notice().is_some());

        controller.undo();
        settle(&mut controller, &reply_rx);
        assert_eq!(controller.state().encoded_board().as_str(), "44444");

        controller.reset();
        settle(&mut controller, &reply_rx);
        assert_eq!(controller.state().encoded_board().as_str(), "");
    }
}
