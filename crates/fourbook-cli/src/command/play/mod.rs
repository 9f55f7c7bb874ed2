use std::{io, path::PathBuf, thread::JoinHandle};

use anyhow::Context;
use fourbook_client::{Controller, EngineLink, bridge};
use fourbook_engine::EngineSession;
use ratatui_runtime::Runtime;

use crate::util::{self, LogArg, LogFallback};

use self::app::PlayApp;

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Opening book to load on startup instead of prompting for one
    #[clap(long)]
    pub(crate) book: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg, log: &LogArg) -> anyhow::Result<()> {
    let PlayArg { book } = arg;
    util::init_logging(log, LogFallback::Discard)?;

    let (reply_tx, reply_rx) = crossbeam_channel::unbounded();
    let (link, worker) = bridge::spawn_engine_worker(EngineSession::new(), reply_tx)
        .context("failed to start engine worker")?;

    let mut app = PlayApp::new(Controller::new(link), book.clone());
    let run_result = Runtime::with_messages(reply_rx).run(&mut app);
    shut_down(app, worker, run_result)
}

/// Stops the engine worker, then reports a protocol failure before a terminal failure.
fn shut_down<L>(
    app: PlayApp<L>,
    worker: JoinHandle<()>,
    run_result: io::Result<()>,
) -> anyhow::Result<()>
where
    L: EngineLink,
{
    // Dropping the app closes the request channel and lets the worker finish.
    let finished = app.finish();
    if worker.join().is_err() {
        tracing::error!("engine worker panicked");
    }
    finished?;
    run_result.context("terminal session failed")
}
