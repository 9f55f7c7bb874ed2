use clap::{Parser, Subcommand};

use crate::util::LogArg;

use self::{inspect::InspectArg, play::PlayArg};

mod inspect;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
    #[clap(flatten)]
    log: LogArg,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively against the opening book (default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the contents of an opening book for a position
    Inspect(#[clap(flatten)] InspectArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg, &args.log)?,
        Mode::Inspect(arg) => inspect::run(&arg, &args.log)?,
    }
    Ok(())
}
