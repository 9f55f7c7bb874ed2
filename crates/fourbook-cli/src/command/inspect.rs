use std::{fmt::Write as _, path::PathBuf};

use anyhow::Context;
use fourbook_client::{Cell, ColumnScores, EncodedBoard, Player};
use fourbook_engine::{Column, EngineSession};

use crate::util::{self, LogArg, LogFallback};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InspectArg {
    /// Path to the opening book file
    pub(crate) book: PathBuf,
    /// Moves to play before scoring, one column digit (1-7) per move
    #[clap(long, default_value = "")]
    pub(crate) moves: String,
}

pub(crate) fn run(arg: &InspectArg, log: &LogArg) -> anyhow::Result<()> {
    let InspectArg { book, moves } = arg;
    util::init_logging(log, LogFallback::Stderr)?;

    let mut session = EngineSession::new();
    session
        .open_book(book)
        .with_context(|| format!("failed to open book: {}", book.display()))?;
    tracing::info!(path = %book.display(), entries = session.book().len(), "book loaded");

    for (index, ch) in moves.chars().enumerate() {
        let column = Column::from_digit(ch)
            .with_context(|| format!("invalid column {ch:?} at move {index}"))?;
        session
            .play_column(column)
            .with_context(|| format!("cannot play move {index}"))?;
    }

    let board = EncodedBoard::new(session.encoded_board())
        .context("engine produced an invalid board")?;
    let scores = ColumnScores::new(session.columns_score());

    println!("book: {} ({} entries)", book.display(), session.book().len());
    print!("{}", render_report(&board, &scores));
    Ok(())
}

fn render_report(board: &EncodedBoard, scores: &ColumnScores) -> String {
    let mut out = String::new();
    let moves = if board.as_str().is_empty() {
        "(empty)"
    } else {
        board.as_str()
    };
    _ = writeln!(out, "moves: {moves}");
    for row in board.grid().rows() {
        let line = row
            .iter()
            .map(|cell| match cell {
                Cell::Empty => '.',
                Cell::Piece(Player::One) => 'X',
                Cell::Piece(Player::Two) => 'O',
            })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ");
        _ = writeln!(out, "{line}");
    }
    let labels = Column::ALL.map(|column| column.digit().to_string());
    _ = writeln!(out, "{}", labels.join(" "));
    for (column, score) in scores.iter() {
        match score {
            Some(score) => _ = writeln!(out, "column {column}: {score:+}"),
            None => _ = writeln!(out, "column {column}: -"),
        }
    }
    if let Some(best) = scores.best() {
        _ = writeln!(out, "best: column {best}");
    }
    out
}
