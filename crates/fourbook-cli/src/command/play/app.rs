use std::path::PathBuf;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fourbook_client::{
    BookState, Column, Controller, EngineLink, EngineReply, ProtocolError, WIDTH,
    bridge::ChannelLink,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Text},
    widgets::Block,
};
use ratatui_runtime::{App, RenderMode, Runtime};

use crate::ui::widgets::{self, BoardDisplay, PromptDisplay, ScoresDisplay, style};

#[derive(Debug)]
pub struct PlayApp<L = ChannelLink> {
    controller: Controller<L>,
    startup_book: Option<PathBuf>,
    path_input: String,
    selected: Column,
    is_exiting: bool,
    fatal: Option<ProtocolError>,
}

impl<L> PlayApp<L>
where
    L: EngineLink,
{
    pub fn new(controller: Controller<L>, startup_book: Option<PathBuf>) -> Self {
        Self {
            controller,
            startup_book,
            path_input: String::new(),
            selected: Column::ALL[WIDTH / 2],
            is_exiting: false,
            fatal: None,
        }
    }

    /// Ends the session, reporting a protocol failure if one stopped it.
    pub fn finish(self) -> anyhow::Result<()> {
        match self.fatal {
            Some(err) => Err(anyhow::Error::new(err).context("engine session aborted")),
            None => Ok(()),
        }
    }

    fn start(&mut self) {
        self.open_prompt();
        if let Some(path) = self.startup_book.take() {
            self.path_input = path.display().to_string();
            _ = self.controller.finish_pick(Some(path));
        }
    }

    fn open_prompt(&mut self) {
        if self.controller.begin_open() {
            self.path_input.clear();
        }
    }

    fn apply_reply(&mut self, reply: EngineReply) {
        if let Err(err) = self.controller.on_reply(reply) {
            tracing::error!(%err, "engine protocol violated, exiting");
            self.fatal = Some(err);
            self.is_exiting = true;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.is_exiting = true;
            return;
        }
        match self.controller.book_state() {
            BookState::Picking => self.handle_prompt_key(key.code),
            BookState::Loaded => self.handle_game_key(key.code),
            BookState::Idle | BookState::Opening => match key.code {
                KeyCode::Char('o') => self.open_prompt(),
                KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
                _ => {}
            },
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                let path = self.path_input.trim();
                if !path.is_empty() {
                    let path = PathBuf::from(path);
                    _ = self.controller.finish_pick(Some(path));
                }
            }
            KeyCode::Esc => {
                self.path_input.clear();
                _ = self.controller.finish_pick(None);
            }
            KeyCode::Backspace => _ = self.path_input.pop(),
            KeyCode::Char(ch) => self.path_input.push(ch),
            _ => {}
        }
    }

    fn handle_game_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                if let Some(column) = Column::from_digit(ch) {
                    self.selected = column;
                    _ = self.controller.play_column(column);
                }
            }
            KeyCode::Left => {
                let previous = self.selected.index().checked_sub(1);
                if let Some(column) = previous.and_then(Column::from_index) {
                    self.selected = column;
                }
            }
            KeyCode::Right => {
                if let Some(column) = Column::from_index(self.selected.index() + 1) {
                    self.selected = column;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => _ = self.controller.play_column(self.selected),
            KeyCode::Char('u') | KeyCode::Backspace => _ = self.controller.undo(),
            KeyCode::Char('r') => _ = self.controller.reset(),
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    fn draw_game(&self, frame: &mut Frame<'_>, area: Rect) {
        let state = self.controller.state();
        let board = state.encoded_board();
        let grid = board.grid();

        let title = format!(
            "{} to move | {} moves",
            widgets::player_name(board.next_player()),
            board.moves()
        );
        let board_display = BoardDisplay::new(&grid).selected(self.selected).block(
            Block::bordered()
                .title(Line::from(title).centered())
                .border_style(style::FRAME)
                .style(style::DEFAULT),
        );
        let scores_display = ScoresDisplay::new(state.scores())
            .selected(self.selected)
            .block(
                Block::bordered()
                    .title(Line::from("SCORES").centered())
                    .border_style(style::FRAME)
                    .style(style::DEFAULT),
            );

        let [board_area, scores_area] = Layout::vertical([
            Constraint::Length(board_display.height()),
            Constraint::Length(scores_display.height()),
        ])
        .flex(Flex::Center)
        .areas(area);
        frame.render_widget(
            &board_display,
            board_area.centered_horizontally(Constraint::Length(board_display.width())),
        );
        frame.render_widget(
            &scores_display,
            scores_area.centered_horizontally(Constraint::Length(scores_display.width())),
        );
    }

    fn draw_prompt(&self, frame: &mut Frame<'_>, area: Rect) {
        let prompt = PromptDisplay::new(&self.path_input).block(
            Block::bordered()
                .title(Line::from("OPEN BOOK").centered())
                .border_style(style::FRAME)
                .style(style::DEFAULT),
        );
        let area = area.centered(
            Constraint::Length(prompt.width()),
            Constraint::Length(prompt.height()),
        );
        frame.render_widget(&prompt, area);
    }

    fn status_line(&self) -> Line<'static> {
        if let Some(notice) = self.controller.notice() {
            return Line::styled(notice.to_string(), style::NOTICE);
        }
        let text = match self.controller.book_state() {
            BookState::Idle => "No opening book loaded",
            BookState::Picking => "Choose an opening book",
            BookState::Opening => "Opening book...",
            BookState::Loaded if self.controller.is_busy() => "Waiting for engine...",
            BookState::Loaded => "",
        };
        Line::styled(text, style::DEFAULT)
    }

    fn help_text(&self) -> &'static str {
        match self.controller.book_state() {
            BookState::Idle => "Controls: O (Open Book) | Q (Quit)",
            BookState::Picking => "Controls: Enter (Open) | Esc (Cancel)",
            BookState::Opening => "Controls: Q (Quit)",
            BookState::Loaded => {
                "Controls: 1-7 (Play) | ← → (Select) | Enter (Play Selected) | U (Undo) | R (Reset) | Q (Quit)"
            }
        }
    }
}

impl<L> App for PlayApp<L>
where
    L: EngineLink,
{
    type Message = EngineReply;

    fn init(&mut self, runtime: &mut Runtime<EngineReply>) {
        runtime.set_render_mode(RenderMode::OnDirty);
        runtime.set_tick_interval(None);
        self.start();
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime<EngineReply>, event: Event) {
        if let Some(key) = event.as_key_event()
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key);
        }
    }

    fn handle_message(&mut self, _runtime: &mut Runtime<EngineReply>, reply: EngineReply) {
        self.apply_reply(reply);
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let [title_area, main_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(Line::styled("fourbook", style::TITLE).centered(), title_area);
        match self.controller.book_state() {
            BookState::Loaded => self.draw_game(frame, main_area),
            BookState::Picking => self.draw_prompt(frame, main_area),
            BookState::Idle | BookState::Opening => {}
        }
        frame.render_widget(self.status_line().centered(), status_area);
        frame.render_widget(
            Text::from(self.help_text()).style(style::HELP).centered(),
            help_area,
        );
    }
}
