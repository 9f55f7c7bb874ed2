use fourbook_client::{Cell, Player};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::ui::widgets::style;

#[derive(Debug)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        4
    }

    pub fn height() -> u16 {
        1
    }

    /// `highlighted` marks cells of the selected column.
    pub fn from_cell(cell: Cell, highlighted: bool) -> Self {
        let (style, symbol) = match cell {
            Cell::Empty => (style::EMPTY, "·"),
            Cell::Piece(Player::One) => (style::PLAYER_ONE, "●"),
            Cell::Piece(Player::Two) => (style::PLAYER_TWO, "●"),
        };
        let style = if highlighted {
            style.bg(style::SELECTED_BG)
        } else {
            style
        };
        Self::new(style, symbol)
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Fill the whole area so the selection background covers the cell
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
