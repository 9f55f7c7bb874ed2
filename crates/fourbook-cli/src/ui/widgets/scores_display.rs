use fourbook_client::{Column, ColumnScores, WIDTH};
use ratatui::{
    layout::{Constraint, Layout},
    prelude::{Buffer, Rect},
    widgets::{Block, BlockExt as _, Paragraph, Widget},
};

use crate::ui::widgets::{self, CellDisplay, style};

/// Column labels with the engine's score for each column underneath.
#[derive(Debug)]
pub struct ScoresDisplay<'a> {
    scores: &'a ColumnScores,
    selected: Option<Column>,
    block: Option<Block<'a>>,
}

impl<'a> ScoresDisplay<'a> {
    pub fn new(scores: &'a ColumnScores) -> Self {
        Self {
            scores,
            selected: None,
            block: None,
        }
    }

    pub fn selected(self, column: Column) -> Self {
        Self {
            selected: Some(column),
            ..self
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        CellDisplay::width() * WIDTH as u16 + widgets::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 + widgets::block_vertical_margin(self.block.as_ref())
    }
}

fn score_text(score: Option<i32>) -> String {
    score.map_or_else(|| "-".to_owned(), |score| format!("{score:+}"))
}

impl Widget for ScoresDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &ScoresDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let [label_row, score_row] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);
        let column_layout = Layout::horizontal([Constraint::Length(CellDisplay::width()); WIDTH]);
        let label_areas = column_layout.areas::<WIDTH>(label_row);
        let score_areas = column_layout.areas::<WIDTH>(score_row);

        let best = self.scores.best();
        for ((column, score), (label_area, score_area)) in
            self.scores.iter().zip(label_areas.into_iter().zip(score_areas))
        {
            let label_style = if self.selected == Some(column) {
                style::LABEL.bg(style::SELECTED_BG)
            } else {
                style::LABEL
            };
            Paragraph::new(column.to_string())
                .style(label_style)
                .centered()
                .render(label_area, buf);

            let score_style = if best == Some(column) {
                style::BEST_SCORE
            } else {
                style::SCORE
            };
            Paragraph::new(score_text(score))
                .style(score_style)
                .centered()
                .render(score_area, buf);
        }
    }
}
