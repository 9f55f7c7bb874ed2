use fourbook_client::{Column, Grid, HEIGHT, WIDTH};
use ratatui::{
    layout::{Constraint, Layout},
    prelude::{Buffer, Rect},
    widgets::{Block, BlockExt as _, Widget},
};

use crate::ui::widgets::{self, CellDisplay};

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    selected: Option<Column>,
    block: Option<Block<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
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

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        CellDisplay::height() * HEIGHT as u16 + widgets::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let row_areas = Layout::vertical([Constraint::Length(CellDisplay::height()); HEIGHT])
            .areas::<HEIGHT>(area);
        let column_layout = Layout::horizontal([Constraint::Length(CellDisplay::width()); WIDTH]);
        for (row_area, row) in row_areas.into_iter().zip(self.grid.rows()) {
            let cell_areas = column_layout.areas::<WIDTH>(row_area);
            for ((column, cell_area), cell) in Column::ALL.into_iter().zip(cell_areas).zip(row) {
                let highlighted = self.selected == Some(column);
                CellDisplay::from_cell(*cell, highlighted).render(cell_area, buf);
            }
        }
    }
}
