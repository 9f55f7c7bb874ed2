use ratatui::{
    prelude::{Buffer, Rect},
    text::{Line, Span, Text},
    widgets::{Block, BlockExt as _, Widget},
};

use crate::ui::widgets::{self, style};

const PROMPT_WIDTH: u16 = 60;

/// Asks for the path of an opening book file.
#[derive(Debug)]
pub struct PromptDisplay<'a> {
    input: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> PromptDisplay<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, block: None }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        PROMPT_WIDTH + widgets::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 + widgets::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PromptDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PromptDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        // Keep the end of long paths visible
        let max_chars = usize::from(area.width.saturating_sub(3));
        let skip = self.input.chars().count().saturating_sub(max_chars);
        let visible = self.input.chars().skip(skip).collect::<String>();

        let text = Text::from(vec![
            Line::from("Opening book file:"),
            Line::from(vec![
                Span::raw("> "),
                Span::raw(visible),
                Span::styled("_", style::TITLE),
            ]),
        ])
        .style(style::DEFAULT);
        text.render(area, buf);
    }
}
