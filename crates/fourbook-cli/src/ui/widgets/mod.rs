use fourbook_client::Player;
use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{board_display::*, cell_display::*, prompt_display::*, scores_display::*};

mod board_display;
mod cell_display;
mod prompt_display;
mod scores_display;

mod color {
    use ratatui::style::Color;

    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const NAVY: Color = Color::Rgb(0, 0, 95);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const TITLE: Style = DEFAULT.add_modifier(Modifier::BOLD);
    pub const FRAME: Style = fg_bg(color::BLUE, color::BLACK);
    pub const HELP: Style = fg_bg(color::GRAY, color::BLACK);
    pub const NOTICE: Style = fg_bg(color::RED, color::BLACK);

    pub const EMPTY: Style = fg_bg(color::GRAY, color::BLACK);
    pub const PLAYER_ONE: Style = fg_bg(color::RED, color::BLACK);
    pub const PLAYER_TWO: Style = fg_bg(color::YELLOW, color::BLACK);
    pub const SELECTED_BG: Color = color::NAVY;

    pub const LABEL: Style = fg_bg(color::WHITE, color::BLACK);
    pub const SCORE: Style = fg_bg(color::WHITE, color::BLACK);
    pub const BEST_SCORE: Style = fg_bg(color::GREEN, color::BLACK).add_modifier(Modifier::BOLD);
}

pub fn player_name(player: Player) -> &'static str {
    match player {
        Player::One => "Red",
        Player::Two => "Yellow",
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
