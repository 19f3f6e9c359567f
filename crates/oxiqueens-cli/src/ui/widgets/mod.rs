pub use self::{board_display::*, board_grid::*};

mod board_display;
mod board_grid;

mod color {
    use ratatui::style::Color;

    pub const LIGHT_SQUARE: Color = Color::Rgb(240, 217, 181);
    pub const DARK_SQUARE: Color = Color::Rgb(181, 136, 99);
    pub const LIGHT_GREEN: Color = Color::Rgb(170, 230, 150);
    pub const DARK_GREEN: Color = Color::Rgb(100, 170, 80);
    pub const LIGHT_RED: Color = Color::Rgb(240, 150, 150);
    pub const DARK_RED: Color = Color::Rgb(190, 90, 90);
    pub const LIGHT_BLUE: Color = Color::Rgb(150, 170, 240);
    pub const DARK_BLUE: Color = Color::Rgb(90, 110, 190);
    pub const LIGHT_GRAY: Color = Color::Rgb(190, 190, 190);
    pub const DARK_GRAY: Color = Color::Rgb(130, 130, 130);
    pub const LIGHT_DIM: Color = Color::Rgb(90, 90, 90);
    pub const DARK_DIM: Color = Color::Rgb(60, 60, 60);
    pub const LIGHT_GOLD: Color = Color::Rgb(255, 225, 120);
    pub const DARK_GOLD: Color = Color::Rgb(215, 175, 40);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
}

/// Coloring applied to the squares of a board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Plain,
    Selected,
    Red,
    Blue,
    NotCrossed,
    Survivor,
    Discarded,
    Optimal,
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::{Tint, color};

    const fn square_colors(tint: Tint) -> (Color, Color) {
        match tint {
            Tint::Plain => (color::LIGHT_SQUARE, color::DARK_SQUARE),
            Tint::Selected | Tint::Survivor => (color::LIGHT_GREEN, color::DARK_GREEN),
            Tint::Red => (color::LIGHT_RED, color::DARK_RED),
            Tint::Blue => (color::LIGHT_BLUE, color::DARK_BLUE),
            Tint::NotCrossed => (color::LIGHT_GRAY, color::DARK_GRAY),
            Tint::Discarded => (color::LIGHT_DIM, color::DARK_DIM),
            Tint::Optimal => (color::LIGHT_GOLD, color::DARK_GOLD),
        }
    }

    /// Style of one square; queens are drawn in the foreground color.
    pub const fn square(tint: Tint, light: bool) -> Style {
        let (light_color, dark_color) = square_colors(tint);
        let bg = if light { light_color } else { dark_color };
        let fg = match tint {
            Tint::Discarded => color::GRAY,
            _ => color::BLACK,
        };
        Style::new().fg(fg).bg(bg)
    }

    /// Border and title style of a board.
    pub const fn frame(tint: Tint) -> Style {
        match tint {
            Tint::Plain => Style::new(),
            _ => Style::new().fg(square_colors(tint).1),
        }
    }

    pub const HIGHLIGHT: Style = Style::new().fg(color::BLACK).bg(color::YELLOW);
}
