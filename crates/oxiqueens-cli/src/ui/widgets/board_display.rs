use oxiqueens_engine::{AnnotatedBoard, Tag};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block as BlockWidget, Widget},
};

use crate::ui::widgets::{Tint, style};

const SQUARE_WIDTH: u16 = 2;
const QUEEN: &str = "♛ ";
const EMPTY: &str = "  ";

/// One annotated board drawn as a checkered grid, tinted by its tag.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a AnnotatedBoard,
    number: usize,
}

impl<'a> BoardDisplay<'a> {
    /// Creates the display of `board`, titled with its 1-based `number`.
    pub fn new(board: &'a AnnotatedBoard, number: usize) -> Self {
        Self { board, number }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn width(board_size: usize) -> u16 {
        board_size as u16 * SQUARE_WIDTH + 2
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(board_size: usize) -> u16 {
        board_size as u16 + 2
    }

    fn tint(&self, column: usize) -> Tint {
        if self.board.is_optimal() && !self.board.tag.is_discarded() {
            return Tint::Optimal;
        }
        match self.board.tag {
            Tag::Untouched | Tag::Unchanged | Tag::Selected { times: 0 } => Tint::Plain,
            Tag::Selected { .. } => Tint::Selected,
            Tag::CutLeft { cut } => {
                if column < cut {
                    Tint::Red
                } else {
                    Tint::Blue
                }
            }
            Tag::CutRight { cut } => {
                if column < cut {
                    Tint::Blue
                } else {
                    Tint::Red
                }
            }
            Tag::NotCrossed => Tint::NotCrossed,
            Tag::ParentA { .. } => Tint::Red,
            Tag::ParentB { .. } | Tag::Mutated { .. } => Tint::Blue,
            Tag::Survivor { .. } => Tint::Survivor,
            Tag::Discarded => Tint::Discarded,
        }
    }

    fn title(&self) -> String {
        match self.board.tag {
            Tag::Selected { times } if times > 1 => format!("#{} ×{times}", self.number),
            _ => format!("#{}", self.number),
        }
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
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let board = &self.board.board;
        let size = board.size();
        let frame_tint = self.tint(0);
        let block = BlockWidget::bordered()
            .title(self.title())
            .title_top(Line::from(self.board.fitness.to_string()).right_aligned())
            .border_style(style::frame(frame_tint));
        let inner = block.inner(area);
        block.render(area, buf);

        let highlight = match self.board.tag {
            Tag::Mutated { column, .. } => Some((column, board.row(column))),
            _ => None,
        };
        for column in 0..size {
            let tint = self.tint(column);
            let x = inner.x + column as u16 * SQUARE_WIDTH;
            if x + SQUARE_WIDTH > inner.right() {
                break;
            }
            for row in 0..size {
                let y = inner.y + row as u16;
                if y >= inner.bottom() {
                    break;
                }
                let style = if highlight == Some((column, row)) {
                    style::HIGHLIGHT
                } else {
                    style::square(tint, (row + column) % 2 == 0)
                };
                let symbol = if board.has_queen(column, row) {
                    QUEEN
                } else {
                    EMPTY
                };
                buf.set_string(x, y, symbol, style);
            }
        }
    }
}
