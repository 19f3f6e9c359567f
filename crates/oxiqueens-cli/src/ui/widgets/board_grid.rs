use oxiqueens_engine::AnnotatedBoard;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::ui::widgets::BoardDisplay;

/// All boards of a step, laid out left to right in as many columns as fit.
///
/// When the boards do not fit vertically, `scroll` skips whole rows of boards.
#[derive(Debug)]
pub struct BoardGrid<'a> {
    boards: &'a [AnnotatedBoard],
    scroll: usize,
}

impl<'a> BoardGrid<'a> {
    pub fn new(boards: &'a [AnnotatedBoard]) -> Self {
        Self { boards, scroll: 0 }
    }

    pub fn scroll(self, scroll: usize) -> Self {
        Self { scroll, ..self }
    }

    fn board_size(&self) -> usize {
        self.boards.first().map_or(0, |b| b.board.size())
    }

    /// Returns the number of boards per row and the number of fully visible rows.
    fn shape(&self, area: Rect) -> (usize, usize) {
        let size = self.board_size();
        let columns = usize::from(area.width / BoardDisplay::width(size)).max(1);
        let rows = usize::from(area.height / BoardDisplay::height(size));
        (columns, rows)
    }

    /// Returns the largest useful scroll offset in `area`.
    pub fn max_scroll(&self, area: Rect) -> usize {
        let (columns, rows) = self.shape(area);
        self.boards.len().div_ceil(columns).saturating_sub(rows)
    }
}

impl Widget for BoardGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardGrid<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.boards.is_empty() {
            return;
        }
        let size = self.board_size();
        let (cell_width, cell_height) = (BoardDisplay::width(size), BoardDisplay::height(size));
        let (columns, rows) = self.shape(area);
        let scroll = self.scroll.min(self.max_scroll(area));

        let used_width = (columns as u16).saturating_mul(cell_width);
        let left = area.x + area.width.saturating_sub(used_width) / 2;
        for (index, board) in self
            .boards
            .iter()
            .enumerate()
            .skip(scroll * columns)
            .take(rows * columns)
        {
            let row = (index / columns - scroll) as u16;
            let column = (index % columns) as u16;
            let cell = Rect::new(
                left + column * cell_width,
                area.y + row * cell_height,
                cell_width,
                cell_height,
            )
            .intersection(area);
            BoardDisplay::new(board, index + 1).render(cell, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use oxiqueens_engine::{Board, Tag};

    use super::*;

    fn boards(count: usize) -> Vec<AnnotatedBoard> {
        (0..count)
            .map(|_| AnnotatedBoard::new(Board::new(&[0; 8]).unwrap(), Tag::Untouched))
            .collect()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_owned())
            .collect()
    }

    #[test]
    fn test_lays_out_rows_that_fit() {
        let boards = boards(20);
        let area = Rect::new(0, 0, 54, 20);
        let mut buf = Buffer::empty(area);
        BoardGrid::new(&boards).render(area, &mut buf);

        assert!(row_text(&buf, 0).contains("#1"));
        assert!(row_text(&buf, 0).contains("#3"));
        assert!(row_text(&buf, 10).contains("#4"));
        assert!(!row_text(&buf, 10).contains("#7"));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let boards = boards(20);
        let area = Rect::new(0, 0, 54, 20);
        let grid = BoardGrid::new(&boards).scroll(1);
        // 7 rows of 3 boards, 2 visible at a time.
        assert_eq!(grid.max_scroll(area), 5);

        let mut buf = Buffer::empty(area);
        grid.render(area, &mut buf);
        assert!(row_text(&buf, 0).contains("#4"));

        let mut buf = Buffer::empty(area);
        BoardGrid::new(&boards).scroll(100).render(area, &mut buf);
        assert!(row_text(&buf, 0).contains("#16"));
        assert!(row_text(&buf, 10).contains("#19"));
    }

    #[test]
    fn test_narrow_area_does_not_panic() {
        let boards = boards(5);
        for (width, height) in [(0, 0), (5, 3), (17, 9), (18, 30)] {
            let area = Rect::new(2, 1, width, height);
            let mut buf = Buffer::empty(Rect::new(0, 0, 40, 40));
            BoardGrid::new(&boards).scroll(3).render(area, &mut buf);
        }
        let area = Rect::new(0, 0, 10, 10);
        BoardGrid::new(&[]).render(area, &mut Buffer::empty(area));
    }
}
