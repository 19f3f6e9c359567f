use std::cell::Cell;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use oxiqueens_engine::{Board, Run, StepKind, StepRecord};
use ratatui::{
    Frame,
    layout::{Constraint, HorizontalAlignment, Layout, Rect, Spacing},
    style::{Color, Stylize as _},
    symbols::merge::MergeStrategy,
    text::{Line, Text},
    widgets::{Block as BlockWidget, Padding, Paragraph, Wrap},
};

use crate::{tui::App, ui::widgets::BoardGrid};

/// Pager over the steps of a finished run.
#[derive(Debug)]
pub struct StepViewerScreen {
    source: String,
    run: Run,
    step_index: usize,
    scroll: usize,
    /// Area the boards were last drawn in, bounding `scroll`.
    grid_area: Cell<Rect>,
    should_exit: bool,
}

impl StepViewerScreen {
    /// Creates a pager showing the first step of `run`, labelled with `source`.
    pub fn new(source: String, run: Run) -> Self {
        Self {
            source,
            run,
            step_index: 0,
            scroll: 0,
            grid_area: Cell::new(Rect::ZERO),
            should_exit: false,
        }
    }

    fn go_to(&mut self, index: usize) {
        let index = usize::min(index, self.run.len().saturating_sub(1));
        if index != self.step_index {
            self.step_index = index;
            self.scroll = 0;
        }
    }

    fn step_forward(&mut self, amount: usize) {
        self.go_to(self.step_index.saturating_add(amount));
    }

    fn step_backward(&mut self, amount: usize) {
        self.go_to(self.step_index.saturating_sub(amount));
    }

    fn jump_to_first(&mut self) {
        self.go_to(0);
    }

    fn jump_to_last(&mut self) {
        self.go_to(usize::MAX);
    }

    fn scroll_down(&mut self) {
        let Some(step) = self.run.get(self.step_index) else {
            return;
        };
        let max_scroll = BoardGrid::new(&step.boards).max_scroll(self.grid_area.get());
        self.scroll = usize::min(self.scroll + 1, max_scroll);
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn header_lines(&self, step: &StepRecord) -> Vec<Line<'static>> {
        let board_size = step.boards.first().map_or(0, |b| b.board.size());
        let mut lines = vec![
            Line::from(step.title.clone()).bold(),
            Line::from(format!(
                "Step {}/{} | Generation {}/{} | Fitness best {} worst {} average {:.2} (optimal {})",
                self.step_index + 1,
                self.run.len(),
                step.generation + 1,
                self.run.outcome().generations(),
                step.stats.best,
                step.stats.worst,
                step.stats.average,
                Board::max_fitness(board_size),
            )),
        ];
        lines.extend(step.description.lines().map(|line| Line::from(line.to_owned())));
        lines.push(Line::from(format!("Outcome: {}", self.run.outcome())).style(Color::Cyan));
        lines
    }
}

impl App for StepViewerScreen {
    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        if event.kind != KeyEventKind::Press {
            return;
        }
        match event.code {
            KeyCode::Char('j' | 'n') | KeyCode::Down => self.step_forward(1),
            KeyCode::Char('k' | 'p') | KeyCode::Up => self.step_backward(1),
            KeyCode::Char('l') | KeyCode::Right => self.step_forward(StepKind::COUNT),
            KeyCode::Char('h') | KeyCode::Left => self.step_backward(StepKind::COUNT),
            KeyCode::Char('g') | KeyCode::Home => self.jump_to_first(),
            KeyCode::Char('G') | KeyCode::End => self.jump_to_last(),
            KeyCode::PageDown => self.scroll_down(),
            KeyCode::PageUp => self.scroll_up(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let top_block = BlockWidget::bordered()
            .title(format!("Eight Queens GA: {}", self.source))
            .title_alignment(HorizontalAlignment::Center)
            .padding(Padding::symmetric(1, 0));
        let viewport = frame.area();

        let Some(step) = self.run.get(self.step_index) else {
            let text_area = top_block
                .inner(viewport)
                .centered_vertically(Constraint::Length(1));
            let text = Text::from("NO STEPS AVAILABLE").centered().style(Color::Red);
            frame.render_widget(top_block, viewport);
            frame.render_widget(text, text_area);
            return;
        };

        let lines = self.header_lines(step);
        let header_height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let [top_area, mid_area, bottom_area] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .spacing(Spacing::Overlap(1))
        .areas(viewport);

        let header = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(top_block.merge_borders(MergeStrategy::Exact));

        let grid_block = BlockWidget::bordered()
            .padding(Padding::symmetric(1, 0))
            .merge_borders(MergeStrategy::Exact);
        let grid_area = grid_block.inner(mid_area);
        self.grid_area.set(grid_area);
        let grid = BoardGrid::new(&step.boards).scroll(self.scroll);

        let help = Paragraph::new(vec![
            Line::from("j/k or ↓/↑ (1 step) | h/l or ←/→ (1 generation) | PgUp/PgDn (scroll) | g/Home (First) | G/End (Last) | q/Esc (Quit)").centered(),
        ])
        .style(Color::DarkGray)
        .block(BlockWidget::bordered().merge_borders(MergeStrategy::Exact));

        frame.render_widget(header, top_area);
        frame.render_widget(grid_block, mid_area);
        frame.render_widget(grid, grid_area);
        frame.render_widget(help, bottom_area);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

use crossterm::event::{KeyEvent, KeyModifiers};
    use oxiqueens_engine::{Evolution, EvolutionConfig, Seed};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;

    fn three_generation_run() -> Run {
        let config = EvolutionConfig {
            mutation_rate: 0.0,
            max_generations: 3,
            ..EvolutionConfig::default()
        };
        let boards = vec![Board::new(&[0; 8]).unwrap(); 20];
        Evolution::with_population(config, Seed::new(1), boards)
            .unwrap()
            .run()
    }

    fn press(screen: &mut StepViewerScreen, code: KeyCode) {
        screen.handle_event(&Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn screen_text(buffer: &Buffer) -> String {
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_navigation_keys() {
        let mut screen = StepViewerScreen::new("test".to_owned(), three_generation_run());
        assert_eq!(screen.run.len(), 15);

        press(&mut screen, KeyCode::Char('j'));
        assert_eq!(screen.step_index, 1);
        press(&mut screen, KeyCode::Char('n'));
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.step_index, 3);
        press(&mut screen, KeyCode::Char('k'));
        press(&mut screen, KeyCode::Char('p'));
        press(&mut screen, KeyCode::Up);
        press(&mut screen, KeyCode::Up);
        assert_eq!(screen.step_index, 0);

        press(&mut screen, KeyCode::Char('l'));
        assert_eq!(screen.step_index, 5);
        press(&mut screen, KeyCode::Right);
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.step_index, 14);
        press(&mut screen, KeyCode::Char('h'));
        assert_eq!(screen.step_index, 9);

        press(&mut screen, KeyCode::Char('g'));
        assert_eq!(screen.step_index, 0);
        press(&mut screen, KeyCode::End);
        assert_eq!(screen.step_index, 14);
        press(&mut screen, KeyCode::Home);
        press(&mut screen, KeyCode::Char('G'));
        assert_eq!(screen.step_index, 14);

        assert!(!screen.should_exit());
        press(&mut screen, KeyCode::Char('q'));
        assert!(screen.should_exit());
    }

    #[test]
    fn test_scroll_stops_at_last_row_of_boards() {
        let mut screen = StepViewerScreen::new("test".to_owned(), three_generation_run());
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal.draw(|frame| screen.draw(frame)).unwrap();
        let boards = &screen.run.get(0).unwrap().boards;
        let max_scroll = BoardGrid::new(boards).max_scroll(screen.grid_area.get());
        assert!((2..20).contains(&max_scroll));

        press(&mut screen, KeyCode::PageUp);
        assert_eq!(screen.scroll, 0);
        press(&mut screen, KeyCode::PageDown);
        press(&mut screen, KeyCode::PageDown);
        assert_eq!(screen.scroll, 2);
        for _ in 0..100 {
            press(&mut screen, KeyCode::PageDown);
        }
        assert_eq!(screen.scroll, max_scroll);
        press(&mut screen, KeyCode::PageUp);
        assert_eq!(screen.scroll, max_scroll - 1);
    }

    #[test]
    fn test_changing_step_resets_scroll() {
        let mut screen = StepViewerScreen::new("test".to_owned(), three_generation_run());
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal.draw(|frame| screen.draw(frame)).unwrap();

        press(&mut screen, KeyCode::PageDown);
        press(&mut screen, KeyCode::Char('k'));
        assert_eq!(screen.step_index, 0);
        assert_eq!(screen.scroll, 1);

        press(&mut screen, KeyCode::Char('j'));
        assert_eq!(screen.step_index, 1);
        assert_eq!(screen.scroll, 0);

        press(&mut screen, KeyCode::PageDown);
        press(&mut screen, KeyCode::End);
        assert_eq!(screen.scroll, 0);
    }

    #[test]
    fn test_ignores_key_release() {
        let mut screen = StepViewerScreen::new("test".to_owned(), three_generation_run());
        let mut release = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        screen.handle_event(&Event::Key(release));
        assert_eq!(screen.step_index, 0);
    }

    #[test]
    fn test_draw_shows_step_header() {
        let mut screen = StepViewerScreen::new("seed 1".to_owned(), three_generation_run());
        let mut terminal = Terminal::new(TestBackend::new(160, 60)).unwrap();

        terminal.draw(|frame| screen.draw(frame)).unwrap();
        let text = screen_text(terminal.backend().buffer());
        assert!(text.contains("Eight Queens GA: seed 1"));
        assert!(text.contains("Generation #0: Tournament selection"));
        assert!(text.contains("Step 1/15 | Generation 1/3"));
        assert!(text.contains("Outcome: unsolved after 3 generation(s)"));
        assert!(text.contains("#1"));

        press(&mut screen, KeyCode::End);
        terminal.draw(|frame| screen.draw(frame)).unwrap();
        let text = screen_text(terminal.backend().buffer());
        assert!(text.contains("Generation #2: Natural selection"));
        assert!(text.contains("Step 15/15"));
    }

    #[test]
    fn test_draw_in_tiny_terminal() {
        let screen = StepViewerScreen::new("test".to_owned(), three_generation_run());
        for (width, height) in [(1, 1), (10, 4), (30, 8)] {
            let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
            terminal.draw(|frame| screen.draw(frame)).unwrap();
        }
    }
}
