use crossterm::event;

use crate::tui::App;

/// Runs the application until `app.should_exit()` returns true.
///
/// The screen is redrawn on startup and after every terminal event; nothing is
/// redrawn while waiting for input.
pub fn run<A>(app: &mut A) -> anyhow::Result<()>
where
    A: App + ?Sized,
{
    ratatui::run(|terminal| {
        while !app.should_exit() {
            terminal.draw(|frame| app.draw(frame))?;
            let event = event::read()?;
            app.handle_event(&event);
        }
        Ok(())
    })
}
