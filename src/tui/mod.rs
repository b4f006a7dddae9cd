pub mod app;
pub mod view;

use anyhow::Context;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;

pub use app::App;

/// Run the viewer until the user quits. Sets up the terminal, drives the
/// blocking event loop, and always restores the terminal on the way out.
pub fn run(app: App) -> anyhow::Result<()> {
    let terminal = ratatui::init();
    let result = event_loop(terminal, app);
    ratatui::restore();
    result
}

fn event_loop(mut terminal: DefaultTerminal, mut app: App) -> anyhow::Result<()> {
    while !app.should_quit {
        terminal
            .draw(|frame| view::draw(frame, &app))
            .context("failed to draw frame")?;

        if let Event::Key(key) = event::read().context("failed to read terminal event")? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key.code);
            }
        }
    }
    Ok(())
}
