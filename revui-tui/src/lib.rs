use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue, style::Print};
use revui_core::JjClient;

pub mod app;
pub mod config;
pub mod keymap;

pub use app::{App, AppEvent, UiState};
pub use config::Config;
pub use keymap::{Binding, Layer};

/// Run the dashboard until the user quits.
pub fn run_tui(path: &str, config: Config) -> Result<()> {
    let client = JjClient::new(path);
    let mut app = App::new(client, config);
    app.request_refresh();

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide)?;
    let result = event_loop(&mut app);
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    result
}

fn event_loop(app: &mut App) -> Result<()> {
    loop {
        app.drain_events();
        draw(app)?;
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
        if app.should_quit() {
            return Ok(());
        }
    }
}

fn draw(app: &App) -> Result<()> {
    let (_, height) = size()?;
    let mut stdout = io::stdout();
    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
    for line in app.view(height as usize) {
        queue!(stdout, Print(line), Print("\r\n"))?;
    }
    stdout.flush()?;
    Ok(())
}
