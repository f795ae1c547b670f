//! Notes TUI - terminal client for the notes server.

mod app;
mod client;
mod ui;

use std::io;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use client::{NotesApi, NotesClient};

#[derive(Parser)]
#[command(name = "notes-tui")]
#[command(about = "Terminal client for the notes server")]
struct Cli {
    /// Base URL of the notes server
    #[arg(long, env = "NOTES_URL", default_value = "http://127.0.0.1:3000")]
    url: String,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let client = NotesClient::new(&cli.url).map_err(io::Error::other)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(client);
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

/// Main event loop.
fn run_app<B: ratatui::backend::Backend, A: NotesApi>(
    terminal: &mut Terminal<B>,
    app: &mut App<A>,
) -> io::Result<()> {
    // Show the loading screen before the first fetch blocks.
    terminal.draw(|frame| ui::render(frame, app))?;
    app.load();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            // Only handle key press events (not release)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            app.handle_key(key.code);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
