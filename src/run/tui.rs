use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use super::SeriesQuery;
use crate::db::Database;
use crate::ui::app::App;

pub(crate) fn as_tui(db: &Database, query: SeriesQuery) -> Result<()> {
    let mut app = App::new(query, db.get_categories()?);
    app.refresh(db)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| crate::ui::render::render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let changed = match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    app.running = false;
                    false
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.running = false;
                    false
                }
                KeyCode::Char('s') => {
                    app.cycle_smoothing();
                    true
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    app.widen_window();
                    true
                }
                KeyCode::Char('-') => {
                    app.narrow_window();
                    true
                }
                KeyCode::Char('c') => {
                    app.cycle_category();
                    true
                }
                _ => false,
            };

            if changed {
                if let Err(e) = app.refresh(db) {
                    app.status_message = format!("Error: {e}");
                }
            }
        }
    }
    Ok(())
}
