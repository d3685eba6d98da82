use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

use crate::db::Database;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &mut Database) -> Result<()> {
    info!(saved = db.get_summary_count()?, "starting tui");
    let mut app = App::new();
    app.refresh(db)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        error!("tui exited with error: {e:?}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') | KeyCode::Home => handle_goto_top(app),
        KeyCode::Char('G') | KeyCode::End => handle_goto_bottom(app),
        KeyCode::Char('1') => switch_screen(app, db, Screen::History)?,
        KeyCode::Char('2') => switch_screen(app, db, Screen::Statement)?,
        KeyCode::Tab | KeyCode::BackTab => {
            let next = match app.screen {
                Screen::History => Screen::Statement,
                Screen::Statement => Screen::History,
            };
            switch_screen(app, db, next)?;
        }
        KeyCode::Enter if app.screen == Screen::History => {
            if let Some(s) = app.selected_summary() {
                let msg = format!("#{} {} ({})", s.id.unwrap_or(0), s.filename, s.risk_flag);
                app.set_status(msg);
            }
        }
        KeyCode::Esc => app.status_message.clear(),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

// ── Navigation ───────────────────────────────────────────────

fn switch_screen(app: &mut App, db: &mut Database, screen: Screen) -> Result<()> {
    app.screen = screen;
    if screen == Screen::History {
        app.refresh(db)?;
    }
    app.set_status(format!("{screen}"));
    Ok(())
}

fn handle_move_down(app: &mut App) {
    let page = app.table_page();
    match app.screen {
        Screen::History => scroll_down(
            &mut app.summary_index,
            &mut app.summary_scroll,
            app.summaries.len(),
            page,
        ),
        Screen::Statement => {
            let len = app.transaction_len();
            scroll_down(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                len,
                page,
            );
        }
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::History => scroll_up(&mut app.summary_index, &mut app.summary_scroll),
        Screen::Statement => scroll_up(&mut app.transaction_index, &mut app.transaction_scroll),
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::History => scroll_to_top(&mut app.summary_index, &mut app.summary_scroll),
        Screen::Statement => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll)
        }
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.table_page();
    match app.screen {
        Screen::History => scroll_to_bottom(
            &mut app.summary_index,
            &mut app.summary_scroll,
            app.summaries.len(),
            page,
        ),
        Screen::Statement => {
            let len = app.transaction_len();
            scroll_to_bottom(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                len,
                page,
            );
        }
    }
}
