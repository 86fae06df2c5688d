use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::io;

use super::app::{App, Mode};
use super::ui;

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (Windows reports Press + Release)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            handle_key(app, key);
        }
    }
    Ok(())
}

/// Route a key press to the handler for the current mode.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.mode {
        Mode::Error => handle_error_key(app, key),
        Mode::Formula => handle_formula_key(app, key),
        Mode::Normal => handle_normal_key(app, key),
    }
}

fn handle_error_key(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
        app.dismiss_error();
    }
}

fn handle_formula_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_formula(),
        KeyCode::Enter => app.submit_formula(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.insert_char(c),
        _ => {}
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    app.status_message.clear();
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('a') | KeyCode::Char('=') => app.open_formula_dialog(),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1, 0),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1, 0),
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(0, -1),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(0, 1),
        KeyCode::PageUp => app.page_up(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::Char('g') => app.goto_top(),
        KeyCode::Char('G') => app.goto_bottom(),
        KeyCode::Home | KeyCode::Char('0') => app.goto_first_col(),
        KeyCode::End | KeyCode::Char('$') => app.goto_last_col(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colcalc_core::seed_sheet;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_add_column_flow() {
        let mut app = App::new(seed_sheet(2), 12);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::Formula);
        type_str(&mut app, "c2 / c3");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.sheet.list_columns()[3].name, "c2 / c3");
    }

    #[test]
    fn test_error_flow_leaves_sheet_unchanged() {
        let mut app = App::new(seed_sheet(2), 12);
        let before = app.sheet.snapshot();
        press(&mut app, KeyCode::Char('='));
        type_str(&mut app, "c9");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Error);
        assert_eq!(
            app.error_message.as_deref(),
            Some("unknown column c9: the sheet has 3 columns")
        );

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Normal);
        assert!(std::sync::Arc::ptr_eq(&before, &app.sheet.snapshot()));
    }

    #[test]
    fn test_q_in_dialog_is_text() {
        let mut app = App::new(seed_sheet(2), 12);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.formula_buffer, "q");
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_any_mode() {
        let mut app = App::new(seed_sheet(2), 12);
        press(&mut app, KeyCode::Char('a'));
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = App::new(seed_sheet(2), 12);
        app.visible_rows = 20;
        app.visible_cols = 3;
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.cursor_row, 94);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.cursor_row, 0);
        press(&mut app, KeyCode::Char('$'));
        assert_eq!(app.cursor_col, 2);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.cursor_col, 1);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.cursor_row, 20);
    }
}
