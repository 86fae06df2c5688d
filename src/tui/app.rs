//! Application state and logic.
//!
//! This module contains the main [`App`] struct which holds the sheet, the
//! cursor and viewport, and the state of the two dialogs. The app is always in
//! one of three [`Mode`]s; each dialog takes over input while it is open.

use colcalc_core::Sheet;
use colcalc_engine::engine::Formula;

/// Which part of the UI owns the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Navigate the grid.
    Normal,
    /// Typing a formula for a new derived column.
    Formula,
    /// Showing why the last formula was rejected.
    Error,
}

/// Main application state container.
pub struct App {
    /// The sheet being displayed
    pub sheet: Sheet,
    /// Current cursor position (column)
    pub cursor_col: usize,
    /// Current cursor position (row)
    pub cursor_row: usize,
    /// Viewport offset (column)
    pub viewport_col: usize,
    /// Viewport offset (row)
    pub viewport_row: usize,
    /// Number of visible columns
    pub visible_cols: usize,
    /// Number of visible rows
    pub visible_rows: usize,
    /// Column width for display
    pub col_width: usize,
    /// Current mode
    pub mode: Mode,
    /// Formula dialog input. Kept after a rejected submit so it can be fixed.
    pub formula_buffer: String,
    /// Cursor position within formula buffer (byte offset)
    pub formula_cursor: usize,
    /// Message shown by the error dialog
    pub error_message: Option<String>,
    /// Status message to display
    pub status_message: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(sheet: Sheet, col_width: u16) -> Self {
        App {
            sheet,
            cursor_col: 0,
            cursor_row: 0,
            viewport_col: 0,
            viewport_row: 0,
            visible_cols: 1,
            visible_rows: 1,
            col_width: col_width as usize,
            mode: Mode::Normal,
            formula_buffer: String::new(),
            formula_cursor: 0,
            error_message: None,
            status_message: String::new(),
            should_quit: false,
        }
    }

    pub fn max_rows(&self) -> usize {
        self.sheet.row_count()
    }

    pub fn max_cols(&self) -> usize {
        self.sheet.column_count()
    }

    /// Move the cursor by a signed delta, clamped to the grid.
    pub fn move_cursor(&mut self, delta_row: isize, delta_col: isize) {
        let last_row = self.max_rows().saturating_sub(1);
        let last_col = self.max_cols().saturating_sub(1);
        self.cursor_row = self.cursor_row.saturating_add_signed(delta_row).min(last_row);
        self.cursor_col = self.cursor_col.saturating_add_signed(delta_col).min(last_col);
        self.update_viewport();
    }

    pub fn page_down(&mut self) {
        self.move_cursor(self.visible_rows as isize, 0);
    }

    pub fn page_up(&mut self) {
        self.move_cursor(-(self.visible_rows as isize), 0);
    }

    pub fn goto_top(&mut self) {
        self.cursor_row = 0;
        self.update_viewport();
    }

    pub fn goto_bottom(&mut self) {
        self.cursor_row = self.max_rows().saturating_sub(1);
        self.update_viewport();
    }

    pub fn goto_first_col(&mut self) {
        self.cursor_col = 0;
        self.update_viewport();
    }

    pub fn goto_last_col(&mut self) {
        self.cursor_col = self.max_cols().saturating_sub(1);
        self.update_viewport();
    }

    /// Update viewport to keep cursor visible
    pub fn update_viewport(&mut self) {
        // Horizontal scrolling
        if self.cursor_col < self.viewport_col {
            self.viewport_col = self.cursor_col;
        } else if self.cursor_col >= self.viewport_col + self.visible_cols {
            self.viewport_col = self.cursor_col + 1 - self.visible_cols;
        }

        // Vertical scrolling
        if self.cursor_row < self.viewport_row {
            self.viewport_row = self.cursor_row;
        } else if self.cursor_row >= self.viewport_row + self.visible_rows {
            self.viewport_row = self.cursor_row + 1 - self.visible_rows;
        }
    }

    /// Label for the cell under the cursor, e.g. `c2, row 5`.
    pub fn current_cell_label(&self) -> String {
        if self.max_cols() == 0 {
            return format!("row {}", self.cursor_row + 1);
        }
        format!("c{}, row {}", self.cursor_col + 1, self.cursor_row + 1)
    }

    pub fn open_formula_dialog(&mut self) {
        self.formula_cursor = self.formula_buffer.len();
        self.mode = Mode::Formula;
    }

    pub fn cancel_formula(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Add the typed formula as a new column, or open the error dialog.
    pub fn submit_formula(&mut self) {
        let formula = self.formula_buffer.clone();
        match self.sheet.add_derived_column(&formula) {
            Ok(id) => {
                let col = self.sheet.column_count() - 1;
                self.status_message = format!("Added c{} ({}): {}", col + 1, id, formula);
                self.formula_buffer.clear();
                self.formula_cursor = 0;
                self.mode = Mode::Normal;
                self.cursor_col = col;
                self.update_viewport();
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
                self.mode = Mode::Error;
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
        self.mode = Mode::Normal;
    }

    /// One-line hint under the formula input: what the formula reads, or why
    /// it does not parse yet.
    pub fn formula_preview(&self) -> String {
        if self.formula_buffer.trim().is_empty() {
            return "e.g. c2 * c3".to_string();
        }
        match Formula::parse(&self.formula_buffer) {
            Ok(formula) => {
                let cols: Vec<String> = formula.columns().iter().map(|c| c.to_string()).collect();
                if cols.is_empty() {
                    "constant".to_string()
                } else {
                    format!("uses {}", cols.join(", "))
                }
            }
            Err(e) => e.to_string(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.formula_buffer.insert(self.formula_cursor, c);
        self.formula_cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.formula_buffer[..self.formula_cursor].chars().next_back() {
            self.formula_cursor -= prev.len_utf8();
            self.formula_buffer.remove(self.formula_cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.formula_cursor < self.formula_buffer.len() {
            self.formula_buffer.remove(self.formula_cursor);
        }
    }

    pub fn cursor_left(&mut self) {
        if let Some(prev) = self.formula_buffer[..self.formula_cursor].chars().next_back() {
            self.formula_cursor -= prev.len_utf8();
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(next) = self.formula_buffer[self.formula_cursor..].chars().next() {
            self.formula_cursor += next.len_utf8();
        }
    }

    pub fn cursor_home(&mut self) {
        self.formula_cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.formula_cursor = self.formula_buffer.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colcalc_core::seed_sheet;

    fn app() -> App {
        let mut app = App::new(seed_sheet(1), 12);
        app.visible_cols = 2;
        app.visible_rows = 10;
        app
    }

    fn type_formula(app: &mut App, text: &str) {
        app.open_formula_dialog();
        for c in text.chars() {
            app.insert_char(c);
        }
    }

    #[test]
    fn test_move_cursor_clamps() {
        let mut app = app();
        app.move_cursor(-5, -5);
        assert_eq!((app.cursor_row, app.cursor_col), (0, 0));
        app.move_cursor(500, 500);
        assert_eq!((app.cursor_row, app.cursor_col), (94, 2));
        assert_eq!(app.viewport_row, 85);
        assert_eq!(app.viewport_col, 1);
    }

    #[test]
    fn test_submit_adds_column_and_moves_cursor() {
        let mut app = app();
        type_formula(&mut app, "c2 * c3");
        app.submit_formula();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.sheet.column_count(), 4);
        assert_eq!(app.cursor_col, 3);
        assert!(app.formula_buffer.is_empty());
        assert_eq!(app.status_message, "Added c4 (var_col_4): c2 * c3");
    }

    #[test]
    fn test_submit_keeps_formula_text_as_typed() {
        let mut app = app();
        type_formula(&mut app, "  c2 + 1 ");
        app.submit_formula();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.sheet.list_columns()[3].name, "  c2 + 1 ");
    }

    #[test]
    fn test_rejected_formula_opens_error_dialog() {
        let mut app = app();
        type_formula(&mut app, "c1 + c2");
        app.submit_formula();
        assert_eq!(app.mode, Mode::Error);
        assert_eq!(
            app.error_message.as_deref(),
            Some("formula mixes column types: time, data")
        );
        assert_eq!(app.sheet.column_count(), 3);

        app.dismiss_error();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.formula_buffer, "c1 + c2");
    }

    #[test]
    fn test_cancel_keeps_sheet() {
        let mut app = app();
        type_formula(&mut app, "c2");
        app.cancel_formula();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.sheet.column_count(), 3);
    }

    #[test]
    fn test_buffer_editing_is_utf8_safe() {
        let mut app = app();
        type_formula(&mut app, "c2×2");
        app.backspace();
        app.backspace();
        assert_eq!(app.formula_buffer, "c2");
        app.cursor_home();
        app.delete();
        assert_eq!(app.formula_buffer, "2");
        app.cursor_end();
        app.cursor_left();
        app.insert_char('c');
        assert_eq!(app.formula_buffer, "c2");
    }

    #[test]
    fn test_formula_preview() {
        let mut app = app();
        assert_eq!(app.formula_preview(), "e.g. c2 * c3");
        type_formula(&mut app, "c3 / c2");
        assert_eq!(app.formula_preview(), "uses c2, c3");
        app.insert_char('+');
        assert_eq!(
            app.formula_preview(),
            "syntax error at position 8: unexpected end of formula"
        );
    }
}
