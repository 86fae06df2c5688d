//! UI rendering

use super::app::{App, Mode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};

pub(crate) const FORMULA_BAR_HEIGHT: u16 = 3;
pub(crate) const GRID_MIN_HEIGHT: u16 = 5;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const ROW_HEADER_WIDTH: u16 = 4;
pub(crate) const GRID_COLUMN_SPACING: u16 = 1;

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORMULA_BAR_HEIGHT),
            Constraint::Min(GRID_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let [info_area, grid_area, status_area] = split_main_chunks(f.area());

    // Update visible dimensions based on actual size
    let available_width = grid_area.width.saturating_sub(ROW_HEADER_WIDTH + 2) as usize;
    let available_height = grid_area.height.saturating_sub(3) as usize; // header + borders

    app.visible_cols = (available_width / (app.col_width + GRID_COLUMN_SPACING as usize)).max(1);
    app.visible_rows = available_height.max(1);
    app.update_viewport();

    draw_cell_bar(f, app, info_area);
    draw_grid(f, app, grid_area);
    draw_status_bar(f, app, status_area);

    match app.mode {
        Mode::Formula => draw_formula_dialog(f, app),
        Mode::Error => draw_error_dialog(f, app),
        Mode::Normal => {}
    }
}

/// Shows the cell under the cursor and the header of its column.
fn draw_cell_bar(f: &mut Frame, app: &App, area: Rect) {
    let content = match app.sheet.list_columns().get(app.cursor_col) {
        Some(column) => {
            let display = app.sheet.cell_display(app.cursor_row, app.cursor_col);
            let value = if display.is_empty() {
                "(empty)".to_string()
            } else {
                display
            };
            format!(
                "{}: {}   [{} · {}]",
                app.current_cell_label(),
                value,
                column.name,
                column.kind
            )
        }
        None => format!("{}: no columns", app.current_cell_label()),
    };

    let block = Block::default().borders(Borders::ALL).title(" Cell ");
    f.render_widget(Paragraph::new(content).block(block), area);
}

/// Column header text: the placeholder to use in formulas, then the name.
pub(crate) fn column_header(ordinal: usize, name: &str, width: usize) -> String {
    let label = format!("c{} {}", ordinal, name);
    if label.chars().count() <= width {
        return label;
    }
    let mut truncated: String = label.chars().take(width.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

fn draw_grid(f: &mut Frame, app: &App, area: Rect) {
    let last_col = (app.viewport_col + app.visible_cols).min(app.max_cols());
    let last_row = (app.viewport_row + app.visible_rows).min(app.max_rows());

    // Build header row
    let mut header_cells = vec![Cell::from(" ")]; // Corner
    for col in app.viewport_col..last_col {
        let name = &app.sheet.list_columns()[col].name;
        let style = if col == app.cursor_col {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        header_cells.push(Cell::from(column_header(col + 1, name, app.col_width)).style(style));
    }
    let header = Row::new(header_cells).height(1);

    // Build data rows
    let mut rows = Vec::new();
    for row in app.viewport_row..last_row {
        let mut cells = Vec::new();

        let row_style = if row == app.cursor_row {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        cells.push(Cell::from(format!("{}", row + 1)).style(row_style));

        for col in app.viewport_col..last_col {
            let display = app.sheet.cell_display(row, col);
            let style = if row == app.cursor_row && col == app.cursor_col {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            cells.push(Cell::from(format!("{:>width$}", display, width = app.col_width)).style(style));
        }

        rows.push(Row::new(cells));
    }

    let mut widths = vec![Constraint::Length(ROW_HEADER_WIDTH)]; // Row header
    for _ in app.viewport_col..last_col {
        widths.push(Constraint::Length(app.col_width as u16));
    }

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" colcalc "))
        .column_spacing(GRID_COLUMN_SPACING);

    f.render_widget(table, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (status, style) = if !app.status_message.is_empty() {
        (app.status_message.clone(), Style::default().fg(Color::Yellow))
    } else {
        (
            format!(
                "{} columns × {} rows  |  a: add column  hjkl: move  q: quit",
                app.max_cols(),
                app.max_rows()
            ),
            Style::default().fg(Color::DarkGray),
        )
    };

    let paragraph = Paragraph::new(Line::from(vec![Span::styled(status, style)]));
    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn draw_formula_dialog(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 6, f.area());
    f.render_widget(Clear, area);

    let (before, after) = app.formula_buffer.split_at(app.formula_cursor);
    let lines = vec![
        Line::from(format!("> {}│{}", before, after)),
        Line::from(""),
        Line::from(Span::styled(
            app.formula_preview(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Enter Equation (Enter: add, Esc: cancel) ")
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_error_dialog(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 7, f.area());
    f.render_widget(Clear, area);

    let message = app.error_message.as_deref().unwrap_or("Unknown error");
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Error (Enter/Esc to close) ")
        .border_style(Style::default().fg(Color::Red));
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use colcalc_core::seed_sheet;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn column_header_truncates() {
        assert_eq!(column_header(1, "Time", 14), "c1 Time");
        assert_eq!(column_header(2, "Cell Density (Cell Count/Litre)", 10), "c2 Cell D…");
    }

    #[test]
    fn draw_sizes_viewport_from_terminal() {
        let mut app = App::new(seed_sheet(1), 14);
        let text = render(&mut app);
        // 80 wide: (80 - 4 - 2) / 15 columns; 20 high: 20 - 3 - 1 - 3 rows.
        assert_eq!(app.visible_cols, 4);
        assert_eq!(app.visible_rows, 13);
        assert!(text.contains("c1 Time"));
        assert!(text.contains("colcalc"));
    }

    #[test]
    fn draw_error_dialog_shows_message() {
        let mut app = App::new(seed_sheet(1), 14);
        app.open_formula_dialog();
        for c in "c1 + c2".chars() {
            app.insert_char(c);
        }
        app.submit_formula();
        let text = render(&mut app);
        assert!(text.contains("Error"));
        assert!(text.contains("formula mixes column types"));
    }

    #[test]
    fn draw_formula_dialog_shows_preview() {
        let mut app = App::new(seed_sheet(1), 14);
        app.open_formula_dialog();
        for c in "c2 * c3".chars() {
            app.insert_char(c);
        }
        let text = render(&mut app);
        assert!(text.contains("> c2 * c3"));
        assert!(text.contains("uses c2, c3"));
    }
}
