//! Markdown export functionality

use crate::sheet::SheetData;
use std::io::Write;

/// Write the grid as a markdown table: a row-number column, then one column
/// per catalog entry. Missing values are empty cells.
pub fn write_markdown<W: Write>(w: &mut W, data: &SheetData) -> std::io::Result<()> {
    if data.column_count() == 0 {
        writeln!(w, "*Empty sheet*")?;
        return Ok(());
    }

    write!(w, "| # |")?;
    for column in data.catalog() {
        write!(w, " {} |", escape_markdown(&column.name))?;
    }
    writeln!(w)?;

    write!(w, "|---|")?;
    for _ in 0..data.column_count() {
        write!(w, "---|")?;
    }
    writeln!(w)?;

    for row in 0..data.row_count() {
        write!(w, "| {} |", row + 1)?;
        for col in 0..data.column_count() {
            write!(w, " {} |", data.cell_display(row, col))?;
        }
        writeln!(w)?;
    }

    Ok(())
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}
