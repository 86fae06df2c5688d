//! CSV export functionality

use crate::sheet::SheetData;
use std::io::Write;

/// Write the grid as CSV with a header row of column names.
pub fn write_csv<W: Write>(w: &mut W, data: &SheetData) -> std::io::Result<()> {
    let header: Vec<String> = data.catalog().iter().map(|c| escape_csv(&c.name)).collect();
    writeln!(w, "{}", header.join(","))?;

    for row in 0..data.row_count() {
        let fields: Vec<String> = (0..data.column_count())
            .map(|col| data.cell_display(row, col))
            .collect();
        writeln!(w, "{}", fields.join(","))?;
    }

    Ok(())
}

/// Quote a field if it contains a comma, quote or line break.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
