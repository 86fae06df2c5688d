//! Export of the rendered grid (Markdown and CSV).

mod csv;
mod md;

pub use csv::write_csv;
pub use md::write_markdown;

use crate::error::Result;
use crate::sheet::SheetData;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export format, picked from a file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Csv,
}

impl ExportFormat {
    /// `.csv` (any case) is CSV, everything else is Markdown.
    pub fn from_path(path: &Path) -> ExportFormat {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Markdown,
        }
    }
}

pub fn write_sheet<W: Write>(w: &mut W, data: &SheetData, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Markdown => write_markdown(w, data)?,
        ExportFormat::Csv => write_csv(w, data)?,
    }
    Ok(())
}

/// Write the sheet to `path`, choosing the format from its extension.
pub fn export_to_path(path: &Path, data: &SheetData) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_sheet(&mut writer, data, ExportFormat::from_path(path))?;
    writer.flush()?;
    Ok(())
}
