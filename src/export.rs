//! Data table export: CSV files and clipboard.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use arboard::Clipboard;
use csv::{Writer, WriterBuilder};

use crate::digitizer::TableRow;
use crate::error::{DigitizeError, Result};

/// Header shared by CSV and TSV output.
const HEADER: [&str; 5] = ["curve", "name", "point", "x", "y"];

/// Render rows as CSV.
pub fn to_csv(rows: &[TableRow]) -> Result<String> {
    render(rows, b',')
}

/// Render rows as tab-separated values.
pub fn to_tsv(rows: &[TableRow]) -> Result<String> {
    render(rows, b'\t')
}

/// Write rows to a CSV file.
pub fn write_csv(path: &Path, rows: &[TableRow]) -> Result<()> {
    let file = File::create(path).map_err(|e| DigitizeError::file_write(path.to_path_buf(), e))?;
    let mut wtr = Writer::from_writer(file);
    write_rows(&mut wtr, rows)?;
    wtr.flush()
        .map_err(|e| DigitizeError::file_write(path.to_path_buf(), e))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "Exported CSV");
    Ok(())
}

/// Copy rows to the clipboard as TSV.
pub fn copy_table(rows: &[TableRow]) -> Result<()> {
    let text = to_tsv(rows)?;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

fn write_rows<W: Write>(wtr: &mut Writer<W>, rows: &[TableRow]) -> Result<()> {
    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record(&[
            row.curve_id.to_string(),
            row.curve_name.clone(),
            row.point_index.to_string(),
            row.x.to_string(),
            row.y.to_string(),
        ])?;
    }
    Ok(())
}

fn render(rows: &[TableRow], delimiter: u8) -> Result<String> {
    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::with_capacity((rows.len() + 1) * 32));
    write_rows(&mut wtr, rows)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| DigitizeError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
