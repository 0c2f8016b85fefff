use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::record::{cell_text, Table};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes `table` as CSV, prefixed with a UTF-8 byte-order mark so
/// spreadsheet applications detect the encoding.
///
/// # Errors
///
/// Returns [`ExportError::Io`] or [`ExportError::Csv`] if the file cannot be
/// written.
pub fn write_csv(path: &Path, table: &Table) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(UTF8_BOM).map_err(io_err)?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(cell_text))?;
    }
    writer.flush().map_err(io_err)?;
    Ok(())
}
