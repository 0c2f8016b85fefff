use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde_json::Value;

use crate::error::ExportError;
use crate::record::{cell_text, Table};

/// Writes `table` to a single-sheet XLSX workbook with a bold header row.
///
/// Numbers are stored as numeric cells. Empty strings and nulls are left
/// blank.
///
/// # Errors
///
/// Returns [`ExportError::Xlsx`] if the workbook cannot be built or saved,
/// or [`ExportError::TooLarge`] if the table exceeds worksheet limits.
pub fn write_xlsx(path: &Path, table: &Table) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, header) in table.headers.iter().enumerate() {
        sheet.write_string_with_format(0, col_index(col)?, header, &header_format)?;
    }

    for (i, row) in table.rows.iter().enumerate() {
        let row_index = u32::try_from(i + 1).map_err(|e| ExportError::TooLarge {
            reason: format!("row {i}: {e}"),
        })?;
        for (col, value) in row.iter().enumerate() {
            write_cell(sheet, row_index, col_index(col)?, value)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn col_index(col: usize) -> Result<u16, ExportError> {
    u16::try_from(col).map_err(|e| ExportError::TooLarge {
        reason: format!("column {col}: {e}"),
    })
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<(), ExportError> {
    match value {
        Value::Null => {}
        Value::String(s) if s.is_empty() => {}
        Value::Number(n) => match n.as_f64() {
            Some(f) => {
                sheet.write_number(row, col, f)?;
            }
            None => {
                sheet.write_string(row, col, n.to_string())?;
            }
        },
        Value::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        other => {
            sheet.write_string(row, col, cell_text(other))?;
        }
    }
    Ok(())
}
