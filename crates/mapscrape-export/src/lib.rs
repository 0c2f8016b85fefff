//! Tabular export of scraped result sets.
//!
//! Each query produces two files under the output directory, named from the
//! query text: an XLSX workbook and a UTF-8 CSV with a byte-order mark.

mod csv_file;
pub mod error;
mod exporter;
pub mod naming;
pub mod record;
mod xlsx_file;

pub use csv_file::write_csv;
pub use error::ExportError;
pub use exporter::{ExportPaths, Exporter};
pub use naming::file_stem;
pub use record::{flatten_record, Table};
pub use xlsx_file::write_xlsx;
