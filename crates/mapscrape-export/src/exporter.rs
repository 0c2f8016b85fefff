use std::path::{Path, PathBuf};

use mapscrape_core::ResultSet;
use mapscrape_scraper::ResultSink;

use crate::csv_file::write_csv;
use crate::error::ExportError;
use crate::naming::file_stem;
use crate::record::Table;
use crate::xlsx_file::write_xlsx;

/// Paths written for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub xlsx: PathBuf,
    pub csv: PathBuf,
}

/// Writes each result set as an XLSX/CSV pair under `output_dir`.
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Paths the exports for `query` will be written to.
    #[must_use]
    pub fn paths_for(&self, query: &str) -> ExportPaths {
        let stem = file_stem(query);
        ExportPaths {
            xlsx: self.output_dir.join(format!("{stem}.xlsx")),
            csv: self.output_dir.join(format!("{stem}.csv")),
        }
    }

    /// Writes `results` in both formats, creating the output directory if
    /// needed. Existing files for the same query are overwritten.
    ///
    /// # Errors
    ///
    /// Returns an [`ExportError`] if the directory cannot be created or
    /// either file cannot be written.
    pub fn export(&self, results: &ResultSet) -> Result<ExportPaths, ExportError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let table = Table::from_results(results)?;
        let paths = self.paths_for(results.query());

        write_xlsx(&paths.xlsx, &table)?;
        write_csv(&paths.csv, &table)?;

        tracing::info!(
            query = %results.query(),
            rows = table.rows.len(),
            xlsx = %paths.xlsx.display(),
            csv = %paths.csv.display(),
            "exported results"
        );
        Ok(paths)
    }
}

impl ResultSink for Exporter {
    type Error = ExportError;

    fn write(&self, results: &ResultSet) -> Result<Vec<PathBuf>, Self::Error> {
        let paths = self.export(results)?;
        Ok(vec![paths.xlsx, paths.csv])
    }
}
