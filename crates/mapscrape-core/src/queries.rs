//! Resolving the list of search queries for a run.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("pass a query with -s/--pesquisa or add queries to {}", path.display())]
    NoQueries { path: PathBuf },

    #[error("failed to read query file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve the queries to run.
///
/// A query given on the command line wins and the file is never read.
/// Otherwise `input_path` is read as one query per line; lines are trimmed
/// and blank lines dropped. A missing file counts as empty.
///
/// # Errors
///
/// - [`QueryError::NoQueries`] when neither source yields a query.
/// - [`QueryError::Read`] when the file exists but cannot be read.
pub fn load_queries(cli_query: Option<&str>, input_path: &Path) -> Result<Vec<String>, QueryError> {
    if let Some(query) = cli_query.map(str::trim).filter(|q| !q.is_empty()) {
        return Ok(vec![query.to_owned()]);
    }

    let contents = match std::fs::read_to_string(input_path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(QueryError::Read {
                path: input_path.to_path_buf(),
                source,
            })
        }
    };

    let queries: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();

    if queries.is_empty() {
        return Err(QueryError::NoQueries {
            path: input_path.to_path_buf(),
        });
    }
    Ok(queries)
}
