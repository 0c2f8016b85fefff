use thiserror::Error;

use crate::page::PageError;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("page error: {0}")]
    Page(#[from] PageError),

    #[error("no coordinates in URL \"{url}\": {reason}")]
    InvalidCoordinates { url: String, reason: String },

    #[error("could not read {field} from \"{raw}\"")]
    InvalidNumber { field: &'static str, raw: String },

    #[error("failed to export results for \"{query}\": {source}")]
    Export {
        query: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
