use std::io;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Record source [{path}] could not be opened: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error
    },
    #[error("Record source [{path}] is missing required column [{column}]")]
    MissingColumn {
        path: String,
        column: &'static str
    },
    #[error("Record source error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Record source did not respond within {0:?}")]
    Timeout(Duration),
    #[error("Record source reader did not finish: {0}")]
    Join(#[from] JoinError)
}
