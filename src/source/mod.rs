mod csv_source;
mod errors;

use std::future::Future;

use crate::models::{GroupedRecord, TransactionRecord};

pub use csv_source::{CsvRecordSource, RecordLayout};
pub use errors::SourceError;

/// Rows handed to the engine by a record source.
#[derive(Debug, Clone)]
pub enum RecordBatch {
    /// Individual sales rows; grouping and filtering happen downstream.
    Raw(Vec<TransactionRecord>),
    /// Rows summed per dimension value by the upstream query.
    Grouped(Vec<GroupedRecord>)
}

impl RecordBatch {
    pub fn len(&self) -> usize {
        match self {
            RecordBatch::Raw(records) => records.len(),
            RecordBatch::Grouped(records) => records.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Supplies the rows a report is computed from.
///
/// Implementations own whatever connection or file handle they need; the engine only ever
/// holds them behind an `Arc` and calls `fetch` once per request.
pub trait RecordSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<RecordBatch, SourceError>> + Send;
}
