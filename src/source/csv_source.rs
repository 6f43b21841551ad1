use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error, warn};

use crate::models::{GroupedRecord, TransactionRecord};
use crate::source::{RecordBatch, RecordSource, SourceError};

const RAW_COLUMNS: [&str; 3] = ["BPC_DIMENSION5_", "QTY", "LASTSETTLEDATE"];
const GROUPED_COLUMNS: [&str; 2] = ["BPC_DIMENSION5_", "TotalQTY"];

/// Shape of the rows in a CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordLayout {
    /// One row per sale: `BPC_DIMENSION5_`, `QTY`, `LASTSETTLEDATE`.
    #[default]
    Raw,
    /// One row per dimension value: `BPC_DIMENSION5_`, `TotalQTY`.
    Grouped
}

/// Reads a CSV export of the sales-commission table.
pub struct CsvRecordSource {
    path: PathBuf,
    layout: RecordLayout,
    backpressure: usize
}

impl CsvRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            layout: RecordLayout::Raw,
            backpressure: 256
        }
    }

    pub fn with_layout(mut self, layout: RecordLayout) -> Self {
        self.layout = layout;
        self
    }

    async fn read_rows<T>(&self, required_columns: &'static [&'static str]) -> Result<Vec<T>, SourceError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (sender, mut receiver) = mpsc::channel::<T>(self.backpressure);
        let reader_handle = spawn_csv_reader(self.path.clone(), required_columns, sender);

        let mut rows = Vec::new();

        while let Some(row) = receiver.recv().await {
            rows.push(row);
        }

        let skipped = reader_handle.await??;

        if skipped > 0 {
            warn!("Skipped [{skipped}] malformed rows in [{}]", self.path.display());
        }

        debug!("Read [{}] rows from [{}]", rows.len(), self.path.display());

        Ok(rows)
    }
}

impl RecordSource for CsvRecordSource {
    async fn fetch(&self) -> Result<RecordBatch, SourceError> {
        match self.layout {
            RecordLayout::Raw => self.read_rows::<TransactionRecord>(&RAW_COLUMNS).await
                .map(RecordBatch::Raw),
            RecordLayout::Grouped => self.read_rows::<GroupedRecord>(&GROUPED_COLUMNS).await
                .map(RecordBatch::Grouped)
        }
    }
}

/// Parses the file on a blocking thread and streams rows into `sender`. Returns the number of
/// rows that failed to deserialize.
fn spawn_csv_reader<T>(path: PathBuf, required_columns: &'static [&'static str], sender: mpsc::Sender<T>) -> JoinHandle<Result<usize, SourceError>>
where
    T: DeserializeOwned + Send + 'static,
{
    spawn_blocking(move || {
        let file = File::open(&path).map_err(|source| SourceError::Open {
            path: path.display().to_string(),
            source
        })?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers = reader.headers()?.clone();

        if let Some(column) = required_columns.iter().copied().find(|column| !headers.iter().any(|header| header == *column)) {
            return Err(SourceError::MissingColumn {
                path: path.display().to_string(),
                column
            });
        }

        let mut skipped = 0;

        for result in reader.deserialize::<T>() {
            match result {
                Ok(row) => {
                    if sender.blocking_send(row).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    error!("CSV deserialization error: {error}");
                    skipped += 1;
                }
            }
        }

        Ok(skipped)
    })
}
