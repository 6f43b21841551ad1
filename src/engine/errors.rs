use thiserror::Error;

use crate::commission::CommissionError;
use crate::source::SourceError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("Report could not be priced: {0}")]
    Commission(#[from] CommissionError)
}
