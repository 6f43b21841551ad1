mod dimension;
mod report;
mod roster;
mod transaction;

pub use dimension::DimensionKey;
pub use report::{AggregatedGroup, Report, ReportRow, ReportTotals};
pub use roster::RosterEntry;
pub use transaction::{GroupedRecord, TransactionRecord};
