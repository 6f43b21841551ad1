mod errors;
mod query;
mod report_engine;

pub use errors::ReportError;
pub use query::ReportQuery;
pub use report_engine::ReportEngine;
