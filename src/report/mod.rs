mod assembler;
mod errors;
mod writer;

pub use assembler::assemble_report;
pub use errors::OutputError;
pub use writer::{
    write_breakdowns_csv, write_dimensions_csv, write_json, write_report_csv, write_years_csv,
    DimensionEntry, YearEntry
};
