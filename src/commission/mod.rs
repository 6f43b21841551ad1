mod errors;
mod schedule;
#[cfg(test)]
mod tests;

pub use errors::CommissionError;
pub use schedule::{CommissionSchedule, TierBreakdown};
