mod aggregator;
mod filter;
#[cfg(test)]
mod tests;

pub use aggregator::{aggregate, aggregate_grouped, distinct_dimensions, settlement_years, Aggregation};
pub use filter::{DateRange, FilterSpec, TemporalFilter};
