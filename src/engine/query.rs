use chrono::NaiveDate;
use tracing::warn;

use crate::aggregation::{DateRange, FilterSpec};

const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Report parameters as a caller supplies them, before validation.
///
/// Resolution is lenient: anything that does not parse is logged and dropped, so a bad
/// temporal parameter widens the report instead of failing it.
#[derive(Debug, Clone, Default)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub year: Option<String>,
    pub dimension: Option<String>
}

impl ReportQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self.end_date = Some(end_date.into());
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_dimension(mut self, dimension: impl Into<String>) -> Self {
        self.dimension = Some(dimension.into());
        self
    }

    /// Builds the filter for this query. Only one temporal filter is set: the date range when
    /// both bounds are valid, otherwise the year.
    pub fn resolve(&self, allowed_prefixes: &[String]) -> FilterSpec {
        let mut filter = FilterSpec::new().with_allowed_prefixes(allowed_prefixes.iter().cloned());

        if let Some(date_range) = self.date_range() {
            filter = filter.with_date_range(date_range);
        } else if let Some(year) = self.year() {
            filter = filter.with_year(year);
        }

        if let Some(dimension) = non_blank(self.dimension.as_deref()) {
            filter = filter.with_dimension(dimension);
        }

        filter
    }

    fn date_range(&self) -> Option<DateRange> {
        let (start, end) = match (non_blank(self.start_date.as_deref()), non_blank(self.end_date.as_deref())) {
            (Some(start), Some(end)) => (start, end),
            (None, None) => return None,
            _ => {
                warn!("Date range needs both a start and an end date, ignoring it");
                return None;
            }
        };

        let start = parse_query_date(start)?;
        let end = parse_query_date(end)?;

        let date_range = DateRange::new(start, end);

        if date_range.is_none() {
            warn!("Date range starts [{start}] after it ends [{end}], ignoring it");
        }

        date_range
    }

    fn year(&self) -> Option<i32> {
        let year = non_blank(self.year.as_deref())?;

        match year.parse() {
            Ok(year) => Some(year),
            Err(error) => {
                warn!("Invalid year [{year}], ignoring it: {error}");
                None
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_query_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, QUERY_DATE_FORMAT)
        .map_err(|error| warn!("Invalid date [{value}], ignoring date range: {error}"))
        .ok()
}
