use chrono::{Datelike, NaiveDate};

use crate::models::{DimensionKey, TransactionRecord};

/// Inclusive calendar-date range. Construction fails when `start` is after `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The single temporal restriction in force for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalFilter {
    Range(DateRange),
    Year(i32)
}

impl TemporalFilter {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            TemporalFilter::Range(range) => range.contains(date),
            TemporalFilter::Year(year) => date.year() == *year
        }
    }
}

/// Predicates a record must satisfy to be aggregated. Every field is optional and all of
/// them combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub date_range: Option<DateRange>,
    pub year: Option<i32>,
    /// Matched on the code segment, so a bare code and a full `code,name` value are equivalent.
    pub dimension: Option<String>,
    /// Raw dimension values must start with one of these. Empty means no whitelist.
    pub allowed_prefixes: Vec<String>
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = Some(date_range);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_dimension(mut self, dimension: impl Into<String>) -> Self {
        self.dimension = Some(dimension.into());
        self
    }

    pub fn with_allowed_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// A date range, when present, wins over a year.
    pub fn temporal(&self) -> Option<TemporalFilter> {
        self.date_range.map(TemporalFilter::Range)
            .or(self.year.map(TemporalFilter::Year))
    }

    /// Applies the dimension and whitelist predicates to a raw dimension value.
    pub fn matches_key(&self, raw_key: &str) -> bool {
        let dimension_matches = match self.dimension.as_deref().map(str::trim) {
            Some(dimension) if !dimension.is_empty() => {
                DimensionKey::code_of(dimension) == DimensionKey::code_of(raw_key)
            },
            _ => true
        };

        let prefix_matches = self.allowed_prefixes.is_empty()
            || self.allowed_prefixes.iter().any(|prefix| raw_key.trim_start().starts_with(prefix.as_str()));

        dimension_matches && prefix_matches
    }

    pub fn matches(&self, record: &TransactionRecord) -> bool {
        let temporal_matches = match (self.temporal(), record.settled_at) {
            (None, _) => true,
            (Some(temporal), Some(date)) => temporal.matches(date),
            (Some(_), None) => false
        };

        temporal_matches && self.matches_key(&record.dimension_key)
    }
}
