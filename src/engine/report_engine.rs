use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::timeout;
use tracing::{info, warn};

use crate::aggregation::{aggregate, aggregate_grouped, distinct_dimensions, settlement_years, FilterSpec};
use crate::commission::CommissionSchedule;
use crate::engine::{ReportError, ReportQuery};
use crate::models::{Report, RosterEntry};
use crate::report::assemble_report;
use crate::source::{RecordBatch, RecordSource, SourceError};

/// Turns source rows into commission reports.
///
/// The engine holds no per-request state, so one instance can serve concurrent requests.
pub struct ReportEngine<S: RecordSource> {
    source: Arc<S>,
    schedule: CommissionSchedule,
    roster: Option<Vec<RosterEntry>>,
    allowed_prefixes: Vec<String>,
    fetch_timeout: Duration
}

impl<S: RecordSource> ReportEngine<S> {
    /// Creates an engine with the default schedule, no roster and a 30 second fetch timeout.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            schedule: CommissionSchedule::default(),
            roster: None,
            allowed_prefixes: Vec::new(),
            fetch_timeout: Duration::from_secs(30)
        }
    }

    pub fn with_schedule(mut self, schedule: CommissionSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// An empty roster switches the engine to roster-free reports.
    pub fn with_roster(mut self, roster: Vec<RosterEntry>) -> Self {
        self.roster = (!roster.is_empty()).then_some(roster);
        self
    }

    pub fn with_allowed_prefixes(mut self, allowed_prefixes: Vec<String>) -> Self {
        self.allowed_prefixes = allowed_prefixes;
        self
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Fetches, filters, groups and prices the source rows for `query`.
    pub async fn report(&self, query: &ReportQuery) -> Result<Report, ReportError> {
        let timer = Instant::now();
        let batch = self.fetch().await?;
        let filter = query.resolve(&self.report_whitelist());

        let aggregated = match batch {
            RecordBatch::Raw(records) => aggregate(&records, &filter),
            RecordBatch::Grouped(records) => {
                if filter.temporal().is_some() {
                    warn!("Pre-grouped records carry no dates, the temporal filter must be applied upstream");
                }

                aggregate_grouped(&records, &filter)
            }
        };

        let report = assemble_report(self.roster.as_deref(), &aggregated, &self.schedule)?;

        info!("Commission report completed in {:?}, rows: {}", timer.elapsed(), report.rows.len());

        Ok(report)
    }

    /// Distinct dimension values available for filtering, sorted ascending.
    pub async fn dimensions(&self) -> Result<Vec<String>, SourceError> {
        let timer = Instant::now();
        let whitelist = self.dimension_whitelist();

        let dimensions = match self.fetch().await? {
            RecordBatch::Raw(records) => {
                distinct_dimensions(records.iter().map(|record| record.dimension_key.as_str()), &whitelist)
            },
            RecordBatch::Grouped(records) => {
                distinct_dimensions(records.iter().map(|record| record.dimension_key.as_str()), &whitelist)
            }
        };

        info!("Dimensions query completed in {:?}, rows: {}", timer.elapsed(), dimensions.len());

        Ok(dimensions)
    }

    /// Distinct years with reportable activity, newest first.
    pub async fn years(&self) -> Result<Vec<i32>, SourceError> {
        let whitelist = FilterSpec::new().with_allowed_prefixes(self.report_whitelist());

        match self.fetch().await? {
            RecordBatch::Raw(records) => Ok(settlement_years(&records, &whitelist)),
            RecordBatch::Grouped(_) => {
                warn!("Pre-grouped records carry no settlement dates, no years to list");
                Ok(Vec::new())
            }
        }
    }

    async fn fetch(&self) -> Result<RecordBatch, SourceError> {
        let batch = timeout(self.fetch_timeout, self.source.fetch()).await
            .map_err(|_| SourceError::Timeout(self.fetch_timeout))??;

        if batch.is_empty() {
            warn!("Record source returned no rows");
        }

        Ok(batch)
    }

    /// Reports are restricted to the roster when there is one.
    fn report_whitelist(&self) -> Vec<String> {
        match &self.roster {
            Some(roster) => roster.iter().map(|entry| entry.code.clone()).collect(),
            None => self.allowed_prefixes.clone()
        }
    }

    fn dimension_whitelist(&self) -> Vec<String> {
        match &self.roster {
            Some(roster) if self.allowed_prefixes.is_empty() => roster.iter().map(|entry| entry.code.clone()).collect(),
            _ => self.allowed_prefixes.clone()
        }
    }
}
