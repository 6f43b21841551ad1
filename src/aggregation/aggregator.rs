use std::collections::{BTreeSet, HashMap};

use chrono::Datelike;
use rust_decimal::Decimal;
use tracing::{debug, error};

use crate::aggregation::FilterSpec;
use crate::models::{AggregatedGroup, DimensionKey, GroupedRecord, TransactionRecord};
use crate::types::{EmployeeCode, Quantity};

/// Summed quantity per code. Iteration order is unspecified.
pub type Aggregation = HashMap<EmployeeCode, AggregatedGroup>;

/// Groups settled activity by code and sums its quantity.
///
/// A record is included only if it is settled, attributed to a non-empty code, has a positive
/// quantity and satisfies `filter`.
pub fn aggregate(records: &[TransactionRecord], filter: &FilterSpec) -> Aggregation {
    let mut groups = Aggregation::new();
    let mut included = 0usize;

    for record in records.iter().filter(|record| record.is_settled_activity() && filter.matches(record)) {
        if accumulate(&mut groups, &record.dimension_key, record.quantity) {
            included += 1;
        }
    }

    debug!("Aggregated [{included}] of [{}] records into [{}] groups", records.len(), groups.len());

    groups
}

/// Folds rows that were already summed upstream.
///
/// The temporal filter is expected to have been applied by the query that produced the rows,
/// so only the dimension and whitelist predicates are evaluated here. Rows whose composite
/// values share a code are summed into one group.
pub fn aggregate_grouped(records: &[GroupedRecord], filter: &FilterSpec) -> Aggregation {
    let mut groups = Aggregation::new();

    let rows = records.iter().filter(|record| {
        !record.code().is_empty() && record.total_quantity > Decimal::ZERO && filter.matches_key(&record.dimension_key)
    });

    for record in rows {
        accumulate(&mut groups, &record.dimension_key, record.total_quantity);
    }

    debug!("Folded [{}] pre-grouped rows into [{}] groups", records.len(), groups.len());

    groups
}

/// Distinct non-empty raw dimension values that pass the whitelist, in ascending order.
pub fn distinct_dimensions<'a, I>(keys: I, allowed_prefixes: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let filter = FilterSpec::new().with_allowed_prefixes(allowed_prefixes.iter().cloned());

    keys.into_iter()
        .map(str::trim)
        .filter(|key| !key.is_empty() && filter.matches_key(key))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Distinct settlement years of records that would count toward a report, newest first.
pub fn settlement_years(records: &[TransactionRecord], filter: &FilterSpec) -> Vec<i32> {
    records.iter()
        .filter(|record| record.is_settled_activity() && filter.matches_key(&record.dimension_key))
        .filter_map(|record| record.settled_at.map(|date| date.year()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}

/// Adds `quantity` to the group for `raw_key`. A quantity that would overflow the group total
/// is logged and left out, and `false` is returned.
fn accumulate(groups: &mut Aggregation, raw_key: &str, quantity: Quantity) -> bool {
    let DimensionKey { code, display_name } = DimensionKey::parse(raw_key);

    let group = groups.entry(code)
        .or_insert_with_key(|code| AggregatedGroup::new(code.clone(), ""));

    if group.display_name.is_empty() && !display_name.is_empty() {
        group.display_name = display_name;
    }

    match group.total_quantity.checked_add(quantity) {
        Some(total_quantity) => {
            group.total_quantity = total_quantity;
            true
        },
        None => {
            error!("Quantity [{quantity}] for [{raw_key}] overflows the group total, record skipped");
            false
        }
    }
}
