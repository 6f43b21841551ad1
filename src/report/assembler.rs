use rust_decimal::Decimal;

use crate::aggregation::Aggregation;
use crate::commission::{CommissionError, CommissionSchedule};
use crate::models::{AggregatedGroup, DimensionKey, Report, ReportRow, ReportTotals, RosterEntry};

/// Builds the commission report from aggregated quantities.
///
/// With a roster, exactly one row is produced per roster entry, in roster order, and codes
/// without activity get zero-filled rows; groups for codes outside the roster are dropped.
/// Without a roster, one row is produced per aggregated code, sorted by code.
///
/// A roster containing the same code twice yields a row for each entry, both carrying that
/// code's total, so the grand total counts it twice. Callers should not rely on this.
///
/// Fails when a row or the grand total is too large to price.
pub fn assemble_report(
    roster: Option<&[RosterEntry]>,
    aggregated: &Aggregation,
    schedule: &CommissionSchedule
) -> Result<Report, CommissionError> {
    let rows = match roster {
        Some(roster) => roster.iter()
            .map(|entry| {
                let total_quantity = aggregated.get(&entry.code)
                    .map_or(Decimal::ZERO, |group| group.total_quantity);

                build_row(entry.dimension_key(), total_quantity, schedule)
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => {
            let mut groups: Vec<&AggregatedGroup> = aggregated.values().collect();
            groups.sort_by(|left, right| left.code.cmp(&right.code));

            groups.into_iter()
                .map(|group| {
                    let key = DimensionKey::new(group.code.clone(), group.display_name.clone());
                    build_row(key, group.total_quantity, schedule)
                })
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let totals = totals(&rows, schedule)?;

    Ok(Report { rows, totals })
}

fn build_row(key: DimensionKey, total_quantity: Decimal, schedule: &CommissionSchedule) -> Result<ReportRow, CommissionError> {
    let commission = schedule.calculate_commission(total_quantity)?;
    let average_rate = schedule.calculate_average_rate(total_quantity)?;

    Ok(ReportRow::new(key, total_quantity, commission, average_rate))
}

fn totals(rows: &[ReportRow], schedule: &CommissionSchedule) -> Result<ReportTotals, CommissionError> {
    let mut total_quantity = Decimal::ZERO;
    let mut commission = Decimal::ZERO;

    for row in rows {
        total_quantity = total_quantity.checked_add(row.total_quantity)
            .ok_or(CommissionError::overflow(row.total_quantity))?;
        commission = commission.checked_add(row.commission)
            .ok_or(CommissionError::overflow(total_quantity))?;
    }

    Ok(ReportTotals {
        total_quantity,
        commission,
        average_rate: schedule.calculate_average_rate(total_quantity)?
    })
}
