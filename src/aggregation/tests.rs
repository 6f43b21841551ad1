use super::{aggregate, aggregate_grouped, distinct_dimensions, settlement_years, DateRange, FilterSpec, TemporalFilter};

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{GroupedRecord, TransactionRecord};

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| anyhow!("invalid date {year}-{month}-{day}"))
}

fn record(key: &str, quantity: Decimal, settled_at: Option<NaiveDate>) -> TransactionRecord {
    TransactionRecord::new(key, quantity, settled_at)
}

fn sample_records() -> Result<Vec<TransactionRecord>> {
    Ok(vec![
        record("Y810004,Alice", dec!(600), Some(date(2024, 1, 15)?)),
        record("Y810004,Alice", dec!(700), Some(date(2024, 6, 30)?)),
        record("Y510172,Bob", dec!(250), Some(date(2023, 12, 31)?)),
        record("Y510172,Bob", dec!(100), None),
        record("Y510172,Bob", dec!(0), Some(date(2024, 2, 1)?)),
        record("Y510172,Bob", dec!(-40), Some(date(2024, 2, 1)?)),
        record("", dec!(900), Some(date(2024, 2, 1)?)),
        record("Z999999,Outsider", dec!(80), Some(date(2024, 3, 3)?))
    ])
}

#[test]
fn test_aggregate_sums_only_settled_positive_records() -> Result<()> {
    let groups = aggregate(&sample_records()?, &FilterSpec::new());

    assert_eq!(groups.len(), 3);
    assert_eq!(groups["Y810004"].total_quantity, dec!(1300));
    assert_eq!(groups["Y510172"].total_quantity, dec!(250));
    assert_eq!(groups["Z999999"].total_quantity, dec!(80));
    assert_eq!(groups["Y810004"].display_name, "Alice");

    Ok(())
}

#[test]
fn test_aggregate_of_empty_input_is_empty() {
    assert!(aggregate(&[], &FilterSpec::new().with_year(2024)).is_empty());
}

#[test]
fn test_aggregate_groups_composite_keys_by_code() -> Result<()> {
    let settled = Some(date(2024, 5, 5)?);
    let records = vec![
        record("A,Alice", dec!(10), settled),
        record("A,Alice (renamed)", dec!(5), settled),
        record("A", dec!(1), settled)
    ];

    let groups = aggregate(&records, &FilterSpec::new());

    assert_eq!(groups.len(), 1);
    assert_eq!(groups["A"].total_quantity, dec!(16));
    assert_eq!(groups["A"].display_name, "Alice");

    Ok(())
}

#[test]
fn test_aggregate_is_repeatable() -> Result<()> {
    let records = sample_records()?;
    let filter = FilterSpec::new().with_year(2024).with_allowed_prefixes(["Y8", "Y5"]);

    assert_eq!(aggregate(&records, &filter), aggregate(&records, &filter));

    Ok(())
}

#[test]
fn test_year_filter_restricts_to_calendar_year() -> Result<()> {
    let groups = aggregate(&sample_records()?, &FilterSpec::new().with_year(2023));

    assert_eq!(groups.len(), 1);
    assert_eq!(groups["Y510172"].total_quantity, dec!(250));

    Ok(())
}

#[test]
fn test_date_range_is_inclusive_on_both_ends() -> Result<()> {
    let range = DateRange::new(date(2024, 1, 15)?, date(2024, 6, 30)?)
        .ok_or_else(|| anyhow!("range rejected"))?;

    let groups = aggregate(&sample_records()?, &FilterSpec::new().with_date_range(range));

    assert_eq!(groups["Y810004"].total_quantity, dec!(1300));
    assert!(!groups.contains_key("Y510172"));

    Ok(())
}

#[test]
fn test_date_range_takes_precedence_over_year() -> Result<()> {
    // The 2023-12-31 record is inside the range but outside the year.
    let range = DateRange::new(date(2023, 12, 1)?, date(2023, 12, 31)?)
        .ok_or_else(|| anyhow!("range rejected"))?;
    let filter = FilterSpec::new().with_year(2024).with_date_range(range);

    assert_eq!(filter.temporal(), Some(TemporalFilter::Range(range)));

    let groups = aggregate(&sample_records()?, &filter);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups["Y510172"].total_quantity, dec!(250));

    Ok(())
}

#[test]
fn test_inverted_date_range_is_rejected() -> Result<()> {
    assert!(DateRange::new(date(2024, 2, 1)?, date(2024, 1, 1)?).is_none());
    assert!(DateRange::new(date(2024, 2, 1)?, date(2024, 2, 1)?).is_some());

    Ok(())
}

#[test]
fn test_dimension_filter_matches_bare_code_or_composite() -> Result<()> {
    let records = sample_records()?;

    let by_code = aggregate(&records, &FilterSpec::new().with_dimension("Y510172"));
    let by_composite = aggregate(&records, &FilterSpec::new().with_dimension("Y510172,Bob"));

    assert_eq!(by_code, by_composite);
    assert_eq!(by_code.len(), 1);
    assert_eq!(by_code["Y510172"].total_quantity, dec!(250));

    Ok(())
}

#[test]
fn test_blank_dimension_filter_is_ignored() -> Result<()> {
    let records = sample_records()?;

    assert_eq!(aggregate(&records, &FilterSpec::new().with_dimension("  ")).len(), 3);

    Ok(())
}

#[test]
fn test_prefix_whitelist_excludes_unknown_codes() -> Result<()> {
    let filter = FilterSpec::new().with_allowed_prefixes(["Y810004", "Y510172"]);
    let groups = aggregate(&sample_records()?, &filter);

    assert_eq!(groups.len(), 2);
    assert!(!groups.contains_key("Z999999"));

    Ok(())
}

#[test]
fn test_grouped_rows_are_folded_by_code() -> Result<()> {
    let rows = vec![
        GroupedRecord::new("A,Alice", dec!(900)),
        GroupedRecord::new("A,Alice Old Name", dec!(600)),
        GroupedRecord::new("B,Bob", dec!(0)),
        GroupedRecord::new("C,Carol", dec!(20))
    ];

    let groups = aggregate_grouped(&rows, &FilterSpec::new().with_allowed_prefixes(["A", "B"]));

    assert_eq!(groups.len(), 1);
    assert_eq!(groups["A"].total_quantity, dec!(1500));

    Ok(())
}

#[test]
fn test_distinct_dimensions_are_sorted_and_whitelisted() -> Result<()> {
    let records = sample_records()?;
    let keys = records.iter().map(|record| record.dimension_key.as_str());
    let dimensions = distinct_dimensions(keys, &["Y".to_string()]);

    assert_eq!(dimensions, vec!["Y510172,Bob".to_string(), "Y810004,Alice".to_string()]);

    Ok(())
}

#[test]
fn test_settlement_years_are_newest_first() -> Result<()> {
    assert_eq!(settlement_years(&sample_records()?, &FilterSpec::new()), vec![2024, 2023]);

    Ok(())
}

#[test]
fn test_settlement_years_skip_records_that_never_reach_a_report() -> Result<()> {
    let mut records = sample_records()?;
    records.push(record("Y510172,Bob", dec!(0), Some(date(2022, 5, 1)?)));
    records.push(record("Y510172,Bob", dec!(-15), Some(date(2021, 5, 1)?)));
    records.push(record("", dec!(40), Some(date(2020, 5, 1)?)));
    records.push(record("Z999999,Outsider", dec!(10), Some(date(2019, 5, 1)?)));

    let whitelist = FilterSpec::new().with_allowed_prefixes(["Y810004", "Y510172"]);

    assert_eq!(settlement_years(&records, &FilterSpec::new()), vec![2024, 2023, 2019]);
    assert_eq!(settlement_years(&records, &whitelist), vec![2024, 2023]);

    Ok(())
}

#[test]
fn test_quantity_overflowing_group_total_is_skipped() -> Result<()> {
    let settled = Some(date(2024, 5, 5)?);
    let records = vec![
        record("A,Alice", Decimal::MAX, settled),
        record("A,Alice", dec!(1), settled),
        record("B,Bob", dec!(7), settled)
    ];

    let groups = aggregate(&records, &FilterSpec::new());

    assert_eq!(groups["A"].total_quantity, Decimal::MAX);
    assert_eq!(groups["B"].total_quantity, dec!(7));

    Ok(())
}
