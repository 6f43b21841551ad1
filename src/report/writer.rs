use std::io::Write;

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::commission::TierBreakdown;
use crate::report::OutputError;
use crate::types::BUDDHIST_ERA_OFFSET;
use crate::models::Report;

const REPORT_HEADER: [&str; 6] = ["EmployeeCode", "EmployeeName", "BPC_DIMENSION5_", "TotalQTY", "Commission", "AvgRate"];
const BREAKDOWN_HEADER: [&str; 7] = ["QTY", "BaseUnits", "ExcessUnits", "BaseAmount", "ExcessAmount", "Commission", "AvgRate"];
const TOTAL_LABEL: &str = "Total";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionEntry {
    #[serde(rename = "BPC_DIMENSION5_")]
    pub dimension_key: String
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearEntry {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "BuddhistYear")]
    pub buddhist_year: i32
}

impl YearEntry {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            buddhist_year: year + BUDDHIST_ERA_OFFSET
        }
    }
}

/// Writes the report as CSV with a trailing `Total` line. Amounts and rates carry two
/// decimals; quantities are printed as exact as they were summed.
pub fn write_report_csv<W: Write>(report: &Report, output: W) -> Result<(), OutputError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(REPORT_HEADER)?;

    for row in &report.rows {
        writer.write_record([
            row.code.clone(),
            row.display_name.clone(),
            row.dimension_key.clone(),
            row.total_quantity.normalize().to_string(),
            two_places(row.commission),
            two_places(row.average_rate)
        ])?;
    }

    writer.write_record([
        TOTAL_LABEL.to_string(),
        String::new(),
        String::new(),
        report.totals.total_quantity.normalize().to_string(),
        two_places(report.totals.commission),
        two_places(report.totals.average_rate)
    ])?;

    writer.flush()?;

    Ok(())
}

pub fn write_breakdowns_csv<W: Write>(breakdowns: &[TierBreakdown], output: W) -> Result<(), OutputError> {
    let mut writer = Writer::from_writer(output);

    writer.write_record(BREAKDOWN_HEADER)?;

    for breakdown in breakdowns {
        writer.write_record([
            breakdown.quantity.normalize().to_string(),
            breakdown.base_units.normalize().to_string(),
            breakdown.excess_units.normalize().to_string(),
            two_places(breakdown.base_amount),
            two_places(breakdown.excess_amount),
            two_places(breakdown.commission),
            two_places(breakdown.average_rate)
        ])?;
    }

    writer.flush()?;

    Ok(())
}

pub fn write_dimensions_csv<W: Write>(dimensions: &[DimensionEntry], output: W) -> Result<(), OutputError> {
    serialize_csv(dimensions, output)
}

pub fn write_years_csv<W: Write>(years: &[YearEntry], output: W) -> Result<(), OutputError> {
    serialize_csv(years, output)
}

/// Pretty-printed JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized, W: Write>(value: &T, mut output: W) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(&mut output, value)?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}

fn serialize_csv<T: Serialize, W: Write>(items: &[T], output: W) -> Result<(), OutputError> {
    let mut writer = Writer::from_writer(output);

    for item in items {
        writer.serialize(item)?;
    }

    writer.flush()?;

    Ok(())
}

fn two_places(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}
