use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::DimensionKey;
use crate::types::{Amount, EmployeeCode, Quantity, Rate};

/// Summed quantity for one code, produced fresh for every report.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedGroup {
    pub code: EmployeeCode,
    /// First non-empty label seen for the code, used when no roster is in force.
    pub display_name: String,
    pub total_quantity: Quantity
}

impl AggregatedGroup {
    pub fn new(code: impl Into<EmployeeCode>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
            total_quantity: Decimal::ZERO
        }
    }
}

/// One line of the commission report.
///
/// Field names on the wire follow the dashboard API this report replaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "EmployeeCode")]
    pub code: EmployeeCode,
    #[serde(rename = "EmployeeName")]
    pub display_name: String,
    /// Presentation form `code,displayName`.
    #[serde(rename = "BPC_DIMENSION5_")]
    pub dimension_key: String,
    #[serde(rename = "TotalQTY", with = "rust_decimal::serde::float")]
    pub total_quantity: Quantity,
    #[serde(rename = "Commission", with = "rust_decimal::serde::float")]
    pub commission: Amount,
    #[serde(rename = "AvgRate", with = "rust_decimal::serde::float")]
    pub average_rate: Rate
}

impl ReportRow {
    pub fn new(key: DimensionKey, total_quantity: Quantity, commission: Amount, average_rate: Rate) -> Self {
        let dimension_key = key.to_string();

        Self {
            code: key.code,
            display_name: key.display_name,
            dimension_key,
            total_quantity,
            commission,
            average_rate
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTotals {
    #[serde(rename = "TotalQTY", with = "rust_decimal::serde::float")]
    pub total_quantity: Quantity,
    #[serde(rename = "Commission", with = "rust_decimal::serde::float")]
    pub commission: Amount,
    /// Blended rate of the grand total quantity, not the mean of the row rates.
    #[serde(rename = "AvgRate", with = "rust_decimal::serde::float")]
    pub average_rate: Rate
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub totals: ReportTotals
}
