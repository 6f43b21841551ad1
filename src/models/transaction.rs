use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};

use crate::models::DimensionKey;
use crate::types::Quantity;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f"
];

/// Represents a single settled sales row from the sales-commission table export.
///
/// Only the three columns the report needs are captured; any other column in the export is
/// ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    /// Composite `code,name` of the sales representative. May be empty.
    #[serde(rename = "BPC_DIMENSION5_", default)]
    pub dimension_key: String,
    /// Units sold.
    #[serde(rename = "QTY", deserialize_with = "deserialize_quantity")]
    pub quantity: Quantity,
    /// Settlement date, `None` while the sale is still open.
    #[serde(rename = "LASTSETTLEDATE", default, deserialize_with = "deserialize_settlement_date")]
    pub settled_at: Option<NaiveDate>
}

impl TransactionRecord {
    pub fn new(dimension_key: impl Into<String>, quantity: Quantity, settled_at: Option<NaiveDate>) -> Self {
        Self {
            dimension_key: dimension_key.into(),
            quantity,
            settled_at
        }
    }

    pub fn code(&self) -> &str {
        DimensionKey::code_of(&self.dimension_key)
    }

    /// A record counts toward commission only once settled, attributed and positive.
    pub fn is_settled_activity(&self) -> bool {
        self.settled_at.is_some() && !self.code().is_empty() && self.quantity > Decimal::ZERO
    }
}

/// A row that was already grouped upstream (`SUM(QTY) ... GROUP BY BPC_DIMENSION5_`).
#[derive(Debug, Clone, Deserialize)]
pub struct GroupedRecord {
    #[serde(rename = "BPC_DIMENSION5_", default)]
    pub dimension_key: String,
    #[serde(rename = "TotalQTY", deserialize_with = "deserialize_quantity")]
    pub total_quantity: Quantity
}

impl GroupedRecord {
    pub fn new(dimension_key: impl Into<String>, total_quantity: Quantity) -> Self {
        Self {
            dimension_key: dimension_key.into(),
            total_quantity
        }
    }

    pub fn code(&self) -> &str {
        DimensionKey::code_of(&self.dimension_key)
    }
}

/// Parses a settlement date as exported by the sales database.
///
/// Empty values and the literal `NULL` mean "not settled". Date-time values keep only their
/// calendar date.
pub fn parse_settlement_date(value: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let value = value.trim();

    if value.is_empty() || value.eq_ignore_ascii_case("null") {
        return Ok(None);
    }

    let date_error = match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => return Ok(Some(date)),
        Err(error) => error
    };

    DATE_TIME_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|date_time| Some(date_time.date()))
        .ok_or(date_error)
}

/// Parses a quantity from its text form, so integers of any width, decimals and exponent
/// notation are read the same way.
pub fn parse_quantity(value: &str) -> Result<Quantity, rust_decimal::Error> {
    let value = value.trim();

    Decimal::from_str(value).or_else(|error| {
        if value.contains(['e', 'E']) {
            Decimal::from_scientific(value)
        } else {
            Err(error)
        }
    })
}

fn deserialize_quantity<'de, D>(deserializer: D) -> Result<Quantity, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;

    parse_quantity(&value).map_err(|error| de::Error::custom(format!("invalid quantity '{value}': {error}")))
}

fn deserialize_settlement_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) => parse_settlement_date(&value)
            .map_err(|error| de::Error::custom(format!("invalid LASTSETTLEDATE '{value}': {error}"))),
        None => Ok(None)
    }
}
