use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::commission::CommissionError;
use crate::types::{Amount, Quantity, Rate};

/// A two-tier progressive commission schedule.
///
/// Units up to and including `threshold` earn `base_rate` each; every unit strictly above it
/// earns `upper_rate`. The amount is continuous at the threshold, only the marginal rate jumps.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CommissionSchedule {
    pub threshold: Quantity,
    pub base_rate: Rate,
    pub upper_rate: Rate
}

impl Default for CommissionSchedule {
    fn default() -> Self {
        Self {
            threshold: Decimal::from(1000),
            base_rate: Decimal::from(5),
            upper_rate: Decimal::from(8)
        }
    }
}

impl CommissionSchedule {
    /// Commission earned for `quantity` units. Callers must pass a non-negative quantity.
    pub fn calculate_commission(&self, quantity: Quantity) -> Result<Amount, CommissionError> {
        let tiers = self.breakdown(quantity)?;

        Ok(tiers.commission)
    }

    /// Commission per unit, or zero when nothing was sold.
    pub fn calculate_average_rate(&self, quantity: Quantity) -> Result<Rate, CommissionError> {
        let tiers = self.breakdown(quantity)?;

        Ok(tiers.average_rate)
    }

    /// Splits `quantity` across the two tiers using checked arithmetic, failing instead of
    /// panicking when an amount does not fit in a `Decimal`.
    pub fn breakdown(&self, quantity: Quantity) -> Result<TierBreakdown, CommissionError> {
        let overflow = || CommissionError::overflow(quantity);

        let base_units = quantity.min(self.threshold);
        let excess_units = quantity.checked_sub(self.threshold).ok_or_else(overflow)?.max(Decimal::ZERO);
        let base_amount = base_units.checked_mul(self.base_rate).ok_or_else(overflow)?;
        let excess_amount = excess_units.checked_mul(self.upper_rate).ok_or_else(overflow)?;
        let commission = base_amount.checked_add(excess_amount).ok_or_else(overflow)?;

        let average_rate = if quantity.is_zero() {
            Decimal::ZERO
        } else {
            commission.checked_div(quantity).ok_or_else(overflow)?
        };

        Ok(TierBreakdown {
            quantity,
            base_units,
            excess_units,
            base_amount,
            excess_amount,
            commission,
            average_rate
        })
    }
}

/// How a quantity splits across the two tiers, as shown on the formula sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierBreakdown {
    #[serde(rename = "QTY", with = "rust_decimal::serde::float")]
    pub quantity: Quantity,
    #[serde(rename = "BaseUnits", with = "rust_decimal::serde::float")]
    pub base_units: Quantity,
    #[serde(rename = "ExcessUnits", with = "rust_decimal::serde::float")]
    pub excess_units: Quantity,
    #[serde(rename = "BaseAmount", with = "rust_decimal::serde::float")]
    pub base_amount: Amount,
    #[serde(rename = "ExcessAmount", with = "rust_decimal::serde::float")]
    pub excess_amount: Amount,
    #[serde(rename = "Commission", with = "rust_decimal::serde::float")]
    pub commission: Amount,
    #[serde(rename = "AvgRate", with = "rust_decimal::serde::float")]
    pub average_rate: Rate
}
