use thiserror::Error;

use crate::types::Quantity;

#[derive(Debug, Error, PartialEq)]
pub enum CommissionError {
    #[error("Numeric overflow occurred while pricing quantity [{quantity}]")]
    Overflow {
        quantity: Quantity
    }
}

impl CommissionError {
    pub fn overflow(quantity: Quantity) -> Self {
        Self::Overflow { quantity }
    }
}
