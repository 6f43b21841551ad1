use std::fmt;
use std::fmt::{Display, Formatter};

use crate::types::{EmployeeCode, DIMENSION_SEPARATOR};

/// A dimension value split into its code and human-readable label.
///
/// Upstream rows carry both halves in one column (`"Y810004,Somchai"`). Grouping, filtering
/// and roster matching only ever look at `code`; the joined form exists for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DimensionKey {
    pub code: EmployeeCode,
    pub display_name: String
}

impl DimensionKey {
    pub fn new(code: impl Into<EmployeeCode>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into()
        }
    }

    /// Splits a raw composite value on the first separator. A value without a separator is
    /// treated as a bare code.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(DIMENSION_SEPARATOR) {
            Some((code, display_name)) => Self::new(code.trim(), display_name.trim()),
            None => Self::new(raw.trim(), "")
        }
    }

    /// Returns the leading code segment of a raw composite value without allocating.
    pub fn code_of(raw: &str) -> &str {
        raw.split_once(DIMENSION_SEPARATOR)
            .map_or(raw, |(code, _)| code)
            .trim()
    }
}

impl Display for DimensionKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        if self.display_name.is_empty() {
            write!(formatter, "{}", self.code)
        } else {
            write!(formatter, "{}{}{}", self.code, DIMENSION_SEPARATOR, self.display_name)
        }
    }
}
