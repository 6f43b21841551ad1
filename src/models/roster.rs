use serde::Deserialize;

use crate::models::DimensionKey;
use crate::types::EmployeeCode;

/// One known sales representative. Every roster entry appears in a report, active or not.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterEntry {
    pub code: EmployeeCode,
    #[serde(rename = "name", default)]
    pub display_name: String
}

impl RosterEntry {
    pub fn new(code: impl Into<EmployeeCode>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into()
        }
    }

    pub fn dimension_key(&self) -> DimensionKey {
        DimensionKey::new(self.code.clone(), self.display_name.clone())
    }
}
