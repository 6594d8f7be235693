use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CreditDirection {
    Add,
    Deduct,
}

impl CreditDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditDirection::Add => "add",
            CreditDirection::Deduct => "deduct",
        }
    }
}

impl Display for CreditDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
