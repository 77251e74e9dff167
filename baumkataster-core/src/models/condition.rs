use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Health condition of a tree.
///
/// Stored with German labels (`Gesund`, `Pflegebedürftig`, `Kritisch`), the
/// values the web client writes to the same tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TreeCondition {
    #[default]
    #[serde(rename = "Gesund", alias = "Healthy")]
    Healthy,
    #[serde(rename = "Pflegebedürftig", alias = "NeedsCare")]
    NeedsCare,
    #[serde(rename = "Kritisch", alias = "Critical")]
    Critical,
}

impl TreeCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeCondition::Healthy => "healthy",
            TreeCondition::NeedsCare => "needs-care",
            TreeCondition::Critical => "critical",
        }
    }

    /// All conditions, in display order.
    pub fn all() -> [TreeCondition; 3] {
        [
            TreeCondition::Healthy,
            TreeCondition::NeedsCare,
            TreeCondition::Critical,
        ]
    }
}

impl fmt::Display for TreeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConditionError(String);

impl fmt::Display for ParseConditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid tree condition '{}'. Valid values: healthy, needs-care, critical",
            self.0
        )
    }
}

impl std::error::Error for ParseConditionError {}

impl FromStr for TreeCondition {
    type Err = ParseConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "healthy" | "gesund" => Ok(TreeCondition::Healthy),
            "needs-care" | "needs_care" | "needscare" | "pflegebedürftig" => {
                Ok(TreeCondition::NeedsCare)
            }
            "critical" | "kritisch" => Ok(TreeCondition::Critical),
            _ => Err(ParseConditionError(s.to_string())),
        }
    }
}
