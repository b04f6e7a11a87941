//! Cost center domain types.

use serde::{Deserialize, Serialize};

/// Which cash book a cost center belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostCenterContext {
    /// Household finances.
    #[serde(rename = "casa")]
    House,
    /// Store finances.
    #[serde(rename = "loja")]
    Store,
}

impl CostCenterContext {
    /// Returns the stored tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::House => "casa",
            Self::Store => "loja",
        }
    }

    /// Parses a stored tag.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "casa" => Some(Self::House),
            "loja" => Some(Self::Store),
            _ => None,
        }
    }
}

impl std::fmt::Display for CostCenterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Revenue or expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostCenterKind {
    /// Money coming in.
    #[serde(rename = "RECEITA")]
    Revenue,
    /// Money going out.
    #[serde(rename = "DESPESA")]
    Expense,
}

/// Whether the amounts in a cost center repeat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostCenterRecurrence {
    /// Same amount every period.
    #[serde(rename = "FIXO")]
    Fixed,
    /// Amount changes.
    #[default]
    #[serde(rename = "VARIAVEL")]
    Variable,
}

/// Category used when none is given.
pub const DEFAULT_CATEGORY: &str = "OUTROS";

/// Input for a new cost center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostCenterDraft {
    /// Display name.
    pub name: String,
    /// Context.
    pub context: CostCenterContext,
    /// Revenue or expense.
    pub kind: CostCenterKind,
    /// Free-form category.
    #[serde(default)]
    pub category: String,
    /// Fixed or variable.
    #[serde(default)]
    pub recurrence: CostCenterRecurrence,
}

impl CostCenterDraft {
    /// Uppercases and trims name and category; an empty category becomes
    /// `OUTROS`. Returns `None` when the name is blank.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let name = self.name.trim().to_uppercase();
        if name.is_empty() {
            return None;
        }
        let category = match self.category.trim().to_uppercase() {
            c if c.is_empty() => DEFAULT_CATEGORY.to_string(),
            c => c,
        };
        Some(Self {
            name,
            category,
            ..self
        })
    }
}
