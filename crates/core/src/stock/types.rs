//! Stock movement types.

use serde::{Deserialize, Serialize};

use caixa_shared::types::ProductId;

/// Kind of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    /// Adds to the on-hand quantity.
    #[serde(rename = "entrada")]
    Entry,
    /// Subtracts from the on-hand quantity.
    #[serde(rename = "saida")]
    Exit,
    /// Sets the on-hand quantity.
    #[serde(rename = "ajuste")]
    Adjustment,
}

impl MovementKind {
    /// Returns the stored tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entrada",
            Self::Exit => "saida",
            Self::Adjustment => "ajuste",
        }
    }

    /// Parses a stored tag.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "entrada" => Some(Self::Entry),
            "saida" => Some(Self::Exit),
            "ajuste" => Some(Self::Adjustment),
            _ => None,
        }
    }

    /// The kind that undoes this one. Adjustments have no inverse.
    #[must_use]
    pub const fn inverse(self) -> Option<Self> {
        match self {
            Self::Entry => Some(Self::Exit),
            Self::Exit => Some(Self::Entry),
            Self::Adjustment => None,
        }
    }
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A movement to apply to one product and append to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementPlan {
    /// Product affected.
    pub product_id: ProductId,
    /// Kind.
    pub kind: MovementKind,
    /// Quantity moved, always positive for entries and exits.
    pub quantity: i32,
    /// Log note.
    pub note: String,
}
