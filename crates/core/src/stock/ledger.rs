//! Quantity arithmetic for stock movements.

use thiserror::Error;

use crate::stock::types::{MovementKind, MovementPlan};

/// Errors for manually entered movements.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MovementError {
    /// Entries and exits need a positive quantity, adjustments a non-negative one.
    #[error("Quantidade inválida para {kind}: {quantity}")]
    InvalidQuantity {
        /// Movement kind.
        kind: MovementKind,
        /// Rejected quantity.
        quantity: i32,
    },

    /// Adjustments cannot be reversed.
    #[error("Ajustes de estoque não podem ser estornados")]
    NotReversible,
}

impl MovementError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidQuantity { .. } => 400,
            Self::NotReversible => 422,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidQuantity { .. } => "INVALID_QUANTITY",
            Self::NotReversible => "NOT_REVERSIBLE",
        }
    }
}

/// Stateless stock arithmetic.
pub struct StockLedger;

impl StockLedger {
    /// On-hand quantity after applying a movement. Results may be negative.
    #[must_use]
    pub const fn next_quantity(current: i32, kind: MovementKind, quantity: i32) -> i32 {
        match kind {
            MovementKind::Entry => current.saturating_add(quantity),
            MovementKind::Exit => current.saturating_sub(quantity),
            MovementKind::Adjustment => quantity,
        }
    }

    /// Signed change for an entry or exit; `None` for adjustments.
    #[must_use]
    pub const fn signed_delta(kind: MovementKind, quantity: i32) -> Option<i32> {
        match kind {
            MovementKind::Entry => Some(quantity),
            MovementKind::Exit => Some(-quantity),
            MovementKind::Adjustment => None,
        }
    }

    /// Checks a manually entered movement.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` for a non-positive entry/exit quantity or a
    /// negative adjustment target.
    pub const fn validate(kind: MovementKind, quantity: i32) -> Result<(), MovementError> {
        let ok = match kind {
            MovementKind::Entry | MovementKind::Exit => quantity > 0,
            MovementKind::Adjustment => quantity >= 0,
        };
        if ok {
            Ok(())
        } else {
            Err(MovementError::InvalidQuantity { kind, quantity })
        }
    }

    /// The movement that undoes `plan`, carrying `note`.
    ///
    /// # Errors
    ///
    /// Returns `NotReversible` for adjustments.
    pub fn reverse(plan: &MovementPlan, note: String) -> Result<MovementPlan, MovementError> {
        let kind = plan.kind.inverse().ok_or(MovementError::NotReversible)?;
        Ok(MovementPlan {
            product_id: plan.product_id,
            kind,
            quantity: plan.quantity,
            note,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caixa_shared::types::ProductId;
    use rstest::rstest;

    #[rstest]
    #[case(10, MovementKind::Entry, 5, 15)]
    #[case(10, MovementKind::Exit, 5, 5)]
    #[case(2, MovementKind::Exit, 5, -3)]
    #[case(-3, MovementKind::Entry, 5, 2)]
    #[case(7, MovementKind::Adjustment, 20, 20)]
    #[case(7, MovementKind::Adjustment, 0, 0)]
    fn test_next_quantity(
        #[case] current: i32,
        #[case] kind: MovementKind,
        #[case] quantity: i32,
        #[case] expected: i32,
    ) {
        assert_eq!(StockLedger::next_quantity(current, kind, quantity), expected);
    }

    #[rstest]
    #[case(MovementKind::Entry, 0, false)]
    #[case(MovementKind::Exit, -1, false)]
    #[case(MovementKind::Exit, 1, true)]
    #[case(MovementKind::Adjustment, 0, true)]
    #[case(MovementKind::Adjustment, -2, false)]
    fn test_validate(#[case] kind: MovementKind, #[case] quantity: i32, #[case] ok: bool) {
        assert_eq!(StockLedger::validate(kind, quantity).is_ok(), ok);
    }

    #[test]
    fn test_reverse_flips_kind() {
        let plan = MovementPlan {
            product_id: ProductId::new(),
            kind: MovementKind::Entry,
            quantity: 4,
            note: "Compra de ACME em 2024-01-01".to_string(),
        };
        let undo = StockLedger::reverse(&plan, "Estorno".to_string()).unwrap();
        assert_eq!(undo.kind, MovementKind::Exit);
        assert_eq!(undo.quantity, 4);
        assert_eq!(undo.product_id, plan.product_id);

        let adjust = MovementPlan {
            kind: MovementKind::Adjustment,
            ..plan
        };
        assert_eq!(
            StockLedger::reverse(&adjust, String::new()),
            Err(MovementError::NotReversible)
        );
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(MovementKind::parse("ajuste"), Some(MovementKind::Adjustment));
        assert_eq!(MovementKind::parse("entry"), None);
        assert_eq!(MovementKind::Exit.to_string(), "saida");
    }
}
