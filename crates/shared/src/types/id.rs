//! Typed IDs for type-safe entity references.
//!
//! A `ProductId` can never be passed where a `CostCenterId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user.");
typed_id!(CostCenterId, "Unique identifier for a cost center.");
typed_id!(LedgerEntryId, "Unique identifier for a ledger entry.");
typed_id!(CashBoxId, "Unique identifier for a cash box.");
typed_id!(ProductId, "Unique identifier for a product.");
typed_id!(StockMovementId, "Unique identifier for a stock movement.");
typed_id!(PurchaseId, "Unique identifier for a purchase header.");
typed_id!(SaleId, "Unique identifier for a sale header.");
typed_id!(
    ConditionalId,
    "Unique identifier for a conditional (consignment) transaction."
);
typed_id!(ConditionalItemId, "Unique identifier for a conditional line item.");
