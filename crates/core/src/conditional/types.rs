//! Conditional transfer types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use caixa_shared::types::{ConditionalId, ConditionalItemId, ProductId};

use crate::stock::{MovementKind, MovementPlan};
use crate::trade::{PlannedLine, TradeKind, TradeLine};

/// Whether goods came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionalDirection {
    /// Goods received from a supplier on consignment.
    #[serde(rename = "recebido")]
    Received,
    /// Goods sent to a customer on consignment.
    #[serde(rename = "enviado")]
    Sent,
}

impl ConditionalDirection {
    /// Returns the stored tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "recebido",
            Self::Sent => "enviado",
        }
    }

    /// Stock movement when the transfer is registered.
    #[must_use]
    pub const fn movement_kind(self) -> MovementKind {
        match self {
            Self::Received => MovementKind::Entry,
            Self::Sent => MovementKind::Exit,
        }
    }

    /// Trade created when an item is settled.
    #[must_use]
    pub const fn settlement_kind(self) -> TradeKind {
        match self {
            Self::Received => TradeKind::Purchase,
            Self::Sent => TradeKind::Sale,
        }
    }
}

/// Lifecycle of a transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionalStatus {
    /// Awaiting resolution.
    #[default]
    #[serde(rename = "pendente")]
    Pending,
    /// Resolved.
    #[serde(rename = "resolvido")]
    Resolved,
    /// Cancelled before resolution.
    #[serde(rename = "cancelado")]
    Cancelled,
}

impl ConditionalStatus {
    /// Returns the stored tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::Resolved => "resolvido",
            Self::Cancelled => "cancelado",
        }
    }
}

/// Resolution of one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    /// Not resolved yet.
    #[default]
    #[serde(rename = "pendente")]
    Pending,
    /// Goods went back.
    #[serde(rename = "devolvido")]
    Returned,
    /// Goods were kept and paid for.
    #[serde(rename = "efetivado")]
    Settled,
}

impl ItemStatus {
    /// Returns the stored tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::Returned => "devolvido",
            Self::Settled => "efetivado",
        }
    }
}

/// A new transfer as entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionalDraft {
    /// Direction.
    pub direction: ConditionalDirection,
    /// Partner name.
    pub origin: String,
    /// Transfer date.
    pub date: NaiveDate,
    /// Free-text note.
    #[serde(default)]
    pub note: Option<String>,
    /// Items.
    pub lines: Vec<TradeLine>,
}

/// A stored item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalItem {
    /// Identifier.
    pub id: ConditionalItemId,
    /// Product, absent when it could not be resolved.
    pub product_id: Option<ProductId>,
    /// Description.
    pub description: String,
    /// Category.
    pub category: String,
    /// Quantity.
    pub quantity: i32,
    /// Resolution.
    pub status: ItemStatus,
    /// Value agreed when settled.
    pub settled_value: Option<Decimal>,
}

/// A stored transfer with its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditional {
    /// Identifier.
    pub id: ConditionalId,
    /// Transaction number.
    pub number: i64,
    /// Direction.
    pub direction: ConditionalDirection,
    /// Partner.
    pub origin: String,
    /// Transfer date.
    pub date: NaiveDate,
    /// Note.
    pub note: Option<String>,
    /// Status.
    pub status: ConditionalStatus,
    /// Items.
    pub items: Vec<ConditionalItem>,
}

/// Writes for a new transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalPlan {
    /// Direction.
    pub direction: ConditionalDirection,
    /// Trimmed partner name.
    pub origin: String,
    /// Transfer date.
    pub date: NaiveDate,
    /// Note.
    pub note: Option<String>,
    /// Direction of every stock movement.
    pub movement_kind: MovementKind,
    /// Note of every stock movement.
    pub movement_note: String,
    /// Items.
    pub lines: Vec<PlannedLine>,
}

/// Resolution requested for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResolution {
    /// Item.
    pub item_id: ConditionalItemId,
    /// New status.
    pub status: ItemStatus,
    /// Settlement value (only meaningful for `efetivado`).
    #[serde(default)]
    pub settled_value: Option<Decimal>,
}

/// Item row update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemUpdate {
    /// Item.
    pub item_id: ConditionalItemId,
    /// New status.
    pub status: ItemStatus,
    /// Settlement value.
    pub settled_value: Option<Decimal>,
    /// Resolution date.
    pub resolved_on: NaiveDate,
}

/// Purchase or sale created by a settled item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementPlan {
    /// Purchase for received goods, sale for sent goods.
    pub kind: TradeKind,
    /// Partner.
    pub counterparty: String,
    /// Date of the trade.
    pub date: NaiveDate,
    /// Settled value.
    pub total: Decimal,
    /// Product.
    pub product_id: Option<ProductId>,
    /// Description.
    pub description: String,
    /// Category.
    pub category: String,
    /// Quantity.
    pub quantity: i32,
    /// total / quantity.
    pub unit_price: Decimal,
}

/// Writes for resolving a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionPlan {
    /// Item updates.
    pub item_updates: Vec<ItemUpdate>,
    /// Stock movements for returned items.
    pub returns: Vec<MovementPlan>,
    /// Trades for settled items.
    pub settlements: Vec<SettlementPlan>,
}
