//! Trade domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use caixa_shared::types::ProductId;

use crate::calendar::Cadence;
use crate::stock::MovementKind;

/// Purchase or sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeKind {
    /// Goods bought from a supplier.
    #[serde(rename = "compra")]
    Purchase,
    /// Goods sold to a customer.
    #[serde(rename = "venda")]
    Sale,
}

impl TradeKind {
    /// Returns the stored tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "compra",
            Self::Sale => "venda",
        }
    }

    /// Direction of the stock movement for each line.
    #[must_use]
    pub const fn movement_kind(self) -> MovementKind {
        match self {
            Self::Purchase => MovementKind::Entry,
            Self::Sale => MovementKind::Exit,
        }
    }
}

impl std::fmt::Display for TradeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status of a purchase or sale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Not paid.
    #[default]
    #[serde(rename = "pendente")]
    Pending,
    /// Paid.
    #[serde(rename = "pago")]
    Paid,
    /// Partially paid.
    #[serde(rename = "parcial")]
    Partial,
}

impl PaymentStatus {
    /// Returns the stored tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::Paid => "pago",
            Self::Partial => "parcial",
        }
    }
}

const fn one() -> u32 {
    1
}

const fn default_cadence() -> Cadence {
    Cadence::Monthly
}

/// Payment terms of a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerms {
    /// Status.
    #[serde(default)]
    pub status: PaymentStatus,
    /// Number of installments.
    #[serde(default = "one")]
    pub installments: u32,
    /// Interval between installments.
    #[serde(default = "default_cadence")]
    pub cadence: Cadence,
}

impl Default for PaymentTerms {
    fn default() -> Self {
        Self {
            status: PaymentStatus::Pending,
            installments: 1,
            cadence: Cadence::Monthly,
        }
    }
}

/// A line that references a registered product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingProductLine {
    /// Product.
    pub product_id: ProductId,
    /// Description shown on the line.
    pub description: String,
    /// Category.
    #[serde(default)]
    pub category: String,
    /// Quantity.
    pub quantity: i32,
    /// Unit cost.
    #[serde(default)]
    pub cost_price: Decimal,
    /// Unit sale price.
    #[serde(default)]
    pub sale_price: Decimal,
}

/// A line that registers a new product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProductLine {
    /// Product description.
    pub description: String,
    /// Category; its initial becomes the code prefix.
    #[serde(default)]
    pub category: String,
    /// Quantity.
    pub quantity: i32,
    /// Unit cost.
    #[serde(default)]
    pub cost_price: Decimal,
    /// Unit sale price.
    #[serde(default)]
    pub sale_price: Decimal,
}

/// One checkout line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TradeLine {
    /// References a registered product.
    Existing(ExistingProductLine),
    /// Registers a product inline.
    New(NewProductLine),
}

impl TradeLine {
    /// Line description.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Existing(l) => &l.description,
            Self::New(l) => &l.description,
        }
    }

    /// Line category.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Existing(l) => &l.category,
            Self::New(l) => &l.category,
        }
    }

    /// Quantity.
    #[must_use]
    pub const fn quantity(&self) -> i32 {
        match self {
            Self::Existing(l) => l.quantity,
            Self::New(l) => l.quantity,
        }
    }

    /// Unit cost.
    #[must_use]
    pub const fn cost_price(&self) -> Decimal {
        match self {
            Self::Existing(l) => l.cost_price,
            Self::New(l) => l.cost_price,
        }
    }

    /// Unit sale price.
    #[must_use]
    pub const fn sale_price(&self) -> Decimal {
        match self {
            Self::Existing(l) => l.sale_price,
            Self::New(l) => l.sale_price,
        }
    }

    /// Referenced product, if any.
    #[must_use]
    pub const fn product_id(&self) -> Option<ProductId> {
        match self {
            Self::Existing(l) => Some(l.product_id),
            Self::New(_) => None,
        }
    }
}

/// A purchase or sale as entered at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeDraft {
    /// Purchase or sale.
    pub kind: TradeKind,
    /// Supplier or customer.
    pub counterparty: String,
    /// Trade date.
    pub date: NaiveDate,
    /// Lines.
    pub lines: Vec<TradeLine>,
    /// Payment terms.
    #[serde(default)]
    pub terms: PaymentTerms,
}

/// Product row to insert for a new-product line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProductSpec {
    /// Description.
    pub description: String,
    /// Category.
    pub category: String,
    /// Starting on-hand quantity, signed by the direction of the trade.
    pub quantity: i32,
    /// Unit cost.
    pub cost_price: Decimal,
    /// Repasse price.
    pub resale_price: Decimal,
    /// Sale price.
    pub sale_price: Decimal,
    /// Date of the trade that created it.
    pub last_purchase_date: NaiveDate,
}

/// Product side of a planned line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineProduct {
    /// Update this product's quantity by the signed delta.
    Existing(ProductId),
    /// Insert this product; its starting quantity already carries the delta.
    New(NewProductSpec),
}

/// A validated line with its stock effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLine {
    /// Product side.
    pub product: LineProduct,
    /// Description.
    pub description: String,
    /// Category.
    pub category: String,
    /// Quantity.
    pub quantity: i32,
    /// Unit cost stored on the line.
    pub cost_price: Decimal,
    /// Unit sale price stored on the line.
    pub sale_price: Decimal,
}

/// Everything the recorder writes for one checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradePlan {
    /// Purchase or sale.
    pub kind: TradeKind,
    /// Trimmed counterparty.
    pub counterparty: String,
    /// Trade date.
    pub date: NaiveDate,
    /// Σ quantity × unit price.
    pub total: Decimal,
    /// Number of lines.
    pub item_count: i32,
    /// Payment terms.
    pub terms: PaymentTerms,
    /// Direction of every stock movement.
    pub movement_kind: MovementKind,
    /// Note for every stock movement.
    pub note: String,
    /// Lines in input order.
    pub lines: Vec<PlannedLine>,
}

/// A stored purchase or sale header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeSummary {
    /// Purchase or sale.
    pub kind: TradeKind,
    /// Sequential transaction number.
    pub number: i64,
    /// Trade date.
    pub date: NaiveDate,
    /// Supplier or customer.
    pub counterparty: String,
    /// Total value.
    pub total: Decimal,
    /// Payment status.
    pub status: PaymentStatus,
    /// Number of installments (0 is read as 1).
    pub installments: u32,
    /// Interval between installments.
    pub cadence: Cadence,
}

/// One installment of a stored trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentRow {
    /// Purchase or sale.
    pub kind: TradeKind,
    /// Transaction number.
    pub number: i64,
    /// Supplier or customer.
    pub counterparty: String,
    /// 1-based position.
    pub current: u32,
    /// Number of installments.
    pub total_installments: u32,
    /// total / installments.
    pub value: Decimal,
    /// Due date.
    pub due_date: NaiveDate,
    /// Payment status of the trade.
    pub status: PaymentStatus,
}
