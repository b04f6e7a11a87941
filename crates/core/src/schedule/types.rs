//! Ledger entry domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use caixa_shared::types::{CashBoxId, CostCenterId, LedgerEntryId, UserId};

use crate::calendar::Cadence;

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Money in.
    #[serde(rename = "entrada")]
    In,
    /// Money out.
    #[serde(rename = "saida")]
    Out,
}

impl EntryKind {
    /// Returns the stored tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "entrada",
            Self::Out => "saida",
        }
    }

    /// Applies the entry direction to a value: `In` keeps it, `Out` negates it.
    #[must_use]
    pub fn signed(self, value: Decimal) -> Decimal {
        match self {
            Self::In => value,
            Self::Out => -value,
        }
    }
}

/// Lifecycle status of a ledger entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryStatus {
    /// Forecast, not yet paid or received.
    #[default]
    #[serde(rename = "previsto")]
    Scheduled,
    /// Paid or received.
    #[serde(rename = "realizado")]
    Realized,
}

impl EntryStatus {
    /// Returns the stored tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "previsto",
            Self::Realized => "realizado",
        }
    }

    /// Parses a status as typed by users. `pago` is accepted as realized.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "previsto" => Some(Self::Scheduled),
            "realizado" | "pago" => Some(Self::Realized),
            _ => None,
        }
    }
}

/// Position of an entry inside an installment group (`{atual, total}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentInfo {
    /// 1-based position.
    #[serde(rename = "atual")]
    pub current: u32,
    /// Number of installments in the group.
    pub total: u32,
}

/// Recurrence descriptor attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum RecurrenceInfo {
    /// One of `count` full-value repetitions at `cadence`.
    #[serde(rename = "recorrente")]
    Repeating {
        /// Stored cadence tag.
        #[serde(rename = "prazo")]
        cadence: String,
        /// Number of repetitions.
        #[serde(rename = "qtd")]
        count: u32,
        /// 1-based position.
        #[serde(rename = "atual")]
        current: u32,
    },
    /// Repeats monthly on `day`. No further entries are materialized.
    #[serde(rename = "mensal")]
    Monthly {
        /// Day of month.
        #[serde(rename = "dia")]
        day: u32,
    },
    /// Repeats yearly on `day`. No further entries are materialized.
    #[serde(rename = "anual")]
    Yearly {
        /// Day of month.
        #[serde(rename = "dia")]
        day: u32,
    },
}

/// How a schedule request expands into entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SchedulePlan {
    /// One plain entry.
    #[default]
    Single,
    /// `count` entries of value/count each.
    Installments {
        /// Number of installments.
        count: u32,
        /// Interval between due dates.
        cadence: Cadence,
    },
    /// `count` entries of the full value each.
    Recurring {
        /// Number of repetitions.
        count: u32,
        /// Interval between due dates.
        cadence: Cadence,
    },
    /// One entry tagged as monthly on `day` (defaults to the date's day).
    Monthly {
        /// Day of month.
        day: Option<u32>,
    },
    /// One entry tagged as yearly on `day` (defaults to the date's day).
    Yearly {
        /// Day of month.
        day: Option<u32>,
    },
}

/// A user request to register money in or out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Owner.
    pub user_id: UserId,
    /// Free text, stored uppercased.
    pub description: String,
    /// Total value.
    pub value: Decimal,
    /// Direction.
    pub kind: EntryKind,
    /// First due date.
    pub date: NaiveDate,
    /// Classification.
    pub cost_center_id: Option<CostCenterId>,
    /// Cash box.
    pub cash_box_id: Option<CashBoxId>,
    /// Expansion mode.
    #[serde(default)]
    pub plan: SchedulePlan,
}

/// An entry ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedEntry {
    /// Owner.
    pub user_id: UserId,
    /// Description.
    pub description: String,
    /// Value.
    pub value: Decimal,
    /// Direction.
    pub kind: EntryKind,
    /// Due date.
    pub scheduled_date: NaiveDate,
    /// Date it was paid or received.
    pub realized_date: Option<NaiveDate>,
    /// Status.
    pub status: EntryStatus,
    /// Classification.
    pub cost_center_id: Option<CostCenterId>,
    /// Cash box.
    pub cash_box_id: Option<CashBoxId>,
    /// Module that produced the entry.
    pub origin: String,
    /// Installment descriptor.
    pub installment: Option<InstallmentInfo>,
    /// Recurrence descriptor.
    pub recurrence: Option<RecurrenceInfo>,
}

/// A stored ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Identifier.
    pub id: LedgerEntryId,
    /// Everything else.
    #[serde(flatten)]
    pub data: PlannedEntry,
}

/// Manual edit of a stored entry.
///
/// The installment descriptor is never touched by an edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryEdit {
    /// New description (stored uppercased).
    pub description: String,
    /// New value.
    pub value: Decimal,
    /// New direction.
    pub kind: EntryKind,
    /// New classification.
    pub cost_center_id: Option<CostCenterId>,
    /// New due date.
    pub scheduled_date: NaiveDate,
    /// New status.
    pub status: EntryStatus,
    /// New recurrence descriptor.
    pub recurrence: Option<RecurrenceInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recurrence_wire_shape() {
        let repeating = RecurrenceInfo::Repeating {
            cadence: "mensal".to_string(),
            count: 3,
            current: 2,
        };
        assert_eq!(
            serde_json::to_value(&repeating).unwrap(),
            json!({"tipo": "recorrente", "prazo": "mensal", "qtd": 3, "atual": 2})
        );
        assert_eq!(
            serde_json::to_value(RecurrenceInfo::Yearly { day: 5 }).unwrap(),
            json!({"tipo": "anual", "dia": 5})
        );
    }

    #[test]
    fn test_installment_wire_shape() {
        let info = InstallmentInfo {
            current: 1,
            total: 4,
        };
        assert_eq!(
            serde_json::to_value(info).unwrap(),
            json!({"atual": 1, "total": 4})
        );
    }

    #[test]
    fn test_status_accepts_pago() {
        assert_eq!(EntryStatus::parse("pago"), Some(EntryStatus::Realized));
        assert_eq!(EntryStatus::parse("previsto"), Some(EntryStatus::Scheduled));
        assert_eq!(EntryStatus::parse("pendente"), None);
    }

    #[test]
    fn test_plan_wire_shape() {
        let plan: SchedulePlan =
            serde_json::from_value(json!({"mode": "installments", "count": 3, "cadence": "semanal"}))
                .unwrap();
        assert_eq!(
            plan,
            SchedulePlan::Installments {
                count: 3,
                cadence: Cadence::Weekly
            }
        );
    }
}
