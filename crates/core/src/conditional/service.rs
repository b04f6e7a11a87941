//! Conditional transfer rules.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::conditional::error::ConditionalError;
use crate::conditional::types::{
    Conditional, ConditionalDraft, ConditionalPlan, ConditionalStatus, ItemResolution, ItemStatus,
    ItemUpdate, ResolutionPlan, SettlementPlan,
};
use crate::stock::{MovementKind, MovementPlan, notes};
use crate::trade::service::new_product_spec;
use crate::trade::{LineProduct, PlannedLine, TradeLine};

/// Stateless service for conditional transfers.
pub struct ConditionalService;

impl ConditionalService {
    /// Checks a new transfer. Prices are only checked on new-product lines.
    ///
    /// # Errors
    ///
    /// Returns the first `ConditionalError` found.
    pub fn validate(draft: &ConditionalDraft) -> Result<(), ConditionalError> {
        if draft.origin.trim().is_empty() {
            return Err(ConditionalError::MissingOrigin);
        }
        if draft.lines.is_empty() {
            return Err(ConditionalError::NoLines);
        }
        for line in &draft.lines {
            if line.description().trim().is_empty() {
                return Err(ConditionalError::MissingDescription);
            }
            if line.quantity() <= 0 {
                return Err(ConditionalError::NonPositiveQuantity);
            }
            if let TradeLine::New(l) = line {
                if l.cost_price <= Decimal::ZERO {
                    return Err(ConditionalError::NonPositiveCost);
                }
                if l.sale_price <= Decimal::ZERO {
                    return Err(ConditionalError::NonPositiveSalePrice);
                }
            }
        }
        Ok(())
    }

    /// Validates and plans a new transfer.
    ///
    /// Stock moves in the direction of the transfer; new products start at
    /// the signed quantity and keep their cost with repasse = cost × 1.3.
    ///
    /// # Errors
    ///
    /// Returns a `ConditionalError` when validation fails.
    pub fn plan(draft: &ConditionalDraft) -> Result<ConditionalPlan, ConditionalError> {
        Self::validate(draft)?;

        let origin = draft.origin.trim().to_string();
        let movement_kind = draft.direction.movement_kind();
        let lines = draft
            .lines
            .iter()
            .map(|line| {
                let product = match line {
                    TradeLine::Existing(l) => LineProduct::Existing(l.product_id),
                    TradeLine::New(l) => {
                        let signed = match movement_kind {
                            MovementKind::Exit => -l.quantity,
                            _ => l.quantity,
                        };
                        LineProduct::New(new_product_spec(l, signed, true, draft.date))
                    }
                };
                PlannedLine {
                    product,
                    description: line.description().trim().to_string(),
                    category: line.category().trim().to_string(),
                    quantity: line.quantity(),
                    cost_price: line.cost_price(),
                    sale_price: line.sale_price(),
                }
            })
            .collect();

        Ok(ConditionalPlan {
            direction: draft.direction,
            movement_note: notes::conditional(draft.direction.as_str(), &origin),
            origin,
            date: draft.date,
            note: draft.note.clone().filter(|n| !n.trim().is_empty()),
            movement_kind,
            lines,
        })
    }

    /// Plans the resolution of a pending transfer.
    ///
    /// Items without a resolution keep their status. Returned items move
    /// stock back (items with no product are skipped). Settled items with a
    /// positive value become a pending single-installment purchase (received
    /// goods) or sale (sent goods) dated `today` at value / quantity per
    /// unit, with no stock change.
    ///
    /// # Errors
    ///
    /// - `NotPending` when the transfer is not pending
    /// - `UnknownItem` when a resolution names a foreign item
    /// - `ItemAlreadyResolved` when an item is not pending or is named twice
    /// - `PendingResolution` when a resolution asks for `pendente`
    /// - `InvalidSettlementValue` for a negative value
    pub fn resolve(
        conditional: &Conditional,
        resolutions: &[ItemResolution],
        today: NaiveDate,
    ) -> Result<ResolutionPlan, ConditionalError> {
        if conditional.status != ConditionalStatus::Pending {
            return Err(ConditionalError::NotPending);
        }

        let mut plan = ResolutionPlan {
            item_updates: Vec::with_capacity(resolutions.len()),
            returns: Vec::new(),
            settlements: Vec::new(),
        };
        let undo_kind = conditional.direction.movement_kind().inverse();
        let mut seen = HashSet::with_capacity(resolutions.len());

        for resolution in resolutions {
            let item = conditional
                .items
                .iter()
                .find(|i| i.id == resolution.item_id)
                .ok_or(ConditionalError::UnknownItem(resolution.item_id))?;
            if item.status != ItemStatus::Pending || !seen.insert(item.id) {
                return Err(ConditionalError::ItemAlreadyResolved(item.id));
            }
            if let Some(value) = resolution.settled_value.filter(|v| *v < Decimal::ZERO) {
                return Err(ConditionalError::InvalidSettlementValue(value));
            }

            plan.item_updates.push(ItemUpdate {
                item_id: item.id,
                status: resolution.status,
                settled_value: resolution.settled_value,
                resolved_on: today,
            });

            match resolution.status {
                ItemStatus::Returned => {
                    if let (Some(product_id), Some(kind)) = (item.product_id, undo_kind) {
                        plan.returns.push(MovementPlan {
                            product_id,
                            kind,
                            quantity: item.quantity,
                            note: notes::conditional_return(&conditional.origin),
                        });
                    }
                }
                ItemStatus::Settled => {
                    let Some(total) = resolution.settled_value.filter(|v| *v > Decimal::ZERO)
                    else {
                        continue;
                    };
                    plan.settlements.push(SettlementPlan {
                        kind: conditional.direction.settlement_kind(),
                        counterparty: conditional.origin.clone(),
                        date: today,
                        total,
                        product_id: item.product_id,
                        description: item.description.clone(),
                        category: item.category.clone(),
                        quantity: item.quantity,
                        unit_price: total / Decimal::from(item.quantity.max(1)),
                    });
                }
                ItemStatus::Pending => return Err(ConditionalError::PendingResolution(item.id)),
            }
        }

        Ok(plan)
    }

    /// Movements that undo a pending transfer on cancellation.
    ///
    /// # Errors
    ///
    /// Returns `NotPending` when the transfer is not pending.
    pub fn cancel(conditional: &Conditional) -> Result<Vec<MovementPlan>, ConditionalError> {
        if conditional.status != ConditionalStatus::Pending {
            return Err(ConditionalError::NotPending);
        }
        let Some(kind) = conditional.direction.movement_kind().inverse() else {
            return Ok(Vec::new());
        };
        Ok(conditional
            .items
            .iter()
            .filter(|i| i.status == ItemStatus::Pending)
            .filter_map(|i| {
                i.product_id.map(|product_id| MovementPlan {
                    product_id,
                    kind,
                    quantity: i.quantity,
                    note: notes::conditional_cancel(&conditional.origin),
                })
            })
            .collect())
    }
}
