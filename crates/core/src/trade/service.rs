//! Checkout planning for purchases and sales.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use caixa_shared::types::ProductId;

use crate::schedule::service::due_dates;
use crate::stock::{MovementKind, MovementPlan, notes};
use crate::trade::error::TradeError;
use crate::trade::types::{
    InstallmentRow, LineProduct, NewProductLine, NewProductSpec, PlannedLine, TradeDraft,
    TradeKind, TradeLine, TradePlan, TradeSummary,
};

/// Repasse price multiplier applied to the cost of new products.
pub const RESALE_MARKUP: Decimal = Decimal::from_parts(13, 0, 0, false, 1);

/// Product code: category initial (uppercased) followed by `suffix`.
#[must_use]
pub fn product_code(category: &str, suffix: u16) -> String {
    let initial: String = category
        .trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default();
    format!("{initial}{suffix}")
}

/// Product row for a new-product line.
///
/// `signed_quantity` already carries the direction of the movement.
/// `keep_costs` false zeroes cost and repasse (products first seen in a sale).
#[must_use]
pub fn new_product_spec(
    line: &NewProductLine,
    signed_quantity: i32,
    keep_costs: bool,
    date: NaiveDate,
) -> NewProductSpec {
    let (cost_price, resale_price) = if keep_costs {
        (line.cost_price, line.cost_price * RESALE_MARKUP)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };
    NewProductSpec {
        description: line.description.trim().to_string(),
        category: line.category.trim().to_string(),
        quantity: signed_quantity,
        cost_price,
        resale_price,
        sale_price: line.sale_price,
        last_purchase_date: date,
    }
}

/// Stateless service for purchase/sale rules.
pub struct TradeService;

impl TradeService {
    /// Checks a draft before any write.
    ///
    /// Purchases require positive cost and sale prices on every line; sales
    /// only a positive sale price.
    ///
    /// # Errors
    ///
    /// Returns the first `TradeError` found, in the order: counterparty,
    /// installments, empty draft, then per line description, quantity, prices.
    pub fn validate(draft: &TradeDraft) -> Result<(), TradeError> {
        if draft.counterparty.trim().is_empty() {
            return Err(match draft.kind {
                TradeKind::Purchase => TradeError::MissingSupplier,
                TradeKind::Sale => TradeError::MissingCustomer,
            });
        }
        if draft.terms.installments == 0 {
            return Err(TradeError::ZeroInstallments);
        }
        if draft.lines.is_empty() {
            return Err(TradeError::NoLines);
        }

        for line in &draft.lines {
            if line.description().trim().is_empty() {
                return Err(TradeError::MissingDescription);
            }
            if line.quantity() <= 0 {
                return Err(TradeError::NonPositiveQuantity);
            }
            if draft.kind == TradeKind::Purchase && line.cost_price() <= Decimal::ZERO {
                return Err(TradeError::NonPositiveCost);
            }
            if line.sale_price() <= Decimal::ZERO {
                return Err(TradeError::NonPositiveSalePrice);
            }
        }
        Ok(())
    }

    /// Unit price used for totals: cost for purchases, sale price for sales.
    #[must_use]
    pub const fn unit_price(kind: TradeKind, line: &TradeLine) -> Decimal {
        match kind {
            TradeKind::Purchase => line.cost_price(),
            TradeKind::Sale => line.sale_price(),
        }
    }

    /// Σ quantity × unit price.
    #[must_use]
    pub fn total(kind: TradeKind, lines: &[TradeLine]) -> Decimal {
        lines
            .iter()
            .map(|l| Decimal::from(l.quantity()) * Self::unit_price(kind, l))
            .sum()
    }

    /// Validates a draft and plans every write of the checkout.
    ///
    /// New products bought start at `+quantity` with repasse = cost × 1.3.
    /// New products sold start at `-quantity` with zero cost and repasse.
    ///
    /// # Errors
    ///
    /// Returns a `TradeError` when validation fails.
    pub fn plan(draft: &TradeDraft) -> Result<TradePlan, TradeError> {
        Self::validate(draft)?;

        let counterparty = draft.counterparty.trim().to_string();
        let movement_kind = draft.kind.movement_kind();
        let note = match draft.kind {
            TradeKind::Purchase => notes::purchase(&counterparty, draft.date),
            TradeKind::Sale => notes::sale(&counterparty, draft.date),
        };

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
                        LineProduct::New(new_product_spec(
                            l,
                            signed,
                            draft.kind == TradeKind::Purchase,
                            draft.date,
                        ))
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
            .collect::<Vec<_>>();

        Ok(TradePlan {
            kind: draft.kind,
            counterparty,
            date: draft.date,
            total: Self::total(draft.kind, &draft.lines),
            item_count: i32::try_from(lines.len()).unwrap_or(i32::MAX),
            terms: draft.terms,
            movement_kind,
            note,
            lines,
        })
    }

    /// Movement that undoes one line of a deleted trade.
    ///
    /// Purchases are reversed with an exit, sales with an entry.
    #[must_use]
    pub fn reversal(kind: TradeKind, number: i64, product_id: ProductId, quantity: i32) -> MovementPlan {
        let (kind, note) = match kind {
            TradeKind::Purchase => (MovementKind::Exit, notes::purchase_reversal(number)),
            TradeKind::Sale => (MovementKind::Entry, notes::sale_reversal(number)),
        };
        MovementPlan {
            product_id,
            kind,
            quantity,
            note,
        }
    }

    /// Expands trade headers into one row per installment.
    ///
    /// Each row is worth total / installments; the first is due on the trade
    /// date and the rest follow the trade's cadence.
    #[must_use]
    pub fn installment_rows(trades: &[TradeSummary]) -> Vec<InstallmentRow> {
        trades
            .iter()
            .flat_map(|t| {
                let count = t.installments.max(1);
                let value = t.total / Decimal::from(count);
                due_dates(t.date, count, t.cadence)
                    .into_iter()
                    .zip(1..=count)
                    .map(move |(due_date, current)| InstallmentRow {
                        kind: t.kind,
                        number: t.number,
                        counterparty: t.counterparty.clone(),
                        current,
                        total_installments: count,
                        value,
                        due_date,
                        status: t.status,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Cadence;
    use crate::trade::types::{ExistingProductLine, PaymentStatus, PaymentTerms};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 2).unwrap()
    }

    fn existing(quantity: i32, cost: Decimal, sale: Decimal) -> TradeLine {
        TradeLine::Existing(ExistingProductLine {
            product_id: ProductId::new(),
            description: "Camisa".to_string(),
            category: "roupas".to_string(),
            quantity,
            cost_price: cost,
            sale_price: sale,
        })
    }

    fn new_line(quantity: i32, cost: Decimal, sale: Decimal) -> TradeLine {
        TradeLine::New(NewProductLine {
            description: " Bolsa ".to_string(),
            category: "acessorios".to_string(),
            quantity,
            cost_price: cost,
            sale_price: sale,
        })
    }

    fn draft(kind: TradeKind, lines: Vec<TradeLine>) -> TradeDraft {
        TradeDraft {
            kind,
            counterparty: " ACME ".to_string(),
            date: date(),
            lines,
            terms: PaymentTerms::default(),
        }
    }

    #[test]
    fn test_purchase_plan() {
        let plan = TradeService::plan(&draft(
            TradeKind::Purchase,
            vec![
                existing(2, dec!(10), dec!(25)),
                new_line(3, dec!(20), dec!(50)),
            ],
        ))
        .unwrap();

        assert_eq!(plan.total, dec!(80));
        assert_eq!(plan.item_count, 2);
        assert_eq!(plan.counterparty, "ACME");
        assert_eq!(plan.movement_kind, MovementKind::Entry);
        assert_eq!(plan.note, "Compra de ACME em 2024-04-02");

        let LineProduct::New(spec) = &plan.lines[1].product else {
            panic!("expected new product");
        };
        assert_eq!(spec.quantity, 3);
        assert_eq!(spec.cost_price, dec!(20));
        assert_eq!(spec.resale_price, dec!(26));
        assert_eq!(spec.description, "Bolsa");
        assert_eq!(spec.last_purchase_date, date());
    }

    #[test]
    fn test_sale_plan_new_product_goes_negative() {
        let plan = TradeService::plan(&draft(
            TradeKind::Sale,
            vec![new_line(4, Decimal::ZERO, dec!(15))],
        ))
        .unwrap();

        assert_eq!(plan.total, dec!(60));
        assert_eq!(plan.note, "Venda para ACME em 2024-04-02");
        let LineProduct::New(spec) = &plan.lines[0].product else {
            panic!("expected new product");
        };
        assert_eq!(spec.quantity, -4);
        assert_eq!(spec.cost_price, Decimal::ZERO);
        assert_eq!(spec.resale_price, Decimal::ZERO);
    }

    #[rstest]
    #[case(TradeKind::Purchase, "", vec![existing(1, dec!(1), dec!(1))], TradeError::MissingSupplier)]
    #[case(TradeKind::Sale, "  ", vec![existing(1, dec!(1), dec!(1))], TradeError::MissingCustomer)]
    #[case(TradeKind::Sale, "Ana", vec![], TradeError::NoLines)]
    #[case(TradeKind::Purchase, "ACME", vec![existing(0, dec!(1), dec!(1))], TradeError::NonPositiveQuantity)]
    #[case(TradeKind::Purchase, "ACME", vec![existing(1, dec!(0), dec!(1))], TradeError::NonPositiveCost)]
    #[case(TradeKind::Purchase, "ACME", vec![existing(1, dec!(1), dec!(0))], TradeError::NonPositiveSalePrice)]
    #[case(TradeKind::Sale, "Ana", vec![existing(1, dec!(0), dec!(0))], TradeError::NonPositiveSalePrice)]
    fn test_validation(
        #[case] kind: TradeKind,
        #[case] counterparty: &str,
        #[case] lines: Vec<TradeLine>,
        #[case] expected: TradeError,
    ) {
        let mut d = draft(kind, lines);
        d.counterparty = counterparty.to_string();
        assert_eq!(TradeService::validate(&d), Err(expected));
    }

    #[test]
    fn test_sale_ignores_cost() {
        let d = draft(TradeKind::Sale, vec![existing(1, dec!(0), dec!(9))]);
        assert!(TradeService::validate(&d).is_ok());
    }

    #[test]
    fn test_blank_description() {
        let d = draft(
            TradeKind::Sale,
            vec![TradeLine::New(NewProductLine {
                description: "  ".to_string(),
                category: String::new(),
                quantity: 1,
                cost_price: Decimal::ZERO,
                sale_price: dec!(1),
            })],
        );
        assert_eq!(TradeService::validate(&d), Err(TradeError::MissingDescription));
    }

    #[rstest]
    #[case("roupas", 42, "R42")]
    #[case(" calçados", 7, "C7")]
    #[case("", 9999, "9999")]
    fn test_product_code(#[case] category: &str, #[case] suffix: u16, #[case] expected: &str) {
        assert_eq!(product_code(category, suffix), expected);
    }

    #[test]
    fn test_reversal_notes() {
        let id = ProductId::new();
        let undo = TradeService::reversal(TradeKind::Purchase, 31, id, 5);
        assert_eq!(undo.kind, MovementKind::Exit);
        assert_eq!(undo.note, "Estorno de compra #31 (excluída)");

        let undo = TradeService::reversal(TradeKind::Sale, 32, id, 5);
        assert_eq!(undo.kind, MovementKind::Entry);
        assert_eq!(undo.note, "Estorno de venda #32 (excluída)");
    }

    #[test]
    fn test_installment_rows() {
        let trades = vec![
            TradeSummary {
                kind: TradeKind::Sale,
                number: 10,
                date: date(),
                counterparty: "Ana".to_string(),
                total: dec!(90),
                status: PaymentStatus::Pending,
                installments: 3,
                cadence: Cadence::Monthly,
            },
            TradeSummary {
                kind: TradeKind::Purchase,
                number: 11,
                date: date(),
                counterparty: "ACME".to_string(),
                total: dec!(40),
                status: PaymentStatus::Paid,
                installments: 0,
                cadence: Cadence::Weekly,
            },
        ];

        let rows = TradeService::installment_rows(&trades);
        assert_eq!(rows.len(), 4);
        assert!(rows[..3].iter().all(|r| r.value == dec!(30)));
        assert_eq!(rows[2].due_date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(rows[3].total_installments, 1);
        assert_eq!(rows[3].value, dec!(40));
    }
}
