//! Settlement of payment decisions.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::payment::error::PaymentError;
use crate::payment::types::{PaymentDecision, PaymentOutcome, RealizedUpdate};
use crate::schedule::{
    EntryStatus, InstallmentInfo, LedgerEntry, PlannedEntry, installment_description,
    strip_installment_suffix,
};

/// Stateless service that turns a wizard decision into writes.
pub struct PaymentService;

impl PaymentService {
    /// Settles `entry` according to `decision`.
    ///
    /// The original entry always becomes realized on `today` with its value
    /// replaced by the amount paid. When the decision carries a remainder
    /// due date and something is left to pay, the group grows by one
    /// installment: the original is renumbered `(current/total+1)` and a new
    /// scheduled entry `(total+1/total+1)` holds the remainder. Entries with
    /// no installment descriptor count as `1/1`.
    ///
    /// Without a due date the remainder is simply dropped.
    ///
    /// # Errors
    ///
    /// - `AlreadyRealized` when the entry was paid before
    /// - `InvalidAmount` when the decision pays nothing or more than the value
    pub fn settle(
        entry: &LedgerEntry,
        decision: &PaymentDecision,
        today: NaiveDate,
    ) -> Result<PaymentOutcome, PaymentError> {
        let data = &entry.data;
        if data.status == EntryStatus::Realized {
            return Err(PaymentError::AlreadyRealized);
        }
        if decision.paid <= Decimal::ZERO || decision.paid > data.value {
            return Err(PaymentError::InvalidAmount {
                paid: decision.paid,
                value: data.value,
            });
        }

        let remainder = data.value - decision.paid;
        let due = decision.remainder_due.filter(|_| remainder > Decimal::ZERO);

        let Some(due) = due else {
            return Ok(PaymentOutcome {
                realized: RealizedUpdate {
                    value: decision.paid,
                    realized_date: today,
                    description: data.description.clone(),
                    installment: data.installment,
                },
                remainder_entry: None,
            });
        };

        let base = strip_installment_suffix(&data.description);
        let current = data.installment.map_or(1, |i| i.current);
        let grown = data.installment.map_or(1, |i| i.total) + 1;

        let remainder_entry = PlannedEntry {
            description: installment_description(base, grown, grown),
            value: remainder,
            scheduled_date: due,
            realized_date: None,
            status: EntryStatus::Scheduled,
            installment: Some(InstallmentInfo {
                current: grown,
                total: grown,
            }),
            ..data.clone()
        };

        Ok(PaymentOutcome {
            realized: RealizedUpdate {
                value: decision.paid,
                realized_date: today,
                description: installment_description(base, current, grown),
                installment: Some(InstallmentInfo {
                    current,
                    total: grown,
                }),
            },
            remainder_entry: Some(remainder_entry),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{EntryKind, RecurrenceInfo};
    use caixa_shared::types::{CostCenterId, LedgerEntryId, UserId};
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn entry(description: &str, value: Decimal, installment: Option<InstallmentInfo>) -> LedgerEntry {
        LedgerEntry {
            id: LedgerEntryId::new(),
            data: PlannedEntry {
                user_id: UserId::new(),
                description: description.to_string(),
                value,
                kind: EntryKind::Out,
                scheduled_date: d(2024, 6, 1),
                realized_date: None,
                status: EntryStatus::Scheduled,
                cost_center_id: Some(CostCenterId::new()),
                cash_box_id: None,
                origin: "compras".to_string(),
                installment,
                recurrence: Some(RecurrenceInfo::Monthly { day: 1 }),
            },
        }
    }

    #[test]
    fn test_full_payment_keeps_description() {
        let e = entry("LUZ", dec!(80), None);
        let outcome = PaymentService::settle(
            &e,
            &PaymentDecision {
                paid: dec!(80),
                remainder_due: None,
            },
            d(2024, 6, 3),
        )
        .unwrap();

        assert_eq!(outcome.realized.value, dec!(80));
        assert_eq!(outcome.realized.realized_date, d(2024, 6, 3));
        assert_eq!(outcome.realized.description, "LUZ");
        assert!(outcome.realized.installment.is_none());
        assert!(outcome.remainder_entry.is_none());
    }

    #[test]
    fn test_remainder_on_plain_entry() {
        let e = entry("LUZ", dec!(100), None);
        let outcome = PaymentService::settle(
            &e,
            &PaymentDecision {
                paid: dec!(60),
                remainder_due: Some(d(2024, 7, 10)),
            },
            d(2024, 6, 3),
        )
        .unwrap();

        assert_eq!(outcome.realized.description, "LUZ (1/2)");
        assert_eq!(
            outcome.realized.installment,
            Some(InstallmentInfo { current: 1, total: 2 })
        );

        let rest = outcome.remainder_entry.unwrap();
        assert_eq!(rest.description, "LUZ (2/2)");
        assert_eq!(rest.value, dec!(40));
        assert_eq!(rest.scheduled_date, d(2024, 7, 10));
        assert_eq!(rest.status, EntryStatus::Scheduled);
        assert_eq!(rest.kind, e.data.kind);
        assert_eq!(rest.cost_center_id, e.data.cost_center_id);
        assert_eq!(rest.origin, "compras");
        assert_eq!(rest.recurrence, e.data.recurrence);
    }

    #[test]
    fn test_remainder_on_installment_group() {
        let e = entry(
            "TV (2/3)",
            dec!(50),
            Some(InstallmentInfo { current: 2, total: 3 }),
        );
        let outcome = PaymentService::settle(
            &e,
            &PaymentDecision {
                paid: dec!(20),
                remainder_due: Some(d(2024, 8, 1)),
            },
            d(2024, 6, 3),
        )
        .unwrap();

        assert_eq!(outcome.realized.description, "TV (2/4)");
        let rest = outcome.remainder_entry.unwrap();
        assert_eq!(rest.description, "TV (4/4)");
        assert_eq!(rest.value, dec!(30));
        assert_eq!(rest.installment, Some(InstallmentInfo { current: 4, total: 4 }));
    }

    #[test]
    fn test_declined_remainder_is_dropped() {
        let e = entry("AGUA", dec!(100), None);
        let outcome = PaymentService::settle(
            &e,
            &PaymentDecision {
                paid: dec!(70),
                remainder_due: None,
            },
            d(2024, 6, 3),
        )
        .unwrap();

        assert_eq!(outcome.realized.value, dec!(70));
        assert_eq!(outcome.realized.description, "AGUA");
        assert!(outcome.remainder_entry.is_none());
    }

    #[test]
    fn test_rejects_realized_and_bad_amounts() {
        let mut e = entry("AGUA", dec!(100), None);
        let decision = PaymentDecision {
            paid: dec!(120),
            remainder_due: None,
        };
        assert!(matches!(
            PaymentService::settle(&e, &decision, d(2024, 6, 3)),
            Err(PaymentError::InvalidAmount { .. })
        ));

        e.data.status = EntryStatus::Realized;
        assert_eq!(
            PaymentService::settle(&e, &decision, d(2024, 6, 3)),
            Err(PaymentError::AlreadyRealized)
        );
    }
}
