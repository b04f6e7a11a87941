//! Property-based tests for the payment wizard and settlement.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use caixa_shared::types::{LedgerEntryId, UserId};

use crate::payment::service::PaymentService;
use crate::payment::types::WizardInput;
use crate::payment::wizard::{NEGLIGIBLE_REMAINDER, PaymentWizard};
use crate::schedule::{EntryKind, EntryStatus, LedgerEntry, PlannedEntry};

fn scheduled(value: Decimal) -> LedgerEntry {
    LedgerEntry {
        id: LedgerEntryId::new(),
        data: PlannedEntry {
            user_id: UserId::new(),
            description: "CONTA".to_string(),
            value,
            kind: EntryKind::Out,
            scheduled_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            realized_date: None,
            status: EntryStatus::Scheduled,
            cost_center_id: None,
            cash_box_id: None,
            origin: "financeiro".to_string(),
            installment: None,
            recurrence: None,
        },
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
}

fn due() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A partial payment with a new installment conserves the value.
    #[test]
    fn prop_partial_payment_conserves_value(
        value_cents in 200i64..10_000_000,
        ratio in 1i64..99,
    ) {
        let value = Decimal::new(value_cents, 2);
        let paid = Decimal::new(value_cents * ratio / 100, 2);
        prop_assume!(paid > Decimal::ZERO && value - paid > NEGLIGIBLE_REMAINDER);

        let decision = PaymentWizard::run(value, [
            WizardInput::DeclineFull,
            WizardInput::EnterAmount { amount: paid },
            WizardInput::AcceptNewInstallment,
            WizardInput::ChooseDate { date: due() },
        ]).unwrap().unwrap();

        let outcome = PaymentService::settle(&scheduled(value), &decision, today()).unwrap();
        let rest = outcome.remainder_entry.unwrap();

        prop_assert_eq!(outcome.realized.value, paid);
        prop_assert_eq!(outcome.realized.realized_date, today());
        prop_assert_eq!(rest.value, value - paid);
        prop_assert_eq!(rest.scheduled_date, due());
        prop_assert_eq!(rest.status, EntryStatus::Scheduled);
        prop_assert_eq!(outcome.realized.value + rest.value, value);
    }

    /// Paying the full value through the partial step never leaves a remainder.
    #[test]
    fn prop_full_amount_has_no_remainder(value_cents in 1i64..10_000_000) {
        let value = Decimal::new(value_cents, 2);

        let decision = PaymentWizard::run(value, [
            WizardInput::DeclineFull,
            WizardInput::EnterAmount { amount: value },
        ]).unwrap().unwrap();

        let outcome = PaymentService::settle(&scheduled(value), &decision, today()).unwrap();
        prop_assert_eq!(outcome.realized.value, value);
        prop_assert!(outcome.remainder_entry.is_none());
    }
}
