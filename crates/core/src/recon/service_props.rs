//! Property-based tests for the reconciliation engine.
//!
//! - Convergence: status always agrees with the payment total after
//!   any sequence of record/void operations.
//! - Idempotence: re-running a pass over unchanged inputs never
//!   transitions.

use proptest::prelude::*;

use invo_shared::types::money::{Currency, Money};

use super::service::{ReconcileOutcome, ReconciliationService, derive_status, next_status};
use super::testutil::{TestStore, invoice_with_amount, payment_input};
use crate::ledger::store::LedgerStore;
use crate::ledger::types::InvoiceStatus;

/// Strategy for invoice amounts (0.01 to 10,000.00).
fn invoice_minor() -> impl Strategy<Value = i64> {
    1i64..1_000_000
}

/// Strategy for payment amount sequences (each 0.01 to 5,000.00).
fn payment_minors() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(1i64..500_000, 0..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// After recording any sequence of payments and voiding any
    /// prefix of them, the status is `Paid` exactly when the
    /// remaining total covers the invoice amount.
    #[test]
    fn prop_status_converges_with_payment_total(
        amount_minor in invoice_minor(),
        payments in payment_minors(),
        voided_count in 0usize..8,
    ) {
        let amount = Money::from_minor(amount_minor, Currency::Usd);
        let (store, invoice) = TestStore::with_invoice(invoice_with_amount(amount));
        let service = ReconciliationService::new(store);

        let mut recorded = Vec::new();
        for minor in &payments {
            let payment = service
                .record_payment(payment_input(
                    invoice.id,
                    Money::from_minor(*minor, Currency::Usd),
                ))
                .unwrap();
            recorded.push(payment);
        }
        for payment in recorded.iter().take(voided_count) {
            service.void_payment(payment.id).unwrap();
        }

        let remaining: i64 = payments.iter().skip(voided_count.min(payments.len())).sum();
        let status = service.store().get_invoice(invoice.id).unwrap().status;

        if remaining >= amount_minor {
            prop_assert_eq!(status, InvoiceStatus::Paid);
        } else {
            prop_assert_eq!(status, InvoiceStatus::Pending);
        }
    }

    /// A reconciliation pass over an unchanged payment set reports
    /// `Unchanged` and leaves the status alone.
    #[test]
    fn prop_reconcile_is_idempotent(
        amount_minor in invoice_minor(),
        payments in payment_minors(),
    ) {
        let amount = Money::from_minor(amount_minor, Currency::Usd);
        let (store, invoice) = TestStore::with_invoice(invoice_with_amount(amount));
        let service = ReconciliationService::new(store);

        for minor in payments {
            service
                .record_payment(payment_input(
                    invoice.id,
                    Money::from_minor(minor, Currency::Usd),
                ))
                .unwrap();
        }

        let before = service.store().get_invoice(invoice.id).unwrap().status;
        prop_assert_eq!(
            service.reconcile(invoice.id).unwrap(),
            ReconcileOutcome::Unchanged
        );
        let after = service.store().get_invoice(invoice.id).unwrap().status;
        prop_assert_eq!(before, after);
    }

    /// Applying the derived transition makes a second derivation a
    /// no-op, for every starting status.
    #[test]
    fn prop_derived_transition_settles(
        amount_minor in invoice_minor(),
        total_minor in 0i64..2_000_000,
        start in prop_oneof![
            Just(InvoiceStatus::Pending),
            Just(InvoiceStatus::Paid),
            Just(InvoiceStatus::Overdue),
        ],
    ) {
        let mut invoice = invoice_with_amount(Money::from_minor(amount_minor, Currency::Usd));
        invoice.status = start;
        let total = Money::from_minor(total_minor, Currency::Usd);

        if let Some(next) = next_status(&invoice, total) {
            invoice.status = next;
        }
        prop_assert_eq!(next_status(&invoice, total), None);
    }

    /// A single payment in a different currency poisons derivation.
    #[test]
    fn prop_mixed_currency_always_rejected(
        amount_minor in invoice_minor(),
        payment_minor in 1i64..500_000,
    ) {
        let invoice = invoice_with_amount(Money::from_minor(amount_minor, Currency::Usd));
        let foreign = payment_input(invoice.id, Money::from_minor(payment_minor, Currency::Eur))
            .into_payment();

        prop_assert!(derive_status(&invoice, &[foreign]).is_err());
    }
}
