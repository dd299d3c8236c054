//! Reconciliation service and status derivation rule.

use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use invo_shared::types::id::{InvoiceId, PaymentId};
use invo_shared::types::money::Money;

use crate::ledger::error::LedgerError;
use crate::ledger::store::LedgerStore;
use crate::ledger::types::{Invoice, InvoiceStatus, NewPayment, Payment, PaymentPatch};

/// Result of a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The payment set did not warrant a status change.
    Unchanged,
    /// The invoice status was transitioned.
    Transitioned {
        /// Status before the pass.
        from: InvoiceStatus,
        /// Status after the pass.
        to: InvoiceStatus,
    },
}

/// Sums the payment amounts recorded against an invoice.
///
/// # Errors
///
/// Returns [`LedgerError::CurrencyMismatch`] if any payment is
/// denominated in a different currency than the invoice - a
/// data-integrity violation, since payment creation pins the currency.
pub fn total_paid(invoice: &Invoice, payments: &[Payment]) -> Result<Money, LedgerError> {
    let mut total = Money::zero(invoice.amount.currency);
    for payment in payments {
        if payment.amount.currency != invoice.amount.currency {
            return Err(LedgerError::CurrencyMismatch {
                invoice: invoice.amount.currency,
                payment: payment.amount.currency,
            });
        }
        total = total.checked_add(payment.amount)?;
    }
    Ok(total)
}

/// The status derivation rule.
///
/// - Total covers the invoice amount and status is not `Paid`:
///   transition to `Paid`. Overpayment is accepted and still resolves
///   to `Paid`.
/// - Total falls below the amount while status is `Paid`: reopen to
///   `Pending` (e.g., after a payment is deleted or reduced).
/// - Otherwise no transition. In particular, `Overdue` is never
///   rewritten to `Pending` just because the total stayed short; only
///   a payment-driven move to `Paid` or an external edit changes it.
///
/// `total_paid` must be in the invoice's currency.
#[must_use]
pub fn next_status(invoice: &Invoice, total_paid: Money) -> Option<InvoiceStatus> {
    let covered = total_paid.minor >= invoice.amount.minor;
    match (covered, invoice.status) {
        (true, InvoiceStatus::Pending | InvoiceStatus::Overdue) => Some(InvoiceStatus::Paid),
        (false, InvoiceStatus::Paid) => Some(InvoiceStatus::Pending),
        _ => None,
    }
}

/// Derives the status transition for an invoice from its payment set.
///
/// Running this twice on unchanged inputs yields `None` the second
/// time once the first transition is applied; passes are idempotent.
///
/// # Errors
///
/// Propagates [`LedgerError::CurrencyMismatch`] from [`total_paid`].
pub fn derive_status(
    invoice: &Invoice,
    payments: &[Payment],
) -> Result<Option<InvoiceStatus>, LedgerError> {
    let total = total_paid(invoice, payments)?;
    Ok(next_status(invoice, total))
}

/// The single entry point for payment mutations.
///
/// Each mutating operation validates its input, applies the write,
/// and runs one reconciliation pass for the affected invoice as one
/// logical unit; a failed pass compensates the write so nothing is
/// left dangling. Operations against the same invoice are serialized
/// through a per-invoice lock; different invoices never contend.
pub struct ReconciliationService<S> {
    store: S,
    locks: DashMap<InvoiceId, Arc<Mutex<()>>>,
}

impl<S: LedgerStore> ReconciliationService<S> {
    /// Wraps a store with the reconciliation discipline.
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: DashMap::new(),
        }
    }

    /// Direct access to the underlying store for read paths and
    /// invoice CRUD, which need no reconciliation.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Records a payment against an existing invoice and reconciles.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvoiceNotFound`] or
    /// [`LedgerError::CurrencyMismatch`] before anything is written.
    pub fn record_payment(&self, new: NewPayment) -> Result<Payment, LedgerError> {
        let lock = self.lock_for(new.invoice_id);
        let _guard = lock
            .lock()
            .map_err(|_| LedgerError::ReconciliationConflict(new.invoice_id))?;

        let invoice = self.store.get_invoice(new.invoice_id)?;
        if new.amount.currency != invoice.amount.currency {
            return Err(LedgerError::CurrencyMismatch {
                invoice: invoice.amount.currency,
                payment: new.amount.currency,
            });
        }

        let payment = new.into_payment();
        self.store.insert_payment(payment.clone())?;
        if let Err(err) = self.reconcile_locked(payment.invoice_id) {
            self.store.delete_payment(payment.id)?;
            return Err(err);
        }
        Ok(payment)
    }

    /// Applies an amount/date patch to a payment and reconciles.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::CurrencyMismatch`] before anything is
    /// written if the patched amount changes currency.
    pub fn amend_payment(
        &self,
        id: PaymentId,
        patch: PaymentPatch,
    ) -> Result<Payment, LedgerError> {
        let invoice_id = self.store.get_payment(id)?.invoice_id;
        let lock = self.lock_for(invoice_id);
        let _guard = lock
            .lock()
            .map_err(|_| LedgerError::ReconciliationConflict(invoice_id))?;

        // Re-read under the lock; the record may have changed between
        // the id lookup and lock acquisition.
        let before = self.store.get_payment(id)?;
        let invoice = self.store.get_invoice(before.invoice_id)?;

        let mut updated = before.clone();
        if let Some(amount) = patch.amount {
            if amount.currency != invoice.amount.currency {
                return Err(LedgerError::CurrencyMismatch {
                    invoice: invoice.amount.currency,
                    payment: amount.currency,
                });
            }
            updated.amount = amount;
        }
        if let Some(paid_on) = patch.paid_on {
            updated.paid_on = paid_on;
        }

        self.store.update_payment(updated.clone())?;
        if let Err(err) = self.reconcile_locked(invoice.id) {
            self.store.update_payment(before)?;
            return Err(err);
        }
        Ok(updated)
    }

    /// Deletes a payment and reconciles its parent invoice.
    pub fn void_payment(&self, id: PaymentId) -> Result<(), LedgerError> {
        let invoice_id = self.store.get_payment(id)?.invoice_id;
        let lock = self.lock_for(invoice_id);
        let _guard = lock
            .lock()
            .map_err(|_| LedgerError::ReconciliationConflict(invoice_id))?;

        let removed = self.store.delete_payment(id)?;
        if let Err(err) = self.reconcile_locked(removed.invoice_id) {
            self.store.insert_payment(removed)?;
            return Err(err);
        }
        Ok(())
    }

    /// Deletes an invoice, refusing while payments still reference it.
    ///
    /// Deletion goes through the service rather than the raw store so
    /// the invoice's lock-registry entry is dropped with it; the
    /// registry would otherwise retain one entry per invoice ever
    /// touched.
    pub fn delete_invoice(&self, id: InvoiceId) -> Result<(), LedgerError> {
        let lock = self.lock_for(id);
        let _guard = lock
            .lock()
            .map_err(|_| LedgerError::ReconciliationConflict(id))?;

        self.store.delete_invoice(id)?;
        self.locks.remove(&id);
        Ok(())
    }

    /// Marks a payment's receipt as generated.
    ///
    /// Flag-only update: no reconciliation pass runs.
    pub fn mark_receipt_generated(&self, id: PaymentId) -> Result<Payment, LedgerError> {
        let invoice_id = self.store.get_payment(id)?.invoice_id;
        let lock = self.lock_for(invoice_id);
        let _guard = lock
            .lock()
            .map_err(|_| LedgerError::ReconciliationConflict(invoice_id))?;

        let mut payment = self.store.get_payment(id)?;
        payment.receipt_generated = true;
        self.store.update_payment(payment.clone())?;
        Ok(payment)
    }

    /// Runs one full reconciliation pass for an invoice.
    ///
    /// Idempotent: a second pass over unchanged inputs reports
    /// [`ReconcileOutcome::Unchanged`].
    pub fn reconcile(&self, invoice_id: InvoiceId) -> Result<ReconcileOutcome, LedgerError> {
        let lock = self.lock_for(invoice_id);
        let _guard = lock
            .lock()
            .map_err(|_| LedgerError::ReconciliationConflict(invoice_id))?;
        self.reconcile_locked(invoice_id)
    }

    fn reconcile_locked(&self, invoice_id: InvoiceId) -> Result<ReconcileOutcome, LedgerError> {
        let invoice = self.store.get_invoice(invoice_id)?;
        let payments = self.store.payments_for_invoice(invoice_id)?;
        let total = total_paid(&invoice, &payments)?;

        match next_status(&invoice, total) {
            Some(to) => {
                self.store.set_invoice_status(invoice_id, to)?;
                tracing::info!(
                    invoice = %invoice_id,
                    from = %invoice.status,
                    to = %to,
                    total_paid = %total,
                    "invoice status reconciled"
                );
                Ok(ReconcileOutcome::Transitioned {
                    from: invoice.status,
                    to,
                })
            }
            None => {
                tracing::debug!(
                    invoice = %invoice_id,
                    status = %invoice.status,
                    total_paid = %total,
                    "reconciliation pass left status unchanged"
                );
                Ok(ReconcileOutcome::Unchanged)
            }
        }
    }

    fn lock_for(&self, invoice_id: InvoiceId) -> Arc<Mutex<()>> {
        self.locks
            .entry(invoice_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
