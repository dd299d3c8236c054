//! In-memory [`LedgerStore`] implementation.
//!
//! Backs the reconciliation and aggregation engines in tests and in
//! single-process deployments. Every record lives in a concurrent map;
//! the referential rules a relational schema would enforce (payments
//! require their invoice, invoices with payments cannot be deleted)
//! are checked here instead.

use dashmap::DashMap;

use invo_core::ledger::error::LedgerError;
use invo_core::ledger::store::LedgerStore;
use invo_core::ledger::types::{Invoice, InvoiceFilter, InvoiceStatus, Payment, PaymentFilter};
use invo_shared::types::id::{InvoiceId, PaymentId};

/// Concurrent in-memory ledger.
///
/// Individual methods are safe to call from multiple threads; the
/// reconciliation service layers its per-invoice lock on top for
/// multi-step sequences.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    invoices: DashMap<InvoiceId, Invoice>,
    payments: DashMap<PaymentId, Payment>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored invoices.
    #[must_use]
    pub fn invoice_count(&self) -> usize {
        self.invoices.len()
    }

    /// Number of stored payments.
    #[must_use]
    pub fn payment_count(&self) -> usize {
        self.payments.len()
    }
}

impl LedgerStore for MemoryLedger {
    fn insert_invoice(&self, invoice: Invoice) -> Result<(), LedgerError> {
        self.invoices.insert(invoice.id, invoice);
        Ok(())
    }

    fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, LedgerError> {
        self.invoices
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(LedgerError::InvoiceNotFound(id))
    }

    fn delete_invoice(&self, id: InvoiceId) -> Result<(), LedgerError> {
        if !self.invoices.contains_key(&id) {
            return Err(LedgerError::InvoiceNotFound(id));
        }
        if self
            .payments
            .iter()
            .any(|entry| entry.invoice_id == id)
        {
            return Err(LedgerError::InvoiceHasPayments(id));
        }
        self.invoices.remove(&id);
        Ok(())
    }

    fn list_invoices(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, LedgerError> {
        let mut invoices: Vec<Invoice> = self
            .invoices
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        invoices.sort_by_key(|invoice| (invoice.issued_on, invoice.id.into_inner()));
        Ok(invoices)
    }

    fn set_invoice_status(
        &self,
        id: InvoiceId,
        status: InvoiceStatus,
    ) -> Result<(), LedgerError> {
        let mut invoice = self
            .invoices
            .get_mut(&id)
            .ok_or(LedgerError::InvoiceNotFound(id))?;
        invoice.status = status;
        Ok(())
    }

    fn insert_payment(&self, payment: Payment) -> Result<(), LedgerError> {
        if !self.invoices.contains_key(&payment.invoice_id) {
            return Err(LedgerError::InvoiceNotFound(payment.invoice_id));
        }
        self.payments.insert(payment.id, payment);
        Ok(())
    }

    fn get_payment(&self, id: PaymentId) -> Result<Payment, LedgerError> {
        self.payments
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(LedgerError::PaymentNotFound(id))
    }

    fn update_payment(&self, payment: Payment) -> Result<(), LedgerError> {
        let mut entry = self
            .payments
            .get_mut(&payment.id)
            .ok_or(LedgerError::PaymentNotFound(payment.id))?;
        *entry = payment;
        Ok(())
    }

    fn delete_payment(&self, id: PaymentId) -> Result<Payment, LedgerError> {
        self.payments
            .remove(&id)
            .map(|(_, payment)| payment)
            .ok_or(LedgerError::PaymentNotFound(id))
    }

    fn payments_for_invoice(&self, invoice_id: InvoiceId) -> Result<Vec<Payment>, LedgerError> {
        let mut payments: Vec<Payment> = self
            .payments
            .iter()
            .filter(|entry| entry.invoice_id == invoice_id)
            .map(|entry| entry.value().clone())
            .collect();
        payments.sort_by_key(|payment| (payment.paid_on, payment.id.into_inner()));
        Ok(payments)
    }

    fn list_payments(&self, filter: &PaymentFilter) -> Result<Vec<Payment>, LedgerError> {
        let mut payments: Vec<Payment> = self
            .payments
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        payments.sort_by_key(|payment| (payment.paid_on, payment.id.into_inner()));
        Ok(payments)
    }
}
