//! The narrow persistence boundary consumed by the engines.

use invo_shared::types::id::{InvoiceId, PaymentId};

use super::error::LedgerError;
use super::types::{Invoice, InvoiceFilter, InvoiceStatus, Payment, PaymentFilter};

/// Read/write access to invoice and payment records.
///
/// This is the whole surface the reconciliation and aggregation
/// engines need from the storage layer; the relational engine behind
/// it is not this crate's concern. Implementations report their own
/// failures as [`LedgerError::Storage`].
///
/// The engines hold a per-invoice lock around every mutating sequence,
/// so implementations do not need to serialize calls against the same
/// invoice themselves; they do need the individual methods to be safe
/// to call from multiple threads.
pub trait LedgerStore: Send + Sync {
    /// Persists a new invoice record.
    fn insert_invoice(&self, invoice: Invoice) -> Result<(), LedgerError>;

    /// Fetches an invoice by id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvoiceNotFound`] if absent.
    fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, LedgerError>;

    /// Deletes an invoice.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvoiceHasPayments`] while payments
    /// still reference it; orphaned payments are never allowed.
    fn delete_invoice(&self, id: InvoiceId) -> Result<(), LedgerError>;

    /// Lists invoices matching the filter.
    fn list_invoices(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, LedgerError>;

    /// Persists a new status for an invoice and nothing else. No
    /// cascading side effects happen at this layer.
    fn set_invoice_status(&self, id: InvoiceId, status: InvoiceStatus)
    -> Result<(), LedgerError>;

    /// Persists a payment record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvoiceNotFound`] if the referenced
    /// invoice does not exist.
    fn insert_payment(&self, payment: Payment) -> Result<(), LedgerError>;

    /// Fetches a payment by id.
    fn get_payment(&self, id: PaymentId) -> Result<Payment, LedgerError>;

    /// Replaces an existing payment record.
    fn update_payment(&self, payment: Payment) -> Result<(), LedgerError>;

    /// Deletes a payment, returning the removed record.
    fn delete_payment(&self, id: PaymentId) -> Result<Payment, LedgerError>;

    /// All payments recorded against an invoice.
    fn payments_for_invoice(&self, invoice_id: InvoiceId) -> Result<Vec<Payment>, LedgerError>;

    /// Lists payments matching the filter.
    fn list_payments(&self, filter: &PaymentFilter) -> Result<Vec<Payment>, LedgerError>;
}
