//! In-memory store double for reconciliation tests.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use invo_shared::types::id::{InvoiceId, PaymentId, UserId};
use invo_shared::types::money::Money;

use crate::ledger::error::LedgerError;
use crate::ledger::store::LedgerStore;
use crate::ledger::types::{
    Invoice, InvoiceFilter, InvoiceStatus, NewPayment, Payment, PaymentFilter,
};

/// Minimal `LedgerStore` backed by mutex-guarded hash maps.
pub(crate) struct TestStore {
    invoices: Mutex<HashMap<InvoiceId, Invoice>>,
    payments: Mutex<HashMap<PaymentId, Payment>>,
}

impl TestStore {
    pub(crate) fn new() -> Self {
        Self {
            invoices: Mutex::new(HashMap::new()),
            payments: Mutex::new(HashMap::new()),
        }
    }

    /// Store seeded with one invoice; returns the seeded record.
    pub(crate) fn with_invoice(invoice: Invoice) -> (Self, Invoice) {
        let store = Self::new();
        store.insert_invoice(invoice.clone()).unwrap();
        (store, invoice)
    }
}

/// A pending USD-style invoice for the given amount.
pub(crate) fn invoice_with_amount(amount: Money) -> Invoice {
    Invoice {
        id: InvoiceId::new(),
        title: "Consulting".to_string(),
        client_name: "Acme Corp".to_string(),
        client_id: None,
        amount,
        issued_on: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        status: InvoiceStatus::Pending,
        owner: UserId::new(),
    }
}

/// Payment input against the given invoice.
pub(crate) fn payment_input(invoice_id: InvoiceId, amount: Money) -> NewPayment {
    NewPayment {
        invoice_id,
        amount,
        paid_on: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
        owner: UserId::new(),
    }
}

impl LedgerStore for TestStore {
    fn insert_invoice(&self, invoice: Invoice) -> Result<(), LedgerError> {
        self.invoices.lock().unwrap().insert(invoice.id, invoice);
        Ok(())
    }

    fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, LedgerError> {
        self.invoices
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(LedgerError::InvoiceNotFound(id))
    }

    fn delete_invoice(&self, id: InvoiceId) -> Result<(), LedgerError> {
        if self.payments_for_invoice(id)?.is_empty() {
            self.invoices
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or(LedgerError::InvoiceNotFound(id))
        } else {
            Err(LedgerError::InvoiceHasPayments(id))
        }
    }

    fn list_invoices(&self, filter: &InvoiceFilter) -> Result<Vec<Invoice>, LedgerError> {
        Ok(self
            .invoices
            .lock()
            .unwrap()
            .values()
            .filter(|invoice| filter.matches(invoice))
            .cloned()
            .collect())
    }

    fn set_invoice_status(
        &self,
        id: InvoiceId,
        status: InvoiceStatus,
    ) -> Result<(), LedgerError> {
        let mut invoices = self.invoices.lock().unwrap();
        let invoice = invoices
            .get_mut(&id)
            .ok_or(LedgerError::InvoiceNotFound(id))?;
        invoice.status = status;
        Ok(())
    }

    fn insert_payment(&self, payment: Payment) -> Result<(), LedgerError> {
        if !self
            .invoices
            .lock()
            .unwrap()
            .contains_key(&payment.invoice_id)
        {
            return Err(LedgerError::InvoiceNotFound(payment.invoice_id));
        }
        self.payments.lock().unwrap().insert(payment.id, payment);
        Ok(())
    }

    fn get_payment(&self, id: PaymentId) -> Result<Payment, LedgerError> {
        self.payments
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(LedgerError::PaymentNotFound(id))
    }

    fn update_payment(&self, payment: Payment) -> Result<(), LedgerError> {
        let mut payments = self.payments.lock().unwrap();
        if !payments.contains_key(&payment.id) {
            return Err(LedgerError::PaymentNotFound(payment.id));
        }
        payments.insert(payment.id, payment);
        Ok(())
    }

    fn delete_payment(&self, id: PaymentId) -> Result<Payment, LedgerError> {
        self.payments
            .lock()
            .unwrap()
            .remove(&id)
            .ok_or(LedgerError::PaymentNotFound(id))
    }

    fn payments_for_invoice(&self, invoice_id: InvoiceId) -> Result<Vec<Payment>, LedgerError> {
        let mut payments: Vec<Payment> = self
            .payments
            .lock()
            .unwrap()
            .values()
            .filter(|payment| payment.invoice_id == invoice_id)
            .cloned()
            .collect();
        payments.sort_by_key(|payment| (payment.paid_on, payment.id.into_inner()));
        Ok(payments)
    }

    fn list_payments(&self, filter: &PaymentFilter) -> Result<Vec<Payment>, LedgerError> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .values()
            .filter(|payment| filter.matches(payment))
            .cloned()
            .collect())
    }
}
