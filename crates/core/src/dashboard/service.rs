//! Dashboard statistics computation.

use invo_shared::types::money::Currency;

use super::types::DashboardStats;
use crate::currency::error::CurrencyError;
use crate::currency::service::CurrencyConverter;
use crate::ledger::types::{Invoice, InvoiceStatus, Payment};

/// Computes dashboard reductions over the ledger.
///
/// Read-only: a pure function of the invoice/payment sets handed in.
#[derive(Debug, Clone)]
pub struct DashboardService {
    converter: CurrencyConverter,
    currency: Currency,
}

impl DashboardService {
    /// Creates a service reporting in the given currency.
    #[must_use]
    pub const fn new(converter: CurrencyConverter, currency: Currency) -> Self {
        Self {
            converter,
            currency,
        }
    }

    /// Computes the dashboard statistics.
    ///
    /// Amounts in other currencies are converted to the reporting
    /// currency before summing; sums stay in exact minor units.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError`] if any amount's currency is absent
    /// from the rate table.
    pub fn compute(
        &self,
        invoices: &[Invoice],
        payments: &[Payment],
    ) -> Result<DashboardStats, CurrencyError> {
        let total_revenue = self
            .converter
            .sum(self.currency, invoices.iter().map(|invoice| invoice.amount))?;
        let total_payments = self
            .converter
            .sum(self.currency, payments.iter().map(|payment| payment.amount))?;
        let outstanding_balance = total_revenue.checked_sub(total_payments)?;

        let count = |status: InvoiceStatus| {
            invoices.iter().filter(|i| i.status == status).count() as u64
        };

        Ok(DashboardStats {
            currency: self.currency,
            total_revenue,
            total_payments,
            outstanding_balance,
            pending_invoices: count(InvoiceStatus::Pending),
            paid_invoices: count(InvoiceStatus::Paid),
            overdue_invoices: count(InvoiceStatus::Overdue),
        })
    }
}
