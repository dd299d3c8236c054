//! Ledger error types for validation and state errors.

use invo_shared::error::AppError;
use invo_shared::types::id::{InvoiceId, PaymentId};
use invo_shared::types::money::{Currency, MoneyError};
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Payment references a nonexistent invoice.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(InvoiceId),

    /// Payment not found.
    #[error("Payment not found: {0}")]
    PaymentNotFound(PaymentId),

    /// Payment currency differs from the invoice's currency.
    #[error("Payment currency {payment} does not match invoice currency {invoice}")]
    CurrencyMismatch {
        /// Currency the invoice is denominated in.
        invoice: Currency,
        /// Currency of the offending payment.
        payment: Currency,
    },

    /// Invoice still has payments referencing it.
    #[error("Invoice {0} still has payments and cannot be deleted")]
    InvoiceHasPayments(InvoiceId),

    /// Concurrent-mutation guarantee violated for an invoice.
    #[error("Concurrent reconciliation detected for invoice {0}")]
    ReconciliationConflict(InvoiceId),

    /// Monetary arithmetic failed.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Storage collaborator failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvoiceNotFound(_) => "INVOICE_NOT_FOUND",
            Self::PaymentNotFound(_) => "PAYMENT_NOT_FOUND",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::InvoiceHasPayments(_) => "INVOICE_HAS_PAYMENTS",
            Self::ReconciliationConflict(_) => "RECONCILIATION_CONFLICT",
            Self::Money(_) => "MONEY_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InvoiceNotFound(_) | Self::PaymentNotFound(_) => 404,
            Self::CurrencyMismatch { .. } | Self::InvoiceHasPayments(_) => 422,
            Self::ReconciliationConflict(_) => 409,
            Self::Money(MoneyError::InvalidAmount(_)) => 400,
            Self::Money(_) | Self::Storage(_) => 500,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvoiceNotFound(_) | LedgerError::PaymentNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            LedgerError::CurrencyMismatch { .. } | LedgerError::InvoiceHasPayments(_) => {
                Self::BusinessRule(err.to_string())
            }
            LedgerError::ReconciliationConflict(_) => Self::Conflict(err.to_string()),
            LedgerError::Money(inner) => inner.into(),
            LedgerError::Storage(_) => Self::Storage(err.to_string()),
        }
    }
}
