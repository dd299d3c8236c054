//! Ledger entity types: invoices, payments, inputs, and filters.

use chrono::NaiveDate;
use invo_shared::types::id::{ClientId, InvoiceId, PaymentId, UserId};
use invo_shared::types::money::Money;
use serde::{Deserialize, Serialize};

/// Settlement status of an invoice.
///
/// Status is a derived field: it must always equal the result of the
/// reconciliation rule applied to the invoice's current payment set.
/// `Overdue` is the exception - it is set by an external time-based
/// process, never derived from payment totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Not yet settled.
    Pending,
    /// Settled: payments cover the invoice amount.
    Paid,
    /// Past due date, set externally.
    Overdue,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
            Self::Overdue => write!(f, "overdue"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "overdue" => Ok(Self::Overdue),
            _ => Err(format!("Unknown invoice status: {s}")),
        }
    }
}

/// An invoice: the aggregate root whose derived status depends on its
/// child payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier.
    pub id: InvoiceId,
    /// Invoice title.
    pub title: String,
    /// Client display name.
    pub client_name: String,
    /// Optional reference to a stored client record.
    pub client_id: Option<ClientId>,
    /// Invoiced amount.
    pub amount: Money,
    /// Issue date.
    pub issued_on: NaiveDate,
    /// Settlement status (derived, see [`InvoiceStatus`]).
    pub status: InvoiceStatus,
    /// Owning user.
    pub owner: UserId,
}

/// A payment recorded against an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier.
    pub id: PaymentId,
    /// The invoice this payment settles (required).
    pub invoice_id: InvoiceId,
    /// Paid amount.
    pub amount: Money,
    /// Payment date.
    pub paid_on: NaiveDate,
    /// Whether a receipt has been generated for this payment.
    pub receipt_generated: bool,
    /// Owning user.
    pub owner: UserId,
}

/// Input for creating an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvoice {
    /// Invoice title.
    pub title: String,
    /// Client display name.
    pub client_name: String,
    /// Optional reference to a stored client record.
    pub client_id: Option<ClientId>,
    /// Invoiced amount.
    pub amount: Money,
    /// Issue date.
    pub issued_on: NaiveDate,
    /// Initial status; defaults to `Pending` when absent.
    pub status: Option<InvoiceStatus>,
    /// Owning user.
    pub owner: UserId,
}

impl NewInvoice {
    /// Materializes the invoice record, assigning a fresh id.
    #[must_use]
    pub fn into_invoice(self) -> Invoice {
        Invoice {
            id: InvoiceId::new(),
            title: self.title,
            client_name: self.client_name,
            client_id: self.client_id,
            amount: self.amount,
            issued_on: self.issued_on,
            status: self.status.unwrap_or(InvoiceStatus::Pending),
            owner: self.owner,
        }
    }
}

/// Input for recording a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    /// The invoice to pay against.
    pub invoice_id: InvoiceId,
    /// Paid amount.
    pub amount: Money,
    /// Payment date.
    pub paid_on: NaiveDate,
    /// Owning user.
    pub owner: UserId,
}

impl NewPayment {
    /// Materializes the payment record, assigning a fresh id. The
    /// receipt flag starts false.
    #[must_use]
    pub fn into_payment(self) -> Payment {
        Payment {
            id: PaymentId::new(),
            invoice_id: self.invoice_id,
            amount: self.amount,
            paid_on: self.paid_on,
            receipt_generated: false,
            owner: self.owner,
        }
    }
}

/// Partial update to a payment's reconciliation-relevant fields.
///
/// The receipt flag is toggled separately and never triggers a
/// reconciliation pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentPatch {
    /// New amount, if changing.
    pub amount: Option<Money>,
    /// New payment date, if changing.
    pub paid_on: Option<NaiveDate>,
}

/// Selection filter for invoice listings.
///
/// An empty filter matches everything; administrators list across all
/// owners by leaving `owner` unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceFilter {
    /// Restrict to an owning user.
    pub owner: Option<UserId>,
    /// Restrict to a settlement status.
    pub status: Option<InvoiceStatus>,
    /// Earliest issue date, inclusive.
    pub issued_from: Option<NaiveDate>,
    /// Latest issue date, inclusive.
    pub issued_to: Option<NaiveDate>,
}

impl InvoiceFilter {
    /// Returns true if the invoice satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.owner.is_none_or(|owner| invoice.owner == owner)
            && self.status.is_none_or(|status| invoice.status == status)
            && self.issued_from.is_none_or(|from| invoice.issued_on >= from)
            && self.issued_to.is_none_or(|to| invoice.issued_on <= to)
    }
}

/// Selection filter for payment listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentFilter {
    /// Restrict to an owning user.
    pub owner: Option<UserId>,
    /// Restrict to a parent invoice.
    pub invoice_id: Option<InvoiceId>,
    /// Earliest payment date, inclusive.
    pub paid_from: Option<NaiveDate>,
    /// Latest payment date, inclusive.
    pub paid_to: Option<NaiveDate>,
}

impl PaymentFilter {
    /// Returns true if the payment satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, payment: &Payment) -> bool {
        self.owner.is_none_or(|owner| payment.owner == owner)
            && self
                .invoice_id
                .is_none_or(|invoice_id| payment.invoice_id == invoice_id)
            && self.paid_from.is_none_or(|from| payment.paid_on >= from)
            && self.paid_to.is_none_or(|to| payment.paid_on <= to)
    }
}
