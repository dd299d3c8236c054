//! Invoice/payment entities and the persistence boundary.
//!
//! This module owns no business logic. It defines the ledger entry
//! model (invoices and their child payments) and the narrow store
//! interface the reconciliation and aggregation engines consume.

pub mod error;
pub mod store;
pub mod types;

pub use error::LedgerError;
pub use store::LedgerStore;
pub use types::{
    Invoice, InvoiceFilter, InvoiceStatus, NewInvoice, NewPayment, Payment, PaymentFilter,
    PaymentPatch,
};
