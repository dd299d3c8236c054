//! Reconciliation engine.
//!
//! Keeps `Invoice.status` consistent with the sum of the invoice's
//! payments. Every payment mutation path goes through
//! [`ReconciliationService`]; the status derivation rule itself is the
//! pure [`derive_status`] function.

pub mod service;

#[cfg(test)]
mod service_props;
#[cfg(test)]
pub(crate) mod testutil;

pub use service::{ReconcileOutcome, ReconciliationService, derive_status, next_status, total_paid};
