//! Dashboard data types.

use invo_shared::types::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Scalar statistics shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Currency every figure is expressed in.
    pub currency: Currency,
    /// Sum of all invoice amounts.
    pub total_revenue: Money,
    /// Sum of all payment amounts.
    pub total_payments: Money,
    /// `total_revenue - total_payments`; negative under overpayment.
    pub outstanding_balance: Money,
    /// Number of pending invoices.
    pub pending_invoices: u64,
    /// Number of paid invoices.
    pub paid_invoices: u64,
    /// Number of overdue invoices.
    pub overdue_invoices: u64,
}
