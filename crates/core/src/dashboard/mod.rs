//! Dashboard scalar statistics.
//!
//! Plain reductions over the full invoice/payment sets, recomputed on
//! every request. No caching, no incremental maintenance.

pub mod service;
pub mod types;

pub use service::DashboardService;
pub use types::DashboardStats;
