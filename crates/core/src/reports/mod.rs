//! Period-bucketed aggregation and report snapshots.
//!
//! The aggregation engine is a pure function of the invoice/payment
//! sets it is handed; nothing here mutates stored entities. Generated
//! reports are materialized snapshots persisted for re-download, not
//! recomputed on read.

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::{AggregationService, ReportService};
pub use types::{MonthWindow, PeriodBucket, Report, ReportType};
