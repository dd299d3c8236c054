//! Core billing logic for Invo.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations
//! live here.
//!
//! # Modules
//!
//! - `currency` - Exchange-rate table and currency conversion
//! - `ledger` - Invoice/payment entities and the persistence boundary
//! - `recon` - Reconciliation engine deriving invoice status
//! - `reports` - Period-bucketed aggregation and report snapshots
//! - `dashboard` - Dashboard scalar statistics

pub mod currency;
pub mod dashboard;
pub mod ledger;
pub mod recon;
pub mod reports;
