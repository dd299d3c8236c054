//! Property-based tests for the aggregation engine.
//!
//! Additivity: splitting the invoice set into two disjoint subsets
//! and bucketing each yields per-window revenues that sum to the full
//! set's, for every period.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal_macros::dec;

use invo_shared::config::CurrencyConfig;
use invo_shared::types::id::{InvoiceId, UserId};
use invo_shared::types::money::{Currency, Money};

use super::service::AggregationService;
use super::types::MonthWindow;
use crate::currency::rates::RateTable;
use crate::currency::service::CurrencyConverter;
use crate::ledger::types::{Invoice, InvoiceStatus};

const WINDOW_COUNT: u32 = 6;

fn aggregation() -> AggregationService {
    let table = RateTable::from_config(&CurrencyConfig::default()).unwrap();
    AggregationService::new(CurrencyConverter::new(table), Currency::Usd, dec!(62.5))
}

/// An invoice issued in one of the six months ending June 2026.
fn invoice_at(minor: i64, month_offset: u32) -> Invoice {
    let month = 6 - month_offset % WINDOW_COUNT;
    Invoice {
        id: InvoiceId::new(),
        title: "Invoice".to_string(),
        client_name: "Client".to_string(),
        client_id: None,
        amount: Money::from_minor(minor, Currency::Usd),
        issued_on: NaiveDate::from_ymd_opt(2026, month, 15).unwrap(),
        status: InvoiceStatus::Pending,
        owner: UserId::new(),
    }
}

/// Strategy: (amount in minor units, month offset, subset flag).
fn ledger_entries() -> impl Strategy<Value = Vec<(i64, u32, bool)>> {
    prop::collection::vec((1i64..1_000_000, 0u32..WINDOW_COUNT, any::<bool>()), 0..20)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Bucketed revenue is additive over any disjoint split of the
    /// invoice set, in every window.
    #[test]
    fn prop_bucketed_revenue_is_additive(entries in ledger_entries()) {
        let service = aggregation();
        let end = MonthWindow { year: 2026, month: 6 };

        let mut all = Vec::new();
        let mut left = Vec::new();
        let mut right = Vec::new();
        for (minor, offset, flag) in &entries {
            let invoice = invoice_at(*minor, *offset);
            if *flag {
                left.push(invoice.clone());
            } else {
                right.push(invoice.clone());
            }
            all.push(invoice);
        }

        let full = service.bucket_by_month(&all, &[], WINDOW_COUNT, end).unwrap();
        let a = service.bucket_by_month(&left, &[], WINDOW_COUNT, end).unwrap();
        let b = service.bucket_by_month(&right, &[], WINDOW_COUNT, end).unwrap();

        for ((full_bucket, a_bucket), b_bucket) in full.iter().zip(&a).zip(&b) {
            let combined = a_bucket.revenue.checked_add(b_bucket.revenue).unwrap();
            prop_assert_eq!(full_bucket.revenue, combined);
        }
    }

    /// Bucket totals equal the whole-set total: no entry is dropped
    /// or double-counted across windows.
    #[test]
    fn prop_buckets_partition_the_ledger(entries in ledger_entries()) {
        let service = aggregation();
        let end = MonthWindow { year: 2026, month: 6 };

        let all: Vec<Invoice> = entries
            .iter()
            .map(|(minor, offset, _)| invoice_at(*minor, *offset))
            .collect();
        let buckets = service.bucket_by_month(&all, &[], WINDOW_COUNT, end).unwrap();

        let bucketed: i64 = buckets.iter().map(|bucket| bucket.revenue.minor).sum();
        let expected: i64 = entries.iter().map(|(minor, _, _)| *minor).sum();
        prop_assert_eq!(bucketed, expected);
    }
}
