//! Aggregation engine and report generation.

use chrono::{DateTime, Utc};
use invo_shared::config::ReportConfig;
use invo_shared::types::id::{ReportId, UserId};
use invo_shared::types::money::Currency;
use rust_decimal::Decimal;

use super::types::{MonthWindow, PeriodBucket, Report, ReportType};
use crate::currency::error::CurrencyError;
use crate::currency::service::CurrencyConverter;
use crate::dashboard::service::DashboardService;
use crate::ledger::types::{Invoice, Payment};

/// Buckets invoices and payments into calendar-month windows.
///
/// Pure read path: invoked on dashboard/report queries, never mutates
/// anything. All sums go through exact minor-unit addition, with
/// foreign amounts converted to the report currency first.
#[derive(Debug, Clone)]
pub struct AggregationService {
    converter: CurrencyConverter,
    currency: Currency,
    expense_estimate_percent: Decimal,
}

impl AggregationService {
    /// Creates an aggregation service reporting in the given currency.
    ///
    /// `expense_estimate_percent` drives the synthetic
    /// [`PeriodBucket::estimated_expenses`] series.
    #[must_use]
    pub const fn new(
        converter: CurrencyConverter,
        currency: Currency,
        expense_estimate_percent: Decimal,
    ) -> Self {
        Self {
            converter,
            currency,
            expense_estimate_percent,
        }
    }

    /// The currency buckets are expressed in.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Buckets the ledger into `period_count` consecutive months
    /// ending at `end` inclusive, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError`] if any amount's currency is absent
    /// from the rate table.
    pub fn bucket_by_month(
        &self,
        invoices: &[Invoice],
        payments: &[Payment],
        period_count: u32,
        end: MonthWindow,
    ) -> Result<Vec<PeriodBucket>, CurrencyError> {
        self.bucket_windows(&MonthWindow::trailing(period_count, end), invoices, payments)
    }

    /// Buckets the ledger into the given windows.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError`] if any amount's currency is absent
    /// from the rate table.
    pub fn bucket_windows(
        &self,
        windows: &[MonthWindow],
        invoices: &[Invoice],
        payments: &[Payment],
    ) -> Result<Vec<PeriodBucket>, CurrencyError> {
        windows
            .iter()
            .map(|window| {
                let revenue = self.converter.sum(
                    self.currency,
                    invoices
                        .iter()
                        .filter(|invoice| window.contains(invoice.issued_on))
                        .map(|invoice| invoice.amount),
                )?;
                let payments_total = self.converter.sum(
                    self.currency,
                    payments
                        .iter()
                        .filter(|payment| window.contains(payment.paid_on))
                        .map(|payment| payment.amount),
                )?;
                let estimated_expenses = revenue.percentage_of(self.expense_estimate_percent)?;

                Ok(PeriodBucket {
                    label: window.label(),
                    revenue,
                    payments_total,
                    estimated_expenses,
                })
            })
            .collect()
    }
}

/// Materializes report snapshots from the ledger.
#[derive(Debug, Clone)]
pub struct ReportService {
    aggregation: AggregationService,
    dashboard: DashboardService,
    chart_months: u32,
}

impl ReportService {
    /// Creates a report service from the report configuration.
    #[must_use]
    pub fn new(converter: CurrencyConverter, currency: Currency, config: &ReportConfig) -> Self {
        Self {
            aggregation: AggregationService::new(
                converter.clone(),
                currency,
                config.expense_estimate_percent,
            ),
            dashboard: DashboardService::new(converter, currency),
            chart_months: config.chart_months,
        }
    }

    /// The aggregation engine backing this service.
    #[must_use]
    pub const fn aggregation(&self) -> &AggregationService {
        &self.aggregation
    }

    /// The dashboard reducer backing this service.
    #[must_use]
    pub const fn dashboard(&self) -> &DashboardService {
        &self.dashboard
    }

    /// Generates a report snapshot over the given ledger state.
    ///
    /// `end` anchors the period windows (normally the current month);
    /// `generated_at` is recorded on the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError`] if any amount's currency is absent
    /// from the rate table.
    pub fn generate(
        &self,
        title: String,
        report_type: ReportType,
        owner: UserId,
        invoices: &[Invoice],
        payments: &[Payment],
        end: MonthWindow,
        generated_at: DateTime<Utc>,
    ) -> Result<Report, CurrencyError> {
        let buckets = match report_type {
            ReportType::Monthly => {
                self.aggregation
                    .bucket_by_month(invoices, payments, self.chart_months, end)?
            }
            ReportType::Yearly => self.aggregation.bucket_windows(
                &MonthWindow::calendar_year(end.year),
                invoices,
                payments,
            )?,
            // Scalar report kinds carry stats only.
            ReportType::BalanceSheet | ReportType::IncomeStatement => Vec::new(),
        };
        let stats = self.dashboard.compute(invoices, payments)?;

        Ok(Report {
            id: ReportId::new(),
            title,
            report_type,
            generated_at,
            owner,
            currency: self.aggregation.currency,
            buckets,
            stats,
        })
    }
}
