//! Report data types.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use invo_shared::types::id::{ReportId, UserId};
use invo_shared::types::money::{Currency, Money};
use serde::{Deserialize, Serialize};

use crate::dashboard::types::DashboardStats;

/// One calendar-month aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
}

impl MonthWindow {
    /// The window containing the given date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns true if the date falls inside this window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The immediately preceding month.
    #[must_use]
    pub const fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Chart label, e.g. `"Mar 2026"`.
    #[must_use]
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).map_or_else(
            || format!("{:04}-{:02}", self.year, self.month),
            |date| date.format("%b %Y").to_string(),
        )
    }

    /// `count` consecutive windows ending at `end` inclusive, oldest
    /// first.
    #[must_use]
    pub fn trailing(count: u32, end: Self) -> Vec<Self> {
        let mut windows = Vec::with_capacity(count as usize);
        let mut window = end;
        for _ in 0..count {
            windows.push(window);
            window = window.previous();
        }
        windows.reverse();
        windows
    }

    /// The twelve windows of a calendar year, January first.
    #[must_use]
    pub fn calendar_year(year: i32) -> Vec<Self> {
        (1..=12).map(|month| Self { year, month }).collect()
    }
}

/// One period-aligned aggregation bucket for charts and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBucket {
    /// Window label (see [`MonthWindow::label`]).
    pub label: String,
    /// Sum of invoice amounts issued in the window.
    pub revenue: Money,
    /// Sum of payment amounts dated in the window.
    pub payments_total: Money,
    /// Synthetic expense estimate for visualization only: a fixed
    /// percentage of the window's revenue. No expense entity exists;
    /// this is never authoritative financial data.
    pub estimated_expenses: Money,
}

/// The kinds of report the system materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// Trailing monthly chart window.
    Monthly,
    /// All twelve months of a calendar year.
    Yearly,
    /// Scalar position snapshot.
    BalanceSheet,
    /// Scalar revenue/payments snapshot.
    IncomeStatement,
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
            Self::BalanceSheet => write!(f, "balance_sheet"),
            Self::IncomeStatement => write!(f, "income_statement"),
        }
    }
}

impl std::str::FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "balance_sheet" => Ok(Self::BalanceSheet),
            "income_statement" => Ok(Self::IncomeStatement),
            _ => Err(format!("Unknown report type: {s}")),
        }
    }
}

/// A materialized report snapshot.
///
/// The payload is produced once at generation time and persisted for
/// later re-download; it is not recomputed on each read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Unique identifier.
    pub id: ReportId,
    /// Report title.
    pub title: String,
    /// Report kind.
    pub report_type: ReportType,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Owning user.
    pub owner: UserId,
    /// Currency every figure is expressed in.
    pub currency: Currency,
    /// Period-bucketed series (empty for scalar report kinds).
    pub buckets: Vec<PeriodBucket>,
    /// Scalar statistics at generation time.
    pub stats: DashboardStats,
}
