//! Parameterized transaction queries
//!
//! Investigations such as "all deposits of investor X in March" or "every
//! fee booked on a given day" are expressed as a [`TransactionQuery`] and run
//! through [`run_query`]. Date bounds are calendar dates in the canonical
//! zone, so a naive row stored as `2024-03-31 23:30` belongs to 31 March.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CanonicalZone, FundId, InvestorId};

use crate::checked_sum;
use crate::error::FundError;
use crate::transaction::{Transaction, TransactionType, TransactionView};

/// Filter over stored transactions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionQuery {
    pub investor_id: Option<InvestorId>,
    pub fund_id: Option<FundId>,
    /// Empty means every type
    #[serde(default)]
    pub types: Vec<TransactionType>,
    /// First local date included
    pub from_date: Option<NaiveDate>,
    /// Last local date included
    pub to_date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl TransactionQuery {
    /// Creates a query to find by investor
    pub fn for_investor(investor_id: InvestorId) -> Self {
        Self {
            investor_id: Some(investor_id),
            ..Default::default()
        }
    }

    /// Creates a query to find by fund
    pub fn for_fund(fund_id: FundId) -> Self {
        Self {
            fund_id: Some(fund_id),
            ..Default::default()
        }
    }

    /// Restricts the query to the given types
    pub fn of_types(mut self, types: impl IntoIterator<Item = TransactionType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    /// Restricts the query to an inclusive range of local dates
    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from_date = Some(from);
        self.to_date = Some(to);
        self
    }

    /// Restricts the query to a single local date
    pub fn on(self, date: NaiveDate) -> Self {
        self.between(date, date)
    }

    /// Caps the number of results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Checks the query parameters
    pub fn validate(&self) -> Result<(), FundError> {
        if let (Some(from), Some(to)) = (self.from_date, self.to_date) {
            if from > to {
                return Err(FundError::InvalidQuery(format!(
                    "from date {} is after to date {}",
                    from, to
                )));
            }
        }
        if self.limit == Some(0) {
            return Err(FundError::InvalidQuery("limit must be positive".to_string()));
        }
        Ok(())
    }

    /// Converts the local date range into UTC instants, as `[start, end)`
    pub fn window(&self, zone: &CanonicalZone) -> Result<TimeWindow, FundError> {
        let start = match self.from_date {
            Some(from) => Some(zone.local_day_bounds(from)?.0),
            None => None,
        };
        let end = match self.to_date {
            Some(to) => Some(zone.local_day_bounds(to)?.1),
            None => None,
        };
        Ok(TimeWindow { start, end })
    }

    /// Returns true if the transaction satisfies every filter
    ///
    /// # Errors
    ///
    /// Fails only when a date filter is set and the transaction timestamp
    /// cannot be placed in the canonical zone.
    pub fn matches(&self, transaction: &Transaction, zone: &CanonicalZone) -> Result<bool, FundError> {
        self.matches_within(transaction, zone, &self.window(zone)?)
    }

    fn matches_within(
        &self,
        transaction: &Transaction,
        zone: &CanonicalZone,
        window: &TimeWindow,
    ) -> Result<bool, FundError> {
        if let Some(investor_id) = self.investor_id {
            if transaction.investor_id != Some(investor_id) {
                return Ok(false);
            }
        }
        if let Some(fund_id) = self.fund_id {
            if transaction.fund_id != fund_id {
                return Ok(false);
            }
        }
        if !self.types.is_empty() && !self.types.contains(&transaction.transaction_type) {
            return Ok(false);
        }
        if window.is_unbounded() {
            return Ok(true);
        }

        let instant = zone.normalize(&transaction.recorded_at)?.with_timezone(&Utc);
        Ok(window.contains(instant))
    }
}

/// UTC instants bounding a local date range; `None` leaves that side open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| instant >= start) && self.end.map_or(true, |end| instant < end)
    }
}

/// Runs a query over transactions
///
/// # Returns
///
/// Matching transactions normalized into the canonical zone, oldest first,
/// truncated to the query limit.
pub fn run_query(
    transactions: &[Transaction],
    query: &TransactionQuery,
    zone: &CanonicalZone,
) -> Result<Vec<TransactionView>, FundError> {
    query.validate()?;
    let window = query.window(zone)?;

    let mut views = Vec::new();
    for transaction in transactions {
        if query.matches_within(transaction, zone, &window)? {
            views.push(transaction.to_view(zone)?);
        }
    }

    views.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
    if let Some(limit) = query.limit {
        views.truncate(limit);
    }

    tracing::debug!(matched = views.len(), scanned = transactions.len(), "transaction query");
    Ok(views)
}

/// Totals over a set of transaction views
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    pub count: usize,
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
    pub total_fees: Decimal,
    pub net_units: Decimal,
    pub first_at: Option<DateTime<Tz>>,
    pub last_at: Option<DateTime<Tz>>,
}

/// Summarizes transaction views
///
/// # Errors
///
/// Returns `FundError::InvalidTransaction` if a total leaves the `Decimal`
/// range.
pub fn summarize(views: &[TransactionView]) -> Result<TransactionSummary, FundError> {
    let mut summary = TransactionSummary {
        count: views.len(),
        total_deposits: Decimal::ZERO,
        total_withdrawals: Decimal::ZERO,
        total_fees: Decimal::ZERO,
        net_units: Decimal::ZERO,
        first_at: views.iter().map(|v| v.timestamp).min(),
        last_at: views.iter().map(|v| v.timestamp).max(),
    };

    for view in views {
        match view.transaction_type {
            TransactionType::Deposit => {
                summary.total_deposits = checked_sum(summary.total_deposits, view.amount)?
            }
            TransactionType::Withdrawal => {
                summary.total_withdrawals = checked_sum(summary.total_withdrawals, view.amount)?
            }
            t if t.is_fee() => summary.total_fees = checked_sum(summary.total_fees, view.amount)?,
            _ => {}
        }
        summary.net_units = checked_sum(summary.net_units, view.units_delta)?;
    }

    Ok(summary)
}
