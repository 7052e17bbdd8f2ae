//! Net Asset Value (NAV) management
//!
//! This module handles NAV pricing and history for funds.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CanonicalZone, FundId, NavId, StoredTimestamp};

use crate::error::FundError;

/// A single NAV price point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nav {
    /// Unique identifier
    pub id: NavId,
    /// Fund ID
    pub fund_id: FundId,
    /// Valuation date
    pub nav_date: NaiveDate,
    /// NAV value per unit
    pub value: Decimal,
    /// When the NAV was published, as stored
    pub recorded_at: StoredTimestamp,
}

impl Nav {
    /// Creates a new NAV record
    ///
    /// # Arguments
    ///
    /// * `fund_id` - The fund this NAV is for
    /// * `nav_date` - The valuation date
    /// * `value` - The NAV value per unit
    /// * `recorded_at` - Publication time
    pub fn new(fund_id: FundId, nav_date: NaiveDate, value: Decimal, recorded_at: StoredTimestamp) -> Self {
        Self {
            id: NavId::new_v7(),
            fund_id,
            nav_date,
            value,
            recorded_at,
        }
    }
}

/// A NAV figure ready for charting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavPoint {
    pub nav_date: NaiveDate,
    pub value: Decimal,
    pub recorded_at: DateTime<Tz>,
    /// Relative change from the previous point, if any
    pub change: Option<Decimal>,
}

/// NAV history for performance calculations
#[derive(Debug, Clone)]
pub struct NavHistory {
    pub fund_id: FundId,
    pub navs: Vec<Nav>,
}

impl NavHistory {
    /// Creates a new NAV history
    pub fn new(fund_id: FundId) -> Self {
        Self {
            fund_id,
            navs: Vec::new(),
        }
    }

    /// Adds a NAV record, replacing any existing record for the same date
    pub fn add(&mut self, nav: Nav) {
        self.navs.retain(|n| n.nav_date != nav.nav_date);
        self.navs.push(nav);
        self.navs.sort_by(|a, b| a.nav_date.cmp(&b.nav_date));
    }

    /// Gets the latest NAV
    pub fn latest(&self) -> Option<&Nav> {
        self.navs.last()
    }

    /// Gets NAV for a specific date
    pub fn at_date(&self, date: NaiveDate) -> Option<&Nav> {
        self.navs.iter().find(|n| n.nav_date == date)
    }

    /// Gets the most recent NAV on or before a date
    pub fn as_of(&self, date: NaiveDate) -> Option<&Nav> {
        self.navs.iter().rev().find(|n| n.nav_date <= date)
    }

    /// Calculates return between two dates
    pub fn calculate_return(&self, from: NaiveDate, to: NaiveDate) -> Option<Decimal> {
        let start_nav = self.at_date(from)?;
        let end_nav = self.at_date(to)?;

        if start_nav.value.is_zero() {
            return None;
        }

        end_nav.value.checked_sub(start_nav.value)?.checked_div(start_nav.value)
    }

    /// Returns the history as chart points in the canonical zone
    pub fn series(&self, zone: &CanonicalZone) -> Result<Vec<NavPoint>, FundError> {
        let mut points = Vec::with_capacity(self.navs.len());
        let mut previous: Option<Decimal> = None;

        for nav in &self.navs {
            let change = match previous.filter(|p| !p.is_zero()) {
                Some(p) => Some(relative_change(p, nav.value)?),
                None => None,
            };
            points.push(NavPoint {
                nav_date: nav.nav_date,
                value: nav.value,
                recorded_at: zone.normalize(&nav.recorded_at)?,
                change,
            });
            previous = Some(nav.value);
        }

        Ok(points)
    }
}

fn relative_change(from: Decimal, to: Decimal) -> Result<Decimal, FundError> {
    to.checked_sub(from)
        .and_then(|delta| delta.checked_div(from))
        .map(|change| change.round_dp(6))
        .ok_or_else(|| FundError::InvalidTransaction(format!("NAV change from {} to {} is out of range", from, to)))
}
