//! Fund Ledger Domain
//!
//! This crate implements the fund side of the ledger: investor transactions,
//! NAV history, unit holdings, and the parameterized queries the dashboard
//! runs over them.
//!
//! # Key Concepts
//!
//! - **Transaction**: a deposit, withdrawal, fee, NAV update or adjustment,
//!   with the amount, the NAV it was booked at, and the resulting unit delta
//! - **NAV**: Net Asset Value per unit, one figure per valuation date
//! - **Holding**: an investor's net units in a fund
//!
//! # Timestamps
//!
//! Transaction timestamps are kept exactly as stored (see
//! [`core_kernel::StoredTimestamp`]) and only normalized into the canonical
//! zone when a view is produced.
//!
//! # Unit Precision
//!
//! Units are stored with 6 decimal places:
//! - Deposit: 10,000,000
//! - NAV: 15,450.25
//! - Units: 647.238718

pub mod transaction;
pub mod nav;
pub mod holding;
pub mod query;
pub mod ports;
pub mod adapters;
pub mod service;
pub mod error;

pub use transaction::{Transaction, TransactionType, TransactionView};
pub use nav::{Nav, NavHistory, NavPoint};
pub use holding::{Holding, holdings_from_transactions};
pub use query::{TimeWindow, TransactionQuery, TransactionSummary, run_query, summarize};
pub use ports::FundPort;
pub use adapters::InMemoryFundStore;
pub use service::FundService;
pub use error::FundError;

use rust_decimal::Decimal;

/// Standard unit precision (6 decimal places)
pub const UNIT_PRECISION: u32 = 6;

/// Rounds a value to standard unit precision
pub fn round_units(value: Decimal) -> Decimal {
    value.round_dp(UNIT_PRECISION)
}

/// Calculates units from an amount and NAV
///
/// # Arguments
///
/// * `amount` - The monetary amount to convert
/// * `nav` - The Net Asset Value per unit
///
/// # Returns
///
/// The number of units (rounded to 6 decimal places), zero if NAV is zero
///
/// # Errors
///
/// Returns `FundError::InvalidTransaction` if the quotient does not fit in a
/// `Decimal`.
///
/// # Example
///
/// ```rust
/// use domain_fund::calculate_units;
/// use rust_decimal_macros::dec;
///
/// let units = calculate_units(dec!(1000), dec!(15.45)).unwrap();
/// assert!(units > dec!(64) && units < dec!(65));
/// ```
pub fn calculate_units(amount: Decimal, nav: Decimal) -> Result<Decimal, FundError> {
    if nav.is_zero() {
        return Ok(Decimal::ZERO);
    }
    amount
        .checked_div(nav)
        .map(round_units)
        .ok_or_else(|| overflow(format!("{} at NAV {}", amount, nav)))
}

/// Calculates the value of units at a given NAV
pub fn calculate_value(units: Decimal, nav: Decimal) -> Result<Decimal, FundError> {
    units
        .checked_mul(nav)
        .map(|value| value.round_dp(2)) // currency precision
        .ok_or_else(|| overflow(format!("{} units at NAV {}", units, nav)))
}

/// Adds two amounts, failing instead of wrapping past `Decimal::MAX`
pub(crate) fn checked_sum(a: Decimal, b: Decimal) -> Result<Decimal, FundError> {
    a.checked_add(b).ok_or_else(|| overflow(format!("{} + {}", a, b)))
}

fn overflow(what: String) -> FundError {
    FundError::InvalidTransaction(format!("{} is out of range", what))
}
