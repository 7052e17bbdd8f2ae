//! Fund transactions

use chrono::DateTime;
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CanonicalZone, FundId, InvestorId, StoredTimestamp, TransactionId};

use crate::calculate_units;
use crate::error::FundError;

/// Types of fund transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Investor subscribes money for units
    Deposit,
    /// Investor redeems units for money
    Withdrawal,
    /// Periodic NAV publication, no money moves
    NavUpdate,
    /// Management or service fee taken in units
    Fee,
    /// Performance fee taken in units
    PerformanceFee,
    /// Manual correction; the amount carries its own sign
    Adjustment,
}

impl TransactionType {
    /// Direction of the unit change: `1`, `-1`, or `0`
    pub fn unit_direction(&self) -> Decimal {
        match self {
            TransactionType::Deposit | TransactionType::Adjustment => Decimal::ONE,
            TransactionType::Withdrawal | TransactionType::Fee | TransactionType::PerformanceFee => {
                Decimal::NEGATIVE_ONE
            }
            TransactionType::NavUpdate => Decimal::ZERO,
        }
    }

    /// Returns true if the transaction must reference an investor
    pub fn requires_investor(&self) -> bool {
        !matches!(self, TransactionType::NavUpdate)
    }

    /// Returns true for fee-like transactions
    pub fn is_fee(&self) -> bool {
        matches!(self, TransactionType::Fee | TransactionType::PerformanceFee)
    }
}

impl std::str::FromStr for TransactionType {
    type Err = FundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deposit" => Ok(Self::Deposit),
            "withdrawal" => Ok(Self::Withdrawal),
            "nav_update" => Ok(Self::NavUpdate),
            "fee" => Ok(Self::Fee),
            "performance_fee" => Ok(Self::PerformanceFee),
            "adjustment" => Ok(Self::Adjustment),
            other => Err(FundError::InvalidQuery(format!("unknown transaction type: {}", other))),
        }
    }
}

/// A transaction record, with its timestamp exactly as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Fund the transaction belongs to
    pub fund_id: FundId,
    /// Investor, absent only for NAV updates
    pub investor_id: Option<InvestorId>,
    /// Transaction type
    pub transaction_type: TransactionType,
    /// When the transaction happened, possibly without zone metadata
    pub recorded_at: StoredTimestamp,
    /// Monetary amount
    pub amount: Decimal,
    /// NAV per unit the transaction was booked at
    pub nav: Decimal,
    /// Change in the investor's units (positive for in, negative for out)
    pub units_delta: Decimal,
    /// Free-text note
    pub note: Option<String>,
}

impl Transaction {
    /// Creates a new transaction, deriving the unit delta from amount and NAV
    ///
    /// # Errors
    ///
    /// Returns `FundError::InvalidTransaction` if the unit delta is out of
    /// range for the given amount and NAV.
    pub fn new(
        fund_id: FundId,
        investor_id: Option<InvestorId>,
        transaction_type: TransactionType,
        recorded_at: StoredTimestamp,
        amount: Decimal,
        nav: Decimal,
    ) -> Result<Self, FundError> {
        let units_delta = calculate_units(amount, nav)? * transaction_type.unit_direction();

        Ok(Self {
            id: TransactionId::new_v7(),
            fund_id,
            investor_id,
            transaction_type,
            recorded_at,
            amount,
            nav,
            units_delta,
            note: None,
        })
    }

    /// Overrides the derived unit delta
    pub fn with_units(mut self, units_delta: Decimal) -> Self {
        self.units_delta = units_delta;
        self
    }

    /// Sets the note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Checks the record before it is stored
    pub fn validate(&self) -> Result<(), FundError> {
        if self.transaction_type.requires_investor() && self.investor_id.is_none() {
            return Err(FundError::InvalidTransaction(format!(
                "{:?} requires an investor",
                self.transaction_type
            )));
        }
        if self.nav <= Decimal::ZERO {
            return Err(FundError::InvalidTransaction("NAV must be positive".to_string()));
        }
        if self.transaction_type != TransactionType::Adjustment && self.amount < Decimal::ZERO {
            return Err(FundError::InvalidTransaction(
                "amount must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Produces a display view in the canonical zone
    pub fn to_view(&self, zone: &CanonicalZone) -> Result<TransactionView, FundError> {
        Ok(TransactionView {
            id: self.id,
            fund_id: self.fund_id,
            investor_id: self.investor_id,
            transaction_type: self.transaction_type,
            timestamp: zone.normalize(&self.recorded_at)?,
            amount: self.amount,
            nav: self.nav,
            units_delta: self.units_delta,
            note: self.note.clone(),
        })
    }
}

/// A transaction with its timestamp normalized into the canonical zone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionView {
    pub id: TransactionId,
    pub fund_id: FundId,
    pub investor_id: Option<InvestorId>,
    pub transaction_type: TransactionType,
    pub timestamp: DateTime<Tz>,
    pub amount: Decimal,
    pub nav: Decimal,
    pub units_delta: Decimal,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn at(raw: &str) -> StoredTimestamp {
        StoredTimestamp::parse(raw).unwrap()
    }

    #[test]
    fn test_deposit_adds_units() {
        let tx = Transaction::new(
            FundId::new(),
            Some(InvestorId::new()),
            TransactionType::Deposit,
            at("2024-03-01 09:30:00"),
            dec!(1000),
            dec!(10),
        )
        .unwrap();
        assert_eq!(tx.units_delta, dec!(100));
    }

    #[test]
    fn test_withdrawal_and_fee_remove_units() {
        let withdrawal = Transaction::new(
            FundId::new(),
            Some(InvestorId::new()),
            TransactionType::Withdrawal,
            at("2024-03-01"),
            dec!(500),
            dec!(10),
        )
        .unwrap();
        assert_eq!(withdrawal.units_delta, dec!(-50));

        let fee = Transaction::new(
            FundId::new(),
            Some(InvestorId::new()),
            TransactionType::Fee,
            at("2024-03-01"),
            dec!(20),
            dec!(10),
        )
        .unwrap();
        assert_eq!(fee.units_delta, dec!(-2));
    }

    #[test]
    fn test_nav_update_has_no_units() {
        let tx = Transaction::new(
            FundId::new(),
            None,
            TransactionType::NavUpdate,
            at("2024-03-01"),
            Decimal::ZERO,
            dec!(10.5),
        )
        .unwrap();
        assert!(tx.units_delta.is_zero());
        assert!(tx.validate().is_ok());
    }

    #[test]
    fn test_deposit_without_investor_is_invalid() {
        let tx = Transaction::new(
            FundId::new(),
            None,
            TransactionType::Deposit,
            at("2024-03-01"),
            dec!(1000),
            dec!(10),
        )
        .unwrap();
        assert!(matches!(tx.validate(), Err(FundError::InvalidTransaction(_))));
    }

    #[test]
    fn test_out_of_range_units_rejected() {
        let result = Transaction::new(
            FundId::new(),
            Some(InvestorId::new()),
            TransactionType::Deposit,
            at("2024-03-01"),
            Decimal::MAX,
            dec!(0.0000000001),
        );
        assert!(matches!(result, Err(FundError::InvalidTransaction(_))));
    }

    #[test]
    fn test_type_from_str() {
        assert_eq!("nav_update".parse::<TransactionType>().unwrap(), TransactionType::NavUpdate);
        assert_eq!(" Deposit ".parse::<TransactionType>().unwrap(), TransactionType::Deposit);
        assert!("transfer".parse::<TransactionType>().is_err());
    }
}
