//! Investor unit holdings

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{FundId, InvestorId};

use crate::error::FundError;
use crate::transaction::Transaction;
use crate::{calculate_value, checked_sum, round_units};

/// An investor's net units in a fund
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Investor ID
    pub investor_id: InvestorId,
    /// Fund ID
    pub fund_id: FundId,
    /// Number of units held
    pub units: Decimal,
    /// Total money deposited
    pub invested: Decimal,
    /// Total money withdrawn
    pub withdrawn: Decimal,
}

impl Holding {
    /// Creates an empty holding
    pub fn new(investor_id: InvestorId, fund_id: FundId) -> Self {
        Self {
            investor_id,
            fund_id,
            units: Decimal::ZERO,
            invested: Decimal::ZERO,
            withdrawn: Decimal::ZERO,
        }
    }

    /// Adds units to the holding
    pub fn add_units(&mut self, units: Decimal) -> Result<(), FundError> {
        self.units = round_units(checked_sum(self.units, units)?);
        Ok(())
    }

    /// Removes units from the holding
    pub fn remove_units(&mut self, units: Decimal) -> Result<(), FundError> {
        if units > self.units {
            return Err(FundError::InsufficientUnits(format!(
                "investor {} holds {} units, {} requested",
                self.investor_id, self.units, units
            )));
        }
        self.units = round_units(self.units - units);
        Ok(())
    }

    /// Books one transaction against the holding
    pub fn apply(&mut self, transaction: &Transaction) -> Result<(), FundError> {
        if transaction.units_delta >= Decimal::ZERO {
            self.add_units(transaction.units_delta)?;
        } else {
            self.remove_units(-transaction.units_delta)?;
        }

        match transaction.transaction_type {
            crate::TransactionType::Deposit => {
                self.invested = checked_sum(self.invested, transaction.amount)?
            }
            crate::TransactionType::Withdrawal => {
                self.withdrawn = checked_sum(self.withdrawn, transaction.amount)?
            }
            _ => {}
        }
        Ok(())
    }

    /// Calculates current value at given NAV
    pub fn value_at_nav(&self, nav: Decimal) -> Result<Decimal, FundError> {
        calculate_value(self.units, nav)
    }
}

/// Folds transactions into per-investor holdings
///
/// Transactions are booked in the order given; callers pass them sorted by
/// time. NAV updates and transactions without an investor are skipped.
///
/// # Errors
///
/// Returns `FundError::InsufficientUnits` if an outflow exceeds the units held
/// at that point.
pub fn holdings_from_transactions<'a, I>(transactions: I) -> Result<Vec<Holding>, FundError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut holdings: BTreeMap<(FundId, InvestorId), Holding> = BTreeMap::new();

    for transaction in transactions {
        let Some(investor_id) = transaction.investor_id else {
            continue;
        };
        holdings
            .entry((transaction.fund_id, investor_id))
            .or_insert_with(|| Holding::new(investor_id, transaction.fund_id))
            .apply(transaction)?;
    }

    Ok(holdings.into_values().collect())
}
