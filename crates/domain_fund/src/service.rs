//! Fund domain service
//!
//! Reads and records ledger data and hands it back normalized into the
//! canonical zone.

use std::sync::Arc;

use tracing::{debug, info};

use core_kernel::{CanonicalZone, FundId};

use crate::error::FundError;
use crate::holding::{holdings_from_transactions, Holding};
use crate::nav::{Nav, NavPoint};
use crate::ports::FundPort;
use crate::query::{run_query, summarize, TransactionQuery, TransactionSummary};
use crate::transaction::{Transaction, TransactionView};

/// Service for fund ledger reads and writes
#[derive(Clone)]
pub struct FundService {
    port: Arc<dyn FundPort>,
    zone: CanonicalZone,
}

impl FundService {
    /// Creates a service over a store, displaying in the given zone
    pub fn new(port: Arc<dyn FundPort>, zone: CanonicalZone) -> Self {
        Self { port, zone }
    }

    pub fn zone(&self) -> CanonicalZone {
        self.zone
    }

    /// Validates and stores a transaction
    pub async fn record_transaction(&self, transaction: Transaction) -> Result<TransactionView, FundError> {
        transaction.validate()?;
        let view = transaction.to_view(&self.zone)?;
        self.port.record_transaction(&transaction).await?;

        info!(
            fund_id = %transaction.fund_id,
            transaction_id = %transaction.id,
            transaction_type = ?transaction.transaction_type,
            "transaction recorded"
        );
        Ok(view)
    }

    /// Runs a query over one fund's transactions
    pub async fn find_transactions(
        &self,
        fund_id: FundId,
        query: &TransactionQuery,
    ) -> Result<(Vec<TransactionView>, TransactionSummary), FundError> {
        let transactions = self.port.transactions(fund_id).await?;
        let scoped = TransactionQuery {
            fund_id: Some(fund_id),
            ..query.clone()
        };

        let views = run_query(&transactions, &scoped, &self.zone)?;
        let summary = summarize(&views)?;
        debug!(fund_id = %fund_id, count = summary.count, "transactions found");
        Ok((views, summary))
    }

    /// Computes holdings from a fund's full transaction history
    pub async fn holdings(&self, fund_id: FundId) -> Result<Vec<Holding>, FundError> {
        let transactions = self.port.transactions(fund_id).await?;
        let ordered = run_query(&transactions, &TransactionQuery::for_fund(fund_id), &self.zone)?;

        // Book in normalized time order, not storage order
        let by_id: std::collections::HashMap<_, _> = transactions.iter().map(|t| (t.id, t)).collect();
        let sorted = ordered.iter().filter_map(|v| by_id.get(&v.id).copied());
        holdings_from_transactions(sorted)
    }

    /// Stores a NAV figure
    pub async fn record_nav(&self, nav: Nav) -> Result<NavPoint, FundError> {
        if nav.value <= rust_decimal::Decimal::ZERO {
            return Err(FundError::InvalidTransaction("NAV must be positive".to_string()));
        }
        let recorded_at = self.zone.normalize(&nav.recorded_at)?;
        self.port.record_nav(&nav).await?;

        info!(fund_id = %nav.fund_id, nav_date = %nav.nav_date, value = %nav.value, "NAV recorded");
        Ok(NavPoint {
            nav_date: nav.nav_date,
            value: nav.value,
            recorded_at,
            change: None,
        })
    }

    /// Returns the most recent NAV of a fund, if any was recorded
    pub async fn latest_nav(&self, fund_id: FundId) -> Result<Option<Nav>, FundError> {
        let history = self.port.nav_history(fund_id).await?;
        Ok(history.latest().cloned())
    }

    /// Returns a fund's NAV history as chart points
    pub async fn nav_series(&self, fund_id: FundId) -> Result<Vec<NavPoint>, FundError> {
        let history = self.port.nav_history(fund_id).await?;
        history.series(&self.zone)
    }
}
