//! In-memory fund store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{DomainPort, FundId, PortError};

use crate::nav::{Nav, NavHistory};
use crate::ports::FundPort;
use crate::transaction::Transaction;

/// Fund store backed by in-process maps
#[derive(Debug, Default)]
pub struct InMemoryFundStore {
    transactions: RwLock<HashMap<FundId, Vec<Transaction>>>,
    navs: RwLock<HashMap<FundId, NavHistory>>,
}

impl InMemoryFundStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DomainPort for InMemoryFundStore {}

#[async_trait]
impl FundPort for InMemoryFundStore {
    async fn record_transaction(&self, transaction: &Transaction) -> Result<(), PortError> {
        let mut transactions = self.transactions.write().await;
        let ledger = transactions.entry(transaction.fund_id).or_default();
        if ledger.iter().any(|t| t.id == transaction.id) {
            return Err(PortError::conflict(format!("transaction {} already exists", transaction.id)));
        }
        ledger.push(transaction.clone());
        Ok(())
    }

    async fn transactions(&self, fund_id: FundId) -> Result<Vec<Transaction>, PortError> {
        Ok(self
            .transactions
            .read()
            .await
            .get(&fund_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn record_nav(&self, nav: &Nav) -> Result<(), PortError> {
        self.navs
            .write()
            .await
            .entry(nav.fund_id)
            .or_insert_with(|| NavHistory::new(nav.fund_id))
            .add(nav.clone());
        Ok(())
    }

    async fn nav_history(&self, fund_id: FundId) -> Result<NavHistory, PortError> {
        Ok(self
            .navs
            .read()
            .await
            .get(&fund_id)
            .cloned()
            .unwrap_or_else(|| NavHistory::new(fund_id)))
    }
}
