//! Fund domain ports

use async_trait::async_trait;

use core_kernel::{DomainPort, FundId, PortError};

use crate::nav::{Nav, NavHistory};
use crate::transaction::Transaction;

/// Storage operations required by the fund domain
#[async_trait]
pub trait FundPort: DomainPort {
    /// Stores a transaction
    async fn record_transaction(&self, transaction: &Transaction) -> Result<(), PortError>;

    /// Lists every transaction of a fund, in storage order
    async fn transactions(&self, fund_id: FundId) -> Result<Vec<Transaction>, PortError>;

    /// Stores a NAV figure, replacing any figure for the same fund and date
    async fn record_nav(&self, nav: &Nav) -> Result<(), PortError>;

    /// Returns the NAV history of a fund (empty if none recorded)
    async fn nav_history(&self, fund_id: FundId) -> Result<NavHistory, PortError>;
}
