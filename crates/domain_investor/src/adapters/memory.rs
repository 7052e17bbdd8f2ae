//! In-memory investor store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{DomainPort, InvestorId, PortError};

use crate::investor::Investor;
use crate::ports::{InvestorPort, InvestorQuery};

/// Investor store backed by a `HashMap`
#[derive(Debug, Default)]
pub struct InMemoryInvestorStore {
    investors: RwLock<HashMap<InvestorId, Investor>>,
}

impl InMemoryInvestorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored investors
    pub async fn len(&self) -> usize {
        self.investors.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.investors.read().await.is_empty()
    }
}

impl DomainPort for InMemoryInvestorStore {}

#[async_trait]
impl InvestorPort for InMemoryInvestorStore {
    async fn get(&self, id: InvestorId) -> Result<Investor, PortError> {
        self.investors
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Investor", id))
    }

    async fn list(&self, query: &InvestorQuery) -> Result<Vec<Investor>, PortError> {
        let investors = self.investors.read().await;
        let mut matching: Vec<Investor> = investors
            .values()
            .filter(|i| query.matches(i))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.as_uuid().cmp(b.id.as_uuid())));

        let offset = query.offset.unwrap_or(0) as usize;
        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }

    async fn insert(&self, investor: &Investor) -> Result<(), PortError> {
        let mut investors = self.investors.write().await;
        if investors.contains_key(&investor.id) {
            return Err(PortError::conflict(format!("investor {} already exists", investor.id)));
        }
        investors.insert(investor.id, investor.clone());
        Ok(())
    }

    async fn replace(&self, investor: &Investor) -> Result<(), PortError> {
        let mut investors = self.investors.write().await;
        match investors.get_mut(&investor.id) {
            Some(stored) => {
                *stored = investor.clone();
                Ok(())
            }
            None => Err(PortError::not_found("Investor", investor.id)),
        }
    }
}
