//! Investor Domain Ports
//!
//! `InvestorPort` is the storage boundary of the investor domain. The
//! service only talks to this trait; which store sits behind it is decided
//! at startup.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_investor::{InvestorService, InMemoryInvestorStore};
//! use std::sync::Arc;
//!
//! let service = InvestorService::new(Arc::new(InMemoryInvestorStore::new()), regions);
//! let investor = service.create(draft).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, InvestorId, PortError};

use crate::investor::Investor;

/// Query parameters for listing investors
#[derive(Debug, Clone, Default)]
pub struct InvestorQuery {
    /// Case-insensitive substring of the name
    pub name_contains: Option<String>,
    /// Exact canonical phone number
    pub phone: Option<String>,
    /// Province code of the address
    pub province_code: Option<String>,
    /// Limit results
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

impl InvestorQuery {
    /// Creates a query to find by phone
    pub fn by_phone(phone: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            ..Default::default()
        }
    }

    /// Creates a query to find by province
    pub fn by_province(province_code: impl Into<String>) -> Self {
        Self {
            province_code: Some(province_code.into()),
            ..Default::default()
        }
    }

    /// Adds pagination to the query
    pub fn paginate(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    /// Returns true if the investor satisfies every filter
    pub fn matches(&self, investor: &Investor) -> bool {
        if let Some(fragment) = &self.name_contains {
            if !investor.name.to_lowercase().contains(&fragment.to_lowercase()) {
                return false;
            }
        }
        if let Some(phone) = &self.phone {
            if investor.phone.as_str() != phone {
                return false;
            }
        }
        if let Some(province_code) = &self.province_code {
            let in_province = investor
                .address
                .as_ref()
                .is_some_and(|a| &a.province_code == province_code);
            if !in_province {
                return false;
            }
        }
        true
    }
}

/// Storage operations required by the investor domain
///
/// There is no delete: investors are never removed by this subsystem.
#[async_trait]
pub trait InvestorPort: DomainPort {
    /// Retrieves an investor by ID, or `PortError::NotFound`
    async fn get(&self, id: InvestorId) -> Result<Investor, PortError>;

    /// Lists investors matching the query, oldest first
    async fn list(&self, query: &InvestorQuery) -> Result<Vec<Investor>, PortError>;

    /// Stores a new investor, or `PortError::Conflict` if the ID exists
    async fn insert(&self, investor: &Investor) -> Result<(), PortError>;

    /// Replaces a stored investor, or `PortError::NotFound`
    async fn replace(&self, investor: &Investor) -> Result<(), PortError>;
}
