//! Investor domain service
//!
//! Orchestrates validation and storage for investor creation and partial
//! updates.

use std::sync::Arc;

use tracing::{debug, info, warn};

use core_kernel::{InvestorId, PortError};

use crate::error::InvestorError;
use crate::investor::{Investor, InvestorDraft, InvestorPatch};
use crate::ports::{InvestorPort, InvestorQuery};
use crate::region::RegionDirectory;
use crate::validation::InvestorValidator;

/// Service for creating, updating, and reading investors
#[derive(Clone)]
pub struct InvestorService {
    port: Arc<dyn InvestorPort>,
    regions: Arc<dyn RegionDirectory>,
}

impl InvestorService {
    /// Creates a service over a store and a region table
    pub fn new(port: Arc<dyn InvestorPort>, regions: Arc<dyn RegionDirectory>) -> Self {
        Self { port, regions }
    }

    /// Validates and stores a new investor
    ///
    /// # Errors
    ///
    /// Returns `InvestorError::Validation` if any field is invalid.
    pub async fn create(&self, draft: InvestorDraft) -> Result<Investor, InvestorError> {
        let validated = InvestorValidator::validate(&draft, self.regions.as_ref()).map_err(|e| {
            warn!(error = %e, "investor creation rejected");
            e
        })?;

        let investor = Investor::new(validated);
        self.port.insert(&investor).await?;

        info!(investor_id = %investor.id, "investor created");
        Ok(investor)
    }

    /// Applies a partial update
    ///
    /// The patch is merged onto the stored record and the merged record is
    /// validated as a whole. Nothing is written if validation fails.
    ///
    /// # Errors
    ///
    /// Returns `InvestorError::NotFound` for an unknown ID and
    /// `InvestorError::Validation` if the merged record is invalid.
    pub async fn update(&self, id: InvestorId, patch: InvestorPatch) -> Result<Investor, InvestorError> {
        let mut investor = self.get(id).await?;

        if patch.is_empty() {
            debug!(investor_id = %id, "empty patch, nothing to update");
            return Ok(investor);
        }

        let merged = patch.merge_into(&investor);
        let validated = InvestorValidator::validate(&merged, self.regions.as_ref()).map_err(|e| {
            warn!(investor_id = %id, error = %e, "investor update rejected");
            e
        })?;

        investor.apply(validated);
        self.port.replace(&investor).await?;

        info!(investor_id = %id, "investor updated");
        Ok(investor)
    }

    /// Retrieves an investor by ID
    pub async fn get(&self, id: InvestorId) -> Result<Investor, InvestorError> {
        self.port.get(id).await.map_err(|e| match e {
            PortError::NotFound { .. } => InvestorError::NotFound(id),
            other => InvestorError::Port(other),
        })
    }

    /// Lists investors matching a query
    pub async fn list(&self, query: &InvestorQuery) -> Result<Vec<Investor>, InvestorError> {
        let investors = self.port.list(query).await?;
        debug!(count = investors.len(), "investors listed");
        Ok(investors)
    }
}
