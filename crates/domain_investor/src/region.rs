//! Province/ward reference table
//!
//! Investor addresses point at a province and a ward by code. The table
//! mapping codes to names (and wards to their parent province) lives in the
//! storage layer; this module defines the port used to read it, an in-memory
//! implementation, and a cached wrapper.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use core_kernel::{CacheSettings, DomainPort, PortError, TtlCache};

use crate::error::{InvestorError, ValidationError};

/// A first-level administrative region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub code: String,
    pub name: String,
}

/// A ward, always belonging to exactly one province
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ward {
    pub code: String,
    pub name: String,
    pub province_code: String,
}

/// Serialized form of the reference table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionTable {
    pub provinces: Vec<Province>,
    pub wards: Vec<Ward>,
}

/// Province and ward resolved from the reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRegion {
    pub province: Province,
    pub ward: Ward,
}

/// Read access to the province/ward reference table
///
/// Lookups are synchronous; a missing code is `Ok(None)`, not an error.
pub trait RegionDirectory: DomainPort {
    /// Looks up a province by code
    fn province(&self, code: &str) -> Result<Option<Province>, PortError>;

    /// Looks up a ward by code
    fn ward(&self, code: &str) -> Result<Option<Ward>, PortError>;

    /// Lists the wards of a province, ordered by code
    fn wards_of(&self, province_code: &str) -> Result<Vec<Ward>, PortError>;
}

/// Validates that a ward belongs to a province
///
/// # Arguments
///
/// * `directory` - The reference table to resolve codes against
/// * `province_code` - Code of the province
/// * `ward_code` - Code of the ward
///
/// # Returns
///
/// The resolved province and ward, including their names
///
/// # Errors
///
/// `InvestorError::Validation` for an unknown province, an unknown ward, or
/// a ward whose parent is a different province. `InvestorError::Port` if the
/// table cannot be read.
pub fn validate_address(
    directory: &dyn RegionDirectory,
    province_code: &str,
    ward_code: &str,
) -> Result<ResolvedRegion, InvestorError> {
    let province_code = province_code.trim();
    let ward_code = ward_code.trim();

    let province = directory
        .province(province_code)?
        .ok_or_else(|| ValidationError::new(format!("Unknown province code: {}", province_code)))?;

    let ward = directory
        .ward(ward_code)?
        .ok_or_else(|| ValidationError::new(format!("Unknown ward code: {}", ward_code)))?;

    if ward.province_code != province.code {
        return Err(ValidationError::new(format!(
            "Ward {} does not belong to province {}",
            ward.code, province.code
        ))
        .into());
    }

    Ok(ResolvedRegion { province, ward })
}

/// Reference table held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegionDirectory {
    provinces: HashMap<String, Province>,
    wards: HashMap<String, Ward>,
}

impl InMemoryRegionDirectory {
    /// Builds a directory from reference rows
    ///
    /// # Errors
    ///
    /// Returns `PortError::Conflict` for duplicate codes or for a ward whose
    /// province is not in the table.
    pub fn from_table(table: RegionTable) -> Result<Self, PortError> {
        let mut provinces = HashMap::with_capacity(table.provinces.len());
        for province in table.provinces {
            if provinces.contains_key(&province.code) {
                return Err(PortError::conflict(format!("duplicate province code {}", province.code)));
            }
            provinces.insert(province.code.clone(), province);
        }

        let mut wards = HashMap::with_capacity(table.wards.len());
        for ward in table.wards {
            if !provinces.contains_key(&ward.province_code) {
                return Err(PortError::conflict(format!(
                    "ward {} references unknown province {}",
                    ward.code, ward.province_code
                )));
            }
            if wards.contains_key(&ward.code) {
                return Err(PortError::conflict(format!("duplicate ward code {}", ward.code)));
            }
            wards.insert(ward.code.clone(), ward);
        }

        Ok(Self { provinces, wards })
    }

    /// Builds a directory from the JSON form of [`RegionTable`]
    pub fn from_json(json: &str) -> Result<Self, PortError> {
        let table: RegionTable = serde_json::from_str(json)
            .map_err(|e| PortError::internal(format!("invalid region table: {}", e)))?;
        Self::from_table(table)
    }

    pub fn province_count(&self) -> usize {
        self.provinces.len()
    }

    pub fn ward_count(&self) -> usize {
        self.wards.len()
    }
}

impl DomainPort for InMemoryRegionDirectory {}

impl RegionDirectory for InMemoryRegionDirectory {
    fn province(&self, code: &str) -> Result<Option<Province>, PortError> {
        Ok(self.provinces.get(code).cloned())
    }

    fn ward(&self, code: &str) -> Result<Option<Ward>, PortError> {
        Ok(self.wards.get(code).cloned())
    }

    fn wards_of(&self, province_code: &str) -> Result<Vec<Ward>, PortError> {
        let mut wards: Vec<Ward> = self
            .wards
            .values()
            .filter(|w| w.province_code == province_code)
            .cloned()
            .collect();
        wards.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(wards)
    }
}

/// A directory fronted by TTL caches
///
/// Misses are cached too, so repeated lookups of a bad code do not reach the
/// underlying table. Call [`CachedRegionDirectory::invalidate`] after the
/// table changes.
#[derive(Clone)]
pub struct CachedRegionDirectory {
    inner: Arc<dyn RegionDirectory>,
    provinces: TtlCache<String, Option<Province>>,
    wards: TtlCache<String, Option<Ward>>,
    ward_lists: TtlCache<String, Vec<Ward>>,
}

impl std::fmt::Debug for CachedRegionDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedRegionDirectory")
            .field("settings", &self.provinces.settings())
            .finish_non_exhaustive()
    }
}

impl CachedRegionDirectory {
    pub fn new(inner: Arc<dyn RegionDirectory>, settings: CacheSettings) -> Self {
        Self {
            inner,
            provinces: TtlCache::new("provinces", settings),
            wards: TtlCache::new("wards", settings),
            ward_lists: TtlCache::new("ward_lists", settings),
        }
    }

    /// Drops every cached lookup
    pub fn invalidate(&self) {
        self.provinces.invalidate_all();
        self.wards.invalidate_all();
        self.ward_lists.invalidate_all();
        tracing::info!("region directory cache invalidated");
    }
}

impl DomainPort for CachedRegionDirectory {}

impl RegionDirectory for CachedRegionDirectory {
    fn province(&self, code: &str) -> Result<Option<Province>, PortError> {
        self.provinces
            .get_or_try_insert_with(code.to_string(), || self.inner.province(code))
    }

    fn ward(&self, code: &str) -> Result<Option<Ward>, PortError> {
        self.wards
            .get_or_try_insert_with(code.to_string(), || self.inner.ward(code))
    }

    fn wards_of(&self, province_code: &str) -> Result<Vec<Ward>, PortError> {
        self.ward_lists
            .get_or_try_insert_with(province_code.to_string(), || self.inner.wards_of(province_code))
    }
}
