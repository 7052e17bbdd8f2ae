//! Investor Management Domain
//!
//! This crate manages investor records and the contact rules they must
//! satisfy before they are stored.
//!
//! # Contact Rules
//!
//! - **Phone**: canonical local mobile number, ten digits, leading `0`
//!   followed by one of `3 5 7 8 9`. Separators, `+`, decimal points and
//!   exponent artifacts from spreadsheet imports are rejected.
//! - **Address**: a province code and a ward code from the region
//!   reference table. The ward must belong to the province. Names are
//!   resolved from the table, never taken from the caller.
//!
//! # Partial Updates
//!
//! Updates only carry the fields that change, but validation always runs on
//! the fully merged record. A patch that introduces one bad field is
//! rejected as a whole and the stored record is left untouched.
//!
//! # Examples
//!
//! ```rust
//! use domain_investor::contact::validate_phone;
//!
//! assert!(validate_phone("0912345678").is_ok());
//! assert!(validate_phone("912345678.0").is_err());
//! ```

pub mod contact;
pub mod region;
pub mod investor;
pub mod validation;
pub mod ports;
pub mod adapters;
pub mod service;
pub mod error;

pub use contact::{PhoneNumber, validate_phone, validate_email};
pub use region::{
    Province, Ward, RegionTable, RegionDirectory, InMemoryRegionDirectory,
    CachedRegionDirectory, ResolvedRegion, validate_address,
};
pub use investor::{Investor, InvestorAddress, InvestorDraft, InvestorPatch};
pub use validation::{InvestorValidator, ValidatedInvestor};
pub use ports::{InvestorPort, InvestorQuery};
pub use adapters::InMemoryInvestorStore;
pub use service::InvestorService;
pub use error::{InvestorError, ValidationError};
