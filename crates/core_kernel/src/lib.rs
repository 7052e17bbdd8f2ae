//! Core Kernel - Foundational types and utilities for the fund ledger
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers
//! - The canonical display zone and the timestamp normalizer
//! - An injectable TTL cache with explicit invalidation
//! - Port error types shared by adapters

pub mod temporal;
pub mod identifiers;
pub mod cache;
pub mod ports;
pub mod error;

pub use temporal::{CanonicalZone, StoredTimestamp, TemporalError, normalize_timestamp};
pub use identifiers::{InvestorId, TransactionId, FundId, NavId};
pub use cache::{TtlCache, CacheSettings};
pub use ports::{PortError, DomainPort};
pub use error::CoreError;
