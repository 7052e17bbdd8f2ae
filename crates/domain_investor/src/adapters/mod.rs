//! Adapters for the investor domain ports
//!
//! - **InMemoryInvestorStore**: process-local store used by the API server
//!   and the test suite

pub mod memory;

pub use memory::InMemoryInvestorStore;
