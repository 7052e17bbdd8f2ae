//! Adapters for the fund domain ports

pub mod memory;

pub use memory::InMemoryFundStore;
