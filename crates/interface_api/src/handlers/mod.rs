//! Request handlers

pub mod health;
pub mod investor;
pub mod fund;
pub mod admin;
