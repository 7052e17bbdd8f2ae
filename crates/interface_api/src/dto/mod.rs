//! Request and response bodies

pub mod investor;
pub mod fund;
