//! Anypoint Platform HTTP API

pub mod accounts;
pub mod applications;
pub mod client;
