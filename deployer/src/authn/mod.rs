//! Authentication against the Anypoint Platform

pub mod credentials;
pub mod token_mngr;
