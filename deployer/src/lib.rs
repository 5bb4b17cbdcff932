//! CloudHub deployer library
//!
//! Deploys Mule application descriptors to Anypoint CloudHub, creating
//! applications that do not exist and updating those whose configuration
//! changed.

pub mod app;
pub mod authn;
pub mod cache;
pub mod cli;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod platform;
pub mod resolve;
pub mod utils;
