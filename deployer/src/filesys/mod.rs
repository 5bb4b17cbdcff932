//! Filesystem access

pub mod descriptor;
pub mod file;
