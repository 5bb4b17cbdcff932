//! In-memory caches

pub mod scope;
