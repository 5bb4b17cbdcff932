//! Name resolution for organizations and environments

pub mod scope;
