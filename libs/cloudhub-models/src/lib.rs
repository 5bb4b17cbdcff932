//! CloudHub and Anypoint Platform API models
//!
//! Explicit field-by-field data contracts for the parts of the Anypoint
//! Platform API that chdeployer talks to.

pub mod models;

pub use models::accounts::{
    EnvironmentList, LoginResponse, MeResponse, MeUser, OrganizationHierarchy,
};
pub use models::application::{
    ApplicationDescriptor, ApplicationInfo, ApplicationRecord, ApplicationSource, MuleVersion,
    TrackingSettings, WorkerType, Workers, GAV_PROPERTY,
};
pub use models::scope::{Environment, Organization};
