//! Deployment of application descriptors

pub mod change;
pub mod fsm;
pub mod orchestrator;
pub mod outcome;
pub mod unit;
