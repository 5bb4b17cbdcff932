//! Finite State Machine for a single deployment unit

use crate::errors::DeployerError;

/// Deployment unit state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitState {
    /// Waiting for an admission permit
    Pending,

    /// Holding a permit, not started
    Admitted,

    /// Reading the descriptor file
    Loading,

    /// Resolving organization and environment
    Resolving,

    /// Fetching the live application
    Fetching,

    /// Creating a new application
    Creating,

    /// Comparing live and desired configuration
    Comparing,

    /// Updating an existing application
    Updating,

    /// Live configuration already matches
    Skipping,

    /// Finished successfully
    Succeeded,

    /// Finished with an error
    Failed,
}

impl UnitState {
    /// Terminal states accept no further events
    pub fn is_terminal(&self) -> bool {
        matches!(self, UnitState::Succeeded | UnitState::Failed)
    }
}

/// Deployment unit event
#[derive(Debug, Clone)]
pub enum UnitEvent {
    /// Admission permit acquired
    Admit,

    /// Start loading the descriptor
    Load,

    /// Start resolving the scope
    Resolve,

    /// Start fetching the live application
    Fetch,

    /// No live application exists
    Create,

    /// A live application exists
    Compare,

    /// Live configuration differs
    Update,

    /// Live configuration matches
    Skip,

    /// Current step completed the unit
    Succeed,

    /// Current step failed
    Fail(String),
}

/// Deployment unit FSM
#[derive(Debug, Clone)]
pub struct UnitFsm {
    state: UnitState,
    error: Option<String>,
}

impl UnitFsm {
    /// Create a new FSM in pending state
    pub fn new() -> Self {
        Self {
            state: UnitState::Pending,
            error: None,
        }
    }

    /// Get current state
    pub fn state(&self) -> UnitState {
        self.state
    }

    /// Get error message if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: UnitEvent) -> Result<UnitState, DeployerError> {
        let new_state = match (self.state, &event) {
            (UnitState::Pending, UnitEvent::Admit) => UnitState::Admitted,
            (UnitState::Admitted, UnitEvent::Load) => UnitState::Loading,
            (UnitState::Loading, UnitEvent::Resolve) => UnitState::Resolving,
            (UnitState::Resolving, UnitEvent::Fetch) => UnitState::Fetching,
            (UnitState::Fetching, UnitEvent::Create) => UnitState::Creating,
            (UnitState::Fetching, UnitEvent::Compare) => UnitState::Comparing,
            (UnitState::Comparing, UnitEvent::Update) => UnitState::Updating,
            (UnitState::Comparing, UnitEvent::Skip) => UnitState::Skipping,
            (UnitState::Creating | UnitState::Updating | UnitState::Skipping, UnitEvent::Succeed) => {
                UnitState::Succeeded
            }

            // Any step may fail
            (state, UnitEvent::Fail(err)) if !state.is_terminal() => {
                self.error = Some(err.clone());
                UnitState::Failed
            }

            // Invalid transitions
            (state, event) => {
                return Err(DeployerError::InvalidTransition(format!(
                    "{:?} -> {:?}",
                    state, event
                )));
            }
        };

        self.state = new_state;
        Ok(new_state)
    }
}

impl Default for UnitFsm {
    fn default() -> Self {
        Self::new()
    }
}
