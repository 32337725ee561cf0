//! Errors raised while wiring a context.

use crate::core::FsmError;
use thiserror::Error;

/// A key handed to the builder that the builder never registered.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WiringViolation {
    #[error("initial state '{name}' is not registered with this builder")]
    UnregisteredInitial { name: String },

    #[error("transition source '{name}' on event '{event}' is not registered with this builder")]
    UnregisteredSource { name: String, event: String },

    #[error("transition target '{name}' on event '{event}' is not registered with this builder")]
    UnregisteredTarget { name: String, event: String },
}

/// Errors that can occur when building a context.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Wiring references {} unregistered state(s): {}", .0.len(), join(.0))]
    UnregisteredStates(Vec<WiringViolation>),
}

fn join(violations: &[WiringViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<BuildError> for FsmError {
    fn from(error: BuildError) -> Self {
        FsmError::creation("build", "ContextBuilder", error.to_string())
    }
}
