//! Wiring API for state machine contexts.
//!
//! A context is assembled in two phases. During wiring, a
//! [`ContextBuilder`] hands out handles that states bind to, takes ownership
//! of each state and records transitions. [`ContextBuilder::build`] then
//! freezes the table and returns the running
//! [`StateMachineContext`](crate::context::StateMachineContext); dispatch and
//! wiring never overlap.

pub mod context;
pub mod error;
pub mod macros;

pub use context::ContextBuilder;
pub use error::{BuildError, WiringViolation};
