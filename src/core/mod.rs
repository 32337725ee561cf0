//! Core building blocks of the framework.
//!
//! - Identity tokens and the identity-keyed map every table is built from
//! - Named events
//! - The `State` trait and the event-sink capability states report through
//! - Structured errors
//!
//! Nothing in this module knows about transition tables; that lives in
//! [`context`](crate::context).

mod error;
mod event;
mod identity;
mod keyed;
mod state;

pub use error::{ErrorCode, FsmError};
pub use event::Event;
pub use identity::{Automaton, Identified, Identity};
pub use keyed::KeyedMap;
pub use state::{AutomatonRef, EventSink, SinkHandle, State, StateBase};
