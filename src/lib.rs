//! Statecraft: a small framework for object-style finite state machines
//!
//! A machine is a set of state objects that all implement the same domain
//! operations. The machine forwards each operation to its current state; the
//! state does the work and reports what happened by casting an [`Event`]. The
//! context looks up `(current state, event)` in its transition table and, on
//! a match, makes the target the new current state.
//!
//! # Core Concepts
//!
//! - **Identity**: every automaton, state and event is addressed by one
//! - **State**: owns its behaviour, never sees the transition table
//! - **Event sink**: the only channel from a state back to its machine
//! - **Context**: owns the states and the frozen table, and dispatches events
//!
//! # Example
//!
//! ```rust
//! use statecraft::{events, ContextBuilder, EventSink, FsmError, State, StateBase};
//!
//! events! {
//!     pub struct DoorEvents {
//!         OPEN,
//!         CLOSE,
//!     }
//! }
//!
//! trait DoorState: State {
//!     fn push(&self) -> Result<(), FsmError>;
//! }
//!
//! struct Closed(StateBase);
//! struct Opened(StateBase);
//!
//! impl State for Closed {
//!     fn base(&self) -> &StateBase {
//!         &self.0
//!     }
//!     fn name(&self) -> &str {
//!         "Closed"
//!     }
//! }
//!
//! impl State for Opened {
//!     fn base(&self) -> &StateBase {
//!         &self.0
//!     }
//!     fn name(&self) -> &str {
//!         "Opened"
//!     }
//! }
//!
//! impl DoorState for Closed {
//!     fn push(&self) -> Result<(), FsmError> {
//!         self.cast_event(&DoorEvents::OPEN)
//!     }
//! }
//!
//! impl DoorState for Opened {
//!     fn push(&self) -> Result<(), FsmError> {
//!         self.cast_event(&DoorEvents::CLOSE)
//!     }
//! }
//!
//! let mut builder = ContextBuilder::<dyn DoorState>::new("door");
//! let closed = builder.register(Box::new(Closed(builder.state_base()?)));
//! let opened = builder.register(Box::new(Opened(builder.state_base()?)));
//! builder
//!     .add_transition(&closed, &DoorEvents::OPEN, &opened)
//!     .add_transition(&opened, &DoorEvents::CLOSE, &closed)
//!     .initial(&closed);
//! let door = builder.build()?;
//!
//! door.current().push()?;
//! assert!(door.is_in(&opened));
//!
//! // Unmatched events leave the machine where it is.
//! door.cast_event(&DoorEvents::OPEN)?;
//! assert_eq!(door.current().name(), "Opened");
//! # Ok::<(), FsmError>(())
//! ```

pub mod builder;
pub mod context;
pub mod core;
pub mod logging;

// Re-export commonly used types
pub use builder::{BuildError, ContextBuilder};
pub use context::{DispatchPolicy, StateKey, StateMachineContext, TransitionTable};
pub use core::{ErrorCode, Event, EventSink, FsmError, Identified, Identity, State, StateBase};
