//! Transition table, dispatch and the state machine context.
//!
//! - [`TransitionTable`]: `(source state, event) -> target state`
//! - [`StateMachineContext`]: owns the states, the frozen table and the
//!   current-state pointer; it is the event sink states report to
//! - [`DispatchPolicy`]: what happens to events with no transition
//! - [`DispatchHistory`]: optional record of matched dispatches

mod dispatcher;
mod history;
mod machine;
mod table;

pub(crate) use dispatcher::Dispatcher;
pub use dispatcher::DispatchPolicy;
pub use history::{DispatchHistory, DispatchRecord};
pub use machine::StateMachineContext;
pub use table::{StateKey, TransitionTable};
