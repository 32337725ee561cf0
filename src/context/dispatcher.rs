//! Event dispatch: the context's event sink.

use super::history::{DispatchHistory, DispatchRecord};
use super::table::{StateKey, TransitionTable};
use crate::core::{Automaton, Event, EventSink, FsmError, Identified, Identity};
use serde::Serialize;
use std::cell::{Cell, OnceCell, RefCell};
use std::rc::Rc;

/// What dispatch does with an event the current state has no transition for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum DispatchPolicy {
    /// Ignore it. Partial transition tables are legal.
    #[default]
    Permissive,
    /// Reject it with an `EVENT_ERROR`; the current state does not change.
    Strict,
}

/// Shared dispatch core of one context.
///
/// States reach it only through weak [`SinkHandle`](crate::core::SinkHandle)s
/// and [`AutomatonRef`](crate::core::AutomatonRef)s. The table is set once,
/// when the builder freezes it; until then every event is ignored.
pub(crate) struct Dispatcher {
    id: Identity,
    name: String,
    policy: Cell<DispatchPolicy>,
    table: OnceCell<Rc<TransitionTable>>,
    current: RefCell<Option<StateKey>>,
    history: RefCell<Option<DispatchHistory>>,
}

impl Dispatcher {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            id: Identity::generate(),
            name: name.into(),
            policy: Cell::new(DispatchPolicy::default()),
            table: OnceCell::new(),
            current: RefCell::new(None),
            history: RefCell::new(None),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn policy(&self) -> DispatchPolicy {
        self.policy.get()
    }

    pub(crate) fn set_policy(&self, policy: DispatchPolicy) {
        self.policy.set(policy);
    }

    pub(crate) fn enable_history(&self) {
        self.history
            .borrow_mut()
            .get_or_insert_with(DispatchHistory::new);
    }

    /// Install the finished table and the initial state.
    ///
    /// Returns `false` if a table was already installed.
    pub(crate) fn freeze(&self, table: Rc<TransitionTable>, initial: StateKey) -> bool {
        if self.table.set(table).is_err() {
            return false;
        }
        *self.current.borrow_mut() = Some(initial);
        true
    }

    pub(crate) fn current(&self) -> Option<StateKey> {
        self.current.borrow().clone()
    }

    pub(crate) fn current_slot(&self) -> Option<usize> {
        self.current.borrow().as_ref().map(StateKey::slot)
    }

    pub(crate) fn history(&self) -> Option<DispatchHistory> {
        self.history.borrow().clone()
    }

    fn unmatched(&self, current: &StateKey, event: &Event) -> Result<(), FsmError> {
        match self.policy.get() {
            DispatchPolicy::Permissive => {
                tracing::trace!(
                    machine = %self.name,
                    state = current.name(),
                    event = %event,
                    "no transition; event ignored"
                );
                Ok(())
            }
            DispatchPolicy::Strict => {
                tracing::warn!(
                    machine = %self.name,
                    state = current.name(),
                    event = %event,
                    "no transition; event rejected"
                );
                Err(FsmError::unmatched_event(current.name(), event))
            }
        }
    }
}

impl Identified for Dispatcher {
    fn identity(&self) -> &Identity {
        &self.id
    }
}

impl Automaton for Dispatcher {}

impl EventSink for Dispatcher {
    fn cast_event(&self, event: &Event) -> Result<(), FsmError> {
        let current = self.current();
        let (Some(table), Some(current)) = (self.table.get(), current) else {
            tracing::trace!(machine = %self.name, event = %event, "machine not wired yet; event ignored");
            return Ok(());
        };

        let Some(target) = table.lookup(&current, event) else {
            return self.unmatched(&current, event);
        };

        tracing::debug!(
            machine = %self.name,
            from = current.name(),
            event = %event,
            to = target.name(),
            "state transition"
        );
        if let Some(history) = self.history.borrow_mut().as_mut() {
            history.record(DispatchRecord::new(
                current.clone(),
                event.clone(),
                target.clone(),
            ));
        }
        *self.current.borrow_mut() = Some(target.clone());
        Ok(())
    }
}
