//! The state machine context: owner of states, table and current state.

use super::dispatcher::{DispatchPolicy, Dispatcher};
use super::history::DispatchHistory;
use super::table::{StateKey, TransitionTable};
use crate::core::{Event, EventSink, FsmError, Identified, Identity, KeyedMap, State};
use std::rc::Rc;

/// Runs a wired state machine.
///
/// A context exclusively owns its states. States talk back to it only through
/// the event sink they were created with, so there is no ownership cycle.
/// Built with [`ContextBuilder`](crate::builder::ContextBuilder); once built,
/// the transition table can no longer change.
///
/// The context is `!Send`: it stays on the thread that built it. Wrap the
/// automaton that owns it in a lock if it has to be shared.
///
/// A concrete automaton usually exposes the same domain operations as its
/// states and forwards each call to [`current`](StateMachineContext::current).
pub struct StateMachineContext<S: ?Sized + State> {
    dispatcher: Rc<Dispatcher>,
    table: Rc<TransitionTable>,
    states: Vec<Box<S>>,
    keys: KeyedMap<Identity, StateKey>,
    initial: StateKey,
}

impl<S: ?Sized + State> StateMachineContext<S> {
    pub(crate) fn new(
        dispatcher: Rc<Dispatcher>,
        table: Rc<TransitionTable>,
        states: Vec<Box<S>>,
        keys: KeyedMap<Identity, StateKey>,
        initial: StateKey,
    ) -> Self {
        Self {
            dispatcher,
            table,
            states,
            keys,
            initial,
        }
    }

    /// Identity of the automaton this context drives.
    pub fn identity(&self) -> &Identity {
        self.dispatcher.identity()
    }

    pub fn name(&self) -> &str {
        self.dispatcher.name()
    }

    /// The state the machine is in.
    pub fn current(&self) -> &S {
        let slot = self
            .dispatcher
            .current_slot()
            .unwrap_or(self.initial.slot());
        &self.states[slot]
    }

    pub fn current_key(&self) -> StateKey {
        self.dispatcher
            .current()
            .unwrap_or_else(|| self.initial.clone())
    }

    pub fn initial_key(&self) -> &StateKey {
        &self.initial
    }

    /// Whether the machine is currently in `key`.
    pub fn is_in(&self, key: &StateKey) -> bool {
        self.current_key() == *key
    }

    /// The owned state behind `key`, if `key` belongs to this context.
    pub fn state(&self, key: &StateKey) -> Option<&S> {
        self.states
            .get(key.slot())
            .filter(|state| state.identity() == key.identity())
            .map(|state| &**state)
    }

    /// Key of the state with identity `id`.
    pub fn key_of(&self, id: &Identity) -> Option<&StateKey> {
        self.keys.item(id)
    }

    pub fn state_keys(&self) -> impl Iterator<Item = &StateKey> + '_ {
        self.keys.values()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Target of `(source, event)` in the frozen table.
    pub fn lookup(&self, source: &StateKey, event: &Event) -> Option<&StateKey> {
        self.table.lookup(source, event)
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.table
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.dispatcher.policy()
    }

    /// Snapshot of the matched dispatches so far, when history recording was
    /// enabled. Later dispatches do not show up in the returned value.
    pub fn history(&self) -> Option<DispatchHistory> {
        self.dispatcher.history()
    }
}

impl<S: ?Sized + State> EventSink for StateMachineContext<S> {
    fn cast_event(&self, event: &Event) -> Result<(), FsmError> {
        self.dispatcher.cast_event(event)
    }
}

impl<S: ?Sized + State> Identified for StateMachineContext<S> {
    fn identity(&self) -> &Identity {
        self.dispatcher.identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ContextBuilder;
    use crate::core::{ErrorCode, StateBase};

    const PRESS: Event = Event::from_static("PRESS");
    const RESET: Event = Event::from_static("RESET");

    struct Light {
        base: StateBase,
        name: &'static str,
    }

    impl State for Light {
        fn base(&self) -> &StateBase {
            &self.base
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    struct Wired {
        context: StateMachineContext<dyn State>,
        off: StateKey,
        on: StateKey,
    }

    fn wired(policy: DispatchPolicy) -> Wired {
        let mut builder = ContextBuilder::<dyn State>::new("light");
        builder.set_policy(policy).record_history();

        let off = Box::new(Light {
            base: builder.state_base().unwrap(),
            name: "Off",
        });
        let off = builder.register(off);
        let on = Box::new(Light {
            base: builder.state_base().unwrap(),
            name: "On",
        });
        let on = builder.register(on);

        builder
            .add_transition(&off, &PRESS, &on)
            .add_transition(&on, &PRESS, &off)
            .add_transition(&on, &RESET, &off)
            .initial(&off);

        Wired {
            context: builder.build().unwrap(),
            off,
            on,
        }
    }

    #[test]
    fn starts_in_initial_state() {
        let w = wired(DispatchPolicy::Permissive);

        assert!(w.context.is_in(&w.off));
        assert_eq!(w.context.current().name(), "Off");
        assert_eq!(w.context.initial_key(), &w.off);
    }

    #[test]
    fn matched_dispatch_moves_to_owned_target() {
        let w = wired(DispatchPolicy::Permissive);

        w.context.cast_event(&PRESS).unwrap();

        let target = w.context.state(&w.on).unwrap();
        assert!(std::ptr::eq(w.context.current(), target));
        assert_eq!(w.context.current().identity(), w.on.identity());
    }

    #[test]
    fn unmatched_dispatch_keeps_state() {
        let w = wired(DispatchPolicy::Permissive);

        w.context.cast_event(&RESET).unwrap();

        assert!(w.context.is_in(&w.off));
        assert!(w.context.history().unwrap().is_empty());
    }

    #[test]
    fn strict_policy_rejects_unmatched_dispatch() {
        let w = wired(DispatchPolicy::Strict);

        let error = w.context.cast_event(&RESET).unwrap_err();

        assert!(error.is(&ErrorCode::EVENT_ERROR));
        assert!(w.context.is_in(&w.off));
        assert_eq!(w.context.policy(), DispatchPolicy::Strict);
    }

    #[test]
    fn states_cast_through_their_sink() {
        let w = wired(DispatchPolicy::Permissive);

        w.context.current().cast_event(&PRESS).unwrap();
        assert!(w.context.is_in(&w.on));

        w.context.current().cast_event(&RESET).unwrap();
        assert!(w.context.is_in(&w.off));
    }

    #[test]
    fn lookup_reads_frozen_table() {
        let w = wired(DispatchPolicy::Permissive);

        assert_eq!(w.context.lookup(&w.off, &PRESS), Some(&w.on));
        assert_eq!(w.context.lookup(&w.on, &RESET), Some(&w.off));
        assert_eq!(w.context.lookup(&w.off, &RESET), None);
        assert_eq!(w.context.transitions().len(), 3);
    }

    #[test]
    fn foreign_key_resolves_to_nothing() {
        let w = wired(DispatchPolicy::Permissive);
        let other = wired(DispatchPolicy::Permissive);

        assert!(w.context.state(&other.off).is_none());
        assert!(w.context.key_of(other.off.identity()).is_none());
        assert_eq!(w.context.key_of(w.on.identity()), Some(&w.on));
    }

    #[test]
    fn history_tracks_path() {
        let w = wired(DispatchPolicy::Permissive);

        w.context.cast_event(&PRESS).unwrap();
        w.context.cast_event(&RESET).unwrap();

        let history = w.context.history().unwrap();
        assert_eq!(history.get_path(), vec![&w.off, &w.on, &w.off]);
        assert_eq!(history.records()[1].event, RESET);
    }

    #[test]
    fn history_snapshot_survives_later_dispatch() {
        let w = wired(DispatchPolicy::Permissive);
        w.context.cast_event(&PRESS).unwrap();

        let before = w.context.history().unwrap();
        w.context.current().cast_event(&RESET).unwrap();
        w.context.cast_event(&PRESS).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(w.context.history().unwrap().len(), 3);
        assert!(w.context.is_in(&w.on));
    }

    #[test]
    fn states_share_the_context_automaton() {
        let w = wired(DispatchPolicy::Permissive);

        for key in w.context.state_keys() {
            let state = w.context.state(key).unwrap();
            assert_eq!(
                state.base().automaton().identity().as_ref(),
                Some(w.context.identity())
            );
        }
        assert_eq!(w.context.state_count(), 2);
    }
}
