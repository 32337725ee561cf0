//! Wiring phase: register states, add transitions, then freeze.

use crate::builder::error::{BuildError, WiringViolation};
use crate::context::{DispatchPolicy, Dispatcher, StateKey, StateMachineContext, TransitionTable};
use crate::core::{AutomatonRef, Event, FsmError, Identified, Identity, KeyedMap, SinkHandle, State, StateBase};
use std::rc::Rc;

/// Builder for a [`StateMachineContext`].
///
/// The dispatch core exists from the moment the builder does, so states can
/// be bound to it (via [`state_base`](ContextBuilder::state_base)) before they
/// are registered. Events cast during wiring are ignored.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::ContextBuilder;
/// use statecraft::core::{Event, EventSink, State, StateBase};
///
/// struct Lamp {
///     base: StateBase,
///     name: &'static str,
/// }
///
/// impl State for Lamp {
///     fn base(&self) -> &StateBase {
///         &self.base
///     }
///
///     fn name(&self) -> &str {
///         self.name
///     }
/// }
///
/// const TOGGLE: Event = Event::from_static("TOGGLE");
///
/// let mut builder = ContextBuilder::<dyn State>::new("lamp");
/// let off = builder.register(Box::new(Lamp { base: builder.state_base()?, name: "Off" }));
/// let on = builder.register(Box::new(Lamp { base: builder.state_base()?, name: "On" }));
/// builder
///     .add_transition(&off, &TOGGLE, &on)
///     .add_transition(&on, &TOGGLE, &off)
///     .initial(&off);
///
/// let lamp = builder.build()?;
/// lamp.cast_event(&TOGGLE)?;
/// assert_eq!(lamp.current().name(), "On");
/// # Ok::<(), statecraft::core::FsmError>(())
/// ```
pub struct ContextBuilder<S: ?Sized + State> {
    dispatcher: Rc<Dispatcher>,
    states: Vec<Box<S>>,
    keys: KeyedMap<Identity, StateKey>,
    table: TransitionTable,
    initial: Option<StateKey>,
}

impl<S: ?Sized + State> ContextBuilder<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            dispatcher: Rc::new(Dispatcher::new(name)),
            states: Vec::new(),
            keys: KeyedMap::new(),
            table: TransitionTable::new(),
            initial: None,
        }
    }

    /// Handle to the automaton being built.
    pub fn automaton(&self) -> AutomatonRef {
        AutomatonRef::new(&self.dispatcher)
    }

    /// Handle to the context's event sink.
    pub fn sink(&self) -> SinkHandle {
        SinkHandle::new(&self.dispatcher)
    }

    /// A fresh [`StateBase`] bound to this builder's automaton and sink.
    pub fn state_base(&self) -> Result<StateBase, FsmError> {
        StateBase::new(self.automaton(), self.sink())
    }

    /// Choose how unmatched events are handled.
    pub fn set_policy(&mut self, policy: DispatchPolicy) -> &mut Self {
        self.dispatcher.set_policy(policy);
        self
    }

    /// Keep a [`DispatchHistory`](crate::context::DispatchHistory) of matched dispatches.
    pub fn record_history(&mut self) -> &mut Self {
        self.dispatcher.enable_history();
        self
    }

    /// Take ownership of `state` and return the key it is addressed by.
    ///
    /// Registering a state whose identity is already known returns the
    /// existing key and drops `state`.
    pub fn register(&mut self, state: Box<S>) -> StateKey {
        if let Some(existing) = self.keys.item(state.identity()) {
            tracing::warn!(
                machine = self.dispatcher.name(),
                state = existing.name(),
                "state registered twice; keeping the first"
            );
            return existing.clone();
        }

        let key = StateKey::new(state.identity().clone(), state.name(), self.states.len());
        self.keys.add(state.identity().clone(), key.clone());
        self.states.push(state);
        key
    }

    /// Add `source --event--> target`. A repeated `(source, event)` pair
    /// replaces the earlier target.
    pub fn add_transition(
        &mut self,
        source: &StateKey,
        event: &Event,
        target: &StateKey,
    ) -> &mut Self {
        if let Some(previous) =
            self.table
                .add_transition(source.clone(), event.clone(), target.clone())
        {
            tracing::debug!(
                machine = self.dispatcher.name(),
                source = source.name(),
                event = %event,
                replaced = previous.name(),
                target = target.name(),
                "transition overwritten"
            );
        }
        self
    }

    /// Set the state the machine starts in (required).
    pub fn initial(&mut self, key: &StateKey) -> &mut Self {
        self.initial = Some(key.clone());
        self
    }

    /// The table wired so far.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Freeze the table and hand over the running context.
    ///
    /// Every key used for the initial state or in a transition must have been
    /// returned by this builder's [`register`](ContextBuilder::register); all
    /// offending keys are reported together.
    pub fn build(self) -> Result<StateMachineContext<S>, BuildError> {
        let initial = self.initial.clone().ok_or(BuildError::MissingInitialState)?;

        let violations = self.violations(&initial);
        if !violations.is_empty() {
            return Err(BuildError::UnregisteredStates(violations));
        }

        let table = Rc::new(self.table);
        let frozen = self.dispatcher.freeze(Rc::clone(&table), initial.clone());
        debug_assert!(frozen, "a builder's dispatcher is frozen exactly once");

        tracing::debug!(
            machine = self.dispatcher.name(),
            states = self.states.len(),
            transitions = table.len(),
            initial = initial.name(),
            "state machine wired"
        );

        Ok(StateMachineContext::new(
            self.dispatcher,
            table,
            self.states,
            self.keys,
            initial,
        ))
    }

    fn is_registered(&self, key: &StateKey) -> bool {
        self.states
            .get(key.slot())
            .is_some_and(|state| state.identity() == key.identity())
    }

    fn violations(&self, initial: &StateKey) -> Vec<WiringViolation> {
        let mut violations = Vec::new();

        if !self.is_registered(initial) {
            violations.push(WiringViolation::UnregisteredInitial {
                name: initial.name().to_string(),
            });
        }

        for (source, event, target) in self.table.iter() {
            if !self.is_registered(source) {
                violations.push(WiringViolation::UnregisteredSource {
                    name: source.name().to_string(),
                    event: event.name().to_string(),
                });
            }
            if !self.is_registered(target) {
                violations.push(WiringViolation::UnregisteredTarget {
                    name: target.name().to_string(),
                    event: event.name().to_string(),
                });
            }
        }

        violations
    }
}
