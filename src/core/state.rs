//! State trait and the event-sink capability states report through.
//!
//! A state is bound to one automaton and one event sink, both held as
//! non-owning handles. The state never sees the transition table; when one of
//! its operations completes or fails it casts an [`Event`] into the sink and
//! the owning context decides what happens next.

use super::error::FsmError;
use super::event::Event;
use super::identity::{Automaton, Identified, Identity};
use std::fmt;
use std::rc::{Rc, Weak};

/// The single channel through which a state signals that something happened.
pub trait EventSink {
    /// Report `event`. Implementations decide whether it moves the machine.
    fn cast_event(&self, event: &Event) -> Result<(), FsmError>;
}

/// Stand-in target for handles that were never attached.
struct Unbound;

static UNBOUND: Identity = Identity::from_static("unbound");

impl EventSink for Unbound {
    fn cast_event(&self, _event: &Event) -> Result<(), FsmError> {
        Ok(())
    }
}

impl Identified for Unbound {
    fn identity(&self) -> &Identity {
        &UNBOUND
    }
}

impl Automaton for Unbound {}

/// Non-owning handle to an [`EventSink`].
#[derive(Clone)]
pub struct SinkHandle(Weak<dyn EventSink>);

impl SinkHandle {
    pub fn new<T: EventSink + 'static>(sink: &Rc<T>) -> Self {
        Self(Rc::downgrade(sink) as Weak<dyn EventSink>)
    }

    /// A handle that points at nothing.
    pub fn detached() -> Self {
        let weak: Weak<dyn EventSink> = Weak::<Unbound>::new();
        Self(weak)
    }

    pub fn is_attached(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Forward `event` to the sink. An event cast into a sink that no longer
    /// exists is dropped.
    pub fn cast_event(&self, event: &Event) -> Result<(), FsmError> {
        match self.0.upgrade() {
            Some(sink) => sink.cast_event(event),
            None => {
                tracing::warn!(event = %event, "event sink detached; event dropped");
                Ok(())
            }
        }
    }
}

impl fmt::Debug for SinkHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkHandle")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Non-owning handle to the [`Automaton`] a state operates on.
#[derive(Clone)]
pub struct AutomatonRef(Weak<dyn Automaton>);

impl AutomatonRef {
    pub fn new<T: Automaton + 'static>(automaton: &Rc<T>) -> Self {
        Self(Rc::downgrade(automaton) as Weak<dyn Automaton>)
    }

    /// A handle that points at nothing.
    pub fn detached() -> Self {
        let weak: Weak<dyn Automaton> = Weak::<Unbound>::new();
        Self(weak)
    }

    pub fn is_attached(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Identity of the automaton, if it is still alive.
    pub fn identity(&self) -> Option<Identity> {
        self.0
            .upgrade()
            .map(|automaton| automaton.identity().clone())
    }
}

impl fmt::Debug for AutomatonRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutomatonRef")
            .field("identity", &self.identity())
            .finish()
    }
}

/// Shared part of every concrete state: its identity and its two bindings.
///
/// Not `Clone`: each one owns a freshly generated identity.
#[derive(Debug)]
pub struct StateBase {
    id: Identity,
    automaton: AutomatonRef,
    sink: SinkHandle,
}

impl StateBase {
    /// Bind a new state to `automaton` and `sink`.
    ///
    /// Fails with `CREATION_ERROR` when either handle is detached.
    pub fn new(automaton: AutomatonRef, sink: SinkHandle) -> Result<Self, FsmError> {
        if !automaton.is_attached() || !sink.is_attached() {
            return Err(FsmError::creation(
                "new",
                "StateBase",
                "'automaton' or 'eventSink' undefined",
            ));
        }
        Ok(Self {
            id: Identity::generate(),
            automaton,
            sink,
        })
    }

    pub fn identity(&self) -> &Identity {
        &self.id
    }

    pub fn automaton(&self) -> &AutomatonRef {
        &self.automaton
    }

    pub fn cast_event(&self, event: &Event) -> Result<(), FsmError> {
        self.sink.cast_event(event)
    }
}

/// Trait for state machine states.
///
/// Concrete states embed a [`StateBase`] and implement their domain
/// operations on a consumer-defined trait that extends `State`. The expected
/// pattern for an operation is:
///
/// 1. attempt the domain action;
/// 2. on success, cast the event that records the transition;
/// 3. on failure, cast the failure event, then return an [`FsmError`] whose
///    message comes from the cause.
///
/// An operation that is invalid in the current mode fails immediately
/// without casting anything.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Event, FsmError, State, StateBase};
///
/// const STOPPED: Event = Event::from_static("STOPPED");
///
/// struct Running {
///     base: StateBase,
/// }
///
/// impl State for Running {
///     fn base(&self) -> &StateBase {
///         &self.base
///     }
///
///     fn name(&self) -> &str {
///         "Running"
///     }
/// }
///
/// impl Running {
///     fn stop(&self) -> Result<(), FsmError> {
///         self.cast_event(&STOPPED)
///     }
/// }
/// ```
pub trait State {
    fn base(&self) -> &StateBase;

    /// Human-readable name used in diagnostics and history.
    fn name(&self) -> &str;

    fn identity(&self) -> &Identity {
        self.base().identity()
    }

    /// Forward `event` to the bound sink.
    fn cast_event(&self, event: &Event) -> Result<(), FsmError> {
        self.base().cast_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorCode;
    use std::cell::RefCell;

    struct RecordingSink {
        id: Identity,
        seen: RefCell<Vec<String>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                id: Identity::generate(),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl EventSink for RecordingSink {
        fn cast_event(&self, event: &Event) -> Result<(), FsmError> {
            self.seen.borrow_mut().push(event.name().to_string());
            Ok(())
        }
    }

    impl Identified for RecordingSink {
        fn identity(&self) -> &Identity {
            &self.id
        }
    }

    impl Automaton for RecordingSink {}

    struct Idle {
        base: StateBase,
    }

    impl State for Idle {
        fn base(&self) -> &StateBase {
            &self.base
        }

        fn name(&self) -> &str {
            "Idle"
        }
    }

    fn bound_state(sink: &Rc<RecordingSink>) -> Idle {
        Idle {
            base: StateBase::new(AutomatonRef::new(sink), SinkHandle::new(sink)).unwrap(),
        }
    }

    #[test]
    fn state_forwards_events_to_sink() {
        let sink = Rc::new(RecordingSink::new());
        let state = bound_state(&sink);

        state.cast_event(&Event::from_static("WAKE")).unwrap();
        state.cast_event(&Event::from_static("SLEEP")).unwrap();

        assert_eq!(*sink.seen.borrow(), vec!["WAKE", "SLEEP"]);
    }

    #[test]
    fn detached_sink_is_creation_error() {
        let sink = Rc::new(RecordingSink::new());
        let error = StateBase::new(AutomatonRef::new(&sink), SinkHandle::detached()).unwrap_err();

        assert!(error.is(&ErrorCode::CREATION_ERROR));
        assert_eq!(error.operation(), "StateBase");
    }

    #[test]
    fn detached_automaton_is_creation_error() {
        let sink = Rc::new(RecordingSink::new());
        let error = StateBase::new(AutomatonRef::detached(), SinkHandle::new(&sink)).unwrap_err();

        assert!(error.is(&ErrorCode::CREATION_ERROR));
    }

    #[test]
    fn dropped_sink_is_creation_error() {
        let sink = Rc::new(RecordingSink::new());
        let handle = SinkHandle::new(&sink);
        let automaton = AutomatonRef::new(&sink);
        drop(sink);

        assert!(!handle.is_attached());
        assert!(StateBase::new(automaton, handle).is_err());
    }

    #[test]
    fn each_state_gets_its_own_identity() {
        let sink = Rc::new(RecordingSink::new());
        let a = bound_state(&sink);
        let b = bound_state(&sink);

        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn state_knows_its_automaton() {
        let sink = Rc::new(RecordingSink::new());
        let state = bound_state(&sink);

        assert_eq!(state.base().automaton().identity(), Some(sink.id.clone()));
    }

    #[test]
    fn cast_after_sink_dropped_is_silent() {
        let sink = Rc::new(RecordingSink::new());
        let state = bound_state(&sink);
        drop(sink);

        assert!(state.cast_event(&Event::from_static("WAKE")).is_ok());
    }
}
