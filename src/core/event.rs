//! Named, immutable signals.

use super::error::FsmError;
use super::identity::{Identified, Identity};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// A named occurrence that may trigger a transition.
///
/// An event's identity *is* its name: two events built from the same name are
/// the same key in a transition table. This lets callers declare event
/// constants and compare them safely.
///
/// # Example
///
/// ```rust
/// use statecraft::core::Event;
///
/// const CONNECT: Event = Event::from_static("CONNECT");
///
/// let runtime = Event::new(String::from("CONNECT")).unwrap();
/// assert_eq!(CONNECT, runtime);
/// assert!(Event::new("").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Event {
    name: Identity,
}

impl Event {
    /// Build an event, failing with `CREATION_ERROR` on a blank name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Result<Self, FsmError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FsmError::creation("new", "Event", "'name' undefined"));
        }
        Ok(Self {
            name: Identity::from_name(name),
        })
    }

    /// Event constant.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or only ASCII whitespace. In a `const` item
    /// (as declared by [`events!`](crate::events)) that is a compile error;
    /// use [`Event::new`] for names only known at runtime.
    pub const fn from_static(name: &'static str) -> Self {
        assert!(!is_blank(name), "event name must not be blank");
        Self {
            name: Identity::from_static(name),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

const fn is_blank(name: &str) -> bool {
    let bytes = name.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_whitespace() {
            return false;
        }
        i += 1;
    }
    true
}

impl Identified for Event {
    fn identity(&self) -> &Identity {
        &self.name
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
