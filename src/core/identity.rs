//! Process-unique identity tokens.
//!
//! Every addressable entity (state, event, automaton) carries an [`Identity`].
//! Maps in this crate are keyed by identity rather than by reference or
//! structural equality, so the "same" entity is recognised wherever its
//! token is.

use serde::Serialize;
use std::borrow::{Borrow, Cow};
use std::fmt;
use uuid::Uuid;

/// Immutable token identifying one entity for the lifetime of the process.
///
/// Generated identities are random UUID v4 values, so collisions are
/// negligible at any realistic table size. Name-derived identities (used by
/// [`Event`](crate::core::Event)) compare equal whenever their names do.
///
/// # Example
///
/// ```rust
/// use statecraft::core::Identity;
///
/// let a = Identity::generate();
/// let b = Identity::generate();
/// assert_ne!(a, b);
///
/// let named = Identity::from_static("CONNECT");
/// assert_eq!(named.as_str(), "CONNECT");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identity(Cow<'static, str>);

impl Identity {
    /// Draw a fresh random identity.
    pub fn generate() -> Self {
        Self(Cow::Owned(Uuid::new_v4().simple().to_string()))
    }

    /// Identity taken verbatim from a static token.
    pub const fn from_static(token: &'static str) -> Self {
        Self(Cow::Borrowed(token))
    }

    pub(crate) fn from_name(name: Cow<'static, str>) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that can be used as a key in a [`KeyedMap`](crate::core::KeyedMap).
pub trait Identified {
    /// The entity's stable identity.
    fn identity(&self) -> &Identity;
}

impl Identified for Identity {
    fn identity(&self) -> &Identity {
        self
    }
}

/// Capability interface of the subject a state machine drives.
///
/// The framework only requires a stable identity; domain operations are
/// defined entirely by the consumer.
pub trait Automaton: Identified {}
