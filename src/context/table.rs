//! Two-level transition table: source state -> event -> target state.

use crate::core::{Event, Identified, Identity, KeyedMap};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Handle to a state owned by a context.
///
/// Carries the state's identity, its display name, and the slot the owning
/// context stores it in. Equality and hashing use the identity alone.
#[derive(Clone, Debug, Serialize)]
pub struct StateKey {
    id: Identity,
    name: String,
    #[serde(skip)]
    slot: usize,
}

impl StateKey {
    pub(crate) fn new(id: Identity, name: impl Into<String>, slot: usize) -> Self {
        Self {
            id,
            name: name.into(),
            slot,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn slot(&self) -> usize {
        self.slot
    }
}

impl Identified for StateKey {
    fn identity(&self) -> &Identity {
        &self.id
    }
}

impl PartialEq for StateKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StateKey {}

impl Hash for StateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Explicit transition table.
///
/// Only pairs added through [`add_transition`](TransitionTable::add_transition)
/// are present; adding an existing `(source, event)` pair replaces its target.
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    rows: KeyedMap<StateKey, KeyedMap<Event, StateKey>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `source --event--> target`, returning the target it replaced.
    pub fn add_transition(
        &mut self,
        source: StateKey,
        event: Event,
        target: StateKey,
    ) -> Option<StateKey> {
        self.rows
            .item_or_insert_with(source, KeyedMap::new)
            .add(event, target)
    }

    /// Target for `(source, event)`, if one was added.
    pub fn lookup<Q: Identified + ?Sized>(&self, source: &Q, event: &Event) -> Option<&StateKey> {
        self.rows.item(source).and_then(|row| row.item(event))
    }

    /// All outgoing transitions of `source`.
    pub fn row<Q: Identified + ?Sized>(&self, source: &Q) -> Option<&KeyedMap<Event, StateKey>> {
        self.rows.item(source)
    }

    /// Events `source` reacts to.
    pub fn events_for<Q: Identified + ?Sized>(&self, source: &Q) -> Vec<&Event> {
        self.rows
            .item(source)
            .map(|row| row.keys().collect())
            .unwrap_or_default()
    }

    /// States with at least one outgoing transition.
    pub fn sources(&self) -> impl Iterator<Item = &StateKey> + '_ {
        self.rows.keys()
    }

    /// Every `(source, event, target)` triple.
    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &Event, &StateKey)> + '_ {
        self.rows.iter().flat_map(|(source, row)| {
            row.iter()
                .map(move |(event, target)| (source, event, target))
        })
    }

    /// Number of distinct `(source, event)` pairs.
    pub fn len(&self) -> usize {
        self.rows.values().map(KeyedMap::count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
