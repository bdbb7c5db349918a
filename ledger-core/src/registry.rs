//! Participant name → identifier registry
//!
//! Names are assigned dense ids in first-seen order. Nothing is ever
//! removed or renamed, so an id stays valid for the lifetime of the
//! registry and `0..len()` is always the full id space.

use crate::types::ParticipantId;
use std::collections::HashMap;

/// Append-only mapping between participant names and ids
#[derive(Debug, Clone, Default)]
pub struct IdentityRegistry {
    /// Names in id order
    names: Vec<String>,

    /// Reverse index
    ids: HashMap<String, ParticipantId>,
}

impl IdentityRegistry {
    /// Create empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `name`, assigning the next free id on first sight
    pub fn resolve(&mut self, name: &str) -> ParticipantId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }

        let id = ParticipantId::new(self.names.len());
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        tracing::debug!(participant = name, %id, "Registered participant");
        id
    }

    /// Id for `name` without registering it
    pub fn lookup(&self, name: &str) -> Option<ParticipantId> {
        self.ids.get(name).copied()
    }

    /// Name behind an id
    pub fn name(&self, id: ParticipantId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    /// Number of distinct participants
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True before any name was resolved
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `(id, name)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (ParticipantId::new(i), n.as_str()))
    }
}
