//! Ordered registry of turn-taking actors.

use scavenger_core::{ActorHandle, ActorId, ActorSnapshot};

/// Live actors of the current level in registration order.
///
/// Order is never reshuffled: removing an actor closes the gap while the
/// remaining actors keep their relative order.
#[derive(Clone, Debug, Default)]
pub struct ActorRegistry {
    handles: Vec<ActorHandle>,
}

impl ActorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an actor behind every previously registered one.
    pub fn register(&mut self, handle: ActorHandle) {
        self.handles.push(handle);
    }

    /// Forgets every registered actor.
    pub fn clear(&mut self) {
        self.handles.clear();
    }

    /// Captures a fixed copy of the registry for one enemy phase.
    #[must_use]
    pub fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot::from_handles(self.handles.clone())
    }

    /// Removes the actor, reporting whether it was registered.
    pub fn remove(&mut self, actor: ActorId) -> bool {
        let Some(position) = self.handles.iter().position(|handle| handle.id() == actor) else {
            return false;
        };
        let _ = self.handles.remove(position);
        true
    }

    /// Reports whether the actor is still registered.
    #[must_use]
    pub fn contains(&self, actor: ActorId) -> bool {
        self.handles.iter().any(|handle| handle.id() == actor)
    }

    /// Number of registered actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Reports whether no actors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
