//! Link from an entity to its bodies in the physics world

use crate::physics::BodyHandle;

/// Marks an entity as simulated; holds the handles of its bodies
///
/// An entity may own more than one body, for example a solid body plus a
/// trigger around it. Bodies sharing an owner never collide with each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyComponent {
    handles: Vec<BodyHandle>,
}

impl BodyComponent {
    /// A component linking a single body
    pub fn new(handle: BodyHandle) -> Self {
        Self { handles: vec![handle] }
    }

    /// First body attached to the entity
    pub fn primary(&self) -> Option<BodyHandle> {
        self.handles.first().copied()
    }

    /// All attached bodies, in attachment order
    pub fn handles(&self) -> &[BodyHandle] {
        &self.handles
    }

    /// Link another body
    pub fn push(&mut self, handle: BodyHandle) {
        if !self.handles.contains(&handle) {
            self.handles.push(handle);
        }
    }

    /// Unlink a body; returns whether it was linked
    pub fn remove(&mut self, handle: BodyHandle) -> bool {
        let before = self.handles.len();
        self.handles.retain(|linked| *linked != handle);
        before != self.handles.len()
    }

    /// Whether no bodies remain linked
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
