//! Deferred store mutations
//!
//! The simulation pass walks live nodes while reading the store. Any store
//! write it wants to make (settling a finished returning motion) would
//! mutate the collection being iterated, so writes are queued here instead
//! and applied by the frame loop after the pass completes. The queue is
//! drained exactly once per frame, before the next reconciliation.

use super::{ObjectId, ObjectPatch, ObjectStore};

/// One deferred mutation: a patch against a specific object
#[derive(Debug, Clone, PartialEq)]
pub struct StoreCommand {
    /// Target object
    pub id: ObjectId,
    /// Fields to apply
    pub patch: ObjectPatch,
}

/// FIFO queue of deferred store mutations
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: Vec<StoreCommand>,
}

impl CommandQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a patch for application after the current pass
    pub fn push(&mut self, id: ObjectId, patch: ObjectPatch) {
        self.pending.push(StoreCommand { id, patch });
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Apply all queued commands to the store in FIFO order
    ///
    /// Commands whose target id has since disappeared fall through the
    /// store's missing-id no-op. Returns the number of commands drained.
    pub fn drain_into(&mut self, store: &mut ObjectStore) -> usize {
        let drained = self.pending.len();
        for command in self.pending.drain(..) {
            store.update(command.id, &command.patch);
        }
        if drained > 0 {
            log::debug!("command queue: drained {drained} deferred mutation(s)");
        }
        drained
    }
}
