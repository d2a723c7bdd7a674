//! Scene synchronization
//!
//! Bridges the authoritative object store to the retained render graph.
//! The store is declarative data; the graph holds stateful, allocated
//! resources. The synchronizer owns the mapping between the two and is the
//! only code that creates or releases graph resources.

mod live_node;
mod synchronizer;

pub use live_node::LiveNode;
pub use synchronizer::{SceneSynchronizer, SyncStats};
