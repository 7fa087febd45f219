//! Per-path record of what each side of the mirror last reported.
//!
//! Every path known to either side is a [`Node`] holding at most one
//! [`Update`] for the local side and one for the remote side. Incoming
//! records are merged by [`UpdateTree::apply`], which creates missing
//! ancestors, ignores repeated facts, assigns ticks to records without a
//! modification time and drops subtrees that are no longer directories.

mod clock;
mod node;
pub mod path;
mod shared_tree;
mod update;
mod update_tree;

pub use clock::{ClockPolicy, GlobalClock, PerPathClock};
pub use node::Node;
pub use path::InvalidPathError;
pub use shared_tree::SharedTree;
pub use update::{Side, SideUpdate, Update, UpdateOptions};
pub use update_tree::{ApplyOutcome, UpdateTree};
