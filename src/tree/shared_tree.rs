use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use super::clock::{ClockPolicy, PerPathClock};
use super::path::InvalidPathError;
use super::update::{Side, Update};
use super::update_tree::{ApplyOutcome, UpdateTree};

/// An [`UpdateTree`] shared between the local producer, the remote producer
/// and whoever walks the tree to reconcile the two sides.
///
/// A cascading purge restructures whole subtrees, so there is a single lock
/// for the entire tree. Each apply holds it exclusively for the whole call and
/// each [`read`](Self::read) holds it for the whole traversal, so readers
/// never see a half purged subtree.
#[derive(Debug)]
pub struct SharedTree<C = PerPathClock> {
    inner: Arc<RwLock<UpdateTree<C>>>,
}

impl<C> Clone for SharedTree<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedTree<PerPathClock> {
    pub fn new_root() -> Self {
        UpdateTree::new_root().into()
    }
}

impl Default for SharedTree<PerPathClock> {
    fn default() -> Self {
        Self::new_root()
    }
}

impl<C> From<UpdateTree<C>> for SharedTree<C> {
    fn from(tree: UpdateTree<C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }
}

impl<C: ClockPolicy> SharedTree<C> {
    pub fn add_local(&self, update: Update) -> Result<ApplyOutcome, InvalidPathError> {
        self.apply(Side::Local, update)
    }

    pub fn add_remote(&self, update: Update) -> Result<ApplyOutcome, InvalidPathError> {
        self.apply(Side::Remote, update)
    }

    pub fn apply(&self, side: Side, update: Update) -> Result<ApplyOutcome, InvalidPathError> {
        self.inner.write().apply(side, update)
    }

    /// Runs `f` with the tree locked against every writer.
    pub fn read<R>(&self, f: impl FnOnce(&UpdateTree<C>) -> R) -> R {
        trace!("Acquiring read access to the update tree");
        f(&self.inner.read())
    }

    /// Runs `f` with exclusive access, e.g. to apply a batch atomically.
    pub fn write<R>(&self, f: impl FnOnce(&mut UpdateTree<C>) -> R) -> R {
        trace!("Acquiring write access to the update tree");
        f(&mut self.inner.write())
    }
}
