use std::collections::HashSet;

use tracing::{debug, trace};

use super::clock::{ClockPolicy, PerPathClock};
use super::node::Node;
use super::path::{self, InvalidPathError};
use super::update::{Side, SideUpdate, Update};

/// What an [`UpdateTree::apply`] call did to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The side already held an equivalent record; nothing changed.
    Unchanged,
    /// The record was stored with the resolved modification time, and
    /// `purged` descendants were dropped along the way.
    Stored { mod_time: u64, purged: usize },
}

/// Everything both sides have reported, indexed by path.
///
/// The tree is only mutated through [`add_local`](Self::add_local),
/// [`add_remote`](Self::add_remote) and [`apply`](Self::apply). Subtrees
/// disappear only when their root becomes deleted or stops being a
/// directory.
#[derive(Debug, Clone)]
pub struct UpdateTree<C = PerPathClock> {
    root: Node,
    clock: C,
    /// Sides that have reported the root at least once. Until then the
    /// root only holds its default placeholder record for that side.
    root_reported: HashSet<Side>,
}

impl UpdateTree<PerPathClock> {
    pub fn new_root() -> Self {
        Self::with_clock(PerPathClock)
    }
}

impl Default for UpdateTree<PerPathClock> {
    fn default() -> Self {
        Self::new_root()
    }
}

impl<C: ClockPolicy> UpdateTree<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            root: Node::root(),
            clock,
            root_reported: HashSet::new(),
        }
    }

    pub fn add_local(&mut self, update: Update) -> Result<ApplyOutcome, InvalidPathError> {
        self.apply(Side::Local, update)
    }

    pub fn add_remote(&mut self, update: Update) -> Result<ApplyOutcome, InvalidPathError> {
        self.apply(Side::Remote, update)
    }

    /// Merges `update` into the record `side` holds for its path.
    ///
    /// Missing ancestors are materialized as placeholders. Re-applying a
    /// record equivalent to the stored one is a no-op and does not tick the
    /// clock. The first report of the root per side always replaces its
    /// default record. Once the new record is a file, a symlink or a
    /// deletion, every descendant of the path is dropped.
    pub fn apply(&mut self, side: Side, update: Update) -> Result<ApplyOutcome, InvalidPathError> {
        let segments = path::parse(update.path())?;

        let mut target = &mut self.root;
        for segment in segments {
            target = target.child_named(segment);
        }

        // the root's default record is a placeholder, so its first report per
        // side is always taken
        let first_root_report = target.is_root() && self.root_reported.insert(side);
        let current = target.record(side);
        if !first_root_report
            && current.is_some_and(|current| current.is_equivalent_ignoring_time(&update))
        {
            trace!("Ignoring unchanged {} record for '{}'", side, update.path());
            return Ok(ApplyOutcome::Unchanged);
        }

        let mod_time = self.clock.resolve(current, &update);
        let update = update.with_mod_time(mod_time);
        let keeps_children = update.allows_children();
        debug!(
            "Storing {} record for '{}' (directory: {}, delete: {}, mod_time: {})",
            side,
            update.path(),
            update.is_directory(),
            update.is_delete(),
            mod_time
        );
        target.set_record(side, update);

        // the root always stands for the mirrored directory itself
        let purged = if keeps_children || target.is_root() {
            0
        } else {
            target.clear_children()
        };
        if purged > 0 {
            debug!("Purged {} nodes below '{}'", purged, target.path());
        }

        Ok(ApplyOutcome::Stored { mod_time, purged })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Shorthand for the root's children.
    pub fn children(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.root.children()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Finds the node stored for `path`, if any.
    pub fn node(&self, path: &str) -> Result<Option<&Node>, InvalidPathError> {
        let mut current = &self.root;
        for segment in path::parse(path)? {
            match current.child(segment) {
                Some(child) => current = child,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Number of nodes below the root, placeholders and vestiges included.
    pub fn len(&self) -> usize {
        self.root.descendant_count()
    }

    pub fn is_empty(&self) -> bool {
        !self.root.has_children()
    }

    /// Walks every node depth first, parents before children and siblings
    /// in name order, starting with the root.
    pub fn visit<'a>(&'a self, mut visitor: impl FnMut(&'a Node)) {
        fn walk<'a>(node: &'a Node, visitor: &mut impl FnMut(&'a Node)) {
            visitor(node);
            for child in node.sorted_children() {
                walk(child, visitor);
            }
        }
        walk(&self.root, &mut visitor);
    }

    /// Every reported record in visit order, local before remote. The root's
    /// records come first, for the sides that reported it. Applying them to
    /// an empty tree reproduces this one.
    pub fn records(&self) -> Vec<SideUpdate> {
        let mut records = Vec::new();
        self.visit(|node| {
            for side in [Side::Local, Side::Remote] {
                if node.is_root() && !self.root_reported.contains(&side) {
                    continue;
                }
                if let Some(update) = node.record(side) {
                    records.push(SideUpdate::new(side, update.clone()));
                }
            }
        });
        records
    }
}
