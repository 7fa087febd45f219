use std::collections::HashMap;

use super::path;
use super::update::{Side, Update};

/// One path in the tree, with the last record each side reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    path: String,
    children: HashMap<String, Node>,
    local: Option<Update>,
    remote: Option<Update>,
}

impl Node {
    pub(crate) fn root() -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            children: HashMap::new(),
            local: Some(Update::new("")),
            remote: Some(Update::new("")),
        }
    }

    /// A node with no record on either side yet.
    fn placeholder(parent_path: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path::join(parent_path, name),
            children: HashMap::new(),
            local: None,
            remote: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Path of the enclosing node, `None` for the root.
    pub fn parent_path(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        Some(
            self.path
                .strip_suffix(self.name.as_str())
                .and_then(|prefix| prefix.strip_suffix('/'))
                .unwrap_or(""),
        )
    }

    /// Children in no particular order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.children.values()
    }

    /// Children ordered by name.
    pub fn sorted_children(&self) -> Vec<&Node> {
        let mut children = self.children.values().collect::<Vec<_>>();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        children
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn local(&self) -> Option<&Update> {
        self.local.as_ref()
    }

    pub fn remote(&self) -> Option<&Update> {
        self.remote.as_ref()
    }

    pub fn record(&self, side: Side) -> Option<&Update> {
        match side {
            Side::Local => self.local(),
            Side::Remote => self.remote(),
        }
    }

    /// A node nobody has reported on and that only existed to hold
    /// descendants which are now gone. Logically absent.
    pub fn is_vestige(&self) -> bool {
        !self.is_root() && self.local.is_none() && self.remote.is_none() && !self.has_children()
    }

    /// True when only one side knows the path, or both know it differently.
    pub fn disagrees(&self) -> bool {
        match (&self.local, &self.remote) {
            (Some(local), Some(remote)) => !local.is_equivalent_ignoring_time(remote),
            (None, None) => false,
            _ => true,
        }
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Looks up the child called `name`, creating a placeholder for it when
    /// it does not exist yet. Read-only lookups go through [`child`](Self::child).
    pub(crate) fn child_named(&mut self, name: &str) -> &mut Node {
        let parent_path = &self.path;
        self.children
            .entry(name.to_string())
            .or_insert_with(|| Node::placeholder(parent_path, name))
    }

    pub(crate) fn set_record(&mut self, side: Side, update: Update) {
        match side {
            Side::Local => self.local = Some(update),
            Side::Remote => self.remote = Some(update),
        }
    }

    /// Drops the whole subtree and returns how many nodes went with it.
    pub(crate) fn clear_children(&mut self) -> usize {
        let removed = self.descendant_count();
        self.children.clear();
        removed
    }
}
