//! Property tests for the merge rules of the update tree.
//!
//! Paths are drawn from a tiny alphabet so that random sequences keep
//! revisiting, nesting under and replacing the same nodes.

use proptest::prelude::*;

use mirror_tree::tree::{ApplyOutcome, Node, Side, Update, UpdateOptions, UpdateTree};

#[derive(Debug, Clone)]
struct Op {
    side: Side,
    path: String,
    directory: bool,
    delete: bool,
    symlink: bool,
    explicit_time: bool,
}

impl Op {
    /// Explicit times grow with the position in the sequence, so that they
    /// never fall behind the ticks handed out before them.
    fn options(&self, position: usize) -> UpdateOptions {
        UpdateOptions {
            directory: self.directory,
            delete: self.delete,
            symlink: if self.symlink { "target".into() } else { String::new() },
            mod_time: if self.explicit_time {
                (position as u64 + 1) * 10
            } else {
                0
            },
        }
    }

    fn to_update(&self, position: usize) -> Update {
        Update::with_options(self.path.clone(), self.options(position))
    }
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Local), Just(Side::Remote)]
}

/// Mostly nested paths, with the root (`""`) mixed in now and then.
fn path_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        9 => prop::collection::vec(prop_oneof![Just("a"), Just("b"), Just("c")], 1..4)
            .prop_map(|segments| segments.join("/")),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    (
        side_strategy(),
        path_strategy(),
        any::<bool>(),
        prop::bool::weighted(0.2),
        prop::bool::weighted(0.1),
        any::<bool>(),
    )
        .prop_map(|(side, path, directory, delete, symlink, explicit_time)| Op {
            side,
            path,
            directory,
            delete,
            symlink,
            explicit_time,
        })
}

fn stored(tree: &UpdateTree, side: Side, path: &str) -> Option<Update> {
    tree.node(path)
        .unwrap()
        .and_then(|node| node.record(side))
        .cloned()
}

fn assert_paths_reconstruct(node: &Node) -> Result<(), TestCaseError> {
    for child in node.children() {
        let expected = if node.is_root() {
            child.name().to_string()
        } else {
            format!("{}/{}", node.path(), child.name())
        };
        prop_assert_eq!(child.path(), expected.as_str());
        prop_assert_eq!(node.child(child.name()).map(Node::path), Some(child.path()));
        prop_assert_eq!(child.parent_path(), Some(node.path()));
        assert_paths_reconstruct(child)?;
    }
    Ok(())
}

proptest! {
    #[test]
    fn reapplying_an_equivalent_record_changes_nothing(
        ops in prop::collection::vec(op_strategy(), 1..40),
        later_time in 0u64..1000,
    ) {
        let mut tree = UpdateTree::new_root();
        for (position, op) in ops.iter().enumerate() {
            tree.apply(op.side, op.to_update(position)).unwrap();
        }

        let last = ops.last().unwrap();
        let before = stored(&tree, last.side, &last.path);
        let repeat = Update::with_options(
            last.path.clone(),
            UpdateOptions {
                mod_time: later_time,
                ..last.options(0)
            },
        );
        let outcome = tree.apply(last.side, repeat).unwrap();

        prop_assert_eq!(outcome, ApplyOutcome::Unchanged);
        prop_assert_eq!(stored(&tree, last.side, &last.path), before);
    }

    #[test]
    fn mod_times_never_go_backwards(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut tree = UpdateTree::new_root();
        for (position, op) in ops.iter().enumerate() {
            let before = stored(&tree, op.side, &op.path).map(|update| update.mod_time());
            tree.apply(op.side, op.to_update(position)).unwrap();
            let after = stored(&tree, op.side, &op.path).map(|update| update.mod_time());
            if let (Some(before), Some(after)) = (before, after) {
                prop_assert!(after >= before, "{} went from {} to {}", op.path, before, after);
            }
        }
    }

    #[test]
    fn applied_files_and_deletions_have_no_children(
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut tree = UpdateTree::new_root();
        for (position, op) in ops.iter().enumerate() {
            tree.apply(op.side, op.to_update(position)).unwrap();
            let target = tree.node(&op.path).unwrap().unwrap();
            let record = target.record(op.side).unwrap();
            // the root stands for the mirrored directory whatever it reports
            if !target.is_root() && !record.allows_children() {
                prop_assert!(!target.has_children(), "{} kept children", op.path);
            }
        }
    }

    #[test]
    fn every_node_path_is_its_ancestors_joined(
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut tree = UpdateTree::new_root();
        for (position, op) in ops.iter().enumerate() {
            tree.apply(op.side, op.to_update(position)).unwrap();
        }
        assert_paths_reconstruct(tree.root())?;
    }

    #[test]
    fn records_replay_into_an_equal_tree(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut tree = UpdateTree::new_root();
        for (position, op) in ops.iter().enumerate() {
            tree.apply(op.side, op.to_update(position)).unwrap();
        }

        let mut replayed = UpdateTree::new_root();
        for record in tree.records() {
            replayed.apply(record.side, record.update).unwrap();
        }

        prop_assert_eq!(replayed.records(), tree.records());
        prop_assert_eq!(replayed.root(), tree.root());
    }

    #[test]
    fn root_updates_never_create_children(
        mod_time in 0u64..100,
        directory in any::<bool>(),
        side in side_strategy(),
    ) {
        let mut tree = UpdateTree::new_root();
        let update = Update::with_options(
            "",
            UpdateOptions { directory, mod_time, ..Default::default() },
        );
        let outcome = tree.apply(side, update).unwrap();

        // the root starts at 0, so a missing time ticks it to 1
        let expected = if mod_time == 0 { 1 } else { mod_time };
        prop_assert_eq!(outcome, ApplyOutcome::Stored { mod_time: expected, purged: 0 });
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.root().record(side).unwrap().mod_time(), expected);

        let again = Update::with_options(
            "",
            UpdateOptions { directory, mod_time, ..Default::default() },
        );
        prop_assert_eq!(tree.apply(side, again).unwrap(), ApplyOutcome::Unchanged);
        prop_assert_eq!(tree.root().record(side).unwrap().mod_time(), expected);
    }

    #[test]
    fn paths_with_a_separator_at_either_end_are_rejected(
        path in path_strategy(),
        leading in any::<bool>(),
    ) {
        let invalid = if leading { format!("/{path}") } else { format!("{path}/") };
        let mut tree = UpdateTree::new_root();
        prop_assert!(tree.add_local(Update::new(invalid)).is_err());
        prop_assert!(tree.is_empty());
    }
}
