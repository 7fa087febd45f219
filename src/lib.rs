//! In-memory reconciliation tree for mirroring a directory between a local
//! filesystem and a remote peer.
//!
//! The [`tree`] module is the core: it keeps, for every path, the last
//! record each side reported and merges new records as they arrive. The
//! other modules load and store records and drive the `mirror-tree` tool.

#![allow(clippy::enum_variant_names)]

pub mod application;
pub mod change_log;
pub mod cli;
pub mod codec;
mod ext;
pub mod render;
pub mod tree;
