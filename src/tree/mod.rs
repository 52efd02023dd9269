//! Project tree materialization
//!
//! Converts the flat list of generated file records into a hierarchical
//! directory/file tree for display. Construction is total: any sequence of
//! records produces a tree, never an error.

pub mod builder;
pub mod node;

pub use builder::build_tree;
pub use node::{DirectoryNode, FileNode, ProjectNode};
