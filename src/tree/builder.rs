//! Flat path list to project tree construction.

use crate::tree::node::{DirectoryNode, FileNode, ProjectNode};
use crate::types::FileRecord;

/// Build a project tree from a flat list of file records.
///
/// Each record's path is split on `/`; interior segments become directory
/// nodes, the terminal segment becomes a file node carrying the record's
/// content. Children keep first-encounter order.
///
/// Behavioral quirks preserved from the consuming UI's contract:
/// - Duplicate paths: the first record wins; a later record with the same
///   path does not overwrite the existing file node's content.
/// - A path whose prefix was already materialized as a file node stops
///   descending there; the remaining segments are dropped.
/// - Empty segments (`a//b`) produce directory nodes with empty names.
pub fn build_tree(records: &[FileRecord]) -> ProjectNode {
    let mut root = DirectoryNode {
        id: "root".to_string(),
        name: "Project".to_string(),
        path: String::new(),
        children: Vec::new(),
    };
    for record in records {
        insert_record(&mut root, record);
    }
    ProjectNode::Directory(root)
}

fn insert_record(root: &mut DirectoryNode, record: &FileRecord) {
    let segments: Vec<&str> = record.path.split('/').collect();
    let mut current = root;

    for (i, segment) in segments.iter().enumerate() {
        let is_terminal = i == segments.len() - 1;
        let position = current
            .children
            .iter()
            .position(|child| child.name() == *segment);

        let index = match position {
            Some(index) => index,
            None => {
                let path = segments[..=i].join("/");
                let node = if is_terminal {
                    ProjectNode::File(FileNode {
                        id: path.clone(),
                        name: (*segment).to_string(),
                        path,
                        content: record.content.clone(),
                    })
                } else {
                    ProjectNode::Directory(DirectoryNode {
                        id: path.clone(),
                        name: (*segment).to_string(),
                        path,
                        children: Vec::new(),
                    })
                };
                current.children.push(node);
                current.children.len() - 1
            }
        };

        current = match &mut current.children[index] {
            ProjectNode::Directory(dir) => dir,
            // First encounter fixed this path as a file; nothing to descend
            // into, so the rest of the record's segments are dropped.
            ProjectNode::File(_) => break,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn descend<'a>(root: &'a ProjectNode, path: &str) -> Option<&'a ProjectNode> {
        let mut current = root;
        for segment in path.split('/') {
            current = current.child(segment)?;
        }
        Some(current)
    }

    #[test]
    fn empty_input_yields_childless_root() {
        let tree = build_tree(&[]);
        assert_eq!(tree.path(), "");
        assert!(tree.children().is_empty());
    }

    #[test]
    fn single_record_materializes_full_chain() {
        let tree = build_tree(&[FileRecord::new("a/b/c.txt", "x")]);

        let a = tree.child("a").expect("directory a");
        assert!(!a.is_file());
        assert_eq!(a.children().len(), 1);

        let b = a.child("b").expect("directory b");
        assert!(!b.is_file());
        assert_eq!(b.children().len(), 1);

        match b.child("c.txt").expect("file c.txt") {
            ProjectNode::File(file) => {
                assert_eq!(file.content, "x");
                assert_eq!(file.path, "a/b/c.txt");
                assert_eq!(file.id, "a/b/c.txt");
            }
            other => panic!("Expected file node, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_path_first_write_wins() {
        let tree = build_tree(&[
            FileRecord::new("a/b.txt", "1"),
            FileRecord::new("a/b.txt", "2"),
        ]);

        let a = tree.child("a").unwrap();
        assert_eq!(a.children().len(), 1);
        match a.child("b.txt").unwrap() {
            ProjectNode::File(file) => assert_eq!(file.content, "1"),
            other => panic!("Expected file node, got {:?}", other),
        }
    }

    #[test]
    fn children_keep_first_encounter_order() {
        let tree = build_tree(&[
            FileRecord::new("src/main.rs", "m"),
            FileRecord::new("README.md", "r"),
            FileRecord::new("src/lib.rs", "l"),
        ]);

        let names: Vec<&str> = tree.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["src", "README.md"]);

        let src_names: Vec<&str> = tree.child("src").unwrap().children().iter().map(|c| c.name()).collect();
        assert_eq!(src_names, vec!["main.rs", "lib.rs"]);
    }

    #[test]
    fn shared_prefix_creates_one_directory() {
        let tree = build_tree(&[
            FileRecord::new("src/a.rs", "a"),
            FileRecord::new("src/b.rs", "b"),
        ]);

        assert_eq!(tree.children().len(), 1);
        assert_eq!(tree.child("src").unwrap().children().len(), 2);
    }

    #[test]
    fn empty_segment_passes_through_as_unnamed_directory() {
        let tree = build_tree(&[FileRecord::new("a//b", "x")]);

        let a = tree.child("a").unwrap();
        let unnamed = a.child("").expect("empty-name directory");
        assert!(!unnamed.is_file());
        assert!(unnamed.child("b").unwrap().is_file());
    }

    #[test]
    fn file_prefix_fixes_type_by_first_encounter() {
        // "a" is first seen as a terminal segment (file); the later record
        // cannot descend into it and its tail is dropped.
        let tree = build_tree(&[FileRecord::new("a", "file"), FileRecord::new("a/b.txt", "x")]);

        let a = tree.child("a").unwrap();
        assert!(a.is_file());
        assert_eq!(tree.children().len(), 1);
    }

    #[test]
    fn directory_prefix_fixes_type_by_first_encounter() {
        // "a" is first seen as an interior segment (directory); the later
        // record naming it as a file finds the directory and writes nothing.
        let tree = build_tree(&[FileRecord::new("a/b.txt", "x"), FileRecord::new("a", "file")]);

        let a = tree.child("a").unwrap();
        assert!(!a.is_file());
        assert_eq!(a.children().len(), 1);
    }

    fn record_strategy() -> impl Strategy<Value = Vec<FileRecord>> {
        let segment = prop::sample::select(vec!["src", "lib", "app", "a.rs", "b.ts", "c.txt"]);
        let path = prop::collection::vec(segment, 1..4).prop_map(|segments| segments.join("/"));
        prop::collection::vec((path, "[a-z]{0,8}"), 0..16).prop_map(|entries| {
            entries
                .into_iter()
                .map(|(path, content)| FileRecord::new(path, content))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn every_unique_path_record_is_reachable(records in record_strategy()) {
            let tree = build_tree(&records);

            // Restrict to records whose full path is fresh and whose prefixes
            // are never shadowed by an earlier terminal segment.
            let mut seen_paths = BTreeSet::new();
            let mut file_paths = BTreeSet::new();
            for record in &records {
                let segments: Vec<&str> = record.path.split('/').collect();
                let prefix_shadowed = (1..segments.len())
                    .any(|i| file_paths.contains(&segments[..i].join("/")));
                if seen_paths.insert(record.path.clone()) && !prefix_shadowed {
                    file_paths.insert(record.path.clone());
                    let node = descend(&tree, &record.path)
                        .unwrap_or_else(|| panic!("path {} not reachable", record.path));
                    if let ProjectNode::File(file) = node {
                        prop_assert_eq!(&file.content, &record.content);
                    }
                }
            }
        }

        #[test]
        fn names_are_unique_within_every_directory(records in record_strategy()) {
            fn check(node: &ProjectNode) {
                let mut names = BTreeSet::new();
                for child in node.children() {
                    assert!(names.insert(child.name().to_string()), "duplicate child name {}", child.name());
                    check(child);
                }
            }
            check(&build_tree(&records));
        }

        #[test]
        fn construction_is_total(records in record_strategy()) {
            // Any input sequence produces a rooted tree without panicking.
            let tree = build_tree(&records);
            prop_assert_eq!(tree.path(), "");
        }
    }
}
