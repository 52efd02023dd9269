//! Project node types

/// File node representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// Stable identifier, equal to the full slash-delimited path.
    pub id: String,
    /// Last path segment.
    pub name: String,
    pub path: String,
    pub content: String,
}

/// Directory node representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    pub id: String,
    pub name: String,
    pub path: String,
    /// Children in first-encounter order, names unique within a directory.
    pub children: Vec<ProjectNode>,
}

/// Project tree node type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectNode {
    File(FileNode),
    Directory(DirectoryNode),
}

impl ProjectNode {
    pub fn name(&self) -> &str {
        match self {
            ProjectNode::File(f) => &f.name,
            ProjectNode::Directory(d) => &d.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            ProjectNode::File(f) => &f.path,
            ProjectNode::Directory(d) => &d.path,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, ProjectNode::File(_))
    }

    /// Children of this node; empty slice for files.
    pub fn children(&self) -> &[ProjectNode] {
        match self {
            ProjectNode::File(_) => &[],
            ProjectNode::Directory(d) => &d.children,
        }
    }

    /// Descend one level by child name.
    pub fn child(&self, name: &str) -> Option<&ProjectNode> {
        self.children().iter().find(|c| c.name() == name)
    }
}
