//! Core types for the Genesis build orchestration engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single generated source file as delivered by the model provider.
///
/// The wire payload uses `filePath`; paths are slash-delimited with no
/// leading slash. Records are immutable once received except for in-place
/// content replacement by path equality (see `BuildSession::apply_edit`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(rename = "filePath")]
    pub path: String,
    pub content: String,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Supplementary generation task identifiers.
///
/// Each task drives one independent fragment stream during a build cycle.
/// `Security` is special-shaped: it drains to a buffer and produces a
/// structured report instead of accumulating into a text slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskKind {
    Tests,
    Commit,
    CodeReview,
    Architecture,
    ApiSpec,
    Performance,
    CiCd,
    DbSchema,
    Security,
}

impl TaskKind {
    /// Every supplementary task, in launch order.
    pub const ALL: [TaskKind; 9] = [
        TaskKind::Tests,
        TaskKind::Commit,
        TaskKind::CodeReview,
        TaskKind::Architecture,
        TaskKind::ApiSpec,
        TaskKind::Performance,
        TaskKind::CiCd,
        TaskKind::DbSchema,
        TaskKind::Security,
    ];

    /// Tasks whose fragments accumulate into a plain text slot.
    pub const TEXT_TASKS: [TaskKind; 8] = [
        TaskKind::Tests,
        TaskKind::Commit,
        TaskKind::CodeReview,
        TaskKind::Architecture,
        TaskKind::ApiSpec,
        TaskKind::Performance,
        TaskKind::CiCd,
        TaskKind::DbSchema,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Tests => "TESTS",
            TaskKind::Commit => "COMMIT",
            TaskKind::CodeReview => "CODE_REVIEW",
            TaskKind::Architecture => "ARCHITECTURE",
            TaskKind::ApiSpec => "API_SPEC",
            TaskKind::Performance => "PERFORMANCE",
            TaskKind::CiCd => "CI_CD",
            TaskKind::DbSchema => "DB_SCHEMA",
            TaskKind::Security => "SECURITY",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_record_wire_format_uses_file_path() {
        let record: FileRecord =
            serde_json::from_str(r#"{"filePath":"src/app.ts","content":"export {}"}"#).unwrap();
        assert_eq!(record.path, "src/app.ts");
        assert_eq!(record.content, "export {}");
    }

    #[test]
    fn text_tasks_exclude_security() {
        assert!(!TaskKind::TEXT_TASKS.contains(&TaskKind::Security));
        assert_eq!(TaskKind::ALL.len(), TaskKind::TEXT_TASKS.len() + 1);
    }

    #[test]
    fn task_kind_display_matches_wire_names() {
        assert_eq!(TaskKind::CodeReview.to_string(), "CODE_REVIEW");
        assert_eq!(TaskKind::CiCd.to_string(), "CI_CD");
    }
}
