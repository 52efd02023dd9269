//! End-to-end build cycle against a scripted provider.

use async_trait::async_trait;
use futures::stream;
use genesis_engine::aggregate::FragmentStream;
use genesis_engine::error::{ApiError, GenerationError, StreamError};
use genesis_engine::provider::ModelProviderClient;
use genesis_engine::session::{full_context, BuildSession};
use genesis_engine::tree::ProjectNode;
use genesis_engine::types::{FileRecord, TaskKind};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Provider double that records the context it was handed and plays back
/// scripted fragments, echoing the task name when unscripted.
struct PlaybackClient {
    files: Vec<FileRecord>,
    scripted: BTreeMap<TaskKind, Vec<Result<String, String>>>,
    seen_contexts: Mutex<Vec<String>>,
}

impl PlaybackClient {
    fn new(files: Vec<FileRecord>) -> Self {
        Self {
            files,
            scripted: BTreeMap::new(),
            seen_contexts: Mutex::new(Vec::new()),
        }
    }

    fn script(mut self, task: TaskKind, parts: &[&str]) -> Self {
        self.scripted
            .insert(task, parts.iter().map(|p| Ok(p.to_string())).collect());
        self
    }

    fn script_failure(mut self, task: TaskKind) -> Self {
        self.scripted
            .insert(task, vec![Err("boom".to_string())]);
        self
    }
}

#[async_trait]
impl ModelProviderClient for PlaybackClient {
    async fn generate_project_files(
        &self,
        _prompt: &str,
        _framework: &str,
        _include_backend: bool,
    ) -> Result<Vec<FileRecord>, GenerationError> {
        Ok(self.files.clone())
    }

    fn generate_text_stream(&self, task: TaskKind, context: &str) -> FragmentStream {
        self.seen_contexts
            .lock()
            .unwrap()
            .push(context.to_string());
        let items: Vec<Result<String, StreamError>> = match self.scripted.get(&task) {
            Some(script) => script
                .clone()
                .into_iter()
                .map(|item| item.map_err(|message| StreamError::Interrupted { task, message }))
                .collect(),
            None => vec![Ok(format!("{} artifact", task))],
        };
        Box::pin(stream::iter(items))
    }
}

fn sample_files() -> Vec<FileRecord> {
    vec![
        FileRecord::new("src/components/Login.tsx", "export const Login = () => null;"),
        FileRecord::new("src/components/Mfa.tsx", "export const Mfa = () => null;"),
        FileRecord::new("src/api/auth.ts", "export async function login() {}"),
        FileRecord::new("package.json", "{\"name\":\"portal\"}"),
    ]
}

#[tokio::test]
async fn full_cycle_builds_tree_artifacts_and_cost() {
    let client = PlaybackClient::new(sample_files())
        .script(TaskKind::Tests, &["describe('login', ", "() => {});"])
        .script(TaskKind::Commit, &["feat: add auth portal"]);

    let mut session = BuildSession::new(
        "Build a secure authentication portal with JWT and MFA using React and Node.js.",
        "React",
        true,
    );
    let report = session.run_build_cycle(&client).await.unwrap();

    assert_eq!(report.file_count, 4);
    assert!((report.cost_estimate - (4.0 * 0.0042 + 0.12)).abs() < 1e-9);

    // All nine tasks received the same shared context built from the files.
    let contexts = client.seen_contexts.lock().unwrap();
    assert_eq!(contexts.len(), TaskKind::ALL.len());
    let expected_context = full_context(session.files());
    assert!(contexts.iter().all(|c| *c == expected_context));
    assert!(expected_context.starts_with("File: src/components/Login.tsx\n"));
    drop(contexts);

    assert_eq!(session.artifacts.unit_tests, "describe('login', () => {});");
    assert_eq!(session.artifacts.commit_message, "feat: add auth portal");
    assert_eq!(session.artifacts.api_spec, "API_SPEC artifact");
    assert!(session.artifacts.security.is_some());

    // Tree mirrors the directory structure in first-encounter order.
    let tree = session.project_tree();
    let top: Vec<&str> = tree.children().iter().map(|c| c.name()).collect();
    assert_eq!(top, vec!["src", "package.json"]);
    let src = tree.child("src").unwrap();
    let src_names: Vec<&str> = src.children().iter().map(|c| c.name()).collect();
    assert_eq!(src_names, vec!["components", "api"]);
}

#[tokio::test]
async fn duplicate_paths_keep_first_content_in_tree() {
    let client = PlaybackClient::new(vec![
        FileRecord::new("a/b.txt", "1"),
        FileRecord::new("a/b.txt", "2"),
    ]);

    let mut session = BuildSession::new("p", "React", false);
    session.run_build_cycle(&client).await.unwrap();

    match session.project_tree().child("a").unwrap().child("b.txt").unwrap() {
        ProjectNode::File(file) => assert_eq!(file.content, "1"),
        other => panic!("Expected file node, got {:?}", other),
    }
}

#[tokio::test]
async fn failed_task_surfaces_once_and_siblings_complete() {
    let client = PlaybackClient::new(sample_files())
        .script(TaskKind::Architecture, &["graph TD;"])
        .script_failure(TaskKind::Performance);

    let mut session = BuildSession::new("p", "React", false);
    let err = session.run_build_cycle(&client).await.unwrap_err();

    match err {
        ApiError::Stream(stream_err) => assert_eq!(stream_err.task(), TaskKind::Performance),
        other => panic!("Expected stream error, got {:?}", other),
    }

    // Sibling tasks were not cancelled; their results are fully visible.
    assert_eq!(session.artifacts.architecture, "graph TD;");
    assert_eq!(session.artifacts.unit_tests, "TESTS artifact");
    // The cycle never completed, so no cost estimate was produced.
    assert_eq!(session.cost_estimate, 0.0);
}

#[tokio::test]
async fn edits_flow_into_subsequent_tree_builds() {
    let client = PlaybackClient::new(sample_files());
    let mut session = BuildSession::new("p", "React", false);
    session.run_build_cycle(&client).await.unwrap();

    assert!(session.apply_edit("src/api/auth.ts", "// patched"));
    let tree = session.project_tree();
    match tree.child("src").unwrap().child("api").unwrap().child("auth.ts").unwrap() {
        ProjectNode::File(file) => assert_eq!(file.content, "// patched"),
        other => panic!("Expected file node, got {:?}", other),
    }
}
