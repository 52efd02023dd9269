//! Build session controller
//!
//! One explicit session struct owns all per-cycle state: the generated file
//! records, the supplementary artifact slots, the cost estimate, and the
//! simulated operation logs. Mutations are method calls on the session; the
//! project tree is memoized and rebuilt only when the record list changes.

use crate::aggregate::{self, FanOutOutcome, FragmentStream};
use crate::error::{ApiError, StreamError};
use crate::provider::ModelProviderClient;
use crate::security::{self, SecurityScanReport};
use crate::simulate::{self, DeploymentReport, VcsResult};
use crate::tree::{build_tree, ProjectNode};
use crate::types::{FileRecord, TaskKind};
use std::time::Instant;
use tracing::{info, warn};

const COST_PER_FILE: f64 = 0.0042;
const COST_BASE: f64 = 0.12;

/// Supplementary artifacts of one build cycle, one named slot per task.
///
/// Slots are initialized empty when a cycle's streaming phase starts and
/// frozen once the cycle's join completes or fails. A failed join leaves
/// whatever partial text was already accumulated.
#[derive(Debug, Clone, Default)]
pub struct SupplementalArtifacts {
    pub unit_tests: String,
    pub commit_message: String,
    pub code_review: String,
    pub architecture: String,
    pub api_spec: String,
    pub performance: String,
    pub cicd: String,
    pub db_schema: String,
    pub security: Option<SecurityScanReport>,
}

impl SupplementalArtifacts {
    /// Accumulated text for a task; `None` for the structured security task.
    pub fn text(&self, task: TaskKind) -> Option<&str> {
        match task {
            TaskKind::Tests => Some(&self.unit_tests),
            TaskKind::Commit => Some(&self.commit_message),
            TaskKind::CodeReview => Some(&self.code_review),
            TaskKind::Architecture => Some(&self.architecture),
            TaskKind::ApiSpec => Some(&self.api_spec),
            TaskKind::Performance => Some(&self.performance),
            TaskKind::CiCd => Some(&self.cicd),
            TaskKind::DbSchema => Some(&self.db_schema),
            TaskKind::Security => None,
        }
    }

    fn text_slot_mut(&mut self, task: TaskKind) -> Option<&mut String> {
        match task {
            TaskKind::Tests => Some(&mut self.unit_tests),
            TaskKind::Commit => Some(&mut self.commit_message),
            TaskKind::CodeReview => Some(&mut self.code_review),
            TaskKind::Architecture => Some(&mut self.architecture),
            TaskKind::ApiSpec => Some(&mut self.api_spec),
            TaskKind::Performance => Some(&mut self.performance),
            TaskKind::CiCd => Some(&mut self.cicd),
            TaskKind::DbSchema => Some(&mut self.db_schema),
            TaskKind::Security => None,
        }
    }
}

/// Summary of a completed build cycle.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub file_count: usize,
    pub cost_estimate: f64,
    pub duration_ms: u64,
}

/// Session state for one user's build workflow.
pub struct BuildSession {
    pub prompt: String,
    pub framework: String,
    pub include_backend: bool,
    pub artifacts: SupplementalArtifacts,
    pub cost_estimate: f64,
    /// Newest-first simulated deployment log.
    pub deploy_log: Vec<DeploymentReport>,
    /// Newest-first simulated version-control log.
    pub vcs_log: Vec<VcsResult>,
    generated_files: Vec<FileRecord>,
    tree_cache: Option<ProjectNode>,
}

impl BuildSession {
    pub fn new(prompt: impl Into<String>, framework: impl Into<String>, include_backend: bool) -> Self {
        Self {
            prompt: prompt.into(),
            framework: framework.into(),
            include_backend,
            artifacts: SupplementalArtifacts::default(),
            cost_estimate: 0.0,
            deploy_log: Vec::new(),
            vcs_log: Vec::new(),
            generated_files: Vec::new(),
            tree_cache: None,
        }
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.generated_files
    }

    /// Run one full build cycle against the provider.
    ///
    /// The core generation call runs first; its failure aborts the cycle
    /// with no mutation of the artifact slots. On success all supplementary
    /// task streams start concurrently and are joined; the first stream
    /// failure is surfaced once, with partial accumulation left visible.
    /// The cost estimate is set only on a fully successful cycle.
    pub async fn run_build_cycle(
        &mut self,
        client: &dyn ModelProviderClient,
    ) -> Result<BuildReport, ApiError> {
        let start = Instant::now();
        self.cost_estimate = 0.0;
        info!(framework = %self.framework, backend = self.include_backend, "Initiating build cycle");

        let files = client
            .generate_project_files(&self.prompt, &self.framework, self.include_backend)
            .await?;
        info!(files = files.len(), "Core generation complete; orchestrating supplementary tasks");

        self.generated_files = files;
        self.tree_cache = None;
        self.artifacts = SupplementalArtifacts::default();

        let context = full_context(&self.generated_files);
        let mut streams = Vec::with_capacity(TaskKind::TEXT_TASKS.len());
        for task in TaskKind::TEXT_TASKS {
            streams.push((task, client.generate_text_stream(task, &context)));
        }
        let security_stream = client.generate_text_stream(TaskKind::Security, &context);

        let (outcome, security_result) = tokio::join!(
            aggregate::join_fragment_streams(streams),
            run_security_task(security_stream),
        );

        let FanOutOutcome {
            accumulated,
            failure,
        } = outcome;
        for (task, text) in accumulated {
            if let Some(slot) = self.artifacts.text_slot_mut(task) {
                *slot = text;
            }
        }

        let security_failure = match security_result {
            Ok(report) => {
                self.artifacts.security = Some(report);
                None
            }
            Err(err) => Some(err),
        };

        if let Some(err) = failure.or(security_failure) {
            warn!(task = %err.task(), error = %err, "Build cycle failed during supplementary streaming");
            return Err(err.into());
        }

        self.cost_estimate = self.generated_files.len() as f64 * COST_PER_FILE + COST_BASE;
        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            cost = self.cost_estimate,
            duration_ms, "Ecosystem construction complete"
        );
        Ok(BuildReport {
            file_count: self.generated_files.len(),
            cost_estimate: self.cost_estimate,
            duration_ms,
        })
    }

    /// Replace a record's content by path equality.
    ///
    /// Returns false when no record matches. Invalidates the memoized tree.
    pub fn apply_edit(&mut self, path: &str, content: impl Into<String>) -> bool {
        match self.generated_files.iter_mut().find(|f| f.path == path) {
            Some(record) => {
                record.content = content.into();
                self.tree_cache = None;
                true
            }
            None => false,
        }
    }

    /// Project tree over the current record list, rebuilt only after the
    /// record list has changed.
    pub fn project_tree(&mut self) -> &ProjectNode {
        let files = &self.generated_files;
        self.tree_cache.get_or_insert_with(|| build_tree(files))
    }

    /// Simulated cloud deployment; prepends the report to the deploy log.
    pub async fn deploy(&mut self, provider: &str) -> &DeploymentReport {
        info!(provider, "Provisioning resources");
        let report = simulate::deploy_to_cloud(provider).await;
        self.deploy_log.insert(0, report);
        &self.deploy_log[0]
    }

    /// Simulated version-control push; prepends the result to the VCS log.
    pub async fn commit(&mut self, provider: &str) -> &VcsResult {
        info!(provider, "Pushing to version control");
        let result = simulate::push_to_vcs(provider).await;
        self.vcs_log.insert(0, result);
        &self.vcs_log[0]
    }
}

/// Shared context string handed to every supplementary task.
pub fn full_context(files: &[FileRecord]) -> String {
    files
        .iter()
        .map(|f| format!("File: {}\n{}", f.path, f.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The security task drains its full stream before emitting one structured
/// report, decoupled from the drained text.
async fn run_security_task(stream: FragmentStream) -> Result<SecurityScanReport, StreamError> {
    let _raw = aggregate::drain_stream(stream).await?;
    Ok(security::build_report())
}
