//! Model provider integration
//!
//! The engine consumes one external generation collaborator through the
//! `ModelProviderClient` seam: a non-streaming core call that produces the
//! project's file records, and one lazy fragment stream per supplementary
//! task. Stream-open failures surface as the stream's first item so that
//! they participate in the cycle's join like any mid-sequence failure.

pub mod gemini;
pub mod profile;
pub mod prompt;
pub mod resolver;

pub use gemini::GeminiClient;
pub use profile::{ProviderConfig, ProviderType};
pub use resolver::{ProfileClientResolver, ProviderClientResolver};

use crate::aggregate::FragmentStream;
use crate::error::GenerationError;
use crate::types::{FileRecord, TaskKind};
use async_trait::async_trait;

/// Client seam for the external generation collaborator.
#[async_trait]
pub trait ModelProviderClient: Send + Sync {
    /// Core, non-streaming generation of the primary file set. Any failure
    /// here is fatal to the whole build cycle; streaming tasks are only
    /// started after this call succeeds.
    async fn generate_project_files(
        &self,
        prompt: &str,
        framework: &str,
        include_backend: bool,
    ) -> Result<Vec<FileRecord>, GenerationError>;

    /// Open one supplementary task's fragment stream. Never restartable;
    /// opening errors are delivered as the first stream item.
    fn generate_text_stream(&self, task: TaskKind, context: &str) -> FragmentStream;
}
