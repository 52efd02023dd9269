//! Prompt templates owned by the provider domain.

use crate::types::TaskKind;

/// System instruction for the core project-file generation call.
///
/// The provider is asked for a strict JSON array of `{filePath, content}`
/// objects; the response schema enforces the same shape server-side.
pub fn core_system_instruction(framework: &str, include_backend: bool) -> String {
    format!(
        "You are a world-class senior full-stack engineer.\n\
         Your goal is to generate a comprehensive project structure based on the user's prompt.\n\
         Output MUST be a JSON array of objects with {{ \"filePath\": string, \"content\": string }}.\n\
         Include core logic, styles, components, and if requested, backend cloud functions.\n\
         Framework: {}\n\
         Backend Included: {}",
        framework, include_backend
    )
}

/// Instruction for one supplementary task, parameterized by the shared
/// context string built from the generated files.
pub fn task_prompt(task: TaskKind, context: &str) -> String {
    let instruction = match task {
        TaskKind::Tests => "Generate comprehensive unit tests for this code:",
        TaskKind::Commit => "Generate a professional Git commit message based on these changes:",
        TaskKind::CodeReview => {
            "Perform a deep code review focusing on security, performance, and best practices for this codebase:"
        }
        TaskKind::Architecture => {
            "Describe a high-level architecture diagram in Mermaid.js syntax for this feature:"
        }
        TaskKind::ApiSpec => {
            "Generate an OpenAPI YAML specification for the API defined in this context:"
        }
        TaskKind::Performance => {
            "Analyze the performance of this code and provide a report with optimizations:"
        }
        TaskKind::CiCd => "Generate a GitHub Actions workflow YAML for this project type:",
        TaskKind::DbSchema => {
            "Generate a SQL DDL schema and documentation for the database requirements implied here:"
        }
        TaskKind::Security => {
            "Identify potential security vulnerabilities (SQLi, XSS, CSRF, etc.) and suggest remediations for:"
        }
    };
    format!("{}\n{}", instruction, context)
}
