//! CLI Tooling
//!
//! Command-line interface over the build session. `build` runs one full
//! generation cycle and optionally writes the generated files to disk;
//! `deploy` and `commit` run the simulated operations.

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::provider::{ProfileClientResolver, ProviderClientResolver};
use crate::session::BuildSession;
use crate::simulate::{self, CLOUD_PROVIDERS, VCS_PROVIDERS};
use crate::tree::ProjectNode;
use crate::types::TaskKind;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use serde_json::json;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Genesis CLI - feature-build orchestration over generative model providers
#[derive(Parser)]
#[command(name = "genesis")]
#[command(about = "Generate a multi-file project plus supplementary artifacts from a prompt")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one build cycle: core generation plus all supplementary tasks
    Build {
        /// Feature description in natural language
        prompt: String,

        /// Framework hint passed to the provider
        #[arg(long, default_value = "React")]
        framework: String,

        /// Ask the provider for backend cloud functions too
        #[arg(long)]
        backend: bool,

        /// Directory to write the generated files into
        #[arg(long)]
        out: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Simulate a cloud deployment
    Deploy {
        #[arg(long, default_value = "AWS")]
        provider: String,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Simulate a version-control push
    Commit {
        #[arg(long, default_value = "GitHub")]
        provider: String,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List supported cloud and version-control providers
    Providers,
}

pub struct CliContext {
    config: AppConfig,
}

impl CliContext {
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = AppConfig::load(config_path.as_deref())?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub async fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Build {
                prompt,
                framework,
                backend,
                out,
                format,
            } => {
                self.execute_build(prompt, framework, *backend, out.as_deref(), format)
                    .await
            }
            Commands::Deploy { provider, format } => {
                let report = simulate::deploy_to_cloud(provider).await;
                if format == "json" {
                    Ok(serde_json::to_string_pretty(&report)
                        .map_err(|e| ApiError::ConfigError(e.to_string()))?)
                } else {
                    let mut text = String::new();
                    let _ = writeln!(text, "Deployment {} on {}", report.deployment_id, report.provider);
                    for line in &report.logs {
                        let _ = writeln!(text, "  > {}", line);
                    }
                    for endpoint in &report.endpoints {
                        let _ = writeln!(text, "  {}", endpoint.underline());
                    }
                    Ok(text)
                }
            }
            Commands::Commit { provider, format } => {
                let result = simulate::push_to_vcs(provider).await;
                if format == "json" {
                    Ok(serde_json::to_string_pretty(&result)
                        .map_err(|e| ApiError::ConfigError(e.to_string()))?)
                } else {
                    Ok(format!("{} {}: {}\n", result.provider, result.operation, result.message))
                }
            }
            Commands::Providers => {
                let mut text = String::new();
                let _ = writeln!(text, "{}", "Cloud".bold());
                for provider in CLOUD_PROVIDERS {
                    let _ = writeln!(text, "  {}", provider);
                }
                let _ = writeln!(text, "{}", "Version control".bold());
                for provider in VCS_PROVIDERS {
                    let _ = writeln!(text, "  {}", provider);
                }
                Ok(text)
            }
        }
    }

    async fn execute_build(
        &self,
        prompt: &str,
        framework: &str,
        backend: bool,
        out: Option<&std::path::Path>,
        format: &str,
    ) -> Result<String, ApiError> {
        if prompt.trim().is_empty() {
            return Err(ApiError::ConfigError("Prompt cannot be empty".to_string()));
        }

        let resolver = ProfileClientResolver::new(self.config.provider.clone());
        let client = resolver.create_provider_client()?;

        let mut session = BuildSession::new(prompt, framework, backend);
        let report = session.run_build_cycle(client.as_ref()).await?;

        if let Some(dir) = out {
            for record in session.files() {
                let path = dir.join(&record.path);
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, &record.content)?;
            }
        }

        if format == "json" {
            let artifacts: serde_json::Map<String, serde_json::Value> = TaskKind::TEXT_TASKS
                .iter()
                .map(|task| {
                    (
                        task.to_string(),
                        json!(session.artifacts.text(*task).unwrap_or_default()),
                    )
                })
                .collect();
            let value = json!({
                "file_count": report.file_count,
                "cost_estimate": report.cost_estimate,
                "duration_ms": report.duration_ms,
                "artifacts": artifacts,
                "security": session.artifacts.security,
            });
            serde_json::to_string_pretty(&value).map_err(|e| ApiError::ConfigError(e.to_string()))
        } else {
            let mut text = String::new();
            let _ = writeln!(
                text,
                "Generated {} files (est. cost ${:.4})",
                report.file_count, report.cost_estimate
            );
            render_tree(session.project_tree(), 0, &mut text);
            if let Some(security) = &session.artifacts.security {
                let _ = writeln!(text, "Safety score: {}/100", security.score);
            }
            Ok(text)
        }
    }
}

fn render_tree(node: &ProjectNode, depth: usize, text: &mut String) {
    let indent = "  ".repeat(depth);
    match node {
        ProjectNode::Directory(dir) => {
            let _ = writeln!(text, "{}{}/", indent, dir.name.blue().bold());
            for child in &dir.children {
                render_tree(child, depth + 1, text);
            }
        }
        ProjectNode::File(file) => {
            let _ = writeln!(text, "{}{}", indent, file.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn providers_lists_both_catalogs() {
        let context = CliContext::new(None).unwrap();
        let output = context.execute(&Commands::Providers).await.unwrap();
        assert!(output.contains("AWS"));
        assert!(output.contains("GitHub"));
    }

    #[tokio::test(start_paused = true)]
    async fn deploy_json_output_is_parseable() {
        let context = CliContext::new(None).unwrap();
        let output = context
            .execute(&Commands::Deploy {
                provider: "Vercel".to_string(),
                format: "json".to_string(),
            })
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["provider"], "Vercel");
        assert_eq!(parsed["status"], "SUCCESS");
    }

    #[tokio::test(start_paused = true)]
    async fn commit_text_output_names_provider() {
        let context = CliContext::new(None).unwrap();
        let output = context
            .execute(&Commands::Commit {
                provider: "GitLab".to_string(),
                format: "text".to_string(),
            })
            .await
            .unwrap();
        assert!(output.starts_with("GitLab push:"));
    }

    #[tokio::test]
    async fn empty_prompt_is_rejected_before_any_provider_call() {
        let context = CliContext::new(None).unwrap();
        let result = context
            .execute(&Commands::Build {
                prompt: "   ".to_string(),
                framework: "React".to_string(),
                backend: false,
                out: None,
                format: "text".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ApiError::ConfigError(_))));
    }
}
