//! Simulated cloud and version-control operations
//!
//! No real provisioning or pushing happens. Each operation sleeps for a
//! fixed interval and returns a canned report, matching the behavior users
//! observe in the hosted front-end.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Supported cloud deployment targets.
pub const CLOUD_PROVIDERS: [&str; 13] = [
    "AWS",
    "Google Cloud",
    "Azure",
    "Vercel",
    "Netlify",
    "DigitalOcean",
    "Heroku",
    "Cloudflare Pages",
    "Render",
    "Fly.io",
    "Railway",
    "Firebase",
    "Supabase",
];

/// Supported version-control hosts.
pub const VCS_PROVIDERS: [&str; 6] = [
    "GitHub",
    "GitLab",
    "Bitbucket",
    "Azure DevOps Repos",
    "AWS CodeCommit",
    "Google Cloud Source Repositories",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeploymentStatus {
    Success,
    Failure,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentReport {
    pub deployment_id: String,
    pub provider: String,
    pub status: DeploymentStatus,
    pub timestamp: String,
    pub logs: Vec<String>,
    pub endpoints: Vec<String>,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VcsResult {
    pub provider: String,
    pub operation: String,
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

/// Simulate provisioning on the selected cloud. Fixed 2 s delay.
pub async fn deploy_to_cloud(provider: &str) -> DeploymentReport {
    tokio::time::sleep(Duration::from_millis(2000)).await;
    DeploymentReport {
        deployment_id: format!("GEN-{}", Utc::now().timestamp_millis()),
        provider: provider.to_string(),
        status: DeploymentStatus::Success,
        timestamp: Utc::now().to_rfc3339(),
        logs: vec![
            "CloudFormation initialized".to_string(),
            "Provisioning EC2 clusters".to_string(),
            "DB replicas active".to_string(),
        ],
        endpoints: vec![format!(
            "https://app.genesis.{}.com",
            provider.to_lowercase().replace(' ', "-")
        )],
        resources: vec!["VM-01".to_string(), "DB-MASTER".to_string()],
    }
}

/// Simulate a version-control push. Fixed 1.5 s delay.
pub async fn push_to_vcs(provider: &str) -> VcsResult {
    tokio::time::sleep(Duration::from_millis(1500)).await;
    VcsResult {
        provider: provider.to_string(),
        operation: "push".to_string(),
        success: true,
        message: "Committed 14 files to main branch.".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    }
}
