//! Genesis Engine: Feature-Build Orchestration
//!
//! Turns a natural-language feature description into a generated multi-file
//! project plus supplementary artifacts (tests, code review, architecture
//! notes, API spec, performance notes, CI/CD config, database schema,
//! security report) by delegating to an external generative model provider.
//! Cloud deployment and version-control pushes are simulated.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod logging;
pub mod provider;
pub mod security;
pub mod session;
pub mod simulate;
pub mod tooling;
pub mod tree;
pub mod types;
