//! Provider client resolution seam.

use crate::error::GenerationError;
use crate::provider::gemini::GeminiClient;
use crate::provider::profile::{ProviderConfig, ProviderType};
use crate::provider::ModelProviderClient;

pub trait ProviderClientResolver: Send + Sync {
    fn resolve_provider_config(&self) -> Result<ProviderConfig, GenerationError>;
    fn create_provider_client(&self) -> Result<Box<dyn ModelProviderClient>, GenerationError>;
}

/// Resolver backed by a single configured provider profile.
pub struct ProfileClientResolver {
    config: ProviderConfig,
}

impl ProfileClientResolver {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }
}

impl ProviderClientResolver for ProfileClientResolver {
    fn resolve_provider_config(&self) -> Result<ProviderConfig, GenerationError> {
        self.config
            .validate()
            .map_err(GenerationError::NotConfigured)?;
        Ok(self.config.clone())
    }

    fn create_provider_client(&self) -> Result<Box<dyn ModelProviderClient>, GenerationError> {
        let config = self.resolve_provider_config()?;
        match config.provider_type {
            // The local-custom type reuses the Gemini wire protocol against
            // a self-hosted endpoint.
            ProviderType::Gemini | ProviderType::LocalCustom => {
                Ok(Box::new(GeminiClient::new(&config)?))
            }
        }
    }
}
