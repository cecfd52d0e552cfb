//! Text generation providers.
//!
//! Two interchangeable backends sit behind [`GenerationProvider`]: a cloud
//! chat completion API and a locally hosted generate endpoint. [`Provider`]
//! picks one from resolved settings.

mod cloud;
mod error;
mod local;
mod ndjson;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;

pub use cloud::{CloudProvider, DEFAULT_CLOUD_ENDPOINT, DEFAULT_CLOUD_MODEL};
pub use error::ProviderError;
pub use local::{DEFAULT_LOCAL_MODEL, DEFAULT_LOCAL_URL, LocalProvider};
pub use ndjson::ndjson_to_fragment_stream;

/// Something that turns a prompt into story text.
pub trait GenerationProvider {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

/// Which backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-compatible chat completion API.
    Cloud,
    /// Locally hosted model (Ollama `/api/generate`).
    #[default]
    Local,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cloud => f.write_str("cloud"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// Fully resolved connection settings for one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSettings {
    Cloud {
        endpoint: String,
        model: String,
        api_key: String,
    },
    Local {
        url: String,
        model: String,
    },
}

impl ProviderSettings {
    pub const fn kind(&self) -> ProviderKind {
        match self {
            Self::Cloud { .. } => ProviderKind::Cloud,
            Self::Local { .. } => ProviderKind::Local,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Self::Cloud { model, .. } | Self::Local { model, .. } => model,
        }
    }

    /// Where requests go: the chat endpoint or the local URL.
    pub fn address(&self) -> &str {
        match self {
            Self::Cloud { endpoint, .. } => endpoint,
            Self::Local { url, .. } => url,
        }
    }
}

/// The configured backend.
#[derive(Debug, Clone)]
pub enum Provider {
    Cloud(CloudProvider),
    Local(LocalProvider),
}

impl Provider {
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        match settings {
            ProviderSettings::Cloud {
                endpoint,
                model,
                api_key,
            } => Self::Cloud(CloudProvider::new(
                endpoint.clone(),
                model.clone(),
                api_key.clone(),
            )),
            ProviderSettings::Local { url, model } => {
                Self::Local(LocalProvider::new(url.clone(), model.clone()))
            }
        }
    }
}

impl GenerationProvider for Provider {
    fn name(&self) -> &'static str {
        match self {
            Self::Cloud(p) => p.name(),
            Self::Local(p) => p.name(),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        match self {
            Self::Cloud(p) => p.generate(prompt).await,
            Self::Local(p) => p.generate(prompt).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_cloud_settings() {
        let settings = ProviderSettings::Cloud {
            endpoint: DEFAULT_CLOUD_ENDPOINT.to_string(),
            model: "gpt-4o".to_string(),
            api_key: "sk-test".to_string(),
        };
        let provider = Provider::from_settings(&settings);

        assert_eq!(provider.name(), "cloud");
        let Provider::Cloud(cloud) = provider else {
            panic!("expected cloud provider");
        };
        assert_eq!(cloud.model(), "gpt-4o");
        assert_eq!(cloud.endpoint(), DEFAULT_CLOUD_ENDPOINT);
    }

    #[test]
    fn test_provider_from_local_settings() {
        let settings = ProviderSettings::Local {
            url: "http://gpu-box:11434/api/generate".to_string(),
            model: "mistral".to_string(),
        };
        let provider = Provider::from_settings(&settings);

        assert_eq!(provider.name(), "local");
        assert_eq!(settings.kind(), ProviderKind::Local);
        assert_eq!(settings.address(), "http://gpu-box:11434/api/generate");
        assert_eq!(settings.model(), "mistral");
    }

    #[test]
    fn test_provider_kind_default_is_local() {
        assert_eq!(ProviderKind::default(), ProviderKind::Local);
        assert_eq!(ProviderKind::Cloud.to_string(), "cloud");
    }
}
