use futures_util::StreamExt;
use reqwest::Client;
use serde::Serialize;

use super::GenerationProvider;
use super::error::ProviderError;
use super::ndjson::ndjson_to_fragment_stream;

pub const DEFAULT_LOCAL_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_LOCAL_MODEL: &str = "llama3";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Client for a locally hosted `/api/generate` endpoint (Ollama and compatibles).
#[derive(Debug, Clone)]
pub struct LocalProvider {
    client: Client,
    url: String,
    model: String,
}

impl LocalProvider {
    pub fn new(url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            url,
            model,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl GenerationProvider for LocalProvider {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
        };

        tracing::debug!(url = %self.url, model = %self.model, "sending generate request");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let mut fragments = std::pin::pin!(ndjson_to_fragment_stream(response.bytes_stream()));
        let mut story = String::new();
        let mut count = 0usize;

        while let Some(fragment) = fragments.next().await {
            story.push_str(&fragment?);
            count += 1;
        }

        tracing::debug!(fragments = count, "local generation finished");

        Ok(story.trim().to_string())
    }
}
