use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::GenerationProvider;
use super::error::ProviderError;

pub const DEFAULT_CLOUD_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_CLOUD_MODEL: &str = "gpt-4";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat completion endpoint.
///
/// The prompt is sent as a single user turn and the first choice is returned.
#[derive(Debug, Clone)]
pub struct CloudProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl CloudProvider {
    pub fn new(endpoint: String, model: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            model,
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl GenerationProvider for CloudProvider {
    fn name(&self) -> &'static str {
        "cloud"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "sending chat completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                url: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(ProviderError::Stream)?;

        if !status.is_success() {
            return Err(ProviderError::Status { status, body });
        }

        extract_content(&body)
    }
}

fn extract_content(body: &str) -> Result<String, ProviderError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| ProviderError::MalformedResponse("response has no message content".into()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = ChatCompletionRequest {
            model: "gpt-4",
            messages: [Message {
                role: "user",
                content: "Write a story",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-4",
                "messages": [{"role": "user", "content": "Write a story"}]
            })
        );
    }

    #[test]
    fn test_extract_content_first_choice_trimmed() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  Había una vez...\n"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(extract_content(body).unwrap(), "Había una vez...");
    }

    #[test]
    fn test_extract_content_no_choices() {
        let err = extract_content(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[test]
    fn test_extract_content_null_content() {
        let err = extract_content(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[test]
    fn test_extract_content_invalid_json() {
        assert!(extract_content("<html>Bad Gateway</html>").is_err());
    }
}
