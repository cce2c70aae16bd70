use crate::config::settings::AppSettings;
use crate::error::AppError;
use crate::models::{ApiCredential, GeneratedImage};
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::{debug, info, instrument};

// Sampling parameters for post generation
const TEXT_TEMPERATURE: f32 = 0.7;
const TEXT_MAX_TOKENS: u32 = 1000;

// OpenAI Chat Completion Request Structs
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OpenAIChatRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OpenAIMessage {
    pub role: String,
    pub content: String,
}

// OpenAI Chat Completion Response Structs
#[derive(Debug, Deserialize, Serialize)]
pub struct OpenAIChatResponse {
    pub id: Option<String>,
    pub choices: Vec<OpenAIChoice>,
    pub model: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Deserialize, Serialize)]
pub struct OpenAIChoice {
    pub message: OpenAIResponseMessage,
    pub index: Option<i32>,
    pub finish_reason: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Deserialize, Serialize)]
pub struct OpenAIResponseMessage {
    pub role: String,
    pub content: Option<String>,
}

// OpenAI Image Generation Structs
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OpenAIImageRequest {
    pub model: String,
    pub prompt: String,
    pub n: u8,
    pub size: String,
    pub quality: Option<String>,
    pub style: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OpenAIImageResponse {
    pub created: Option<i64>,
    pub data: Vec<OpenAIImageDatum>,
}

#[skip_serializing_none]
#[derive(Debug, Deserialize, Serialize)]
pub struct OpenAIImageDatum {
    pub url: Option<String>,
    pub b64_json: Option<String>,
    pub revised_prompt: Option<String>,
}

/// Client for an OpenAI-compatible API. It holds no credential: callers
/// pass theirs into each call and it is used for that request only.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    text_model: String,
    image_model: String,
    image_size: String,
}

impl OpenAiClient {
    pub fn new(app_settings: &AppSettings) -> Self {
        Self {
            client: crate::clients::http_client::new_api_client(),
            base_url: app_settings.openai.base_url.clone(),
            text_model: app_settings.openai.text_model.clone(),
            image_model: app_settings.openai.image_model.clone(),
            image_size: app_settings.openai.image_size.clone(),
        }
    }

    /// Runs one chat completion and returns the assistant message content.
    #[instrument(skip(self, prompt, credential))]
    pub async fn chat_completion(
        &self,
        prompt: &str,
        credential: &ApiCredential,
    ) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = OpenAIChatRequest {
            model: self.text_model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: Some(TEXT_TEMPERATURE),
            max_tokens: Some(TEXT_MAX_TOKENS),
        };

        debug!("Sending chat completion request for model {}", self.text_model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(credential.expose())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::External(format!("OpenAI request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response".to_string());
            return Err(AppError::External(format!(
                "OpenAI request failed with status {}: {}",
                status, error_text
            )));
        }

        let chat_response: OpenAIChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::External(format!("OpenAI deserialization failed: {}", e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AppError::External("OpenAI completion contained no message content".to_string())
            })?;

        info!("Chat completion returned {} characters", content.len());
        Ok(content)
    }

    /// Generates one promotional image and returns its raw bytes together
    /// with the upstream URL when the provider served it by URL.
    #[instrument(skip(self, prompt, credential))]
    pub async fn image_generation(
        &self,
        prompt: &str,
        credential: &ApiCredential,
    ) -> Result<GeneratedImage, AppError> {
        let url = format!("{}/images/generations", self.base_url);

        let request = OpenAIImageRequest {
            model: self.image_model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: self.image_size.clone(),
            quality: Some("standard".to_string()),
            style: Some("vivid".to_string()),
        };

        debug!("Sending image generation request for model {}", self.image_model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(credential.expose())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::External(format!("OpenAI image request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response".to_string());
            return Err(AppError::External(format!(
                "OpenAI image request failed with status {}: {}",
                status, error_text
            )));
        }

        let image_response: OpenAIImageResponse = response
            .json()
            .await
            .map_err(|e| AppError::External(format!("OpenAI image deserialization failed: {}", e)))?;

        let datum = image_response.data.into_iter().next().ok_or_else(|| {
            AppError::External("OpenAI image response contained no images".to_string())
        })?;

        // Providers return either a short-lived URL or inline base64.
        if let Some(source_url) = datum.url {
            let bytes = self.fetch_image_bytes(&source_url).await?;
            info!("Fetched generated image ({} bytes)", bytes.len());
            return Ok(GeneratedImage {
                bytes,
                source_url: Some(source_url),
            });
        }

        if let Some(b64) = datum.b64_json {
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(b64.as_bytes())
                .map_err(|e| {
                    AppError::External(format!("Failed to decode inline image data: {}", e))
                })?;
            info!("Decoded inline generated image ({} bytes)", bytes.len());
            return Ok(GeneratedImage {
                bytes,
                source_url: None,
            });
        }

        Err(AppError::External(
            "OpenAI image response carried neither a URL nor inline data".to_string(),
        ))
    }

    async fn fetch_image_bytes(&self, source_url: &str) -> Result<Vec<u8>, AppError> {
        let response = self
            .client
            .get(source_url)
            .send()
            .await
            .map_err(|e| AppError::External(format!("Failed to download generated image: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::External(format!(
                "Image download failed with status {}",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::External(format!("Failed to read image bytes: {}", e)))?;

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{AppConfig, OpenAiConfig, ServerConfig};
    use pretty_assertions::assert_eq;

    fn test_settings(base_url: String) -> AppSettings {
        AppSettings {
            app: AppConfig {
                name: "promocast".to_string(),
                environment: "test".to_string(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            openai: OpenAiConfig {
                base_url,
                text_model: "gpt-4o".to_string(),
                image_model: "dall-e-3".to_string(),
                image_size: "1024x1024".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_chat_completion_returns_message_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"id":"cmpl-1","model":"gpt-4o","choices":[{"index":0,"finish_reason":"stop","message":{"role":"assistant","content":"LinkedIn: a\nTwitter: b\nWhatsApp: c"}}]}"#,
            )
            .create_async()
            .await;

        let client = OpenAiClient::new(&test_settings(server.url()));
        let credential = ApiCredential::new("test-key");

        let content = client
            .chat_completion("write posts", &credential)
            .await
            .expect("completion should succeed");

        assert_eq!(content, "LinkedIn: a\nTwitter: b\nWhatsApp: c");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_chat_completion_surfaces_provider_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let client = OpenAiClient::new(&test_settings(server.url()));
        let credential = ApiCredential::new("bad-key");

        let err = client
            .chat_completion("write posts", &credential)
            .await
            .expect_err("completion should fail");

        match err {
            AppError::External(message) => {
                assert!(message.contains("401"));
                assert!(message.contains("Incorrect API key"));
            }
            other => panic!("expected External error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_chat_completion_with_empty_choices_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"cmpl-2","model":"gpt-4o","choices":[]}"#)
            .create_async()
            .await;

        let client = OpenAiClient::new(&test_settings(server.url()));
        let credential = ApiCredential::new("test-key");

        let err = client
            .chat_completion("write posts", &credential)
            .await
            .expect_err("empty choices should fail");
        assert!(matches!(err, AppError::External(_)));
    }

    #[tokio::test]
    async fn test_image_generation_downloads_from_url() {
        let mut server = mockito::Server::new_async().await;
        let image_bytes = b"\x89PNG\r\n\x1a\nfakepng".to_vec();

        let image_url = format!("{}/generated/demo.png", server.url());
        let _generation_mock = server
            .mock("POST", "/images/generations")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"created":1,"data":[{{"url":"{}"}}]}}"#, image_url))
            .create_async()
            .await;
        let _download_mock = server
            .mock("GET", "/generated/demo.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(image_bytes.clone())
            .create_async()
            .await;

        let client = OpenAiClient::new(&test_settings(server.url()));
        let credential = ApiCredential::new("test-key");

        let image = client
            .image_generation("draw the event", &credential)
            .await
            .expect("image generation should succeed");

        assert_eq!(image.bytes, image_bytes);
        assert_eq!(image.source_url, Some(image_url));
    }

    #[tokio::test]
    async fn test_image_generation_accepts_inline_base64() {
        let mut server = mockito::Server::new_async().await;
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"pngbytes");
        let _mock = server
            .mock("POST", "/images/generations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"data":[{{"b64_json":"{}"}}]}}"#, encoded))
            .create_async()
            .await;

        let client = OpenAiClient::new(&test_settings(server.url()));
        let credential = ApiCredential::new("test-key");

        let image = client
            .image_generation("draw the event", &credential)
            .await
            .expect("image generation should succeed");

        assert_eq!(image.bytes, b"pngbytes".to_vec());
        assert_eq!(image.source_url, None);
    }

    #[tokio::test]
    async fn test_image_generation_with_no_data_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/images/generations")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":[]}"#)
            .create_async()
            .await;

        let client = OpenAiClient::new(&test_settings(server.url()));
        let credential = ApiCredential::new("test-key");

        let err = client
            .image_generation("draw the event", &credential)
            .await
            .expect_err("empty data should fail");
        assert!(matches!(err, AppError::External(_)));
    }
}
