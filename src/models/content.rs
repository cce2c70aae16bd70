use serde::{Deserialize, Serialize};
use std::fmt;

/// Download filename offered to the browser for the promotional image.
pub const IMAGE_DOWNLOAD_FILENAME: &str = "event_promo_image.png";

/// The three platforms a generated response is split into, in the order the
/// prompt asks the model to emit them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    LinkedIn,
    Twitter,
    WhatsApp,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::LinkedIn, Platform::Twitter, Platform::WhatsApp];

    /// The literal header label the model is expected to emit for this
    /// platform.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Twitter => "Twitter",
            Platform::WhatsApp => "WhatsApp",
        }
    }
}

/// One extracted section. `present` records whether the platform's header
/// was found at all; a missing header yields an empty body, never a fault.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformPost {
    pub platform: Platform,
    pub body: String,
    pub present: bool,
}

impl PlatformPost {
    pub fn absent(platform: Platform) -> Self {
        Self {
            platform,
            body: String::new(),
            present: false,
        }
    }
}

/// Result of splitting one generated text into per-platform sections.
/// `posts` always holds all three platforms in canonical order;
/// `fully_parsed` is true only when every header was found in that order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub posts: Vec<PlatformPost>,
    pub fully_parsed: bool,
}

impl ParseResult {
    pub fn post(&self, platform: Platform) -> Option<&PlatformPost> {
        self.posts.iter().find(|p| p.platform == platform)
    }
}

/// Caller-supplied API credential, passed by value into the provider calls
/// for the duration of one request and never stored or logged.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct ApiCredential(String);

impl ApiCredential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential([redacted])")
    }
}

/// Raw image bytes plus the upstream URL they were fetched from, when the
/// provider returned one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub source_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub api_key: ApiCredential,
    pub event_details: String,
}

/// Text half of a generation response. The raw model output is always kept
/// so the UI can fall back to it when parsing degraded.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsContent {
    pub raw_text: String,
    pub posts: Vec<PlatformPost>,
    pub fully_parsed: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    pub base64_png: String,
    pub data_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub filename: String,
}

/// The two halves are independent: a provider fault on one call leaves the
/// other's result intact, with the failure reported alongside it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<PostsContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = ApiCredential::new("sk-very-secret");
        let rendered = format!("{:?}", credential);
        assert!(!rendered.contains("secret"));
        assert_eq!(rendered, "ApiCredential([redacted])");
    }

    #[test]
    fn test_blank_credential_is_empty() {
        assert!(ApiCredential::new("   ").is_empty());
        assert!(!ApiCredential::new("sk-1").is_empty());
    }

    #[test]
    fn test_generate_request_accepts_camel_case() {
        let request: GenerateRequest =
            serde_json::from_str(r#"{"apiKey":"sk-1","eventDetails":"Launch party at noon"}"#)
                .expect("request should deserialize");
        assert_eq!(request.api_key.expose(), "sk-1");
        assert_eq!(request.event_details, "Launch party at noon");
    }

    #[test]
    fn test_platform_serializes_lowercase() {
        let json = serde_json::to_string(&Platform::WhatsApp).expect("serializes");
        assert_eq!(json, r#""whatsapp""#);
    }
}
