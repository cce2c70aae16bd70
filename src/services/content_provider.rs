use async_trait::async_trait;

use crate::clients::openai_client::OpenAiClient;
use crate::error::AppError;
use crate::models::{ApiCredential, GeneratedImage};

/// The hosted content provider boundary: one text completion, one image
/// generation. Both take the caller's credential by reference for the
/// duration of the call; implementations must not retain it. Any upstream
/// failure surfaces as a single `AppError` the caller reports and moves on
/// from - there is no retry policy here.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn generate_text(
        &self,
        prompt: &str,
        credential: &ApiCredential,
    ) -> Result<String, AppError>;

    async fn generate_image(
        &self,
        prompt: &str,
        credential: &ApiCredential,
    ) -> Result<GeneratedImage, AppError>;
}

#[async_trait]
impl ContentProvider for OpenAiClient {
    async fn generate_text(
        &self,
        prompt: &str,
        credential: &ApiCredential,
    ) -> Result<String, AppError> {
        self.chat_completion(prompt, credential).await
    }

    async fn generate_image(
        &self,
        prompt: &str,
        credential: &ApiCredential,
    ) -> Result<GeneratedImage, AppError> {
        self.image_generation(prompt, credential).await
    }
}
