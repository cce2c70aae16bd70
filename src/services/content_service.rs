use base64::Engine;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::{
    GenerateRequest, GenerateResponse, GeneratedImage, ImageContent, PostsContent,
    IMAGE_DOWNLOAD_FILENAME,
};
use crate::services::content_provider::ContentProvider;
use crate::services::{prompt_builder, section_parser};

/// Minimum number of non-whitespace characters required in the event
/// description before any provider call is made.
const MIN_EVENT_DETAIL_CHARS: usize = 10;

/// Request-scoped generation flow: validate input, build both prompts, run
/// the two provider calls concurrently, and fold the outcomes into one
/// response. The calls are independent; a fault on one is reported next to
/// the other's result rather than replacing it.
pub struct ContentService {
    provider: Arc<dyn ContentProvider>,
}

impl ContentService {
    pub fn new(provider: Arc<dyn ContentProvider>) -> Self {
        Self { provider }
    }

    pub async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, AppError> {
        if request.api_key.is_empty() {
            return Err(AppError::Validation(
                "Please enter your OpenAI API key.".to_string(),
            ));
        }

        let detail_chars = request
            .event_details
            .chars()
            .filter(|c| !c.is_whitespace())
            .count();
        if detail_chars < MIN_EVENT_DETAIL_CHARS {
            return Err(AppError::Validation(
                "Please provide more details about your event.".to_string(),
            ));
        }

        let posts_prompt = prompt_builder::social_posts_prompt(&request.event_details);
        let image_prompt = prompt_builder::event_image_prompt(&request.event_details);

        let (text_result, image_result) = tokio::join!(
            self.provider.generate_text(&posts_prompt, &request.api_key),
            self.provider.generate_image(&image_prompt, &request.api_key),
        );

        let (posts, posts_error) = match text_result {
            Ok(raw_text) => {
                let parsed = section_parser::parse_sections(&raw_text);
                if !parsed.fully_parsed {
                    info!("Generated text did not contain all platform headers; raw text kept for fallback");
                }
                (
                    Some(PostsContent {
                        raw_text,
                        posts: parsed.posts,
                        fully_parsed: parsed.fully_parsed,
                    }),
                    None,
                )
            }
            Err(e) => {
                warn!("Post generation failed: {}", e);
                (None, Some(format!("Error generating posts: {}", e)))
            }
        };

        let (image, image_error) = match image_result {
            Ok(generated) => (Some(Self::image_content(generated)), None),
            Err(e) => {
                warn!("Image generation failed: {}", e);
                (None, Some(format!("Error generating image: {}", e)))
            }
        };

        Ok(GenerateResponse {
            posts,
            posts_error,
            image,
            image_error,
        })
    }

    fn image_content(generated: GeneratedImage) -> ImageContent {
        let base64_png = base64::engine::general_purpose::STANDARD.encode(&generated.bytes);
        let data_uri = format!("data:image/png;base64,{}", base64_png);
        ImageContent {
            base64_png,
            data_uri,
            source_url: generated.source_url,
            filename: IMAGE_DOWNLOAD_FILENAME.to_string(),
        }
    }
}
