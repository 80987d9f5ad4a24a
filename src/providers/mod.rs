mod gemini;

pub use gemini::GeminiProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{ImageRequest, RecipeRequest};
use crate::prompt::build_prompt;
use crate::stream::{collect_fragments, FragmentStream};

/// Binary image sent alongside the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Everything one generation call needs: the prompt and an optional image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub image: Option<InlineImage>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        GenerationRequest {
            prompt: prompt.into(),
            image: None,
        }
    }

    pub fn with_image(prompt: impl Into<String>, image: InlineImage) -> Self {
        GenerationRequest {
            prompt: prompt.into(),
            image: Some(image),
        }
    }
}

impl From<&RecipeRequest> for GenerationRequest {
    fn from(request: &RecipeRequest) -> Self {
        let prompt = build_prompt(request);
        match request {
            RecipeRequest::Text(_) => GenerationRequest::text(prompt),
            RecipeRequest::Image(ImageRequest {
                data, media_type, ..
            }) => GenerationRequest::with_image(
                prompt,
                InlineImage {
                    media_type: media_type.clone(),
                    data: data.clone(),
                },
            ),
        }
    }
}

/// A generative model reachable over a streaming API
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google")
    fn provider_name(&self) -> &str;

    /// Start one streaming generation call
    async fn stream_generate(&self, request: &GenerationRequest) -> Result<FragmentStream>;

    /// Run one generation call and return the concatenated text.
    ///
    /// A failure at any point discards whatever text had already arrived.
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let stream = self.stream_generate(request).await?;
        collect_fragments(stream).await
    }
}
