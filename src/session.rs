use std::sync::Arc;

use log::{info, warn};

use crate::config::GeminiConfig;
use crate::error::Result;
use crate::history::RecipeHistory;
use crate::model::{RecipeRequest, RecipeResult};
use crate::providers::{GeminiProvider, GenerationRequest, LlmProvider};

/// Application state for one interactive session.
///
/// Owns the model client, created once and shared by every generation, and
/// the history of generated recipe titles. `Session` is `Sync`, so overlapping
/// generations can share it behind an `Arc`.
pub struct Session {
    provider: Arc<dyn LlmProvider>,
    history: RecipeHistory,
    history_display: usize,
}

impl Session {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Session {
            provider,
            history: RecipeHistory::new(),
            history_display: GeminiConfig::default().history_display,
        }
    }

    /// Build the Gemini client from configuration.
    ///
    /// Fails with a configuration error when no API key is available.
    pub fn from_config(config: &GeminiConfig) -> Result<Self> {
        let provider = GeminiProvider::new(config)?;
        Ok(Session::new(Arc::new(provider)).with_history_display(config.history_display))
    }

    /// Number of titles returned by [`Session::recent_titles`]
    pub fn with_history_display(mut self, n: usize) -> Self {
        self.history_display = n;
        self
    }

    /// Validate the request, stream a recipe from the model and record its title.
    ///
    /// Invalid requests are rejected before any network call. On a model
    /// error nothing is recorded.
    pub async fn generate(&self, request: &RecipeRequest) -> Result<RecipeResult> {
        if let Err(e) = request.validate() {
            warn!("Rejected recipe request: {}", e);
            return Err(e);
        }

        let generation = GenerationRequest::from(request);
        let text = self.provider.generate(&generation).await?;

        let result = RecipeResult::new(text, request.flow());
        let title = result.title();
        info!(
            "Generated \"{}\" via {} ({} chars)",
            title,
            self.provider.provider_name(),
            result.text.len()
        );
        self.history.record(title);

        Ok(result)
    }

    pub fn history(&self) -> &RecipeHistory {
        &self.history
    }

    /// The most recent titles, newest first
    pub fn recent_titles(&self) -> Vec<String> {
        self.history.recent(self.history_display)
    }
}
