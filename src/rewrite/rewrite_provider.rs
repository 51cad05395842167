use anyhow::Result;
use async_trait::async_trait;

/// Trait for language-model-assisted transcript rewriting.
#[async_trait]
pub trait RewriteProvider: Send + Sync {
    /// Rewrite the raw transcription, returning only the cleaned text.
    async fn rewrite(&self, text: &str) -> Result<String>;

    /// Get the name of this provider for logging.
    fn name(&self) -> &'static str;
}
