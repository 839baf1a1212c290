pub mod gemini;
pub mod session;

use anyhow::Result;

/// Seam between the chat session and the outbound transport; tests swap
/// in a failing or canned generator.
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
