use crate::models::{ChatMessage, ChatRole};

use super::TextGenerator;

/// Transcript line shown when the outbound request fails for any reason
/// (network fault, error status, unparseable body).
pub const ERROR_PLACEHOLDER: &str =
    "Sorry, I couldn't reach the assistant. Please try again in a moment.";

/// One open conversation: an append-only transcript of user/assistant
/// pairs. Lives only as long as the chat panel; never persisted.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: text.into(),
        });
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            text: text.into(),
        });
    }

    /// Append the user message, make exactly one request carrying only
    /// that message's text, and append the answer. Failures become the
    /// fixed placeholder line; nothing is retried and nothing escapes.
    pub async fn send<G: TextGenerator>(&mut self, generator: &G, text: &str) {
        self.push_user(text);

        let answer = match generator.generate(text).await {
            Ok(answer) => answer,
            Err(e) => {
                log::warn!("assistant request failed: {:#}", e);
                ERROR_PLACEHOLDER.to_string()
            }
        };

        self.push_assistant(answer);
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Result};
    use pretty_assertions::assert_eq;

    use super::ChatSession;
    use super::ERROR_PLACEHOLDER;
    use crate::llm::TextGenerator;
    use crate::models::ChatRole;

    struct CannedGenerator(&'static str);

    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingGenerator;

    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(anyhow!("connection refused"))
        }
    }

    #[tokio::test]
    async fn send_appends_a_user_and_an_assistant_message() {
        let mut session = ChatSession::new();
        session.send(&CannedGenerator("hi there"), "hello").await;

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::User);
        assert_eq!(messages[0].text, "hello");
        assert_eq!(messages[1].role, ChatRole::Assistant);
        assert_eq!(messages[1].text, "hi there");
    }

    #[tokio::test]
    async fn a_failing_transport_appends_the_placeholder_and_keeps_history() {
        let mut session = ChatSession::new();
        session.send(&CannedGenerator("first answer"), "first").await;

        session.send(&FailingGenerator, "hello").await;

        let messages = session.messages();
        assert_eq!(messages.len(), 4);
        // Prior messages untouched.
        assert_eq!(messages[0].text, "first");
        assert_eq!(messages[1].text, "first answer");
        // Exactly one user message and one placeholder for the failure.
        assert_eq!(messages[2].role, ChatRole::User);
        assert_eq!(messages[2].text, "hello");
        assert_eq!(messages[3].role, ChatRole::Assistant);
        assert_eq!(messages[3].text, ERROR_PLACEHOLDER);
    }
}
