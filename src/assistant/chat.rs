// * Chat session state
// * Keeps the visible transcript and forwards new questions with the prior turns.

use crate::assistant::{ChatAssistant, ChatTurn, Role};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

/// First model message of every session
pub const GREETING: &str = "Hello. Ask me anything about MFL innovations and data.";

/// Canned prompts offered before the user has typed anything
pub const SUGGESTED_QUESTIONS: [&str; 3] = [
    "Summarize the innovations in Kenya",
    "What digital tools are available?",
    "Which innovations address soil fertility?",
];

/// One transcript entry
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    fn as_turn(&self) -> ChatTurn {
        ChatTurn {
            role: self.role,
            text: self.text.clone(),
        }
    }
}

/// Transcript of one conversation
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(Role::Model, GREETING)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while only the greeting is shown
    pub fn is_fresh(&self) -> bool {
        self.messages.len() == 1
    }

    /// Sends `text` and appends the reply. Blank input is ignored.
    pub async fn send<A>(&mut self, assistant: &A, text: &str, context: &str) -> Option<&ChatMessage>
    where
        A: ChatAssistant + ?Sized,
    {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        // ? History is everything shown before this question, greeting included
        let history: Vec<ChatTurn> = self.messages.iter().map(ChatMessage::as_turn).collect();
        self.messages.push(ChatMessage::new(Role::User, text));

        debug!(turns = history.len(), "Forwarding chat message");
        let reply = assistant.reply(&history, text, context).await;
        self.messages.push(ChatMessage::new(Role::Model, reply));
        self.messages.last()
    }
}
