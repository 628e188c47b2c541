// * AI assistant collaborators
// * The engine only hands data to these and shows whatever text comes back.
// * Implementations never fail outward: errors become a fallback string.

pub mod chat;
pub mod gemini;
pub mod prompts;
pub mod summary;

use crate::ingest::record::InnovationRecord;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

// * Re-exports for convenient access
pub use chat::{ChatMessage, ChatSession, GREETING, SUGGESTED_QUESTIONS};
pub use gemini::{GeminiClient, GeminiConfig};
pub use prompts::{summary_prompt, system_instruction};
pub use summary::{SummaryConfig, SummaryCoordinator, SummaryOutcome, NO_MATCHES_MESSAGE};

// * Fallback strings shown in place of a reply
pub const CHAT_MISSING_KEY: &str = "System Error: Missing API Key.";
pub const CHAT_NOT_READY: &str = "I'm initializing the data. Please try again in a moment.";
pub const CHAT_FAILURE: &str =
    "I apologize, but I am unable to process your request at the moment.";
pub const SUMMARY_MISSING_KEY: &str = "AI Summary unavailable: Missing API Key.";
pub const SUMMARY_FAILURE: &str = "Unable to generate AI summary at this time.";

/// Type alias for a reply that cannot fail
pub type ReplyFuture<'a> = Pin<Box<dyn Future<Output = String> + Send + 'a>>;

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One prior turn handed to the chat collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

/// Conversational assistant grounded on the raw dataset text
pub trait ChatAssistant: Send + Sync {
    /// Answers `message` given the prior turns and the dataset as context
    fn reply<'a>(
        &'a self,
        history: &'a [ChatTurn],
        message: &'a str,
        context: &'a str,
    ) -> ReplyFuture<'a>;
}

/// Produces a short synthesis of a filtered view
pub trait SummaryProvider: Send + Sync {
    fn summarize<'a>(&'a self, records: &'a [&'a InnovationRecord]) -> ReplyFuture<'a>;
}

/// Failures inside an assistant implementation; mapped to fallbacks before leaving it
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Response contained no text")]
    EmptyResponse,
}
