/// AI module for vendorboard
///
/// This module defines the contract the chat session and the catalog use to
/// reach a generative-language service, plus the Gemini implementation of it.
///
/// # Architecture
///
/// - `client` - `AssistantClient` trait and the shared error type
/// - `providers` - concrete backends (Gemini REST)
///
/// # Usage
///
/// ```rust,no_run
/// use vendorboard::ai::{AssistantClient, GeminiClient};
/// use vendorboard::config::AssistantConfig;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = GeminiClient::new(&AssistantConfig::from_env()?);
/// let text = client.generate_text("Say hello").await?;
/// # Ok(())
/// # }
/// ```
mod client;
mod providers;

pub use client::{AssistantClient, ChatError, ChatResult};
pub use providers::GeminiClient;
