//! Chat session with the business assistant.
//!
//! A [`ChatSession`] owns an append-only transcript and allows at most one
//! assistant request in flight. Collaborator failures never escape
//! [`ChatSession::submit`]; they become an assistant message instead.

use crate::ai::{AssistantClient, ChatError};
use crate::config::DEFAULT_TIMEOUT;
use crate::types::{ChatMessage, Role, Turn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

pub const DEFAULT_GREETING: &str = "Hello! I am your AI Business Assistant. How can I help you today? I can analyze your sales trends, draft customer emails, or suggest inventory strategies.";

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a senior business consultant and inventory analyst for a vendor dashboard app. Help the user with business strategy, analyzing sales trends, and drafting customer communications. Keep answers concise and actionable.";

/// Shown when the assistant answers with no text.
pub const EMPTY_REPLY_FALLBACK: &str = "I couldn't process that request.";

/// Shown when the assistant call fails or times out.
pub const FAILURE_FALLBACK: &str =
    "I'm having trouble connecting to the brain. Please try again later.";

#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub greeting: String,
    pub system_instruction: String,
    pub timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            greeting: DEFAULT_GREETING.to_string(),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// What happened to a call to [`ChatSession::submit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The assistant replied (possibly with the empty-reply fallback).
    Answered,
    /// The assistant call failed; the apology was appended.
    Failed,
    /// Nothing was appended and the assistant was not called.
    Ignored(SkipReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    EmptyInput,
    RequestInFlight,
}

struct Transcript {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl Transcript {
    fn new(greeting: String) -> Self {
        let mut transcript = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        transcript.append(Role::Assistant, greeting);
        transcript
    }

    fn append(&mut self, role: Role, content: String) {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage::new(id, role, content));
    }

    fn turns(&self) -> Vec<Turn> {
        self.messages.iter().map(ChatMessage::to_turn).collect()
    }
}

pub struct ChatSession<C> {
    client: C,
    options: SessionOptions,
    transcript: Mutex<Transcript>,
    in_flight: AtomicBool,
}

impl<C: AssistantClient> ChatSession<C> {
    pub fn new(client: C) -> Self {
        Self::with_options(client, SessionOptions::default())
    }

    pub fn with_options(client: C, options: SessionOptions) -> Self {
        let transcript = Transcript::new(options.greeting.clone());
        Self {
            client,
            options,
            transcript: Mutex::new(transcript),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Send `text` to the assistant and append both sides of the exchange.
    ///
    /// Blank input and input arriving while a request is in flight are
    /// ignored without touching the transcript.
    pub async fn submit(&self, text: &str) -> Submission {
        if text.trim().is_empty() {
            return Submission::Ignored(SkipReason::EmptyInput);
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("submit ignored: request already in flight");
            return Submission::Ignored(SkipReason::RequestInFlight);
        }

        let history = {
            let mut transcript = self.lock_transcript();
            let history = transcript.turns();
            transcript.append(Role::User, text.to_string());
            history
        };
        // Settles the exchange even if this future is dropped mid-request.
        let mut pending = PendingReply {
            session: self,
            reply: None,
        };

        tracing::debug!(history = history.len(), "sending message to assistant");
        let result = tokio::time::timeout(
            self.options.timeout,
            self.client
                .converse(&self.options.system_instruction, &history, text),
        )
        .await
        .unwrap_or_else(|_| Err(ChatError::Timeout(self.options.timeout)));

        let outcome = match result {
            Ok(reply) if !reply.trim().is_empty() => {
                pending.reply = Some(reply);
                Submission::Answered
            }
            Ok(_) => {
                pending.reply = Some(EMPTY_REPLY_FALLBACK.to_string());
                Submission::Answered
            }
            Err(err) => {
                tracing::warn!(error = %err, "assistant request failed");
                Submission::Failed
            }
        };
        drop(pending);
        outcome
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C> ChatSession<C> {
    pub fn is_request_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Snapshot of the transcript in append order.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.lock_transcript().messages.clone()
    }

    /// Entries appended after the first `offset`.
    pub fn transcript_since(&self, offset: usize) -> Vec<ChatMessage> {
        let transcript = self.lock_transcript();
        transcript
            .messages
            .get(offset..)
            .map(<[ChatMessage]>::to_vec)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lock_transcript().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_transcript(&self) -> MutexGuard<'_, Transcript> {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn settle(&self, content: String) {
        self.lock_transcript().append(Role::Assistant, content);
        self.in_flight.store(false, Ordering::Release);
    }
}

struct PendingReply<'a, C> {
    session: &'a ChatSession<C>,
    reply: Option<String>,
}

impl<C> Drop for PendingReply<'_, C> {
    fn drop(&mut self) {
        let content = self
            .reply
            .take()
            .unwrap_or_else(|| FAILURE_FALLBACK.to_string());
        self.session.settle(content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatResult;
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl AssistantClient for Echo {
        async fn generate_text(&self, prompt: &str) -> ChatResult<String> {
            Ok(prompt.to_string())
        }

        async fn converse(&self, _: &str, _: &[Turn], message: &str) -> ChatResult<String> {
            Ok(format!("echo: {message}"))
        }
    }

    #[test]
    fn starts_with_greeting() {
        let session = ChatSession::new(Echo);
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].role(), Role::Assistant);
        assert_eq!(transcript[0].content(), DEFAULT_GREETING);
        assert!(!session.is_request_in_flight());
    }

    #[tokio::test]
    async fn ids_increase_monotonically() {
        let session = ChatSession::new(Echo);
        session.submit("one").await;
        session.submit("two").await;

        let ids: Vec<u64> = session.transcript().iter().map(ChatMessage::id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn keeps_user_text_verbatim() {
        let session = ChatSession::new(Echo);
        assert_eq!(session.submit("  padded  ").await, Submission::Answered);

        let transcript = session.transcript();
        assert_eq!(transcript[1].content(), "  padded  ");
        assert_eq!(transcript[2].content(), "echo:   padded  ");
    }

    #[tokio::test]
    async fn transcript_since_returns_tail() {
        let session = ChatSession::new(Echo);
        let before = session.len();
        session.submit("hi").await;

        let tail = session.transcript_since(before);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].content(), "hi");
        assert!(session.transcript_since(99).is_empty());
    }

    #[tokio::test]
    async fn custom_greeting_and_instruction() {
        let options = SessionOptions {
            greeting: "Welcome back.".into(),
            ..SessionOptions::default()
        };
        let session = ChatSession::with_options(Echo, options);
        assert_eq!(session.transcript()[0].content(), "Welcome back.");
    }
}
