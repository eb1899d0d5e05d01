use crate::ai::{AssistantClient, ChatError, ChatResult};
use crate::config::AssistantConfig;
use crate::types::{Role, Turn};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &AssistantConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    async fn send(&self, request: &GenerateContentRequest<'_>) -> ChatResult<String> {
        tracing::debug!(model = %self.model, turns = request.contents.len(), "gemini request");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            extract_text(&body)
        } else {
            Err(ChatError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            })
        }
    }
}

// Gemini API request types

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> Content<'a> {
    fn text(role: Option<&'static str>, text: &'a str) -> Self {
        Self {
            role,
            parts: vec![Part { text }],
        }
    }
}

// Gemini API response types

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

fn conversation_request<'a>(
    system_instruction: &'a str,
    history: &'a [Turn],
    message: &'a str,
) -> GenerateContentRequest<'a> {
    let mut contents: Vec<Content<'a>> = history
        .iter()
        .map(|turn| Content::text(Some(wire_role(turn.role)), &turn.content))
        .collect();
    contents.push(Content::text(Some(wire_role(Role::User)), message));

    let system_instruction = if system_instruction.trim().is_empty() {
        None
    } else {
        Some(Content::text(None, system_instruction))
    };

    GenerateContentRequest {
        contents,
        system_instruction,
    }
}

/// Text of the first candidate. A well-formed response without text yields
/// an empty string; an undecodable body is an error.
fn extract_text(body: &str) -> ChatResult<String> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)?;
    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();
    Ok(text)
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorWrapper>(body) {
        Ok(wrapper) => {
            let message = wrapper.error.message.unwrap_or_else(|| body.to_string());
            match wrapper.error.status {
                Some(status) if !status.is_empty() => format!("{status}: {message}"),
                _ => message,
            }
        }
        Err(_) => body.to_string(),
    }
}

#[async_trait]
impl AssistantClient for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> ChatResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::text(Some(wire_role(Role::User)), prompt)],
            system_instruction: None,
        };
        self.send(&request).await
    }

    async fn converse(
        &self,
        system_instruction: &str,
        history: &[Turn],
        message: &str,
    ) -> ChatResult<String> {
        let request = conversation_request(system_instruction, history, message);
        self.send(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_assistant_turns_to_model_role() {
        let history = vec![Turn::assistant("Hello!"), Turn::user("Hi")];
        let request = conversation_request("Be brief.", &history, "How are sales?");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [
                    {"role": "model", "parts": [{"text": "Hello!"}]},
                    {"role": "user", "parts": [{"text": "Hi"}]},
                    {"role": "user", "parts": [{"text": "How are sales?"}]},
                ],
                "systemInstruction": {"parts": [{"text": "Be brief."}]},
            })
        );
    }

    #[test]
    fn omits_blank_system_instruction() {
        let request = conversation_request("  ", &[], "ping");
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("systemInstruction").is_none());
    }

    #[test]
    fn extracts_candidate_text() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Revenue is "},{"text":"up."}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "Revenue is up.");
    }

    #[test]
    fn missing_text_is_empty_not_error() {
        assert_eq!(extract_text(r#"{"candidates":[]}"#).unwrap(), "");
        assert_eq!(
            extract_text(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap(),
            ""
        );
        assert_eq!(extract_text("{}").unwrap(), "");
    }

    #[test]
    fn malformed_body_is_decode_error() {
        assert!(matches!(
            extract_text("<html>bad gateway</html>"),
            Err(ChatError::Decode(_))
        ));
    }

    #[test]
    fn formats_api_error_message() {
        let body = r#"{"error":{"code":403,"message":"API key not valid.","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(error_message(body), "PERMISSION_DENIED: API key not valid.");
        assert_eq!(error_message("plain failure"), "plain failure");
    }

    #[test]
    fn builds_generate_content_url() {
        let config = AssistantConfig {
            api_key: "k".into(),
            model: "gemini-test".into(),
            endpoint: "https://example.test/v1beta/models/".into(),
            timeout: std::time::Duration::from_secs(1),
        };
        let client = GeminiClient::new(&config);
        assert_eq!(
            client.url(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }
}
