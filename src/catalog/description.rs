use super::CatalogError;
use crate::ai::AssistantClient;

pub const EMPTY_DESCRIPTION_FALLBACK: &str = "No description generated.";
pub const DESCRIPTION_FAILURE_FALLBACK: &str =
    "Failed to generate description. Please check your API key.";

fn copywriter_prompt(name: &str, category: &str, features: &str) -> String {
    format!(
        r#"You are an expert e-commerce copywriter.
Write a compelling, SEO-friendly product description (max 100 words) for a product with the following details:
Product Name: {name}
Category: {category}
Key Features/Keywords: {features}

Tone: Professional, persuasive, and clear.
Do not include markdown titles. Just the description text."#
    )
}

/// Ask the assistant for a short marketing description of a product.
///
/// Name and category are required. Assistant failures are logged and
/// replaced by a fixed message so the caller always gets text to show.
pub async fn draft_product_description<C: AssistantClient + ?Sized>(
    client: &C,
    name: &str,
    category: &str,
    features: &str,
) -> Result<String, CatalogError> {
    let name = name.trim();
    let category = category.trim();
    if name.is_empty() {
        return Err(CatalogError::MissingField("name"));
    }
    if category.is_empty() {
        return Err(CatalogError::MissingField("category"));
    }

    let prompt = copywriter_prompt(name, category, features.trim());
    match client.generate_text(&prompt).await {
        Ok(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        Ok(_) => Ok(EMPTY_DESCRIPTION_FALLBACK.to_string()),
        Err(err) => {
            tracing::warn!(error = %err, product = name, "description drafting failed");
            Ok(DESCRIPTION_FAILURE_FALLBACK.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{ChatError, ChatResult};
    use crate::types::Turn;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Canned {
        reply: Option<&'static str>,
        prompts: Mutex<Vec<String>>,
    }

    impl Canned {
        fn new(reply: Option<&'static str>) -> Self {
            Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AssistantClient for Canned {
        async fn generate_text(&self, prompt: &str) -> ChatResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .map(str::to_string)
                .ok_or_else(|| ChatError::Status {
                    status: 403,
                    message: "API key not valid.".into(),
                })
        }

        async fn converse(&self, _: &str, _: &[Turn], _: &str) -> ChatResult<String> {
            unreachable!("description drafting is single-turn")
        }
    }

    #[tokio::test]
    async fn prompt_carries_product_details() {
        let client = Canned::new(Some(" Crisp sound, all day. "));
        let text = draft_product_description(&client, "Headset", "Electronics", "wireless")
            .await
            .unwrap();

        assert_eq!(text, "Crisp sound, all day.");
        let prompts = client.prompts.lock().unwrap();
        assert!(prompts[0].contains("Product Name: Headset"));
        assert!(prompts[0].contains("Category: Electronics"));
        assert!(prompts[0].contains("Key Features/Keywords: wireless"));
    }

    #[tokio::test]
    async fn empty_reply_uses_placeholder() {
        let client = Canned::new(Some(""));
        let text = draft_product_description(&client, "Mug", "Kitchen", "")
            .await
            .unwrap();
        assert_eq!(text, EMPTY_DESCRIPTION_FALLBACK);
    }

    #[tokio::test]
    async fn failure_uses_apology() {
        let client = Canned::new(None);
        let text = draft_product_description(&client, "Mug", "Kitchen", "")
            .await
            .unwrap();
        assert_eq!(text, DESCRIPTION_FAILURE_FALLBACK);
    }

    #[tokio::test]
    async fn requires_name_and_category() {
        let client = Canned::new(Some("unused"));
        assert_eq!(
            draft_product_description(&client, " ", "Kitchen", "").await,
            Err(CatalogError::MissingField("name"))
        );
        assert_eq!(
            draft_product_description(&client, "Mug", "", "").await,
            Err(CatalogError::MissingField("category"))
        );
        assert!(client.prompts.lock().unwrap().is_empty());
    }
}
