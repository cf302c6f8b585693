use crate::models::{
    AggregatedNutrition, AdjustRecipeRequest, DietRecommendations, MealAdvice, Recipe,
    ReplacementSuggestions,
};
use crate::services::prompts;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors from the text-generation backend
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("no JSON object in model output: {0}")]
    InvalidJson(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// Outcome of an advice-generation attempt. The generator is treated as
/// potentially absent at all times; the caller pattern-matches and
/// substitutes the canned fallback on `Unavailable` instead of failing the
/// request.
#[derive(Debug)]
pub enum AdviceOutcome {
    Generated(MealAdvice),
    Unavailable(String),
}

/// Client for an OpenAI-compatible chat-completions backend.
///
/// Handles all structured text generation: meal advice, recipe generation
/// and adjustment, ingredient replacement, and grocery-bill OCR.
pub struct LlmClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct BillItems {
    #[serde(default)]
    items: Vec<String>,
}

impl LlmClient {
    pub fn new(
        endpoint: String,
        api_key: String,
        model: String,
        max_tokens: u32,
        timeout_secs: u64,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint,
            api_key,
            model,
            max_tokens,
        }
    }

    /// One chat-completions round trip, returning the raw assistant text
    async fn complete(&self, content: Value, temperature: f64) -> Result<String, LlmError> {
        let url = format!(
            "{}/chat/completions",
            self.endpoint.trim_end_matches('/')
        );

        let payload = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": content}],
            "max_tokens": self.max_tokens,
            "temperature": temperature,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LlmError::ApiError(format!(
                "chat completion failed: {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;

        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| LlmError::InvalidResponse("missing choices[0].message.content".into()))
    }

    /// Complete and parse the output as a typed JSON structure
    async fn structured<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, LlmError> {
        let text = self.complete(Value::String(prompt.to_string()), 0.2).await?;

        let value = extract_json(&text)
            .ok_or_else(|| LlmError::InvalidJson(truncate_for_log(&text)))?;

        serde_json::from_value(value)
            .map_err(|e| LlmError::InvalidResponse(format!("failed to parse output: {}", e)))
    }

    /// Generate advice enrichment for an analyzed meal. Failures (transport,
    /// malformed output, missing fields) all collapse to `Unavailable`.
    pub async fn generate_advice(
        &self,
        labels: &[String],
        nutrition: &AggregatedNutrition,
        conditions: &[String],
    ) -> AdviceOutcome {
        let prompt = prompts::advice_prompt(labels, nutrition, conditions);

        match self.structured::<MealAdvice>(&prompt).await {
            Ok(advice) => AdviceOutcome::Generated(advice),
            Err(e) => {
                tracing::warn!("Advice generation unavailable: {}", e);
                AdviceOutcome::Unavailable(e.to_string())
            }
        }
    }

    /// Generate a recipe from freshness-weighted ingredients
    pub async fn generate_recipe(
        &self,
        weighted_ingredients: &[(String, u8)],
        diet: &str,
        servings: u32,
        calories: Option<u32>,
    ) -> Result<Recipe, LlmError> {
        let prompt = prompts::recipe_prompt(weighted_ingredients, diet, servings, calories);
        self.structured(&prompt).await
    }

    /// Rewrite a recipe after ingredient edits
    pub async fn adjust_recipe(&self, request: &AdjustRecipeRequest) -> Result<Recipe, LlmError> {
        let prompt = prompts::adjust_prompt(
            &request.recipe,
            &request.excluded_items,
            &request.added_items,
            &request.preferences,
        );
        self.structured(&prompt).await
    }

    /// Suggest replacements for one removed ingredient
    pub async fn suggest_replacement(
        &self,
        ingredient: &str,
        recipe: &Recipe,
        preferences: &[String],
        removed: &[String],
    ) -> Result<ReplacementSuggestions, LlmError> {
        let prompt = prompts::replacement_prompt(ingredient, recipe, preferences, removed);
        self.structured(&prompt).await
    }

    /// Extract purchased item names from a grocery-bill photo via a vision
    /// message
    pub async fn extract_bill_items(&self, image_base64: &str) -> Result<Vec<String>, LlmError> {
        let content = json!([
            {"type": "text", "text": prompts::BILL_OCR_PROMPT},
            {
                "type": "image_url",
                "image_url": {"url": format!("data:image/jpeg;base64,{}", image_base64)}
            }
        ]);

        let text = self.complete(content, 0.0).await?;
        let value =
            extract_json(&text).ok_or_else(|| LlmError::InvalidJson(truncate_for_log(&text)))?;

        let parsed: BillItems = serde_json::from_value(value)
            .map_err(|e| LlmError::InvalidResponse(format!("failed to parse bill items: {}", e)))?;

        Ok(parsed.items)
    }
}

/// Canned recommendation block substituted whenever the generator is
/// unavailable or returns something unusable
pub fn fallback_recommendations() -> DietRecommendations {
    DietRecommendations {
        add: vec!["Include vegetables for fiber".to_string()],
        reduce: vec!["Reduce fried/oily items".to_string()],
        pairings: vec!["Salad or yogurt pairs well".to_string()],
        overall_comment: "Fallback: advice generator unavailable.".to_string(),
    }
}

/// Try hard to get a JSON object out of model output: strip code fences,
/// then fall back to the outermost brace span
fn extract_json(text: &str) -> Option<Value> {
    let stripped = text
        .trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string();

    if let Ok(value) = serde_json::from_str(&stripped) {
        return Some(value);
    }

    let open = stripped.find('{')?;
    let close = stripped.rfind('}')?;
    if close <= open {
        return None;
    }

    serde_json::from_str(&stripped[open..=close]).ok()
}

fn truncate_for_log(text: &str) -> String {
    const LIMIT: usize = 200;
    if text.len() <= LIMIT {
        text.to_string()
    } else {
        let cut = text
            .char_indices()
            .take_while(|(i, _)| *i < LIMIT)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &text[..cut])
    }
}
