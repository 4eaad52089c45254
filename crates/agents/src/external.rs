use std::env;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use yatra_core::{ItineraryRequest, ItineraryResponse, TimeSlot};

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum ExternalModelError {
    #[error("external model credential is not configured")]
    MissingCredential,
    #[error("external model request failed: {0}")]
    Request(String),
    #[error("external model output unusable: {0}")]
    Decode(String),
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl OpenAiConfig {
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("YATRA_OPENAI_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty())?;
        let model = env::var("YATRA_OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            env::var("YATRA_OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Some(Self {
            api_key,
            model,
            base_url,
        })
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url.trim_end_matches('/'))
    }
}

/// Optional text-generation backend that polishes a deterministic draft.
#[derive(Debug, Clone)]
pub struct ExternalPlanner {
    http_client: Client,
    config: Option<OpenAiConfig>,
}

impl ExternalPlanner {
    pub fn new(config: Option<OpenAiConfig>) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            config,
        }
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    pub fn model(&self) -> Option<&str> {
        self.config.as_ref().map(|config| config.model.as_str())
    }

    /// Asks the model to rewrite the draft's narrative fields and returns the
    /// rewritten itinerary. Any shape change is rejected as a decode error.
    pub async fn refine(
        &self,
        request: &ItineraryRequest,
        draft: &ItineraryResponse,
    ) -> Result<ItineraryResponse, ExternalModelError> {
        let config = self
            .config
            .as_ref()
            .ok_or(ExternalModelError::MissingCredential)?;

        let draft_json = serde_json::to_string(draft)
            .map_err(|err| ExternalModelError::Decode(err.to_string()))?;
        let system_prompt = "You are an Indian travel planner. Rewrite titles, descriptions and notes \
            to read naturally while keeping every field, id, coordinate, distance and time unchanged. \
            Reply with JSON only, in exactly the shape you were given.";
        let payload = serde_json::json!({
            "model": config.model,
            "input": [
                {
                    "role": "system",
                    "content": [
                        { "type": "input_text", "text": system_prompt }
                    ]
                },
                {
                    "role": "user",
                    "content": [
                        { "type": "input_text", "text": format!(
                            "Traveler: {} on a {} budget, interests: {}.",
                            request.traveler_type,
                            request.budget,
                            request.interests.join(", ")
                        ) },
                        { "type": "input_text", "text": format!("Draft itinerary JSON: {draft_json}") }
                    ]
                }
            ]
        });

        let response = self
            .http_client
            .post(config.responses_url())
            .bearer_auth(config.api_key.as_str())
            .json(&payload)
            .send()
            .await
            .map_err(|err| ExternalModelError::Request(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExternalModelError::Request(format!(
                "non-success status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|err| ExternalModelError::Decode(err.to_string()))?;
        let text = extract_openai_output_text(&body)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ExternalModelError::Decode("output text missing".to_string()))?;

        parse_refined_itinerary(&text, draft)
    }
}

pub(crate) fn extract_openai_output_text(payload: &serde_json::Value) -> Option<String> {
    if let Some(value) = payload.get("output_text").and_then(|value| value.as_str()) {
        return Some(value.to_string());
    }
    let output = payload.get("output")?.as_array()?;
    let mut chunks = Vec::new();
    for item in output {
        if let Some(content) = item.get("content").and_then(|value| value.as_array()) {
            for content_item in content {
                if content_item
                    .get("type")
                    .and_then(|value| value.as_str())
                    .map(|value| value == "output_text")
                    .unwrap_or(false)
                {
                    if let Some(text) = content_item.get("text").and_then(|value| value.as_str()) {
                        chunks.push(text.to_string());
                    }
                }
            }
        }
    }
    if chunks.is_empty() {
        None
    } else {
        Some(chunks.join("\n\n"))
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parses model output and checks it kept the draft's day and slot structure.
pub(crate) fn parse_refined_itinerary(
    text: &str,
    draft: &ItineraryResponse,
) -> Result<ItineraryResponse, ExternalModelError> {
    let refined: ItineraryResponse = serde_json::from_str(strip_code_fence(text))
        .map_err(|err| ExternalModelError::Decode(err.to_string()))?;

    if refined.days.len() != draft.days.len() {
        return Err(ExternalModelError::Decode(format!(
            "expected {} days, got {}",
            draft.days.len(),
            refined.days.len()
        )));
    }
    for day in &refined.days {
        let slots = day.segments.iter().map(|segment| segment.time_of_day).collect::<Vec<_>>();
        if slots != TimeSlot::ALL {
            return Err(ExternalModelError::Decode(format!(
                "day {} does not cover Morning, Afternoon, Evening",
                day.day
            )));
        }
        if day.segments[0].travel_distance_km != 0.0 {
            return Err(ExternalModelError::Decode(format!(
                "day {} starts away from the stay",
                day.day
            )));
        }
    }
    Ok(refined)
}
