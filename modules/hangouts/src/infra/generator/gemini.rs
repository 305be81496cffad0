//! Gemini `generateContent` adapter for the suggestion generator port.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use modkit::TracedClient;
use profiles::model::UserProfile;
use regex::Regex;
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use crate::config::GeneratorConfig;
use crate::contract::model::{HangoutSuggestion, SuggestionDraft};
use crate::domain::generator::{GeneratorError, SuggestionGenerator};
use crate::domain::planner::Planner;

const DEFAULT_ACTIVITY: &str = "Fun Activity";
const DEFAULT_DESCRIPTION: &str = "A great way to spend time together";
const DEFAULT_LOCATION: &str = "Purdue Campus";
const DEFAULT_CATEGORY: &str = "Social";
const DEFAULT_DURATION: u32 = 120;
const MIN_DURATION: u32 = 60;
const MAX_DURATION: u32 = 300;

pub struct GeminiGenerator {
    client: TracedClient,
    endpoint: Url,
    api_key: String,
    timeout: Duration,
    json_block: Regex,
    planner: Arc<Planner>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Fields the model is asked to return; anything missing gets a default.
#[derive(Debug, Default, Deserialize)]
struct ModelIdea {
    activity: Option<String>,
    description: Option<String>,
    location: Option<String>,
    duration: Option<Value>,
    category: Option<String>,
}

/// Activity proposed by the model, before a time slot is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Idea {
    activity: String,
    description: String,
    location: String,
    duration: u32,
    category: String,
}

fn non_empty(v: Option<String>, default: &str) -> String {
    v.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn duration_minutes(v: Option<&Value>) -> u32 {
    let raw = match v {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let minutes = match raw {
        Some(m) if m.is_finite() && m > 0.0 => m.round() as u32,
        _ => DEFAULT_DURATION,
    };
    minutes.clamp(MIN_DURATION, MAX_DURATION)
}

impl GeminiGenerator {
    pub fn new(
        cfg: &GeneratorConfig,
        api_key: impl Into<String>,
        planner: Arc<Planner>,
    ) -> anyhow::Result<Self> {
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            cfg.base_url.trim_end_matches('/'),
            cfg.model
        );
        let endpoint = Url::parse(&endpoint)
            .with_context(|| format!("invalid generator endpoint '{endpoint}'"))?;
        let json_block = Regex::new(r"(?s)\{.*\}").context("compile JSON block pattern")?;

        Ok(Self {
            client: TracedClient::default(),
            endpoint,
            api_key: api_key.into(),
            timeout: Duration::from_millis(cfg.timeout_ms),
            json_block,
            planner,
        })
    }

    fn prompt(
        user: &UserProfile,
        existing: &[HangoutSuggestion],
        participant_count: usize,
    ) -> String {
        let used: Vec<&str> = existing.iter().map(|s| s.activity.as_str()).collect();
        let avoid = if used.is_empty() {
            String::new()
        } else {
            format!("Avoid these activities: {}\n", used.join(", "))
        };

        format!(
            "You are an assistant helping college students at Purdue University find fun hangout activities.\n\
             \n\
             User profile:\n\
             - Name: {name}\n\
             - Majors: {majors}\n\
             - Interests: {interests}\n\
             - Number of buddies: {buddies}\n\
             - Group size: {participant_count}\n\
             - Current schedule: {classes} classes\n\
             \n\
             {avoid}\
             Suggest ONE creative, personalized hangout activity for this user and their buddies, \
             feasible in the West Lafayette area and appropriate for the season.\n\
             \n\
             Respond in this exact JSON format:\n\
             {{\"activity\": \"Activity Name\", \"description\": \"Brief description\", \
             \"location\": \"Specific location\", \"duration\": 120, \"category\": \"Category\"}}\n\
             \n\
             Duration is in minutes (60-300).",
            name = user.name,
            majors = user.majors.join(", "),
            interests = user.interests.join(", "),
            buddies = user.buddies.len(),
            classes = user.schedule.len(),
        )
    }

    /// Extract the first `{ ... }` block of the model's text and read the idea from it.
    fn parse_idea(&self, text: &str) -> Result<Idea, GeneratorError> {
        let block = self
            .json_block
            .find(text)
            .ok_or_else(|| GeneratorError::Malformed("no JSON object in reply".to_string()))?;
        let parsed: ModelIdea = serde_json::from_str(block.as_str())
            .map_err(|e| GeneratorError::Malformed(e.to_string()))?;

        Ok(Idea {
            duration: duration_minutes(parsed.duration.as_ref()),
            activity: non_empty(parsed.activity, DEFAULT_ACTIVITY),
            description: non_empty(parsed.description, DEFAULT_DESCRIPTION),
            location: non_empty(parsed.location, DEFAULT_LOCATION),
            category: non_empty(parsed.category, DEFAULT_CATEGORY),
        })
    }

    async fn call(&self, prompt: String) -> Result<String, GeneratorError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("key", &self.api_key);
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });

        let req = self
            .client
            .request(Method::POST, url.as_str())
            .json(&body)
            .build()
            .map_err(|e| GeneratorError::Transport(e.to_string()))?;

        let resp = self
            .client
            .execute(req)
            .await
            .map_err(|e| GeneratorError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(GeneratorError::Status {
                status: status.as_u16(),
            });
        }

        let reply: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| GeneratorError::Malformed(e.to_string()))?;
        reply
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| GeneratorError::Malformed("reply carries no text".to_string()))
    }
}

#[async_trait]
impl SuggestionGenerator for GeminiGenerator {
    async fn generate(
        &self,
        user: &UserProfile,
        existing: &[HangoutSuggestion],
        participant_count: usize,
    ) -> Result<SuggestionDraft, GeneratorError> {
        let prompt = Self::prompt(user, existing, participant_count);
        let text = tokio::time::timeout(self.timeout, self.call(prompt))
            .await
            .map_err(|_| GeneratorError::Timeout(self.timeout.as_millis() as u64))??;

        let idea = self.parse_idea(&text)?;
        debug!(activity = %idea.activity, duration = idea.duration, "generator proposed activity");
        let suggested_time = self
            .planner
            .pick_slot(user, idea.duration, Utc::now(), &mut rand::rng());

        Ok(SuggestionDraft {
            activity: idea.activity,
            description: idea.description,
            location: idea.location,
            duration: idea.duration,
            category: idea.category,
            suggested_time,
        })
    }
}
