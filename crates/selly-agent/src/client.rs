use async_trait::async_trait;
use selly_core::config::ReplyConfig;
use selly_core::generator::{GenerationFailure, ReplyGenerator, ReplyPayload, ReplyRequest};
use selly_core::types::PlantType;
use std::time::Duration;

use crate::prompt::{build_prompt, response_schema, system_instruction};
use crate::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ReplyJson};
use crate::{AgentError, Result};

// ─── ClientSettings ───────────────────────────────────────────────────────

/// Everything [`GeminiClient`] needs, resolved from config and environment.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_base: String,
    pub model: String,
    /// `None` when the configured environment variable is unset.
    pub api_key: Option<String>,
    /// Name of the variable the key was looked up in, for error messages.
    pub api_key_env: String,
    pub language: String,
    pub timeout: Duration,
}

impl ClientSettings {
    pub fn from_config(config: &ReplyConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self {
            api_base: config.api_base.clone(),
            model: config.model.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            language: config.language.clone(),
            timeout: config.timeout(),
        }
    }
}

// ─── GeminiClient ─────────────────────────────────────────────────────────

pub struct GeminiClient {
    http: reqwest::Client,
    settings: ClientSettings,
}

impl GeminiClient {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { http, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.model
        )
    }

    /// Ask the model for a reply to one letter.
    pub async fn generate_reply(&self, req: &ReplyRequest) -> Result<ReplyPayload> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or_else(|| AgentError::MissingApiKey(self.settings.api_key_env.clone()))?;

        let language = &self.settings.language;
        let body = GenerateContentRequest {
            system_instruction: Content::text(None, system_instruction(language)),
            contents: vec![Content::text(Some("user"), build_prompt(req, language))],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(language),
            },
        };

        tracing::debug!(model = %self.settings.model, emotion = %req.emotion, "requesting reply");
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AgentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = resp.json().await?;
        let text = parsed
            .first_text()
            .ok_or_else(|| AgentError::EmptyResponse(parsed.finish_reason().to_string()))?;
        parse_reply(&text)
    }
}

/// Decode the model's JSON answer into a payload.
pub(crate) fn parse_reply(text: &str) -> Result<ReplyPayload> {
    let json: ReplyJson = serde_json::from_str(text.trim()).map_err(|source| AgentError::Parse {
        text: text.to_string(),
        source,
    })?;
    Ok(ReplyPayload {
        reply: json.reply,
        summary: json.summary,
        plant_type: PlantType::from_designation(&json.plant_type),
        advice: json.advice,
        fallback: false,
    })
}

#[async_trait]
impl ReplyGenerator for GeminiClient {
    async fn generate(&self, request: &ReplyRequest) -> std::result::Result<ReplyPayload, GenerationFailure> {
        self.generate_reply(request)
            .await
            .map_err(|e| GenerationFailure(e.to_string()))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
