use crate::generator::ReplyPayload;
use crate::types::PlantType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Selly's answer to one letter, carrying the seed that will be planted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: String,
    pub letter_id: String,
    pub created_at: DateTime<Utc>,
    pub content: String,
    pub summary: String,
    pub gift_seed: PlantType,
    pub advice: String,
    /// Set when the generator substituted its offline reply.
    #[serde(default)]
    pub fallback: bool,
}

impl Reply {
    pub(crate) fn from_payload(letter_id: &str, payload: ReplyPayload, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            letter_id: letter_id.to_string(),
            created_at: now,
            content: payload.reply,
            summary: payload.summary,
            gift_seed: payload.plant_type,
            advice: payload.advice,
            fallback: payload.fallback,
        }
    }
}
