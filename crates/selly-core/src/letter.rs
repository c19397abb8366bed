use crate::types::{Context, Emotion, Status};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 5;

/// A nightly journaling entry. Never edited once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Letter {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub content: String,
    pub emotion: Emotion,
    pub intensity: u8,
    #[serde(default)]
    pub contexts: BTreeSet<Context>,
    #[serde(default)]
    pub statuses: BTreeSet<Status>,
    #[serde(default)]
    pub read: bool,
}

impl Letter {
    pub(crate) fn new(
        content: String,
        emotion: Emotion,
        intensity: u8,
        contexts: BTreeSet<Context>,
        statuses: BTreeSet<Status>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            content,
            emotion,
            intensity,
            contexts,
            statuses,
            read: false,
        }
    }
}

pub fn intensity_in_range(intensity: u8) -> bool {
    (MIN_INTENSITY..=MAX_INTENSITY).contains(&intensity)
}
