use crate::growth::{stage_for_age, GrowthThresholds};
use crate::reply::Reply;
use crate::types::{GrowthStage, PlantType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    pub kind: PlantType,
    pub planted_at: DateTime<Utc>,
    pub stage: GrowthStage,
    pub reply_id: String,
    pub letter_id: String,
}

impl Plant {
    /// A fresh seed grown from `reply`'s gift.
    pub(crate) fn from_reply(reply: &Reply, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: reply.gift_seed,
            planted_at: now,
            stage: GrowthStage::Seed,
            reply_id: reply.id.clone(),
            letter_id: reply.letter_id.clone(),
        }
    }

    /// Time since planting. Clock skew that puts `now` before planting
    /// counts as zero.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.planted_at).to_std().unwrap_or(Duration::ZERO)
    }

    pub fn stage_at(&self, now: DateTime<Utc>, thresholds: &GrowthThresholds) -> GrowthStage {
        stage_for_age(self.age(now), thresholds).max(self.stage)
    }

    /// How long until the plant reaches its next stage, `None` once mature.
    pub fn next_stage_in(
        &self,
        now: DateTime<Utc>,
        thresholds: &GrowthThresholds,
    ) -> Option<Duration> {
        let next = self.stage_at(now, thresholds).next()?;
        Some(thresholds.threshold(next).saturating_sub(self.age(now)))
    }
}
