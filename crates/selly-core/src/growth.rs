//! Time-driven plant growth.
//!
//! A plant's stage is recomputed from its absolute age on every evaluation
//! rather than stepped forward per tick, so a paused or irregular
//! re-evaluation loop can never miss a transition or drift.

use crate::plant::Plant;
use crate::types::GrowthStage;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Minimum ages at which a plant enters each stage after `seed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthThresholds {
    pub sprout: Duration,
    pub blooming: Duration,
    pub mature: Duration,
}

impl GrowthThresholds {
    /// Demo scale: sprout at 10s, blooming at 30s, mature at 60s.
    pub fn demo() -> Self {
        Self {
            sprout: Duration::from_secs(10),
            blooming: Duration::from_secs(30),
            mature: Duration::from_secs(60),
        }
    }

    /// Age at which `stage` is reached.
    pub fn threshold(&self, stage: GrowthStage) -> Duration {
        match stage {
            GrowthStage::Seed => Duration::ZERO,
            GrowthStage::Sprout => self.sprout,
            GrowthStage::Blooming => self.blooming,
            GrowthStage::Mature => self.mature,
        }
    }
}

impl Default for GrowthThresholds {
    fn default() -> Self {
        Self::demo()
    }
}

/// Stage reached by a plant of the given age. Highest threshold wins.
pub fn stage_for_age(age: Duration, thresholds: &GrowthThresholds) -> GrowthStage {
    if age >= thresholds.mature {
        GrowthStage::Mature
    } else if age >= thresholds.blooming {
        GrowthStage::Blooming
    } else if age >= thresholds.sprout {
        GrowthStage::Sprout
    } else {
        GrowthStage::Seed
    }
}

/// Re-evaluate every non-mature plant at `now`.
///
/// Returns the updated collection (same order) and whether any stage moved.
/// Mature plants are skipped. A stage never moves backwards, even if the
/// thresholds were raised since the last evaluation.
pub fn advance_all(
    plants: &[Plant],
    now: DateTime<Utc>,
    thresholds: &GrowthThresholds,
) -> (Vec<Plant>, bool) {
    let mut changed = false;
    let updated = plants
        .iter()
        .map(|plant| {
            if plant.stage.is_terminal() {
                return plant.clone();
            }
            let stage = plant.stage_at(now, thresholds);
            if stage != plant.stage {
                changed = true;
                Plant {
                    stage,
                    ..plant.clone()
                }
            } else {
                plant.clone()
            }
        })
        .collect();
    (updated, changed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlantType;
    use chrono::Duration as CDur;

    fn plant(id: &str, planted_at: DateTime<Utc>, stage: GrowthStage) -> Plant {
        Plant {
            id: id.into(),
            kind: PlantType::Sunflower,
            planted_at,
            stage,
            reply_id: format!("reply-{id}"),
            letter_id: format!("letter-{id}"),
        }
    }

    #[test]
    fn thresholds_are_inclusive() {
        let t = GrowthThresholds::demo();
        assert_eq!(stage_for_age(Duration::ZERO, &t), GrowthStage::Seed);
        assert_eq!(stage_for_age(Duration::from_millis(9_999), &t), GrowthStage::Seed);
        assert_eq!(stage_for_age(Duration::from_secs(10), &t), GrowthStage::Sprout);
        assert_eq!(stage_for_age(Duration::from_secs(29), &t), GrowthStage::Sprout);
        assert_eq!(stage_for_age(Duration::from_secs(30), &t), GrowthStage::Blooming);
        assert_eq!(stage_for_age(Duration::from_secs(60), &t), GrowthStage::Mature);
        assert_eq!(stage_for_age(Duration::from_secs(86_400), &t), GrowthStage::Mature);
    }

    #[test]
    fn stage_is_monotonic_in_age() {
        let t = GrowthThresholds::demo();
        let mut last = GrowthStage::Seed;
        for ms in (0..120_000u64).step_by(250) {
            let stage = stage_for_age(Duration::from_millis(ms), &t);
            assert!(stage >= last, "regressed at {ms}ms");
            assert_eq!(stage, stage_for_age(Duration::from_millis(ms), &t));
            last = stage;
        }
        assert_eq!(last, GrowthStage::Mature);
    }

    #[test]
    fn empty_garden_reports_no_change() {
        let (updated, changed) = advance_all(&[], Utc::now(), &GrowthThresholds::demo());
        assert!(updated.is_empty());
        assert!(!changed);
    }

    #[test]
    fn mature_plants_never_change() {
        let now = Utc::now();
        // Planted "in the future": recomputing would give seed.
        let p = plant("a", now + CDur::hours(1), GrowthStage::Mature);
        for offset in [0, 5, 45, 3600] {
            let (updated, changed) = advance_all(
                std::slice::from_ref(&p),
                now + CDur::seconds(offset),
                &GrowthThresholds::demo(),
            );
            assert!(!changed);
            assert_eq!(updated[0].stage, GrowthStage::Mature);
        }
    }

    #[test]
    fn advance_moves_seed_to_sprout_then_settles() {
        let t = GrowthThresholds::demo();
        let planted = Utc::now();
        let plants = vec![plant("a", planted, GrowthStage::Seed)];

        let now = planted + CDur::seconds(15);
        let (updated, changed) = advance_all(&plants, now, &t);
        assert!(changed);
        assert_eq!(updated[0].stage, GrowthStage::Sprout);

        let (again, changed) = advance_all(&updated, now, &t);
        assert!(!changed);
        assert_eq!(again, updated);
    }

    #[test]
    fn late_evaluation_jumps_straight_to_current_stage() {
        let t = GrowthThresholds::demo();
        let planted = Utc::now();
        let plants = vec![plant("a", planted, GrowthStage::Seed)];
        let (updated, changed) = advance_all(&plants, planted + CDur::seconds(45), &t);
        assert!(changed);
        assert_eq!(updated[0].stage, GrowthStage::Blooming);
    }

    #[test]
    fn raised_thresholds_do_not_regress_stage() {
        let planted = Utc::now();
        let plants = vec![plant("a", planted, GrowthStage::Blooming)];
        let slow = GrowthThresholds {
            sprout: Duration::from_secs(3600),
            blooming: Duration::from_secs(7200),
            mature: Duration::from_secs(10_800),
        };
        let (updated, changed) = advance_all(&plants, planted + CDur::seconds(5), &slow);
        assert!(!changed);
        assert_eq!(updated[0].stage, GrowthStage::Blooming);
    }

    #[test]
    fn order_is_preserved() {
        let t = GrowthThresholds::demo();
        let now = Utc::now();
        let plants = vec![
            plant("newest", now, GrowthStage::Seed),
            plant("middle", now - CDur::seconds(20), GrowthStage::Seed),
            plant("oldest", now - CDur::seconds(90), GrowthStage::Blooming),
        ];
        let (updated, changed) = advance_all(&plants, now, &t);
        assert!(changed);
        let ids: Vec<_> = updated.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["newest", "middle", "oldest"]);
        assert_eq!(updated[0].stage, GrowthStage::Seed);
        assert_eq!(updated[1].stage, GrowthStage::Sprout);
        assert_eq!(updated[2].stage, GrowthStage::Mature);
    }
}
