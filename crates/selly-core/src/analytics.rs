//! Mood statistics over the letter history.

use crate::letter::Letter;
use crate::types::Emotion;
use serde::Serialize;
use std::collections::HashMap;

/// Number of letters shown in the intensity trend.
pub const TREND_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodPoint {
    /// `MM/dd` of the letter.
    pub date: String,
    pub intensity: u8,
    pub emotion: Emotion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionShare {
    pub emotion: Emotion,
    pub count: usize,
    /// Share of all letters, rounded to the nearest whole percent.
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodSummary {
    pub total: usize,
    /// Oldest first, at most [`TREND_LEN`] entries.
    pub trend: Vec<MoodPoint>,
    /// Most frequent emotion first.
    pub distribution: Vec<EmotionShare>,
}

impl MoodSummary {
    /// A trend line needs at least two points to say anything.
    pub fn has_trend(&self) -> bool {
        self.trend.len() > 1
    }
}

pub fn summarize(letters: &[Letter]) -> MoodSummary {
    let mut chronological: Vec<&Letter> = letters.iter().collect();
    chronological.sort_by_key(|l| l.created_at);
    let skip = chronological.len().saturating_sub(TREND_LEN);
    let trend = chronological
        .into_iter()
        .skip(skip)
        .map(|l| MoodPoint {
            date: l.created_at.format("%m/%d").to_string(),
            intensity: l.intensity,
            emotion: l.emotion,
        })
        .collect();

    let mut counts: HashMap<Emotion, usize> = HashMap::new();
    for letter in letters {
        *counts.entry(letter.emotion).or_default() += 1;
    }
    let total = letters.len();
    let mut distribution: Vec<EmotionShare> = counts
        .into_iter()
        .map(|(emotion, count)| EmotionShare {
            emotion,
            count,
            percent: ((count as f64 / total as f64) * 100.0).round() as u32,
        })
        .collect();
    // Ties resolve in catalogue order so output is stable.
    distribution.sort_by(|a, b| b.count.cmp(&a.count).then(a.emotion.cmp(&b.emotion)));

    MoodSummary {
        total,
        trend,
        distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn letter(day: u32, emotion: Emotion, intensity: u8) -> Letter {
        Letter::new(
            format!("day {day}"),
            emotion,
            intensity,
            Default::default(),
            Default::default(),
            Utc.with_ymd_and_hms(2026, 3, day, 22, 0, 0).unwrap(),
        )
    }

    #[test]
    fn empty_history() {
        let s = summarize(&[]);
        assert_eq!(s.total, 0);
        assert!(s.trend.is_empty());
        assert!(s.distribution.is_empty());
        assert!(!s.has_trend());
    }

    #[test]
    fn trend_keeps_last_seven_oldest_first() {
        // Stored newest first, like the letters collection.
        let letters: Vec<Letter> = (1..=9)
            .rev()
            .map(|d| letter(d, Emotion::Calm, (d % 5 + 1) as u8))
            .collect();
        let s = summarize(&letters);
        assert_eq!(s.trend.len(), TREND_LEN);
        assert_eq!(s.trend[0].date, "03/03");
        assert_eq!(s.trend[6].date, "03/09");
        assert!(s.has_trend());
    }

    #[test]
    fn distribution_percentages_round() {
        let letters = vec![
            letter(1, Emotion::Joy, 4),
            letter(2, Emotion::Sad, 2),
            letter(3, Emotion::Joy, 5),
        ];
        let s = summarize(&letters);
        assert_eq!(s.distribution.len(), 2);
        assert_eq!(s.distribution[0].emotion, Emotion::Joy);
        assert_eq!(s.distribution[0].count, 2);
        assert_eq!(s.distribution[0].percent, 67);
        assert_eq!(s.distribution[1].percent, 33);
    }
}
