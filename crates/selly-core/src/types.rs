use crate::error::GardenError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalise user input such as `forget-me-not` or `Joy` to the wire form.
fn normalise(s: &str) -> String {
    s.trim().replace('-', "_").to_ascii_uppercase()
}

// ---------------------------------------------------------------------------
// Emotion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Emotion {
    Joy,
    Calm,
    Anxious,
    Sad,
    Angry,
    Tired,
}

impl Emotion {
    pub fn all() -> &'static [Emotion] {
        &[
            Emotion::Joy,
            Emotion::Calm,
            Emotion::Anxious,
            Emotion::Sad,
            Emotion::Angry,
            Emotion::Tired,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Joy => "JOY",
            Emotion::Calm => "CALM",
            Emotion::Anxious => "ANXIOUS",
            Emotion::Sad => "SAD",
            Emotion::Angry => "ANGRY",
            Emotion::Tired => "TIRED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Calm => "calm",
            Emotion::Anxious => "anxiety",
            Emotion::Sad => "sadness",
            Emotion::Angry => "anger",
            Emotion::Tired => "tiredness",
        }
    }

    /// The plant that symbolises this emotion in the garden.
    pub fn signature_plant(self) -> PlantType {
        match self {
            Emotion::Joy => PlantType::Sunflower,
            Emotion::Calm => PlantType::Lavender,
            Emotion::Anxious => PlantType::Cactus,
            Emotion::Sad => PlantType::ForgetMeNot,
            Emotion::Angry => PlantType::Rose,
            Emotion::Tired => PlantType::Chamomile,
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Emotion {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise(s);
        Emotion::all()
            .iter()
            .copied()
            .find(|e| e.as_str() == wanted)
            .ok_or_else(|| GardenError::UnknownEmotion(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// What the day was about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Context {
    Work,
    Relationship,
    Health,
    Future,
    Money,
    Family,
    Daily,
    Myself,
}

impl Context {
    pub fn all() -> &'static [Context] {
        &[
            Context::Work,
            Context::Relationship,
            Context::Health,
            Context::Future,
            Context::Money,
            Context::Family,
            Context::Daily,
            Context::Myself,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Context::Work => "WORK",
            Context::Relationship => "RELATIONSHIP",
            Context::Health => "HEALTH",
            Context::Future => "FUTURE",
            Context::Money => "MONEY",
            Context::Family => "FAMILY",
            Context::Daily => "DAILY",
            Context::Myself => "MYSELF",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Context::Work => "work/study",
            Context::Relationship => "relationships",
            Context::Health => "health",
            Context::Future => "future/career",
            Context::Money => "money",
            Context::Family => "family",
            Context::Daily => "everyday life",
            Context::Myself => "myself",
        }
    }

    pub fn group(self) -> &'static str {
        match self {
            Context::Relationship | Context::Family => "social",
            Context::Work | Context::Future | Context::Money => "work & future",
            Context::Health | Context::Daily | Context::Myself => "personal",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Context {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise(s);
        Context::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| GardenError::UnknownContext(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Physical or mental state reported alongside a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Insomnia,
    Stress,
    Headache,
    Lethargy,
    Confusion,
    Appetite,
    Focus,
    Ok,
}

impl Status {
    pub fn all() -> &'static [Status] {
        &[
            Status::Insomnia,
            Status::Stress,
            Status::Headache,
            Status::Lethargy,
            Status::Confusion,
            Status::Appetite,
            Status::Focus,
            Status::Ok,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Insomnia => "INSOMNIA",
            Status::Stress => "STRESS",
            Status::Headache => "HEADACHE",
            Status::Lethargy => "LETHARGY",
            Status::Confusion => "CONFUSION",
            Status::Appetite => "APPETITE",
            Status::Focus => "FOCUS",
            Status::Ok => "OK",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Insomnia => "can't sleep",
            Status::Stress => "stressed",
            Status::Headache => "headache/pain",
            Status::Lethargy => "lethargic",
            Status::Confusion => "racing thoughts",
            Status::Appetite => "appetite changes",
            Status::Focus => "can't focus",
            Status::Ok => "body feels fine",
        }
    }

    pub fn group(self) -> &'static str {
        match self {
            Status::Stress | Status::Confusion | Status::Lethargy | Status::Focus => "mental",
            Status::Insomnia | Status::Headache | Status::Appetite => "physical",
            Status::Ok => "general",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise(s);
        Status::all()
            .iter()
            .copied()
            .find(|st| st.as_str() == wanted)
            .ok_or_else(|| GardenError::UnknownStatus(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// PlantType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlantType {
    Sunflower,
    Lavender,
    Cactus,
    ForgetMeNot,
    Rose,
    Chamomile,
    Unknown,
}

impl PlantType {
    pub fn all() -> &'static [PlantType] {
        &[
            PlantType::Sunflower,
            PlantType::Lavender,
            PlantType::Cactus,
            PlantType::ForgetMeNot,
            PlantType::Rose,
            PlantType::Chamomile,
            PlantType::Unknown,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlantType::Sunflower => "SUNFLOWER",
            PlantType::Lavender => "LAVENDER",
            PlantType::Cactus => "CACTUS",
            PlantType::ForgetMeNot => "FORGET_ME_NOT",
            PlantType::Rose => "ROSE",
            PlantType::Chamomile => "CHAMOMILE",
            PlantType::Unknown => "UNKNOWN",
        }
    }

    /// Parse a seed designation coming from a reply generator.
    ///
    /// Never fails: anything unrecognised becomes [`PlantType::Unknown`].
    pub fn from_designation(s: &str) -> PlantType {
        let wanted = normalise(s);
        PlantType::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == wanted)
            .unwrap_or(PlantType::Unknown)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PlantType::Sunflower => "Radiant Sunflower",
            PlantType::Lavender => "Serene Lavender",
            PlantType::Cactus => "Steadfast Cactus",
            PlantType::ForgetMeNot => "Forget-me-not",
            PlantType::Rose => "Wild Rose",
            PlantType::Chamomile => "Restful Chamomile",
            PlantType::Unknown => "Mystery Seed",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            PlantType::Sunflower => "🌻",
            PlantType::Lavender => "🪻",
            PlantType::Cactus => "🌵",
            PlantType::ForgetMeNot => "🫐",
            PlantType::Rose => "🌹",
            PlantType::Chamomile => "🌼",
            PlantType::Unknown => "🌱",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PlantType::Sunflower => "Grows from moments of joy.",
            PlantType::Lavender => "Blooms in quiet reflection.",
            PlantType::Cactus => "Holds firm through anxious days.",
            PlantType::ForgetMeNot => "Gently remembers a passing sadness.",
            PlantType::Rose => "Passion grown from fierce feelings.",
            PlantType::Chamomile => "Soothes a tired heart.",
            PlantType::Unknown => "A new beginning.",
        }
    }
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GrowthStage
// ---------------------------------------------------------------------------

/// Ordered growth stages. `Mature` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Seed,
    Sprout,
    Blooming,
    Mature,
}

impl GrowthStage {
    pub fn all() -> &'static [GrowthStage] {
        &[
            GrowthStage::Seed,
            GrowthStage::Sprout,
            GrowthStage::Blooming,
            GrowthStage::Mature,
        ]
    }

    pub fn next(self) -> Option<GrowthStage> {
        GrowthStage::all().get(self as usize + 1).copied()
    }

    pub fn is_terminal(self) -> bool {
        self == GrowthStage::Mature
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GrowthStage::Seed => "seed",
            GrowthStage::Sprout => "sprout",
            GrowthStage::Blooming => "blooming",
            GrowthStage::Mature => "mature",
        }
    }

    /// Emoji for the stage; a mature plant shows its own kind instead.
    pub fn emoji(self, kind: PlantType) -> &'static str {
        match self {
            GrowthStage::Seed => "🌱",
            GrowthStage::Sprout => "🌿",
            GrowthStage::Blooming => "🪴",
            GrowthStage::Mature => kind.emoji(),
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
