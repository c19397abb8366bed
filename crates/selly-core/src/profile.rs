use crate::error::{GardenError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(default)]
    pub onboarded: bool,
    /// Consecutive nights with a letter. Stored but not yet maintained.
    #[serde(default)]
    pub streak: u32,
}

impl UserProfile {
    pub fn new(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GardenError::InvalidName(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            onboarded: true,
            streak: 0,
        })
    }
}
