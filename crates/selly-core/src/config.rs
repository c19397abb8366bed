use crate::error::{GardenError, Result};
use crate::growth::GrowthThresholds;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// TimeUnit
// ---------------------------------------------------------------------------

/// Unit the growth thresholds and check cadence are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    pub fn as_secs(self) -> u64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => 60,
            TimeUnit::Hours => 60 * 60,
            TimeUnit::Days => 24 * 60 * 60,
        }
    }

    pub fn duration(self, amount: u64) -> Duration {
        Duration::from_secs(amount.saturating_mul(self.as_secs()))
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = GardenError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "seconds" | "s" => Ok(TimeUnit::Seconds),
            "minutes" | "m" => Ok(TimeUnit::Minutes),
            "hours" | "h" => Ok(TimeUnit::Hours),
            "days" | "d" => Ok(TimeUnit::Days),
            _ => Err(GardenError::InvalidTimeUnit(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// GrowthConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthConfig {
    #[serde(default = "default_unit")]
    pub unit: TimeUnit,
    #[serde(default = "default_sprout")]
    pub sprout: u64,
    #[serde(default = "default_blooming")]
    pub blooming: u64,
    #[serde(default = "default_mature")]
    pub mature: u64,
    /// How often the garden is re-evaluated.
    #[serde(default = "default_check_every")]
    pub check_every: u64,
}

fn default_unit() -> TimeUnit {
    TimeUnit::Seconds
}

fn default_sprout() -> u64 {
    10
}

fn default_blooming() -> u64 {
    30
}

fn default_mature() -> u64 {
    60
}

fn default_check_every() -> u64 {
    2
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            unit: default_unit(),
            sprout: default_sprout(),
            blooming: default_blooming(),
            mature: default_mature(),
            check_every: default_check_every(),
        }
    }
}

impl GrowthConfig {
    pub fn thresholds(&self) -> GrowthThresholds {
        GrowthThresholds {
            sprout: self.unit.duration(self.sprout),
            blooming: self.unit.duration(self.blooming),
            mature: self.unit.duration(self.mature),
        }
    }

    /// Re-evaluation cadence, never shorter than a millisecond.
    pub fn interval(&self) -> Duration {
        self.unit
            .duration(self.check_every)
            .max(Duration::from_millis(1))
    }
}

// ---------------------------------------------------------------------------
// ReplyConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Minimum turnaround before a reply is delivered.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Substitute a fixed reply when generation fails.
    #[serde(default = "default_fallback")]
    pub fallback: bool,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_language() -> String {
    "English".to_string()
}

fn default_delay_ms() -> u64 {
    3000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_fallback() -> bool {
    true
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            language: default_language(),
            delay_ms: default_delay_ms(),
            timeout_secs: default_timeout_secs(),
            fallback: default_fallback(),
        }
    }
}

impl ReplyConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// StorageConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    File,
    Redb,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub growth: GrowthConfig,
    #[serde(default)]
    pub reply: ReplyConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load `config.yaml` from the data root, or defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Config::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let g = &self.growth;

        if !(g.sprout < g.blooming && g.blooming < g.mature) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "growth thresholds must increase: sprout={} blooming={} mature={}",
                    g.sprout, g.blooming, g.mature
                ),
            });
        }

        if g.check_every == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "growth.check_every is 0; the garden will be checked continuously"
                    .to_string(),
            });
        } else if g.check_every > g.sprout {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "growth.check_every={} is longer than the sprout threshold ({}); \
                     stage changes will show up late",
                    g.check_every, g.sprout
                ),
            });
        }

        if self.reply.model.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "reply.model is empty".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_demo_scale() {
        let cfg = Config::default();
        assert_eq!(cfg.growth.thresholds(), GrowthThresholds::demo());
        assert_eq!(cfg.growth.interval(), Duration::from_secs(2));
        assert_eq!(cfg.reply.delay(), Duration::from_millis(3000));
        assert_eq!(cfg.storage.backend, StorageBackend::File);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.reply.model, "gemini-2.5-flash");
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.yaml"),
            "growth:\n  unit: days\n  sprout: 1\n  blooming: 3\n  mature: 7\nstorage:\n  backend: redb\n",
        )
        .unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.growth.unit, TimeUnit::Days);
        assert_eq!(cfg.growth.thresholds().mature, Duration::from_secs(7 * 86_400));
        assert_eq!(cfg.growth.check_every, 2);
        assert_eq!(cfg.storage.backend, StorageBackend::Redb);
        assert_eq!(cfg.reply.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.reply.delay_ms = 0;
        cfg.growth.unit = TimeUnit::Minutes;
        cfg.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.reply.delay_ms, 0);
        assert_eq!(loaded.growth.unit, TimeUnit::Minutes);
    }

    #[test]
    fn non_increasing_thresholds_flagged() {
        let mut cfg = Config::default();
        cfg.growth.blooming = 5;
        let warnings = cfg.validate();
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("must increase")));
    }

    #[test]
    fn time_unit_parse() {
        use std::str::FromStr;
        assert_eq!(TimeUnit::from_str("days").unwrap(), TimeUnit::Days);
        assert_eq!(TimeUnit::from_str("m").unwrap(), TimeUnit::Minutes);
        assert!(matches!(
            TimeUnit::from_str("weeks"),
            Err(GardenError::InvalidTimeUnit(_))
        ));
    }
}
