use serde::{Deserialize, Serialize};

use crate::domain::planner::PlannerConfig;

/// Configuration for the hangouts module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct HangoutsConfig {
    pub generator: GeneratorConfig,
    /// Slots are drawn between 1 and `horizon_days` days ahead.
    pub horizon_days: u32,
    pub slot_attempts: u32,
    pub conflict_buffer_minutes: u32,
    /// Campus clock offset from UTC, used for class times and "today".
    pub utc_offset_minutes: i32,
}

impl Default for HangoutsConfig {
    fn default() -> Self {
        let planner = PlannerConfig::default();
        Self {
            generator: GeneratorConfig::default(),
            horizon_days: planner.horizon_days,
            slot_attempts: planner.slot_attempts,
            conflict_buffer_minutes: planner.conflict_buffer_minutes,
            utc_offset_minutes: planner.utc_offset_minutes,
        }
    }
}

impl HangoutsConfig {
    pub fn planner(&self) -> PlannerConfig {
        PlannerConfig {
            horizon_days: self.horizon_days,
            slot_attempts: self.slot_attempts,
            conflict_buffer_minutes: self.conflict_buffer_minutes,
            utc_offset_minutes: self.utc_offset_minutes,
        }
    }
}

/// External generative model. Without an API key only the local planner is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct GeneratorConfig {
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key: None,
            timeout_ms: 5000,
        }
    }
}

impl GeneratorConfig {
    /// The API key, when the generator should be used at all.
    pub fn active_key(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_section_keeps_defaults() {
        let cfg: HangoutsConfig = serde_json::from_value(serde_json::json!({
            "utc_offset_minutes": -300,
            "generator": { "api_key": "secret" }
        }))
        .unwrap();
        assert_eq!(cfg.utc_offset_minutes, -300);
        assert_eq!(cfg.horizon_days, 14);
        assert_eq!(cfg.generator.timeout_ms, 5000);
        assert_eq!(cfg.generator.active_key(), Some("secret"));
    }

    #[test]
    fn generator_inactive_without_key_or_when_disabled() {
        let mut g = GeneratorConfig::default();
        assert_eq!(g.active_key(), None);
        g.api_key = Some("  ".into());
        assert_eq!(g.active_key(), None);
        g.api_key = Some("k".into());
        g.enabled = false;
        assert_eq!(g.active_key(), None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<HangoutsConfig, _> =
            serde_json::from_value(serde_json::json!({ "horizon": 3 }));
        assert!(res.is_err());
    }
}
