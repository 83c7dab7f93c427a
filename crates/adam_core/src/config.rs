use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdamConfig {
    pub llm: LlmConfig,
    pub server: ServerConfig,
    pub sessions: SessionConfig,
    pub links: LinkConfig,
    pub pacing: PacingConfig,
    pub shipping: ShippingConfig,
}

impl AdamConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: AdamConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("LLM_PROVIDER") {
            self.llm.provider = v;
        }
        if let Ok(v) = std::env::var("LLM_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("OPENAI_BASE_URL") {
            self.llm.base_url = Some(v);
        }
        if let Ok(v) = std::env::var("ADAM_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = std::env::var("ADAM_PORT") {
            if let Ok(n) = v.parse() {
                self.server.port = n;
            }
        }
        if let Ok(v) = std::env::var("ADAM_PACING") {
            self.pacing.enabled = matches!(v.as_str(), "1" | "true" | "on");
        }
        if let Ok(v) = std::env::var("ADAM_SESSION_CAPACITY") {
            if let Ok(n) = v.parse() {
                self.sessions.capacity = n;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// "openai" or "mock".
    pub provider: String,
    pub model: String,
    pub base_url: Option<String>,
    /// Upstream request timeout. Unset means the call waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4.1-mini".to_string(),
            base_url: None,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum number of fingerprints kept in memory.
    pub capacity: usize,
    /// Gap after which a creator-mode turn gets the silence observation.
    pub silence_secs: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capacity: 2000,
            silence_secs: 180,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    pub store_url: String,
    pub coming_soon_url: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            store_url: "https://www.derekheiskell.com/shop".to_string(),
            coming_soon_url: "https://www.derekheiskell.com/artificial".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub enabled: bool,
    /// `[min, max]` milliseconds per tier.
    pub quick_ms: [u64; 2],
    pub normal_ms: [u64; 2],
    pub dramatic_ms: [u64; 2],
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            quick_ms: [150, 400],
            normal_ms: [400, 900],
            dramatic_ms: [900, 1800],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShippingConfig {
    pub incentive_code: String,
}

impl Default for ShippingConfig {
    fn default() -> Self {
        Self {
            incentive_code: "ADAMOVERRIDE".to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = AdamConfig::default();
        assert_eq!(cfg.llm.provider, "openai");
        assert_eq!(cfg.llm.model, "gpt-4.1-mini");
        assert!(cfg.llm.timeout_secs.is_none());
        assert_eq!(cfg.sessions.capacity, 2000);
        assert_eq!(cfg.sessions.silence_secs, 180);
        assert!(cfg.pacing.enabled);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[llm]
provider = "mock"
"#;
        let cfg: AdamConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.llm.provider, "mock");
        // Defaults for unspecified fields
        assert_eq!(cfg.llm.model, "gpt-4.1-mini");
        assert_eq!(cfg.server.port, 3000);
        assert!(cfg.links.store_url.ends_with("/shop"));
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[llm]
provider = "openai"
model = "gpt-4o"
base_url = "http://localhost:8080/v1"
timeout_secs = 30

[server]
host = "127.0.0.1"
port = 8088

[sessions]
capacity = 50
silence_secs = 60

[links]
store_url = "https://example.com/store"
coming_soon_url = "https://example.com/soon"

[pacing]
enabled = false
quick_ms = [10, 20]
normal_ms = [20, 30]
dramatic_ms = [30, 40]

[shipping]
incentive_code = "FREESHIP"
"#;
        let cfg: AdamConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.llm.model, "gpt-4o");
        assert_eq!(cfg.llm.timeout_secs, Some(30));
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8088);
        assert_eq!(cfg.sessions.capacity, 50);
        assert_eq!(cfg.links.coming_soon_url, "https://example.com/soon");
        assert!(!cfg.pacing.enabled);
        assert_eq!(cfg.pacing.dramatic_ms, [30, 40]);
        assert_eq!(cfg.shipping.incentive_code, "FREESHIP");
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        // Part 1: env overrides
        std::env::set_var("LLM_PROVIDER", "mock");
        std::env::set_var("ADAM_PORT", "9191");

        let mut cfg = AdamConfig::default();
        cfg.apply_env_overrides();

        assert_eq!(cfg.llm.provider, "mock");
        assert_eq!(cfg.server.port, 9191);

        std::env::remove_var("LLM_PROVIDER");
        std::env::remove_var("ADAM_PORT");

        // Part 2: nonexistent path returns defaults (no env interference)
        let cfg = AdamConfig::load_or_default("/nonexistent/adam.toml");
        assert_eq!(cfg.llm.provider, "openai");
    }
}
