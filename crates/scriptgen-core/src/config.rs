use crate::retry::RetryPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `llm.api_key`.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts per call (including the first).
    pub max_retries: u32,
    /// Base delay in seconds; the wait before retry n is `backoff_factor * 2^n`.
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let p = RetryPolicy::default();
        Self {
            max_retries: p.max_retries(),
            backoff_factor: p.backoff_factor(),
        }
    }
}

/// How the three pipeline calls handle failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallMode {
    /// Route each call through the retry executor; incomplete steps skip their dependents.
    #[default]
    Retry,
    /// Call once; the first failure aborts the request.
    Direct,
}

impl std::str::FromStr for CallMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "retry" => Ok(CallMode::Retry),
            "direct" => Ok(CallMode::Direct),
            other => anyhow::bail!("unknown mode '{other}' (expected 'retry' or 'direct')"),
        }
    }
}

/// Language model endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API; `/completions` is appended.
    pub api_base: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// API key; `OPENAI_API_KEY` takes precedence when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo-instruct".to_string(),
            temperature: 0.9,
            max_tokens: 256,
            api_key: None,
            timeout_secs: 60,
        }
    }
}

/// Wikipedia lookup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WikipediaConfig {
    /// Language edition, e.g. "en".
    pub lang: String,
    /// Number of search hits to summarize.
    pub top_k_results: u32,
    /// Research text is cut to this many characters.
    pub doc_content_chars_max: usize,
    pub timeout_secs: u64,
    /// Full `api.php` URL; overrides `lang` (mirrors, local test servers).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            top_k_results: 3,
            doc_content_chars_max: 4000,
            timeout_secs: 30,
            api_url: None,
        }
    }
}

/// Global configuration loaded from `~/.config/scriptgen/config.toml`.
///
/// Loaded once at startup and passed down by reference; never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub mode: CallMode,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl AppConfig {
    /// Retry policy from the `[retry]` section or defaults.
    pub fn retry_policy(&self) -> Result<RetryPolicy> {
        let r = self.retry.unwrap_or_default();
        RetryPolicy::new(r.max_retries, r.backoff_factor).context("invalid [retry] section")
    }

    /// Resolve the API key, preferring `OPENAI_API_KEY` over the file value.
    pub fn api_key(&self) -> Result<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with_env(&self, env: Option<String>) -> Result<String> {
        env.filter(|k| !k.trim().is_empty())
            .or_else(|| self.llm.api_key.clone().filter(|k| !k.trim().is_empty()))
            .with_context(|| {
                format!("no API key: set {API_KEY_ENV} or llm.api_key in the config file")
            })
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("scriptgen")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AppConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let default_cfg = AppConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AppConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.mode, CallMode::Retry);
        assert_eq!(cfg.llm.temperature, 0.9);
        assert_eq!(cfg.wikipedia.top_k_results, 3);
        assert_eq!(cfg.wikipedia.doc_content_chars_max, 4000);
        assert!(cfg.retry.is_none());
        assert_eq!(cfg.retry_policy().unwrap(), RetryPolicy::default());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = AppConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: AppConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            mode = "direct"

            [llm]
            model = "gpt-4o-mini"
            api_key = "sk-file"

            [wikipedia]
            lang = "fr"
            top_k_results = 1

            [retry]
            max_retries = 3
            backoff_factor = 0.5
        "#;
        let cfg: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.mode, CallMode::Direct);
        assert_eq!(cfg.llm.model, "gpt-4o-mini");
        assert_eq!(cfg.llm.max_tokens, 256);
        assert_eq!(cfg.wikipedia.lang, "fr");
        assert_eq!(cfg.wikipedia.doc_content_chars_max, 4000);
        let p = cfg.retry_policy().unwrap();
        assert_eq!(p.max_retries(), 3);
        assert!((p.backoff_factor() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn partial_retry_section_fills_defaults() {
        let cfg: AppConfig = toml::from_str("[retry]\nmax_retries = 3\n").unwrap();
        let p = cfg.retry_policy().unwrap();
        assert_eq!(p.max_retries(), 3);
        assert_eq!(p.backoff_factor(), 1.0);

        let cfg: AppConfig = toml::from_str("[retry]\nbackoff_factor = 0.5\n").unwrap();
        let p = cfg.retry_policy().unwrap();
        assert_eq!(p.max_retries(), 5);
        assert_eq!(p.backoff_factor(), 0.5);
    }

    #[test]
    fn invalid_backoff_rejected() {
        let toml = r#"
            [retry]
            max_retries = 3
            backoff_factor = 0.0
        "#;
        let cfg: AppConfig = toml::from_str(toml).unwrap();
        assert!(cfg.retry_policy().is_err());
    }

    #[test]
    fn unknown_mode_rejected() {
        assert!(toml::from_str::<AppConfig>(r#"mode = "sometimes""#).is_err());
        assert!("sometimes".parse::<CallMode>().is_err());
        assert_eq!("DIRECT".parse::<CallMode>().unwrap(), CallMode::Direct);
    }

    #[test]
    fn env_key_wins_over_file() {
        let mut cfg = AppConfig::default();
        cfg.llm.api_key = Some("sk-file".into());
        assert_eq!(cfg.api_key_with_env(Some("sk-env".into())).unwrap(), "sk-env");
        assert_eq!(cfg.api_key_with_env(Some("  ".into())).unwrap(), "sk-file");
        assert_eq!(cfg.api_key_with_env(None).unwrap(), "sk-file");
        cfg.llm.api_key = None;
        assert!(cfg.api_key_with_env(None).is_err());
    }

    #[test]
    fn load_or_init_creates_then_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, AppConfig::default());

        fs::write(&path, "mode = \"direct\"\n").unwrap();
        let loaded = load_or_init_at(&path).unwrap();
        assert_eq!(loaded.mode, CallMode::Direct);
    }
}
