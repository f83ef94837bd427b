/// Application-level constants
pub const APP_NAME: &str = "Ghostwriter";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default OpenAI-compatible endpoint for the optional LLM extraction path.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4.1-mini";
/// Characters of document text sent to the LLM.
pub const DEFAULT_LLM_MAX_INPUT_CHARS: usize = 12_000;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info"
}

/// Settings threaded into the pipeline entry points.
///
/// Nothing in the core reads the environment on its own; callers build this
/// once (usually via [`Settings::from_env`]) and pass it down.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// API key for the LLM backend. `None` disables the LLM path entirely.
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_max_input_chars: usize,
    pub llm_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm_api_key: None,
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_temperature: 0.0,
            llm_max_input_chars: DEFAULT_LLM_MAX_INPUT_CHARS,
            llm_timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            log_filter: default_log_filter().to_string(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `OPENAI_API_KEY` | `llm_api_key` (blank means unset) |
    /// | `GHOSTWRITER_LLM_BASE_URL` | `llm_base_url` |
    /// | `GHOSTWRITER_LLM_MODEL` | `llm_model` |
    /// | `GHOSTWRITER_LLM_TEMPERATURE` | `llm_temperature` |
    /// | `GHOSTWRITER_LLM_MAX_INPUT_CHARS` | `llm_max_input_chars` |
    /// | `GHOSTWRITER_LLM_TIMEOUT_SECS` | `llm_timeout_secs` |
    /// | `GHOSTWRITER_LOG` | `log_filter` |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Unparseable numbers keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            llm_api_key: get("OPENAI_API_KEY"),
            llm_base_url: get("GHOSTWRITER_LLM_BASE_URL").unwrap_or(defaults.llm_base_url),
            llm_model: get("GHOSTWRITER_LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_temperature: get("GHOSTWRITER_LLM_TEMPERATURE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.llm_temperature),
            llm_max_input_chars: get("GHOSTWRITER_LLM_MAX_INPUT_CHARS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.llm_max_input_chars),
            llm_timeout_secs: get("GHOSTWRITER_LLM_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.llm_timeout_secs),
            log_filter: get("GHOSTWRITER_LOG").unwrap_or(defaults.log_filter),
        }
    }

    pub fn with_llm_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.llm_api_key = if key.trim().is_empty() { None } else { Some(key) };
        self
    }

    pub fn llm_enabled(&self) -> bool {
        self.llm_api_key.is_some()
    }
}
