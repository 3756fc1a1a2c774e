use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API key for the Gemini API. The GEMINI_API_KEY environment
    /// variable takes precedence when set.
    #[serde(default)]
    pub api_key: String,

    /// Optional custom API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Enable debug logging to a file
    #[serde(default)]
    pub debug: bool,

    /// Optional override for the debug log file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: String::new(),
            api_base: None,
            debug: false,
            debug_log_path: None,
        }
    }
}

impl Config {
    /// Resolve the effective API key: environment first, then config file.
    ///
    /// Returns `None` when neither yields a non-empty value.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                return Some(key);
            }
        }
        let key = self.api_key.trim();
        if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        }
    }

    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or("https://generativelanguage.googleapis.com")
    }
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}
