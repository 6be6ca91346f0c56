use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
/// Roughly what fits a small local model's context window.
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 12_000;

/// Everything needed to reach the language model.
///
/// Built once at startup and passed to whatever performs a model call; the
/// page-range and PDF code never look at it.
#[derive(Clone, PartialEq)]
pub struct ModelConfig {
    pub model_name: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub temperature: f32,
    pub max_context_chars: usize,
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("model_name", &self.model_name)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_context_chars", &self.max_context_chars)
            .finish()
    }
}

impl ModelConfig {
    /// Read `MODEL_NAME`, `OPENAI_API_KEY`, `OPENAI_URL` and
    /// `MAX_CONTEXT_CHARS` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let max_context_chars = match non_empty("MAX_CONTEXT_CHARS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("MAX_CONTEXT_CHARS is not a number: {raw}")))?,
            None => DEFAULT_MAX_CONTEXT_CHARS,
        };

        Ok(ModelConfig {
            model_name: non_empty("MODEL_NAME").unwrap_or_default(),
            api_key: non_empty("OPENAI_API_KEY"),
            base_url: non_empty("OPENAI_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            temperature: DEFAULT_TEMPERATURE,
            max_context_chars,
        })
    }

    /// Apply per-run choices from the front end, then check the result.
    pub fn with_overrides(mut self, model_name: Option<String>, temperature: Option<f32>) -> Result<Self> {
        if let Some(model_name) = model_name {
            self.model_name = model_name;
        }
        if let Some(temperature) = temperature {
            self.temperature = temperature;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.model_name.trim().is_empty() {
            return Err(Error::Config(
                "no model name; set MODEL_NAME or pass --model".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(Error::Config(format!(
                "temperature must be between 0.0 and 1.0 (got {})",
                self.temperature
            )));
        }
        if self.max_context_chars == 0 {
            return Err(Error::Config("MAX_CONTEXT_CHARS must be positive".to_string()));
        }
        Ok(())
    }
}
