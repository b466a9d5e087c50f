//! Engine configuration
//!
//! Endpoints and model selection for the two remote collaborators. Defaults
//! match the hosted Double Profit deployment; each value can be overridden
//! through the environment.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_STORE_BASE_URL: &str = "https://doubleprofit-backend.onrender.com";
const DEFAULT_GENAI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GENAI_MODEL: &str = "gemini-2.0-flash-exp";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Remote endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base URL of the record store API
    pub store_base_url: String,
    /// Base URL of the generative-language service
    pub genai_base_url: String,
    /// Model identifier passed to the generateContent endpoint
    pub genai_model: String,
    /// Request timeout applied to both HTTP clients
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            store_base_url: DEFAULT_STORE_BASE_URL.to_string(),
            genai_base_url: DEFAULT_GENAI_BASE_URL.to_string(),
            genai_model: DEFAULT_GENAI_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl EngineConfig {
    /// Build a config from the environment, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("DOUBLEPROFIT_STORE_URL") {
            config.store_base_url = url;
        }
        if let Ok(url) = std::env::var("DOUBLEPROFIT_GENAI_URL") {
            config.genai_base_url = url;
        }
        if let Ok(model) = std::env::var("DOUBLEPROFIT_GENAI_MODEL") {
            config.genai_model = model;
        }
        if let Ok(timeout) = std::env::var("DOUBLEPROFIT_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().map_err(|_| {
                AppError::Config(format!("Invalid DOUBLEPROFIT_TIMEOUT_SECS: {}", timeout))
            })?;
        }

        Ok(config)
    }
}
