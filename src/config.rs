//! Configuration for the probe client

use std::path::Path;
use log::debug;
use serde::{Deserialize, Serialize};

/// Probe configuration
///
/// Every field has a default, so a JSON file only needs the keys it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig
{   /// Full URL of the chat completions endpoint
    pub endpoint: String
  , /// Model name sent with every request
    pub model: String
  , /// Value of the `User-Agent` header
    pub user_agent: String
  , /// System message placed before the user message; empty for none
    pub system_prompt: String
  , /// Request timeout in seconds
    pub timeout_secs: u64
  , /// Max tokens to generate
    pub max_tokens: u32
  , /// Temperature for sampling
    pub temperature: f64
}

impl Default for ProbeConfig
{   fn default() -> Self
    {   ProbeConfig
        {   endpoint: crate::DEFAULT_ENDPOINT.to_string()
          , model: crate::DEFAULT_MODEL.to_string()
          , user_agent: crate::DEFAULT_USER_AGENT.to_string()
          , system_prompt: crate::DEFAULT_SYSTEM_PROMPT.to_string()
          , timeout_secs: crate::DEFAULT_TIMEOUT_SECS
          , max_tokens: crate::DEFAULT_MAX_TOKENS
          , temperature: crate::DEFAULT_TEMPERATURE
        }
    }
}

impl ProbeConfig
{   /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>)
      -> Result<Self, crate::error::Error>
    {   let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn parse(json: &str) -> Result<Self, crate::error::Error>
    {   let config: ProbeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   let invalid = |msg: &str| -> Result<(), crate::error::Error> {
          Err(crate::error::Error::InvalidConfiguration(
            msg.to_string()
          ))
        };

        if !self.endpoint.starts_with("http://")
          && !self.endpoint.starts_with("https://")
        {   return invalid("endpoint must be an http(s) URL");
        }
        if self.model.trim().is_empty()
        {   return invalid("model must not be empty");
        }
        if self.timeout_secs == 0
        {   return invalid("timeout_secs must be greater than zero");
        }
        if self.max_tokens == 0
        {   return invalid("max_tokens must be greater than zero");
        }
        if !(0.0..=2.0).contains(&self.temperature)
        {   return invalid("temperature must be between 0 and 2");
        }
        Ok(())
    }
}
