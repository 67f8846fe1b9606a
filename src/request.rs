//! Request and response wire types for the chat completions endpoint

use serde::{Deserialize, Serialize};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role
{   System
  , User
  , Assistant
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: Role
  , pub content: String
}

impl ChatMessage
{   pub fn system(content: impl Into<String>) -> Self
    {   ChatMessage { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self
    {   ChatMessage { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self
    {   ChatMessage { role: Role::Assistant, content: content.into() }
    }
}

/// Body of a `POST /chat/completions` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub max_tokens: u32
  , pub temperature: f64
  , pub stream: bool
}

impl ApiRequest
{   /// Build the fixed two-message request this client sends:
    /// the system prompt followed by one user message.
    pub fn sonar(
      system_prompt: &str
    , user_message: &str
    ) -> Self
    {   ApiRequest
        {   model: crate::DEFAULT_MODEL.to_string()
          , messages: vec![
              ChatMessage::system(system_prompt)
            , ChatMessage::user(user_message)
            ]
          , max_tokens: crate::DEFAULT_MAX_TOKENS
          , temperature: crate::DEFAULT_TEMPERATURE
          , stream: false
        }
    }

    /// Build a request from configuration, for one user message
    pub fn from_config(
      config: &crate::config::ProbeConfig
    , user_message: &str
    ) -> Self
    {   let mut messages = Vec::with_capacity(2);
        if !config.system_prompt.is_empty()
        {   messages.push(
              ChatMessage::system(config.system_prompt.as_str())
            );
        }
        messages.push(ChatMessage::user(user_message));

        ApiRequest
        {   model: config.model.clone()
          , messages
          , max_tokens: config.max_tokens
          , temperature: config.temperature
          , stream: false
        }
    }

    /// Check message ordering: non-empty, a system message may only
    /// appear first, and at least one message comes from the user.
    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   if self.messages.is_empty()
        {   return Err(crate::error::Error::InvalidRequest(
              "messages must not be empty".to_string()
            ));
        }

        if let Some(pos) = self.messages
          .iter()
          .skip(1)
          .position(|m| m.role == Role::System)
        {   return Err(crate::error::Error::InvalidRequest(
              format!(
                "system message at index {} must come first",
                pos + 1
              )
            ));
        }

        if !self.messages.iter().any(|m| m.role == Role::User)
        {   return Err(crate::error::Error::InvalidRequest(
              "at least one user message is required".to_string()
            ));
        }

        if self.stream
        {   return Err(crate::error::Error::InvalidRequest(
              "streaming responses are not supported".to_string()
            ));
        }

        Ok(())
    }

    /// The user message the request asks about (last one wins)
    pub fn user_message(&self) -> Option<&str>
    {   self.messages
          .iter()
          .rev()
          .find(|m| m.role == Role::User)
          .map(|m| m.content.as_str())
    }
}

// ===== Response Types =====
//
// Every field is optional so that a missing key decodes cleanly and
// the classifier decides what counts as malformed.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse
{   #[serde(default)]
    pub choices: Option<Vec<Choice>>
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice
{   #[serde(default)]
    pub message: Option<ChoiceMessage>
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoiceMessage
{   #[serde(default)]
    pub content: Option<String>
}

impl ChatResponse
{   /// `choices[0].message.content`, if every step is present
    pub fn first_content(&self) -> Option<&str>
    {   self.choices
          .as_ref()?
          .first()?
          .message
          .as_ref()?
          .content
          .as_deref()
    }

    pub fn has_choices(&self) -> bool
    {   self.choices
          .as_ref()
          .map(|c| !c.is_empty())
          .unwrap_or(false)
    }
}
