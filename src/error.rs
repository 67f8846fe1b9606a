use std::fmt;

/// Error type for pplxprobe operations
///
/// Classification results are never reported through this type;
/// see `crate::outcome::Outcome` for those.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// API key is empty or lacks the `pplx-` prefix
    InvalidApiKey
  , /// Request breaks the message ordering rules
    InvalidRequest(String)
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// HTTP client could not be built
    HttpClient(String)
  , /// Reading a file or the terminal failed
    Io(String)
  , /// Failed to parse a configuration file
    ParseError(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::InvalidApiKey => {
              write!(f,
                "API key should start with '{}'",
                crate::API_KEY_PREFIX
              )
            }
          , Error::InvalidRequest(msg) => {
              write!(f, "Invalid request: {}", msg)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::HttpClient(msg) => {
              write!(f, "HTTP client error: {}", msg)
            }
          , Error::Io(msg) => {
              write!(f, "I/O error: {}", msg)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error
{   fn from(e: std::io::Error) -> Self
    {   Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error
{   fn from(e: serde_json::Error) -> Self
    {   Error::ParseError(e.to_string())
    }
}
