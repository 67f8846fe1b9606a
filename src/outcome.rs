//! Classification of a single API interaction
//!
//! `classify` turns whatever the transport produced into an `Outcome`.
//! It does no I/O and keeps no state, so the same input always yields
//! the same `Outcome`.

use std::fmt;
use log::{debug, trace};
use serde_json::error::Category;

/// Category of a failure that happened before any HTTP status arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind
{   Timeout
  , Connection
  , Other
}

/// Raw result of one request, as surfaced by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse
{   /// No HTTP status was received
    Transport
    {   kind: TransportErrorKind
      , detail: String
    }
  , /// A completed exchange, whatever its status
    Http
    {   status: u16
      , headers: Vec<(String, String)>
      , body: String
    }
}

impl ApiResponse
{   pub fn transport(
      kind: TransportErrorKind
    , detail: impl Into<String>
    ) -> Self
    {   ApiResponse::Transport { kind, detail: detail.into() }
    }

    /// An exchange without headers, mostly useful in tests
    pub fn http(status: u16, body: impl Into<String>) -> Self
    {   ApiResponse::Http
        {   status
          , headers: vec![]
          , body: body.into()
        }
    }

    pub fn status(&self) -> Option<u16>
    {   match self
        {   ApiResponse::Http { status, .. } => Some(*status)
          , ApiResponse::Transport { .. } => None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind
{   Timeout
  , ConnectionError
  , HttpError
  , MalformedResponse
  , UnexpectedError
}

impl FailureKind
{   /// Troubleshooting hint shown next to a failure.
    /// `status` is only consulted for `HttpError`.
    pub fn hint(&self, status: Option<u16>) -> &'static str
    {   match (self, status)
        {   (FailureKind::Timeout, _) => {
              "The API did not answer in time; check your connection"
            }
          , (FailureKind::ConnectionError, _) => {
              "No connection to the API; check your network"
            }
          , (FailureKind::HttpError, Some(401)) => {
              "Invalid API key; check that it is correct and activated"
            }
          , (FailureKind::HttpError, Some(429)) => {
              "Rate limit exceeded; try again in a moment"
            }
          , (FailureKind::HttpError, Some(500..=599)) => {
              "The service is temporarily unavailable"
            }
          , (FailureKind::HttpError, _) => {
              "The API rejected the request; the model may not be \
               available on your plan"
            }
          , (FailureKind::MalformedResponse, _) => {
              "The API answered with an unexpected response body"
            }
          , (FailureKind::UnexpectedError, _) => {
              "An unexpected error occurred while sending the request"
            }
        }
    }
}

impl fmt::Display for FailureKind
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   let name = match self
        {   FailureKind::Timeout => "Timeout"
          , FailureKind::ConnectionError => "Connection error"
          , FailureKind::HttpError => "HTTP error"
          , FailureKind::MalformedResponse => "Malformed response"
          , FailureKind::UnexpectedError => "Unexpected error"
        };
        f.write_str(name)
    }
}

/// Result of classifying one interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome
{   Success
    {   message: String
    }
  , Failure
    {   kind: FailureKind
      , detail: String
    }
}

impl Outcome
{   pub fn failure(kind: FailureKind, detail: impl Into<String>) -> Self
    {   Outcome::Failure { kind, detail: detail.into() }
    }

    pub fn is_success(&self) -> bool
    {   matches!(self, Outcome::Success { .. })
    }

    /// The assistant message, on success
    pub fn message(&self) -> Option<&str>
    {   match self
        {   Outcome::Success { message } => Some(message)
          , Outcome::Failure { .. } => None
        }
    }

    pub fn kind(&self) -> Option<FailureKind>
    {   match self
        {   Outcome::Success { .. } => None
          , Outcome::Failure { kind, .. } => Some(*kind)
        }
    }

    pub fn detail(&self) -> Option<&str>
    {   match self
        {   Outcome::Success { .. } => None
          , Outcome::Failure { detail, .. } => Some(detail)
        }
    }
}

impl fmt::Display for Outcome
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   match self
        {   Outcome::Success { message } => {
              write!(f, "Success: {}", message)
            }
          , Outcome::Failure { kind, detail } => {
              write!(f, "{}: {}", kind, detail)
            }
        }
    }
}

/// Decide whether an interaction succeeded, and if not, why
pub fn classify(response: &ApiResponse) -> Outcome
{   match response
    {   ApiResponse::Transport { kind, detail } => {
          debug!("Classifying transport failure: {:?}", kind);
          let kind = match kind
          {   TransportErrorKind::Timeout => FailureKind::Timeout
            , TransportErrorKind::Connection => {
                FailureKind::ConnectionError
              }
            , TransportErrorKind::Other => FailureKind::UnexpectedError
          };
          Outcome::failure(kind, detail.as_str())
        }
      , ApiResponse::Http { status: 200, body, .. } => {
          classify_body(body)
        }
      , ApiResponse::Http { status, body, .. } => {
          debug!("Classifying HTTP {} as failure", status);
          Outcome::failure(
            FailureKind::HttpError
          , format!("HTTP {}: {}", status, body)
          )
        }
    }
}

fn classify_body(body: &str) -> Outcome
{   trace!("Classifying response body of {} bytes", body.len());

    let decoded: crate::request::ChatResponse
      = match serde_json::from_str(body)
      {   Ok(decoded) => decoded
        , Err(e) => {
            let detail = match e.classify()
            {   Category::Data => {
                  format!("Unexpected response shape: {}", e)
                }
              , Category::Syntax | Category::Eof | Category::Io => {
                  format!("Failed to parse response: {}", e)
                }
            };
            debug!("Malformed response body: {}", detail);
            return Outcome::failure(
              FailureKind::MalformedResponse
            , detail
            );
          }
      };

    if !decoded.has_choices()
    {   debug!("No choices in response");
        return Outcome::failure(
          FailureKind::MalformedResponse
        , "No choices in response"
        );
    }

    match decoded.first_content()
    {   Some(content) => Outcome::Success
        {   message: content.to_string()
        }
      , None => {
          debug!("First choice has no message content");
          Outcome::failure(
            FailureKind::MalformedResponse
          , "No message content in response"
          )
        }
    }
}
