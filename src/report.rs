//! Human-readable rendering of probe requests and outcomes

use crate::outcome::{ApiResponse, Outcome};
use crate::request::ApiRequest;

pub const SEPARATOR: &str
  = "==================================================";

/// Printed after the first probe fails
pub const COMMON_ISSUES: &[&str] = &[
  "Invalid API key"
, "API key not activated"
, "Network connectivity issues"
, "Model not available on your plan"
];

/// What was sent, with the key masked
pub fn render_request(
  masked_key: &str
, endpoint: &str
, request: &ApiRequest
) -> Result<String, crate::error::Error>
{   let payload = serde_json::to_string_pretty(request)?;
    Ok(format!(
      "API key prefix: {}\n\
       Test message: {}\n\
       URL: {}\n\
       Model: {}\n\
       Request payload:\n\
       {}\n\
       {}",
      masked_key,
      request.user_message().unwrap_or(""),
      endpoint,
      request.model,
      payload,
      SEPARATOR
    ))
}

/// Status line, headers and body, or a note that none arrived
pub fn render_response(response: &ApiResponse) -> String
{   match response
    {   ApiResponse::Transport { kind, .. } => {
          format!("No HTTP response ({:?} failure)", kind)
        }
      , ApiResponse::Http { status, headers, body } => {
          let mut out = format!("Response status: {}", status);
          if !headers.is_empty()
          {   out.push_str("\nResponse headers:");
              for (name, value) in headers
              {   out.push_str(&format!("\n  {}: {}", name, value));
              }
          }
          out.push_str("\nResponse body:\n");
          out.push_str(&render_body(body));
          out
        }
    }
}

/// Pretty JSON when the body parses, the raw text otherwise
pub fn render_body(body: &str) -> String
{   serde_json::from_str::<serde_json::Value>(body)
      .ok()
      .and_then(|value| serde_json::to_string_pretty(&value).ok())
      .unwrap_or_else(|| body.to_string())
}

/// The outcome, followed by a hint when it is a failure
pub fn render_outcome(
  outcome: &Outcome
, response: &ApiResponse
) -> String
{   match outcome.kind()
    {   None => outcome.to_string()
      , Some(kind) => format!(
          "{}\nHint: {}",
          outcome,
          kind.hint(response.status())
        )
    }
}

/// Request, response and outcome of one finished probe
pub fn render_report(
  masked_key: &str
, endpoint: &str
, report: &crate::providers::ProbeReport
) -> Result<String, crate::error::Error>
{   Ok(format!(
      "{}\n{}\n{}",
      render_request(masked_key, endpoint, &report.request)?,
      render_response(&report.response),
      render_outcome(&report.outcome, &report.response)
    ))
}

pub fn render_common_issues() -> String
{   let issues: Vec<String> = COMMON_ISSUES
      .iter()
      .map(|issue| format!("- {}", issue))
      .collect();
    format!("Common issues:\n{}", issues.join("\n"))
}
