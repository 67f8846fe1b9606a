use std::time::Duration;
use log::{debug, trace, error, info};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::outcome::{ApiResponse, Outcome, TransportErrorKind};
use crate::request::ApiRequest;

/// Check that a key looks like a Perplexity key.
/// Returns the trimmed key.
pub fn validate_api_key(key: &str)
  -> Result<String, crate::error::Error>
{   let key = key.trim();
    if key.len() <= crate::API_KEY_PREFIX.len()
      || !key.starts_with(crate::API_KEY_PREFIX)
    {   error!("Rejecting API key without expected prefix");
        return Err(crate::error::Error::InvalidApiKey);
    }
    Ok(key.to_string())
}

/// First eight characters of the key followed by `...`
pub fn mask_api_key(key: &str) -> String
{   let prefix: String = key.chars().take(8).collect();
    format!("{}...", prefix)
}

/// One request with everything the shell wants to print about it
#[derive(Debug, Clone)]
pub struct ProbeReport
{   pub request: ApiRequest
  , pub response: ApiResponse
  , pub outcome: Outcome
}

/// Perplexity chat completions transport
pub struct PerplexityClient
{   api_key: String
  , config: crate::config::ProbeConfig
  , http_client: reqwest::Client
}

impl PerplexityClient
{   /// Validate the key and build an HTTP client with the configured
    /// timeout and user agent.
    pub fn new(
      api_key: &str
    , config: crate::config::ProbeConfig
    ) -> Result<Self, crate::error::Error>
    {   let api_key = validate_api_key(api_key)?;
        config.validate()?;
        debug!(
          "Creating PerplexityClient for key {}",
          mask_api_key(&api_key)
        );

        let http_client = reqwest::Client::builder()
          .timeout(Duration::from_secs(config.timeout_secs))
          .user_agent(config.user_agent.as_str())
          .build()
          .map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            crate::error::Error::HttpClient(e.to_string())
          })?;

        Ok(PerplexityClient
        {   api_key
          , config
          , http_client
        })
    }

    pub fn config(&self) -> &crate::config::ProbeConfig
    {   &self.config
    }

    pub fn masked_key(&self) -> String
    {   mask_api_key(&self.api_key)
    }

    /// Send one request and surface whatever came back.
    /// Never fails: transport errors become `ApiResponse::Transport`.
    pub async fn send(&self, request: &ApiRequest) -> ApiResponse
    {   debug!("Sending request to {}", self.config.endpoint);
        trace!("Perplexity request: {:?}", request);

        let response = match self.http_client
          .post(self.config.endpoint.as_str())
          .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
          .header(CONTENT_TYPE, "application/json")
          .json(request)
          .send()
          .await
        {   Ok(response) => response
          , Err(e) => {
              error!("HTTP error: {}", e);
              return self.transport_failure(e);
            }
        };

        let status = response.status().as_u16();
        trace!("Perplexity response status: {}", status);

        let headers: Vec<(String, String)>
          = response.headers()
            .iter()
            .map(|(name, value)| {
              ( name.as_str().to_string()
              , value.to_str()
                  .unwrap_or("<non-ascii>")
                  .to_string()
              )
            })
            .collect();

        match response.text().await
        {   Ok(body) => {
              debug!("Received {} byte body", body.len());
              ApiResponse::Http { status, headers, body }
            }
          , Err(e) => {
              error!("Failed to read response body: {}", e);
              self.transport_failure(e)
            }
        }
    }

    /// Build, validate, send and classify one question
    pub async fn probe(&self, user_message: &str)
      -> Result<ProbeReport, crate::error::Error>
    {   let request = ApiRequest::from_config(&self.config, user_message);
        request.validate()?;

        let response = self.send(&request).await;
        let outcome = crate::outcome::classify(&response);
        info!(
          "Probe finished: {}",
          if outcome.is_success() { "success" } else { "failure" }
        );

        Ok(ProbeReport { request, response, outcome })
    }

    /// Probe `first`, then `second` only if `first` succeeded.
    /// `on_report` sees each report as soon as it is classified.
    pub async fn probe_pair(
      &self
    , first: &str
    , second: &str
    , mut on_report: impl FnMut(usize, &ProbeReport)
    ) -> Result<(ProbeReport, Option<ProbeReport>), crate::error::Error>
    {   let first_report = self.probe(first).await?;
        on_report(1, &first_report);

        if !first_report.outcome.is_success()
        {   debug!("First probe failed, skipping second");
            return Ok((first_report, None));
        }

        let second_report = self.probe(second).await?;
        on_report(2, &second_report);
        Ok((first_report, Some(second_report)))
    }

    fn transport_failure(&self, e: reqwest::Error) -> ApiResponse
    {   if e.is_timeout()
        {   ApiResponse::transport(
              TransportErrorKind::Timeout
            , format!(
                "Request timed out after {} seconds",
                self.config.timeout_secs
              )
            )
        } else if e.is_connect()
        {   ApiResponse::transport(
              TransportErrorKind::Connection
            , format!(
                "Connection error - check internet connection ({})",
                e
              )
            )
        } else
        {   ApiResponse::transport(
              TransportErrorKind::Other
            , e.to_string()
            )
        }
    }
}
