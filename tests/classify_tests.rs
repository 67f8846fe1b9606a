use pplxprobe::{
  classify, ApiResponse, FailureKind, Outcome, TransportErrorKind
};

fn assert_failure(outcome: &Outcome, kind: FailureKind)
{   assert_eq!(
      outcome.kind(),
      Some(kind),
      "unexpected outcome: {:?}",
      outcome
    );
}

#[test]
fn test_transport_failures_keep_detail()
{   let cases = [
      ( TransportErrorKind::Timeout
      , FailureKind::Timeout
      , "Request timed out after 30 seconds"
      )
    , ( TransportErrorKind::Connection
      , FailureKind::ConnectionError
      , "Connection error - check internet connection"
      )
    , ( TransportErrorKind::Other
      , FailureKind::UnexpectedError
      , "builder error: relative URL without a base"
      )
    ];

    for (transport, expected, detail) in cases
    {   let outcome = classify(
          &ApiResponse::transport(transport, detail)
        );
        assert_eq!(outcome, Outcome::failure(expected, detail));
    }
}

#[test]
fn test_success_extracts_first_content()
{   let outcome = classify(&ApiResponse::http(
      200,
      r#"{"choices":[{"message":{"content":"4"}}]}"#
    ));
    assert_eq!(
      outcome,
      Outcome::Success { message: "4".to_string() }
    );
    assert_eq!(outcome.message(), Some("4"));
}

#[test]
fn test_success_ignores_extra_fields()
{   let body = r#"{
      "id": "abc",
      "model": "sonar",
      "citations": ["https://example.com"],
      "choices": [
        { "index": 0
        , "finish_reason": "stop"
        , "message": { "role": "assistant", "content": "2 + 2 = 4" }
        },
        { "message": { "role": "assistant", "content": "ignored" } }
      ],
      "usage": { "total_tokens": 12 }
    }"#;
    let outcome = classify(&ApiResponse::http(200, body));
    assert_eq!(outcome.message(), Some("2 + 2 = 4"));
}

#[test]
fn test_empty_choices_is_malformed()
{   let outcome = classify(&ApiResponse::http(200, r#"{"choices":[]}"#));
    assert_eq!(
      outcome,
      Outcome::failure(
        FailureKind::MalformedResponse,
        "No choices in response"
      )
    );
}

#[test]
fn test_missing_or_null_choices_is_malformed()
{   for body in [r#"{}"#, r#"{"choices":null}"#, r#"{"id":"x"}"#]
    {   let outcome = classify(&ApiResponse::http(200, body));
        assert_eq!(outcome.detail(), Some("No choices in response"));
    }
}

#[test]
fn test_missing_content_is_malformed()
{   for body in [
      r#"{"choices":[{}]}"#
    , r#"{"choices":[{"message":{}}]}"#
    , r#"{"choices":[{"message":{"content":null}}]}"#
    ]
    {   let outcome = classify(&ApiResponse::http(200, body));
        assert_eq!(
          outcome,
          Outcome::failure(
            FailureKind::MalformedResponse,
            "No message content in response"
          )
        );
    }
}

#[test]
fn test_wrong_types_are_malformed()
{   for body in [
      r#"{"choices":{"message":"x"}}"#
    , r#"{"choices":[{"message":{"content":4}}]}"#
    , r#"{"choices":["x"]}"#
    , r#""just a string""#
    ]
    {   let outcome = classify(&ApiResponse::http(200, body));
        assert_failure(&outcome, FailureKind::MalformedResponse);
        assert!(
          outcome.detail()
            .unwrap_or("")
            .starts_with("Unexpected response shape: ")
        );
    }
}

#[test]
fn test_non_json_body_is_malformed()
{   let outcome = classify(&ApiResponse::http(200, "not json"));
    assert_failure(&outcome, FailureKind::MalformedResponse);
    let detail = outcome.detail().unwrap_or("");
    assert!(detail.starts_with("Failed to parse response: "));
    assert!(detail.len() > "Failed to parse response: ".len());
}

#[test]
fn test_empty_body_is_malformed()
{   let outcome = classify(&ApiResponse::http(200, ""));
    assert_failure(&outcome, FailureKind::MalformedResponse);
}

#[test]
fn test_non_200_is_http_error()
{   let outcome = classify(&ApiResponse::http(401, "Unauthorized"));
    assert_eq!(
      outcome,
      Outcome::failure(FailureKind::HttpError, "HTTP 401: Unauthorized")
    );
}

#[test]
fn test_non_200_success_status_is_http_error()
{   // only 200 is parsed; a 201 with a valid body still fails
    let outcome = classify(&ApiResponse::http(
      201,
      r#"{"choices":[{"message":{"content":"4"}}]}"#
    ));
    assert_failure(&outcome, FailureKind::HttpError);
    assert!(outcome.detail().unwrap_or("").starts_with("HTTP 201: {"));
}

#[test]
fn test_http_error_keeps_raw_body()
{   let body = r#"{"error":{"message":"Invalid model","type":"invalid_model"}}"#;
    let outcome = classify(&ApiResponse::http(400, body));
    assert_eq!(outcome.detail(), Some(format!("HTTP 400: {}", body).as_str()));
}

#[test]
fn test_classify_is_idempotent()
{   let inputs = [
      ApiResponse::http(200, r#"{"choices":[{"message":{"content":"4"}}]}"#)
    , ApiResponse::http(200, "not json")
    , ApiResponse::http(503, "Service Unavailable")
    , ApiResponse::transport(TransportErrorKind::Timeout, "timed out")
    ];

    for input in &inputs
    {   assert_eq!(classify(input), classify(input));
    }
}

#[test]
fn test_outcome_display()
{   let success = Outcome::Success { message: "4".to_string() };
    assert_eq!(success.to_string(), "Success: 4");

    let failure = Outcome::failure(
      FailureKind::HttpError,
      "HTTP 401: Unauthorized"
    );
    assert_eq!(failure.to_string(), "HTTP error: HTTP 401: Unauthorized");
    assert!(!failure.is_success());
    assert_eq!(failure.message(), None);
}

#[test]
fn test_hints_follow_status()
{   let kind = FailureKind::HttpError;
    assert!(kind.hint(Some(401)).contains("Invalid API key"));
    assert!(kind.hint(Some(429)).contains("Rate limit"));
    assert!(kind.hint(Some(502)).contains("temporarily unavailable"));
    assert_ne!(kind.hint(Some(400)), kind.hint(Some(401)));
    assert!(FailureKind::Timeout.hint(None).contains("in time"));
}
