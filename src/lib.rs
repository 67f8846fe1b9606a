pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod outcome;
pub mod report;

/*

pplxprobe: a small debugging aid for the Perplexity chat
completions API. it sends one question at a time, prints what
went over the wire, and classifies what came back as either a
success carrying the assistant's answer or a failure of a
specific kind.

pplxprobe/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and shared constants
│   ├── main.rs         # Interactive shell (two probes in a row)
│   ├── error.rs        # Errors for config, key and request checks
│   ├── config.rs       # Endpoint, model, timeout and sampling knobs
│   ├── request.rs      # Request body and response decode types
│   ├── outcome.rs      # Transport result -> Outcome classifier
│   ├── report.rs       # Console rendering
│   └── providers/
│       ├── mod.rs
│       └── perplexity.rs   # reqwest transport
└── tests/

*/

pub use error::Error;
pub use config::ProbeConfig;
pub use outcome::{
  classify, ApiResponse, FailureKind, Outcome, TransportErrorKind
};
pub use providers::{PerplexityClient, ProbeReport};
pub use request::{ApiRequest, ChatMessage, Role};

// ===== Defaults =====

pub const DEFAULT_ENDPOINT: &str
  = "https://api.perplexity.ai/chat/completions";
pub const DEFAULT_MODEL: &str = "sonar";
pub const DEFAULT_USER_AGENT: &str = "AndroidAutoVoiceAssistant/1.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const API_KEY_PREFIX: &str = "pplx-";

pub const DEFAULT_SYSTEM_PROMPT: &str
  = "You are a helpful AI assistant designed for use while driving. \
     Keep responses concise, clear, and safe for audio consumption. \
     Avoid long lists or complex formatting. Provide direct, \
     actionable answers. Use web search when needed for current \
     information.";

/// Baseline question, answerable without live data
pub const BASELINE_MESSAGE: &str = "What is 2+2?";
/// Question that needs live information
pub const LIVE_MESSAGE: &str = "What's the weather like today?";
