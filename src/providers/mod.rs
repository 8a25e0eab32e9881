//! Clients for the upstream AI provider endpoints.
//!
//! The pipeline consumes three black-box inference services: speech-to-text,
//! chat completion, and text-to-speech. All three live behind one HTTP API
//! and one bearer credential, so a single [`OpenAiClient`] covers them.

mod openai;

pub use openai::OpenAiClient;

use thiserror::Error;

/// Failure of one upstream provider call. Any variant aborts the pipeline;
/// nothing is retried.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The HTTP request could not be completed (DNS, connect, TLS, timeout).
    #[error("{stage} request failed: {source}")]
    Transport {
        stage: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status. `body` carries the
    /// provider's error payload so it can be surfaced to the caller.
    #[error("{stage} returned HTTP {status}: {body}")]
    Status {
        stage: &'static str,
        status: u16,
        body: String,
    },

    /// The provider answered 2xx but the payload did not have the expected
    /// shape.
    #[error("{stage} response had unexpected shape: {detail}")]
    Decode { stage: &'static str, detail: String },
}

impl ProviderError {
    /// The message returned to the HTTP caller. Prefers the provider's own
    /// error payload when one exists, otherwise a generic per-stage message.
    pub fn client_message(&self) -> String {
        match self {
            ProviderError::Status { stage, body, .. } if !body.is_empty() => {
                format!("{stage} provider error: {body}")
            }
            ProviderError::Status { stage, status, .. } => {
                format!("{stage} provider returned HTTP {status}")
            }
            ProviderError::Transport { stage, .. } | ProviderError::Decode { stage, .. } => {
                format!("{stage} provider call failed")
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
