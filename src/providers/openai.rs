//! OpenAI REST client for the three pipeline stages.
//!
//! One shared [`reqwest::Client`] (connection pool) serves every in-flight
//! request. Model and voice identifiers are fixed; only the base URL and the
//! credential come from configuration, which also lets tests point the
//! client at a mock server.

use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::providers::ProviderError;

const TRANSCRIPTION_MODEL: &str = "whisper-1";
const CHAT_MODEL: &str = "gpt-4o";
const SPEECH_MODEL: &str = "tts-1";
const SPEECH_VOICE: &str = "alloy";
const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Client for the speech-to-text, chat-completion, and text-to-speech
/// endpoints of one provider account.
#[derive(Debug)]
pub struct OpenAiClient {
    http: Client,
    api_base: String,
    api_key: String,
}

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Serialize)]
struct ChatRequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'static str,
    messages: [ChatRequestMessage<'a>; 2],
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'static str,
    input: &'a str,
    voice: &'static str,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        let http = Client::builder()
            .user_agent(concat!("voxpipe/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
        }
    }

    /// Speech-to-text: multipart upload of the stored audio file, plain
    /// transcript text back.
    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        file_name: &str,
    ) -> Result<String, ProviderError> {
        const STAGE: &str = "transcription";

        let part = reqwest::multipart::Part::bytes(audio).file_name(file_name.to_owned());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", TRANSCRIPTION_MODEL);

        let resp = self
            .http
            .post(format!("{}/audio/transcriptions", self.api_base))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|source| ProviderError::Transport { stage: STAGE, source })?;

        let resp = check_status(STAGE, resp).await?;
        let body: TranscriptionResponse =
            resp.json().await.map_err(|e| ProviderError::Decode {
                stage: STAGE,
                detail: e.to_string(),
            })?;

        debug!(transcript_len = body.text.len(), "transcription done");
        Ok(body.text)
    }

    /// Chat completion: the transcript as the sole user turn under a fixed
    /// system instruction; returns the first choice's text.
    pub async fn complete(&self, user_text: &str) -> Result<String, ProviderError> {
        const STAGE: &str = "chat";

        let req = ChatRequest {
            model: CHAT_MODEL,
            messages: [
                ChatRequestMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatRequestMessage {
                    role: "user",
                    content: user_text,
                },
            ],
        };

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .map_err(|source| ProviderError::Transport { stage: STAGE, source })?;

        let resp = check_status(STAGE, resp).await?;
        let body: ChatResponse = resp.json().await.map_err(|e| ProviderError::Decode {
            stage: STAGE,
            detail: e.to_string(),
        })?;

        let reply = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ProviderError::Decode {
                stage: STAGE,
                detail: "empty choices array".into(),
            })?;

        debug!(reply_len = reply.len(), "chat completion done");
        Ok(reply)
    }

    /// Text-to-speech: reply text in, binary audio out, fully buffered.
    pub async fn synthesize(&self, input: &str) -> Result<Bytes, ProviderError> {
        const STAGE: &str = "speech";

        let req = SpeechRequest {
            model: SPEECH_MODEL,
            input,
            voice: SPEECH_VOICE,
        };

        let resp = self
            .http
            .post(format!("{}/audio/speech", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .map_err(|source| ProviderError::Transport { stage: STAGE, source })?;

        let resp = check_status(STAGE, resp).await?;
        let audio = resp
            .bytes()
            .await
            .map_err(|source| ProviderError::Transport { stage: STAGE, source })?;

        debug!(audio_bytes = audio.len(), "speech synthesis done");
        Ok(audio)
    }
}

/// Turn a non-success response into [`ProviderError::Status`], keeping the
/// provider's error payload for the caller.
async fn check_status(
    stage: &'static str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ProviderError::Status {
        stage,
        status: status.as_u16(),
        body,
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> OpenAiClient {
        let config = Config {
            bind_address: "127.0.0.1:0".into(),
            api_key: "test-key".into(),
            api_base: server.url(),
            upload_dir: "uploads".into(),
            max_upload_bytes: 25 * 1024 * 1024,
            log_level: "info".into(),
            log_json: false,
            cors_allowed_origins: None,
            enable_swagger: false,
        };
        OpenAiClient::new(&config)
    }

    #[tokio::test]
    async fn transcribe_returns_text_field() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/audio/transcriptions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_body(r#"{"text":"hello world"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let text = client.transcribe(vec![1, 2, 3], "a.mp3").await.unwrap();
        assert_eq!(text, "hello world");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn transcribe_surfaces_error_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/audio/transcriptions")
            .with_status(400)
            .with_body(r#"{"error":{"message":"invalid audio"}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.transcribe(vec![1], "a.mp3").await.unwrap_err();
        match err {
            ProviderError::Status { stage, status, body } => {
                assert_eq!(stage, "transcription");
                assert_eq!(status, 400);
                assert!(body.contains("invalid audio"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn complete_sends_fixed_system_prompt() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4o",
                "messages": [
                    { "role": "system", "content": "You are a helpful assistant." },
                    { "role": "user", "content": "hello world" }
                ]
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"general kenobi"}}]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let reply = client.complete("hello world").await.unwrap();
        assert_eq!(reply, "general kenobi");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn complete_rejects_empty_choices() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.complete("hi").await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode { stage: "chat", .. }));
    }

    #[tokio::test]
    async fn synthesize_returns_binary_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/audio/speech")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "tts-1",
                "input": "general kenobi",
                "voice": "alloy"
            })))
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_body([0x49, 0x44, 0x33])
            .create_async()
            .await;

        let client = client_for(&server);
        let audio = client.synthesize("general kenobi").await.unwrap();
        assert_eq!(audio.as_ref(), &[0x49, 0x44, 0x33]);
    }
}
