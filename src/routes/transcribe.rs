//! The pipeline endpoint: audio upload in, spoken reply out.
//!
//! `POST /transcribe` runs one strictly sequential chain per request:
//! save the uploaded file → transcribe it → delete the upload → generate a
//! chat reply → synthesize speech → materialize the audio to a scoped output
//! file → send it → delete it. Every temporary file is owned by a
//! [`ScopedFile`] guard, so both artifacts are gone after the request
//! finishes, on the failure paths as well as the success path.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use tracing::{debug, info, warn};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::state::AppState;
use crate::storage::{scoped_name, ScopedFile};

/// Multipart field that must carry the audio file.
const UPLOAD_FIELD: &str = "file";

#[derive(OpenApi)]
#[openapi(paths(transcribe_pipeline), components(schemas(crate::schemas::PipelineUpload)))]
pub struct PipelineApi;

/// Register the pipeline route.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/transcribe", post(transcribe_pipeline))
}

/// Voice round-trip (`POST /transcribe`).
///
/// Accepts one audio file in the `file` multipart field and returns the
/// synthesized spoken reply as `audio/mpeg`. No provider is called unless a
/// non-empty file was supplied; any provider failure aborts the chain and
/// surfaces the provider's error payload with HTTP 500.
#[utoipa::path(
    post,
    path = "/transcribe",
    tag = "pipeline",
    request_body(content = crate::schemas::PipelineUpload, content_type = "multipart/form-data", description = "One audio file under the `file` field"),
    responses(
        (status = 200, description = "Synthesized reply audio", body = Vec<u8>, content_type = "audio/mpeg"),
        (status = 400, description = "No file uploaded"),
        (status = 500, description = "Provider or local file failure"),
    )
)]
pub async fn transcribe_pipeline(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ServerError> {
    // ── Upload intake ─────────────────────────────────────────────────────────
    let mut upload: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("failed to read multipart field: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            debug!(field = ?field.name(), "ignoring unexpected multipart field");
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_owned();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();
        let data = field
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(format!("failed to read uploaded file: {e}")))?;

        upload = Some((file_name, content_type, data.to_vec()));
    }

    let Some((file_name, content_type, data)) = upload else {
        return Err(ServerError::BadRequest("no file uploaded".into()));
    };
    if data.is_empty() {
        return Err(ServerError::BadRequest("uploaded file is empty".into()));
    }

    let upload_dir = std::path::Path::new(&state.config.upload_dir);
    let stored = ScopedFile::create(scoped_name(upload_dir, UPLOAD_FIELD, &file_name), &data).await?;

    info!(
        original_name = %file_name,
        content_type = %content_type,
        size_bytes = data.len(),
        stored = %stored.path().display(),
        "upload saved"
    );

    // ── Transcription ─────────────────────────────────────────────────────────
    // The stored file is the source of truth for the provider call; it is
    // deleted as soon as the call resolves, before the next stage begins,
    // whether the call succeeded or not.
    let audio_in = tokio::fs::read(stored.path()).await?;
    let transcript_result = state.provider.transcribe(audio_in, &file_name).await;
    if let Err(e) = stored.remove().await {
        warn!(error = %e, "failed to remove upload after transcription");
    }
    let transcript = transcript_result?;
    info!(transcript_len = transcript.len(), "transcription complete");

    // ── Reply generation ──────────────────────────────────────────────────────
    let reply = state.provider.complete(&transcript).await?;
    info!(reply_len = reply.len(), "reply generated");

    // ── Speech synthesis (buffer-then-send) ───────────────────────────────────
    let audio_out = state.provider.synthesize(&reply).await?;
    let output =
        ScopedFile::create(scoped_name(upload_dir, "speech", "reply.mp3"), &audio_out).await?;
    info!(
        audio_bytes = audio_out.len(),
        output = %output.path().display(),
        "reply audio materialized"
    );

    // ── Delivery ──────────────────────────────────────────────────────────────
    // Served from the materialized file; a read failure here is a local file
    // error, not a provider error.
    let body = tokio::fs::read(output.path()).await?;
    if let Err(e) = output.remove().await {
        warn!(error = %e, "failed to remove output file after buffering");
    }

    Ok((
        [
            (header::CONTENT_TYPE, "audio/mpeg"),
            (
                header::CONTENT_DISPOSITION,
                r#"attachment; filename="reply.mp3""#,
            ),
        ],
        body,
    )
        .into_response())
}
