//! Landing page: a minimal HTML form for uploading one audio file.

use axum::response::Html;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// Register the landing-page route.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_index))
}

/// Upload form posting a single `file` field to `/transcribe`.
pub async fn get_index() -> Html<&'static str> {
    Html(
        r#"<h2>Upload an Audio File for Transcription</h2>
<form action="/transcribe" method="POST" enctype="multipart/form-data">
    <input type="file" name="file" accept="audio/*" required />
    <button type="submit">Upload</button>
</form>
"#,
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────
