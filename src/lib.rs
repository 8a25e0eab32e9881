//! voxpipe – a voice round-trip HTTP server.
//!
//! One endpoint does all the work: `POST /transcribe` accepts an uploaded
//! audio file, transcribes it with a speech-to-text provider, feeds the
//! transcript to a chat-completion provider, synthesizes the reply with a
//! text-to-speech provider, and returns the audio to the caller. Temporary
//! files are scoped to the request and removed on every exit path.

pub mod config;
pub mod error;
pub mod middleware;
pub mod providers;
pub mod routes;
pub mod schemas;
pub mod state;
pub mod storage;
