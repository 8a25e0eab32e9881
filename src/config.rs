//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for voxpipe-server.
///
/// Built once in `main` and shared immutably with every handler; nothing
/// reads ambient environment state after startup. Every field except the
/// API key has a sensible default so the server works out-of-the-box.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// Bearer credential for the upstream AI provider.
    /// Read from `OPENAI_API_KEY`; empty when unset.
    pub api_key: String,

    /// Base URL of the provider API (default: `"https://api.openai.com/v1"`).
    /// Override with `VOXPIPE_API_BASE` to point at a proxy or a mock server.
    pub api_base: String,

    /// Directory for scoped temporary files: uploads on the way in,
    /// synthesized audio on the way out (default: `"uploads"`).
    pub upload_dir: String,

    /// Maximum accepted upload size in bytes (default: 25 MiB, the
    /// transcription provider's own file-size ceiling).
    pub max_upload_bytes: usize,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated list of allowed CORS origins; `None` means wildcard.
    pub cors_allowed_origins: Option<String>,

    /// Serve the Swagger UI at `/swagger-ui` (default: true).
    pub enable_swagger: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("VOXPIPE_BIND", "0.0.0.0:3000"),
            api_key: env_or("OPENAI_API_KEY", ""),
            api_base: env_or("VOXPIPE_API_BASE", "https://api.openai.com/v1"),
            upload_dir: env_or("VOXPIPE_UPLOAD_DIR", "uploads"),
            max_upload_bytes: parse_env("VOXPIPE_MAX_UPLOAD_MB", 25) * 1024 * 1024,
            log_level: env_or("VOXPIPE_LOG", "info"),
            log_json: std::env::var("VOXPIPE_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            cors_allowed_origins: std::env::var("VOXPIPE_CORS_ORIGINS").ok(),
            enable_swagger: std::env::var("VOXPIPE_ENABLE_SWAGGER")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
