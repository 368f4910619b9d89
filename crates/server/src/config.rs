//! Server configuration.

/// Immutable server configuration, built once at startup and passed to the
/// router constructor.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `127.0.0.1:3001`.
    pub bind: String,
    /// The single origin allowed for cross-origin requests.
    pub allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3001".to_string(),
            allowed_origin: "https://localhost:3000".to_string(),
        }
    }
}
