/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP API port |
/// | REFRESH_INTERVAL_SECS | 3 | Orders board refresh poll interval |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | REQUEST_TIMEOUT_MS | 30000 | Request timeout (milliseconds) |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 REFRESH_INTERVAL_SECS=5 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Orders board refresh poll interval, seconds
    pub refresh_interval_secs: u64,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Request timeout (milliseconds)
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            refresh_interval_secs: std::env::var("REFRESH_INTERVAL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        }
    }

    /// Override selected values, for tests
    pub fn with_overrides(http_port: u16, refresh_interval_secs: u64) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.refresh_interval_secs = refresh_interval_secs;
        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
