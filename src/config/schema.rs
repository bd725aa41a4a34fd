//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Root configuration for the demo server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// HX middleware settings.
    pub htmx: HtmxConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Settings of the HX middleware.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HtmxConfig {
    /// Status of the standard redirect sent to non-participating requests.
    pub redirect_status: u16,

    /// Append `Vary: HX-Request` to every response.
    pub auto_vary: bool,

    /// Log one debug event per participating request.
    pub log_requests: bool,
}

impl Default for HtmxConfig {
    fn default() -> Self {
        Self {
            redirect_status: 302,
            auto_vary: true,
            log_requests: true,
        }
    }
}

impl HtmxConfig {
    /// Redirect status as a [`StatusCode`], falling back to `302 Found` when
    /// the configured value is not a 3xx code.
    pub fn redirect_status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.redirect_status)
            .ok()
            .filter(StatusCode::is_redirection)
            .unwrap_or(StatusCode::FOUND)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` wins when set.
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
