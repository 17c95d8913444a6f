// ── Core error types ──
//
// What the stores see when a repository call fails. The `Display` output of
// each variant is the message a screen shows inline, so it stays short and
// free of transport jargon where possible.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach PricePulse at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Server errors ────────────────────────────────────────────────
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("Unexpected response from server: {message}")]
    Decode { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Free-form failure; displays the message verbatim.
    #[error("{message}")]
    Failed { message: String },
}

impl CoreError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// The message to surface in a snapshot, or `fallback` when the error
    /// renders blank.
    pub fn describe_or(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_owned()
        } else {
            message
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<pricepulse_api::Error> for CoreError {
    fn from(err: pricepulse_api::Error) -> Self {
        use pricepulse_api::Error as ApiError;

        match err {
            ApiError::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.origin().ascii_serialization())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: "connection refused or host unreachable".into(),
                    }
                } else {
                    CoreError::Failed {
                        message: e.to_string(),
                    }
                }
            }
            ApiError::Http {
                status: 404,
                message,
            } => CoreError::NotFound { message },
            ApiError::Http { status, message } => CoreError::Http { status, message },
            ApiError::Deserialization { message, body: _ } => CoreError::Decode { message },
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::ClientBuild(message) | ApiError::InvalidApiKey { message } => {
                CoreError::Config { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_displays_message_verbatim() {
        assert_eq!(CoreError::failed("timeout").to_string(), "timeout");
    }

    #[test]
    fn blank_message_falls_back() {
        let err = CoreError::failed("  ");
        assert_eq!(err.describe_or("Search failed"), "Search failed");
    }

    #[test]
    fn not_found_keeps_server_detail() {
        let err = CoreError::from(pricepulse_api::Error::Http {
            status: 404,
            message: "Product not found".into(),
        });
        assert_eq!(err.to_string(), "Product not found");
    }

    #[test]
    fn http_status_is_prefixed() {
        let err = CoreError::from(pricepulse_api::Error::Http {
            status: 502,
            message: "Bad Gateway".into(),
        });
        assert!(matches!(err, CoreError::Http { status: 502, .. }));
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    }

    #[test]
    fn decode_error_drops_body() {
        let err = CoreError::from(pricepulse_api::Error::Deserialization {
            message: "missing field `id`".into(),
            body: "{}".into(),
        });
        assert_eq!(
            err.to_string(),
            "Unexpected response from server: missing field `id`"
        );
    }
}
