use std::time::Duration;

use thiserror::Error;

/// Error types for IAMS client operations
#[derive(Error, Debug)]
pub enum IamsError {
    /// Token endpoint rejected the request, or no usable token is available
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The server answered with a status outside the allowed set
    #[error("{operation}: expected status {expected:?}, got {actual}: {body}")]
    UnexpectedStatus {
        operation: String,
        expected: Vec<u16>,
        actual: u16,
        body: String,
    },

    /// API error with status code
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid request parameters, detected before anything is sent
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Network or connection error
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// JSON parsing or serialization error
    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    /// Reading or writing the token file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// A polled condition never held
    #[error("Timed out after {waited:?} waiting for {what}")]
    Timeout { what: String, waited: Duration },
}

impl IamsError {
    /// Create an authentication error
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create an unexpected status error
    pub fn unexpected_status<S: Into<String>>(
        operation: S,
        expected: &[u16],
        actual: u16,
        body: String,
    ) -> Self {
        Self::UnexpectedStatus {
            operation: operation.into(),
            expected: expected.to_vec(),
            actual,
            body,
        }
    }

    /// Create an API error
    pub fn api_error(status: u16, message: String) -> Self {
        Self::Api { status, message }
    }

    /// Create an invalid request error
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create an I/O error bound to a path
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Create a timeout error
    pub fn timeout<S: Into<String>>(what: S, waited: Duration) -> Self {
        Self::Timeout {
            what: what.into(),
            waited,
        }
    }

    /// Status code carried by the error, if the server produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { actual, .. } => Some(*actual),
            Self::Api { status, .. } => Some(*status),
            Self::Network { source } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the server reported the entity as missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_extraction() {
        let err = IamsError::unexpected_status("delete tenant", &[200, 204], 404, String::new());
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());

        let err = IamsError::authentication("no token");
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_unexpected_status_message() {
        let err = IamsError::unexpected_status("create scope", &[201], 500, "boom".to_string());
        assert_eq!(
            err.to_string(),
            "create scope: expected status [201], got 500: boom"
        );
    }
}
