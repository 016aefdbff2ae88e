use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single capability round-trip.
///
/// Every variant except `Application` and `Geolocation` is a network failure from
/// the user's point of view: the backend could not be reached or did not answer
/// with a usable 2xx body.
#[derive(Error, Debug)]
pub enum CapabilityError {
    #[error("HTTP error! status: {}", .0.as_u16())]
    Status(StatusCode),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A 2xx response whose body carried an `error` field
    #[error("{0}")]
    Application(String),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

impl CapabilityError {
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            CapabilityError::Status(_)
                | CapabilityError::Transport(_)
                | CapabilityError::Decode(_)
                | CapabilityError::Io(_)
        )
    }
}

/// Both variants are terminal; nothing retries a location lookup.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Location access denied or failed")]
    PermissionDenied,

    #[error("Geolocation is not supported on this device")]
    Unsupported,
}

/// Raised by identity providers. Never shown to the user: the transport falls
/// back to anonymous requests instead.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Session expired at {0}")]
    Expired(DateTime<Utc>),

    #[error("Failed to read session: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed session: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Identity provider error: {0}")]
    Provider(String),
}

pub type CapabilityResult<T> = Result<T, CapabilityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let error = CapabilityError::Status(StatusCode::BAD_GATEWAY);
        assert_eq!(error.to_string(), "HTTP error! status: 502");
        assert!(error.is_network_failure());
    }

    #[test]
    fn test_application_and_geolocation_are_not_network_failures() {
        assert!(!CapabilityError::Application("Unsupported country".into()).is_network_failure());

        let error = CapabilityError::from(GeolocationError::PermissionDenied);
        assert!(!error.is_network_failure());
        assert_eq!(error.to_string(), "Location access denied or failed");
    }
}
