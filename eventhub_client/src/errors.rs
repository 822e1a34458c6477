use std::{fmt, time::Duration};

use eventhub_core::ValidationError;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("invalid request url")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid header value for {name}")]
    InvalidHeader { name: String },
    #[error("network request failed")]
    Transport(#[from] reqwest::Error),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("unexpected response payload")]
    Decode(#[from] serde_json::Error),
    #[error("keyring operation failed")]
    Keyring(#[from] keyring::Error),
    #[error("no refresh token stored")]
    MissingRefreshToken,
    #[error("no access token stored")]
    MissingAccessToken,
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the stored session can no longer authenticate and the user
    /// has to sign in again.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. } | Self::MissingAccessToken | Self::MissingRefreshToken
        )
    }

    /// A short message that is safe to show to an end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the EventHub server.".to_owned(),
            Self::Timeout(_) => "The request timed out. Please try again.".to_owned(),
            Self::Decode(_) => "The server sent a response we could not understand.".to_owned(),
            Self::Keyring(_) => "Could not access the saved session.".to_owned(),
            Self::InvalidUrl(_) | Self::InvalidHeader { .. } | Self::InvalidConfig(_) => {
                "The client is misconfigured.".to_owned()
            }
            Self::MissingAccessToken | Self::MissingRefreshToken => {
                "Please sign in to continue.".to_owned()
            }
            Self::Validation(err) => err.to_string(),
            Self::Unauthorized { message } | Self::Api { message, .. } => message.clone(),
        }
    }

    pub fn display_chain(&self) -> DisplayChainedError<'_> {
        DisplayChainedError { inner: self }
    }
}

pub struct DisplayChainedError<'a> {
    inner: &'a (dyn std::error::Error + 'static),
}

impl fmt::Debug for DisplayChainedError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut current: Option<&(dyn std::error::Error + 'static)> = Some(self.inner);

        while let Some(err) = current {
            if first {
                first = false;
            } else {
                write!(f, " -> ")?;
            }

            write!(f, "{err}")?;
            current = err.source();
        }

        Ok(())
    }
}

impl fmt::Display for DisplayChainedError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use eventhub_core::ValidationError;

    use super::ClientError;

    #[test]
    fn api_errors_display_the_server_message() {
        let err = ClientError::Api {
            status: 400,
            message: "Este email ya está registrado".to_owned(),
        };
        assert_eq!(err.user_message(), "Este email ya está registrado");
        assert_eq!(err.status(), Some(400));
        assert!(!err.requires_login());
    }

    #[test]
    fn unauthorized_requires_login() {
        let err = ClientError::Unauthorized {
            message: "Token is invalid or expired".to_owned(),
        };
        assert!(err.requires_login());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn timeout_message_is_user_facing() {
        let err = ClientError::Timeout(Duration::from_secs(30));
        assert!(err.to_string().contains("timed out"));
        assert!(err.user_message().contains("timed out"));
    }

    #[test]
    fn display_chain_includes_sources() {
        let err = ClientError::from(ValidationError::new("email", "is required"));
        assert_eq!(
            err.display_chain().to_string(),
            "invalid input: email: is required -> email: is required"
        );
    }
}
