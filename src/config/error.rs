//! Errors raised while building or reading a [`ClientConfiguration`].
//!
//! [`ClientConfiguration`]: super::ClientConfiguration

use std::fmt;

use super::AuthenticationMode;

/// Errors that can occur when constructing or querying a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
  /// A required constructor argument was empty.
  InvalidArgument {
    /// Name of the offending parameter (`username`, `password` or
    /// `access_token`).
    parameter: &'static str,
  },
  /// An accessor was read while a different authentication mode is active.
  ///
  /// This signals a caller bug rather than a runtime condition; callers that
  /// can match on [`Authentication`](super::Authentication) never see it.
  InvalidState {
    /// Mode the accessor requires.
    expected: AuthenticationMode,
    /// Mode the configuration was built with.
    actual: AuthenticationMode,
  },
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::InvalidArgument { parameter } => write!(f, "invalid argument: `{parameter}` must not be empty"),
      Self::InvalidState { expected, .. } => write!(f, "not configured for {expected} authentication"),
    }
  }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_invalid_argument_names_parameter() {
    let err = ConfigError::InvalidArgument { parameter: "password" };
    assert_eq!(err.to_string(), "invalid argument: `password` must not be empty");
  }

  #[test]
  fn test_invalid_state_messages() {
    let err = ConfigError::InvalidState {
      expected: AuthenticationMode::Basic,
      actual: AuthenticationMode::TokenBased,
    };
    assert_eq!(err.to_string(), "not configured for Basic authentication");

    let err = ConfigError::InvalidState {
      expected: AuthenticationMode::TokenBased,
      actual: AuthenticationMode::Basic,
    };
    assert_eq!(err.to_string(), "not configured for Token authentication");
  }

  #[test]
  fn test_config_error_has_no_source() {
    use std::error::Error;

    let err = ConfigError::InvalidArgument { parameter: "username" };
    assert!(err.source().is_none());
  }
}
