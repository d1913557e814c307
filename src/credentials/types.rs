//! Credential values and lookup errors.

use std::fmt;

/// A username/password pair found for a host.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
  pub username: String,
  pub password: String,
}

impl fmt::Debug for Credential {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credential")
      .field("username", &self.username)
      .field("password", &"********")
      .finish()
  }
}

/// Errors that can occur while looking up credentials.
#[derive(Debug)]
pub enum CredentialError {
  /// The home directory, and with it `.netrc`, could not be located
  NetrcNotFound,
  /// A `.netrc` keyword was missing its value
  NetrcParseError(String),
  /// Reading the credential store failed
  IoError(std::io::Error),
}

impl fmt::Display for CredentialError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::NetrcNotFound => write!(f, ".netrc file not found"),
      Self::NetrcParseError(msg) => write!(f, "failed to parse .netrc: {msg}"),
      Self::IoError(err) => write!(f, "I/O error: {err}"),
    }
  }
}

impl std::error::Error for CredentialError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::IoError(err) => Some(err),
      _ => None,
    }
  }
}

impl From<std::io::Error> for CredentialError {
  fn from(err: std::io::Error) -> Self {
    Self::IoError(err)
  }
}
