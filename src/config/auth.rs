//! Authentication modes and the secrets that back them.
//!
//! These types are shared between the configuration object, the header
//! helpers and the CLI so that every consumer reasons about usernames,
//! domains and tokens the same way.

use std::fmt;

use serde::Serialize;

/// Which authentication scheme a configuration uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationMode {
  /// Username/password, sent as HTTP Basic authentication.
  Basic,
  /// Opaque access token, sent as a bearer token.
  TokenBased,
}

impl fmt::Display for AuthenticationMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Basic => write!(f, "Basic"),
      Self::TokenBased => write!(f, "Token"),
    }
  }
}

/// Username/password pair with an optional Windows domain.
///
/// For hosted accounts the username is the "alternate credentials" name
/// configured on the account. On-premises servers usually also need the
/// domain.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
  /// Account name.
  pub username: String,
  /// Password for the account.
  pub password: String,
  /// Windows domain, when the server authenticates against one.
  pub domain: Option<String>,
}

impl BasicCredentials {
  /// The user name as the server expects it: `DOMAIN\username` when a domain
  /// is set, the bare username otherwise.
  pub fn qualified_username(&self) -> String {
    match &self.domain {
      Some(domain) => format!("{domain}\\{}", self.username),
      None => self.username.clone(),
    }
  }
}

impl fmt::Debug for BasicCredentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BasicCredentials")
      .field("username", &self.username)
      .field("password", &"********")
      .field("domain", &self.domain)
      .finish()
  }
}

/// The authentication a configuration was built with.
///
/// Matching on this enum is the preferred way to read secrets: each variant
/// only carries the data valid for its mode.
#[derive(Clone, PartialEq, Eq)]
pub enum Authentication {
  /// HTTP Basic authentication.
  Basic(BasicCredentials),
  /// Bearer token authentication.
  TokenBased {
    /// Personal access or OAuth token.
    access_token: String,
  },
}

impl Authentication {
  /// The [`AuthenticationMode`] matching this variant.
  pub fn mode(&self) -> AuthenticationMode {
    match self {
      Self::Basic(_) => AuthenticationMode::Basic,
      Self::TokenBased { .. } => AuthenticationMode::TokenBased,
    }
  }
}

impl fmt::Debug for Authentication {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Basic(credentials) => f.debug_tuple("Basic").field(credentials).finish(),
      Self::TokenBased { .. } => f.debug_struct("TokenBased").field("access_token", &"********").finish(),
    }
  }
}
