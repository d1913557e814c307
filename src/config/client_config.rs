//! The [`ClientConfiguration`] value object.

use tracing::debug;
use url::Url;

use super::{Authentication, AuthenticationMode, BasicCredentials, ConfigError};

/// Configuration for a client talking to a single Project Collection.
///
/// The authentication mode is fixed by the constructor. The collection URL
/// and user agent stay freely settable and are never validated beyond `url`
/// being a parsed [`Url`].
///
/// # Thread safety
///
/// The type owns no resources and is `Send + Sync`. Concurrent read-only use
/// (for example behind an `Arc`) is safe. Changing the URL or user agent
/// needs `&mut self`, so sharing a configuration that is still being mutated
/// requires the caller to add its own synchronisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfiguration {
  url: Url,
  user_agent: String,
  authentication: Authentication,
}

/// User agent sent when the caller does not supply one.
pub fn default_user_agent() -> String {
  format!("tfs-client/{} ({})", env!("CARGO_PKG_VERSION"), env!("TARGET"))
}

/// Reject empty required strings, naming the parameter.
fn require_non_empty(value: String, parameter: &'static str) -> Result<String, ConfigError> {
  if value.is_empty() {
    return Err(ConfigError::InvalidArgument { parameter });
  }
  Ok(value)
}

impl ClientConfiguration {
  /// Create a configuration that authenticates with a username and password.
  ///
  /// # Arguments
  /// * `url` - URL of the Project Collection (e.g. `https://account.visualstudio.com/DefaultCollection`)
  /// * `user_agent` - Value for the `User-Agent` header of outbound requests
  /// * `username` - Account name; for hosted accounts the alternate
  ///   credentials username
  /// * `password` - Password for the account
  ///
  /// # Errors
  /// Returns [`ConfigError::InvalidArgument`] naming `username` or `password`
  /// when either is empty.
  pub fn basic(
    url: Url,
    user_agent: impl Into<String>,
    username: impl Into<String>,
    password: impl Into<String>,
  ) -> Result<Self, ConfigError> {
    Self::build_basic(url, user_agent.into(), username.into(), password.into(), None)
  }

  /// Create a Basic configuration whose account lives in a Windows domain.
  ///
  /// Behaves like [`ClientConfiguration::basic`]; the domain is stored as
  /// given.
  ///
  /// # Errors
  /// Returns [`ConfigError::InvalidArgument`] naming `username` or `password`
  /// when either is empty.
  pub fn basic_with_domain(
    url: Url,
    user_agent: impl Into<String>,
    username: impl Into<String>,
    password: impl Into<String>,
    domain: impl Into<String>,
  ) -> Result<Self, ConfigError> {
    Self::build_basic(
      url,
      user_agent.into(),
      username.into(),
      password.into(),
      Some(domain.into()),
    )
  }

  fn build_basic(
    url: Url,
    user_agent: String,
    username: String,
    password: String,
    domain: Option<String>,
  ) -> Result<Self, ConfigError> {
    let username = require_non_empty(username, "username")?;
    let password = require_non_empty(password, "password")?;

    debug!(
      host = url.host_str().unwrap_or_default(),
      domain = domain.is_some(),
      "Configured Basic authentication"
    );

    Ok(Self {
      url,
      user_agent,
      authentication: Authentication::Basic(BasicCredentials {
        username,
        password,
        domain,
      }),
    })
  }

  /// Create a configuration that authenticates with an access token.
  ///
  /// # Arguments
  /// * `url` - URL of the Project Collection
  /// * `user_agent` - Value for the `User-Agent` header of outbound requests
  /// * `access_token` - Personal access or OAuth token
  ///
  /// # Errors
  /// Returns [`ConfigError::InvalidArgument`] naming `access_token` when it
  /// is empty.
  pub fn token(
    url: Url,
    user_agent: impl Into<String>,
    access_token: impl Into<String>,
  ) -> Result<Self, ConfigError> {
    let access_token = require_non_empty(access_token.into(), "access_token")?;

    debug!(host = url.host_str().unwrap_or_default(), "Configured token authentication");

    Ok(Self {
      url,
      user_agent: user_agent.into(),
      authentication: Authentication::TokenBased { access_token },
    })
  }

  /// URL of the Project Collection.
  pub fn url(&self) -> &Url {
    &self.url
  }

  /// Point the configuration at a different Project Collection.
  pub fn set_url(&mut self, url: Url) {
    self.url = url;
  }

  /// User agent placed on outbound requests.
  pub fn user_agent(&self) -> &str {
    &self.user_agent
  }

  /// Replace the user agent sent on outbound requests.
  pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
    self.user_agent = user_agent.into();
  }

  /// The mode chosen at construction.
  pub fn authentication_mode(&self) -> AuthenticationMode {
    self.authentication.mode()
  }

  /// The authentication this configuration was built with.
  pub fn authentication(&self) -> &Authentication {
    &self.authentication
  }

  /// Username/password/domain for Basic authentication.
  ///
  /// # Errors
  /// Returns [`ConfigError::InvalidState`] when the configuration uses token
  /// authentication.
  pub fn credentials(&self) -> Result<&BasicCredentials, ConfigError> {
    match &self.authentication {
      Authentication::Basic(credentials) => Ok(credentials),
      other => Err(ConfigError::InvalidState {
        expected: AuthenticationMode::Basic,
        actual: other.mode(),
      }),
    }
  }

  /// Access token for token authentication.
  ///
  /// # Errors
  /// Returns [`ConfigError::InvalidState`] when the configuration uses Basic
  /// authentication.
  pub fn access_token(&self) -> Result<&str, ConfigError> {
    match &self.authentication {
      Authentication::TokenBased { access_token } => Ok(access_token),
      other => Err(ConfigError::InvalidState {
        expected: AuthenticationMode::TokenBased,
        actual: other.mode(),
      }),
    }
  }
}
