//! Header values derived from a [`ClientConfiguration`].
//!
//! The configuration itself never talks to the network; these helpers give
//! the consuming HTTP client the exact `Authorization` and `User-Agent`
//! values to send.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::config::{Authentication, ClientConfiguration};

/// Build the `Authorization` header value for an authentication.
///
/// Basic credentials are encoded as `Basic base64(user:password)`, where the
/// user is `DOMAIN\username` when a domain is configured. Tokens are sent as
/// `Bearer <token>`.
pub fn authorization_header(authentication: &Authentication) -> String {
  match authentication {
    Authentication::Basic(credentials) => {
      let pair = format!("{}:{}", credentials.qualified_username(), credentials.password);
      format!("Basic {}", BASE64.encode(pair.as_bytes()))
    }
    Authentication::TokenBased { access_token } => format!("Bearer {access_token}"),
  }
}

/// The `User-Agent` header value, passed through verbatim.
pub fn user_agent_header(config: &ClientConfiguration) -> &str {
  config.user_agent()
}
