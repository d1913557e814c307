//! Credential provider abstraction.

use super::{Credential, CredentialError};

/// A source of Basic credentials keyed by host name.
pub trait CredentialsProvider {
  /// Look up credentials for `host` (e.g. `tfsserver` or
  /// `account.visualstudio.com`).
  ///
  /// # Returns
  /// * `Ok(Some(Credential))` when the provider has an entry for the host.
  /// * `Ok(None)` when it does not, so callers can fall back to other sources.
  ///
  /// # Errors
  /// Returns `Err(CredentialError)` when the backing store exists but cannot
  /// be read or understood.
  fn get_credentials(&self, host: &str) -> Result<Option<Credential>, CredentialError>;
}
