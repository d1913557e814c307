//! Credential discovery for Basic authentication.
//!
//! On-premises servers and hosted accounts with alternate credentials both
//! authenticate with a username/password pair. Rather than passing the
//! password on the command line, it can live in `~/.netrc`:
//!
//! ```text
//! machine tfsserver
//!   login builduser
//!   password hunter2
//! ```
//!
//! Tokens are not read from `.netrc`; pass them with `--token` or `TFS_TOKEN`.

mod netrc;
mod provider;
mod types;

pub use netrc::NetrcProvider;
pub use provider::CredentialsProvider;
pub use types::{Credential, CredentialError};
