//! Client configuration for Team Foundation Server and Azure DevOps.
//!
//! A [`ClientConfiguration`] carries everything a client needs to talk to a
//! Project Collection: the collection URL, the user agent placed on outbound
//! requests, and exactly one authentication mode.
//!
//! ```text
//! https://accountname.visualstudio.com/DefaultCollection   (hosted)
//! http://tfsserver:8080/tfs/DefaultCollection              (on-premises)
//! ```
//!
//! The authentication mode is chosen by the constructor and can never change
//! afterwards:
//!
//! - [`ClientConfiguration::basic`] / [`ClientConfiguration::basic_with_domain`]
//!   for username/password ("alternate credentials" on hosted accounts).
//! - [`ClientConfiguration::token`] for a personal access or OAuth token.

mod auth;
mod client_config;
mod error;

pub use auth::{Authentication, AuthenticationMode, BasicCredentials};
pub use client_config::{ClientConfiguration, default_user_agent};
pub use error::ConfigError;
