//! Team Foundation Server client configuration library
//!
//! Provides the [`config::ClientConfiguration`] value object consumed by
//! HTTP clients talking to a TFS or Azure DevOps Project Collection, plus
//! helpers to derive request headers and to discover Basic credentials.

pub mod cli;
pub mod color;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod headers;

pub use config::{Authentication, AuthenticationMode, BasicCredentials, ClientConfiguration, ConfigError};
