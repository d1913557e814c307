//! `tfs-client config` handlers.
//!
//! `config show` prints the resolved configuration with secrets masked, and
//! `config check` only reports whether a valid configuration can be built.

use std::process;

use clap::Subcommand;
use serde::Serialize;

use crate::cli::Cli;
use crate::color::ColorScheme;
use crate::config::{Authentication, AuthenticationMode, ClientConfiguration, ConfigError};
use crate::credentials::NetrcProvider;

/// Configuration subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
  /// Print the resolved configuration (secrets masked)
  Show {
    /// Output in JSON format
    #[arg(long)]
    json: bool,
  },
  /// Verify that a valid configuration can be built
  Check,
}

/// Masked view of a configuration, safe to print.
#[derive(Debug, Serialize)]
struct ConfigurationSummary {
  url: String,
  user_agent: String,
  authentication_mode: AuthenticationMode,
  #[serde(skip_serializing_if = "Option::is_none")]
  username: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  domain: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  access_token: Option<String>,
}

impl ConfigurationSummary {
  fn new(config: &ClientConfiguration) -> Self {
    let (username, domain, access_token) = match config.authentication() {
      Authentication::Basic(credentials) => (Some(credentials.username.clone()), credentials.domain.clone(), None),
      Authentication::TokenBased { access_token } => (None, None, Some(mask_token(access_token))),
    };

    Self {
      url: config.url().to_string(),
      user_agent: config.user_agent().to_string(),
      authentication_mode: config.authentication_mode(),
      username,
      domain,
      access_token,
    }
  }
}

/// Dispatch `tfs-client config` subcommands.
///
/// Exits with status 2 when the configuration cannot be built.
pub(crate) fn handle_config_command(subcommand: &ConfigCommand, cli: &Cli, colors: &ColorScheme) {
  let config = match cli.resolve_configuration(&NetrcProvider::new()) {
    Ok(config) => config,
    Err(e) => {
      eprintln!("{} {}", colors.error("✗"), colors.error("Invalid configuration"));
      eprintln!("  {e:#}");
      if let Some(ConfigError::InvalidArgument { parameter }) = e.downcast_ref::<ConfigError>() {
        eprintln!("\n{} `{parameter}` was provided but is empty", colors.warning("⚠"));
      }
      process::exit(2);
    }
  };

  match subcommand {
    ConfigCommand::Show { json: true } => match serde_json::to_string_pretty(&ConfigurationSummary::new(&config)) {
      Ok(document) => println!("{document}"),
      Err(e) => {
        eprintln!("{} {e}", colors.error("Error:"));
        process::exit(1);
      }
    },
    ConfigCommand::Show { json: false } => print!("{}", render_summary(&config, colors)),
    ConfigCommand::Check => {
      println!(
        "{} {} ({} authentication)",
        colors.success("✓"),
        colors.success("Configuration is valid"),
        config.authentication_mode()
      );
    }
  }
}

/// Render the human-readable summary printed by `config show`.
///
/// The password is never shown; tokens are masked by [`mask_token`].
fn render_summary(config: &ClientConfiguration, colors: &ColorScheme) -> String {
  let summary = ConfigurationSummary::new(config);
  let mut out = String::new();

  out.push_str(&format!("{}\n\n", colors.emphasis("Client Configuration")));
  out.push_str(&format!("{}: {}\n", colors.emphasis("URL"), colors.link(&summary.url)));
  out.push_str(&format!("{}: {}\n", colors.emphasis("User-Agent"), summary.user_agent));
  out.push_str(&format!(
    "{}: {}\n",
    colors.emphasis("Authentication"),
    summary.authentication_mode
  ));

  match config.authentication() {
    Authentication::Basic(_) => {
      if let Some(username) = &summary.username {
        out.push_str(&format!("  {}: {}\n", colors.dimmed("Username"), username));
      }
      if let Some(domain) = &summary.domain {
        out.push_str(&format!("  {}: {}\n", colors.dimmed("Domain"), domain));
      }
      out.push_str(&format!("  {}: {}\n", colors.dimmed("Password"), colors.dimmed("(hidden)")));
    }
    Authentication::TokenBased { access_token } => {
      if let Some(masked) = &summary.access_token {
        out.push_str(&format!("  {}: {}\n", colors.dimmed("Token"), colors.dimmed(masked)));
      }
      out.push_str(&format!(
        "  {}: {} characters\n",
        colors.dimmed("Length"),
        colors.number(access_token.chars().count())
      ));
    }
  }

  out
}

/// Keep the first four characters of long tokens and mask the rest; short
/// tokens are masked entirely.
fn mask_token(token: &str) -> String {
  let length = token.chars().count();
  if length > 8 {
    let prefix: String = token.chars().take(4).collect();
    format!("{prefix}{}", "*".repeat(length - 4))
  } else {
    "*".repeat(length)
  }
}
