//! Command-line interface definitions for tfs-client.
//!
//! Every option can also come from a `TFS_*` environment variable, which is
//! how build agents usually hand over credentials.

use std::process;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use url::Url;

use crate::color::ColorScheme;
use crate::commands::completions::handle_completions_command;
use crate::commands::config::{ConfigCommand, handle_config_command};
use crate::commands::version::handle_version_command;
use crate::config::{ClientConfiguration, default_user_agent};
use crate::credentials::CredentialsProvider;

/// tfs-client - Inspect and verify Team Foundation Server client configuration
#[derive(Debug, Parser)]
#[command(
  name = "tfs-client",
  version,
  about = "Inspect and verify Team Foundation Server client configuration",
  long_about = "Builds the client configuration for a Team Foundation Server or Azure DevOps\n\
                Project Collection from flags, environment variables and ~/.netrc.",
  styles = get_clap_styles()
)]
pub struct Cli {
  /// Subcommand to execute
  #[command(subcommand)]
  pub command: Command,

  /// Connection options
  #[command(flatten)]
  pub connection: ConnectionOptions,

  /// Authentication options
  #[command(flatten)]
  pub auth: AuthOptions,

  /// Behavior options
  #[command(flatten)]
  pub behavior: BehaviorOptions,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Resolve and inspect the client configuration
  Config {
    #[command(subcommand)]
    subcommand: ConfigCommand,
  },

  /// Display version and build information
  Version {
    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Show only version number
    #[arg(long)]
    short: bool,
  },

  /// Generate shell completion scripts
  Completions {
    /// Target shell for completions
    #[arg(value_enum)]
    shell: Shell,
  },
}

/// Shells supported by `tfs-client completions`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
  Bash,
  Zsh,
  Fish,
  Powershell,
  Elvish,
}

/// Parse a Project Collection URL, assuming `https://` when no scheme is
/// given and dropping a trailing slash from the path.
fn parse_collection_url(url: &str) -> Result<Url, String> {
  let trimmed = url.trim();

  let mut parsed = match Url::parse(trimmed) {
    Ok(parsed) if parsed.has_host() => parsed,
    _ => Url::parse(&format!("https://{trimmed}")).map_err(|e| format!("Invalid URL: {e}"))?,
  };

  let path = parsed.path().to_string();
  if path.len() > 1 && path.ends_with('/') {
    parsed.set_path(path.trim_end_matches('/'));
  }

  Ok(parsed)
}

/// Connection options
#[derive(Debug, Parser)]
pub struct ConnectionOptions {
  /// Project Collection URL (e.g. https://account.visualstudio.com/DefaultCollection)
  #[arg(long, env = "TFS_URL", value_name = "URL", value_parser = parse_collection_url)]
  pub url: Option<Url>,

  /// User-Agent sent on outbound requests
  #[arg(long, env = "TFS_USER_AGENT", value_name = "AGENT", default_value_t = default_user_agent())]
  pub user_agent: String,
}

/// Authentication options
#[derive(Debug, Parser)]
pub struct AuthOptions {
  /// Username for Basic authentication
  #[arg(long, env = "TFS_USER", value_name = "USER")]
  pub user: Option<String>,

  /// Password for Basic authentication
  #[arg(long, env = "TFS_PASSWORD", value_name = "PASSWORD", hide_env_values = true)]
  pub password: Option<String>,

  /// Windows domain for Basic authentication
  #[arg(long, env = "TFS_DOMAIN", value_name = "DOMAIN")]
  pub domain: Option<String>,

  /// Personal access or OAuth token (selects token authentication)
  #[arg(
    long,
    env = "TFS_TOKEN",
    value_name = "TOKEN",
    hide_env_values = true,
    conflicts_with_all = ["user", "password", "domain"]
  )]
  pub token: Option<String>,
}

/// Behavior options
#[derive(Debug, Parser)]
pub struct BehaviorOptions {
  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Colorize output
  #[arg(long, value_enum, default_value = "auto", value_name = "WHEN")]
  pub color: ColorOption,
}

/// Color output options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorOption {
  Auto,
  Always,
  Never,
}

impl Cli {
  /// Validate CLI arguments that clap cannot express on its own.
  pub fn validate(&self) -> Result<(), String> {
    if matches!(self.command, Command::Config { .. }) && self.connection.url.is_none() {
      return Err("--url (or TFS_URL) is required".to_string());
    }

    Ok(())
  }

  /// Build the client configuration from CLI flags, environment variables
  /// and, for Basic authentication, the credentials provider.
  ///
  /// A token selects token authentication. Otherwise username and password
  /// come from the flags, with either half filled in from the provider entry
  /// for the URL's host.
  ///
  /// # Errors
  /// Returns an error when the URL is missing, the provider fails, no
  /// credentials are found, or the configuration rejects an argument
  /// (the [`crate::config::ConfigError`] is kept as the error source).
  pub fn resolve_configuration(&self, provider: &dyn CredentialsProvider) -> Result<ClientConfiguration> {
    let url = self.connection.url.clone().context("--url (or TFS_URL) is required")?;
    let user_agent = self.connection.user_agent.clone();

    if let Some(token) = &self.auth.token {
      debug!("Using token authentication from command line or environment");
      return ClientConfiguration::token(url, user_agent, token.as_str()).context("Invalid token configuration");
    }

    let (username, password) = match (&self.auth.user, &self.auth.password) {
      (Some(user), Some(password)) => (user.clone(), password.clone()),
      (user, password) => {
        let host = url.host_str().context("URL missing host")?;
        let Some(found) = provider.get_credentials(host)? else {
          bail!(
            "Credentials not found for {host}. Provide --token, --user and --password, set TFS_TOKEN or \
             TFS_USER and TFS_PASSWORD, or add an entry to ~/.netrc"
          );
        };
        debug!(host, "Filling missing credentials from .netrc");
        (
          user.clone().unwrap_or(found.username),
          password.clone().unwrap_or(found.password),
        )
      }
    };

    let config = match &self.auth.domain {
      Some(domain) => ClientConfiguration::basic_with_domain(url, user_agent, username, password, domain.as_str()),
      None => ClientConfiguration::basic(url, user_agent, username, password),
    };
    config.context("Invalid Basic authentication configuration")
  }
}

/// Parse CLI arguments, initialize logging, and dispatch to the chosen
/// command.
pub fn run() {
  let cli = Cli::parse();

  init_tracing(&cli.behavior);

  let colors = ColorScheme::new(cli.behavior.color);

  if let Err(e) = cli.validate() {
    eprintln!("{} {}", colors.error("Error:"), e);
    process::exit(4); // Invalid arguments exit code
  }

  match &cli.command {
    Command::Config { subcommand } => handle_config_command(subcommand, &cli, &colors),
    Command::Version { json, short } => handle_version_command(*json, *short, &colors),
    Command::Completions { shell } => handle_completions_command(*shell),
  }
}

fn init_tracing(behavior: &BehaviorOptions) {
  let level = if behavior.quiet {
    LevelFilter::ERROR
  } else {
    match behavior.verbose {
      0 => LevelFilter::WARN,
      1 => LevelFilter::INFO,
      2 => LevelFilter::DEBUG,
      _ => LevelFilter::TRACE,
    }
  };

  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}

/// Get custom styles for clap help output
fn get_clap_styles() -> clap::builder::Styles {
  use clap::builder::styling::{AnsiColor, Effects};

  clap::builder::Styles::styled()
    .header(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .usage(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .literal(AnsiColor::BrightGreen.on_default())
    .placeholder(AnsiColor::BrightCyan.on_default())
    .error(AnsiColor::BrightRed.on_default() | Effects::BOLD)
    .valid(AnsiColor::BrightGreen.on_default())
    .invalid(AnsiColor::BrightRed.on_default())
}

#[cfg(test)]
mod tests {
  use std::env;
  use std::sync::Mutex;

  use super::*;
  use crate::config::{AuthenticationMode, ConfigError};
  use crate::credentials::{Credential, CredentialError};

  /// Provider answering every host with the same entry.
  struct StaticProvider(Option<Credential>);

  impl CredentialsProvider for StaticProvider {
    fn get_credentials(&self, _host: &str) -> Result<Option<Credential>, CredentialError> {
      Ok(self.0.clone())
    }
  }

  fn netrc_entry() -> StaticProvider {
    StaticProvider(Some(Credential {
      username: "netrc-user".to_string(),
      password: "netrc-pass".to_string(),
    }))
  }

  const TFS_VARS: [&str; 6] = [
    "TFS_URL",
    "TFS_USER_AGENT",
    "TFS_USER",
    "TFS_PASSWORD",
    "TFS_DOMAIN",
    "TFS_TOKEN",
  ];

  /// Serializes tests that touch the process environment.
  static ENV_LOCK: Mutex<()> = Mutex::new(());

  /// Parse `args` with exactly `vars` set among the `TFS_*` variables.
  fn parse_with_env(vars: &[(&str, &str)], args: &[&str]) -> Cli {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    unsafe {
      for name in TFS_VARS {
        env::remove_var(name);
      }
      for (name, value) in vars {
        env::set_var(name, value);
      }
    }

    let mut argv = vec!["tfs-client"];
    argv.extend_from_slice(args);
    let result = Cli::try_parse_from(argv);

    unsafe {
      for (name, _) in vars {
        env::remove_var(name);
      }
    }

    result.unwrap()
  }

  fn parse(args: &[&str]) -> Cli {
    parse_with_env(&[], args)
  }

  #[test]
  fn test_url_normalization_adds_https_when_missing() {
    let url = parse_collection_url("tfsserver:8080/tfs/DefaultCollection").unwrap();
    assert_eq!(url.as_str(), "https://tfsserver:8080/tfs/DefaultCollection");

    let url = parse_collection_url("account.visualstudio.com").unwrap();
    assert_eq!(url.as_str(), "https://account.visualstudio.com/");
  }

  #[test]
  fn test_url_normalization_preserves_scheme_and_strips_slash() {
    let url = parse_collection_url("http://tfsserver:8080/tfs/DefaultCollection/").unwrap();
    assert_eq!(url.as_str(), "http://tfsserver:8080/tfs/DefaultCollection");
  }

  #[test]
  fn test_url_normalization_rejects_garbage() {
    assert!(parse_collection_url("exa mple.com").is_err());
  }

  #[test]
  fn test_validate_requires_url_for_config() {
    let cli = parse(&["config", "check"]);
    assert!(cli.connection.url.is_none());
    assert!(cli.validate().unwrap_err().contains("--url"));

    let cli = parse(&["--url", "https://tfsserver/tfs", "config", "check"]);
    assert!(cli.validate().is_ok());
  }

  #[test]
  fn test_version_does_not_need_url() {
    let cli = parse(&["version", "--short"]);
    assert!(cli.validate().is_ok());
  }

  #[test]
  fn test_token_and_url_from_env_vars() {
    let cli = parse_with_env(
      &[("TFS_URL", "tfsserver:8080/tfs/"), ("TFS_TOKEN", "tok_abc123")],
      &["config", "show"],
    );

    assert!(cli.validate().is_ok());
    let config = cli.resolve_configuration(&StaticProvider(None)).unwrap();
    assert_eq!(config.url().as_str(), "https://tfsserver:8080/tfs");
    assert_eq!(config.authentication_mode(), AuthenticationMode::TokenBased);
    assert_eq!(config.access_token().unwrap(), "tok_abc123");
    assert_eq!(config.user_agent(), default_user_agent());
  }

  #[test]
  fn test_basic_credentials_from_env_vars() {
    let cli = parse_with_env(
      &[
        ("TFS_URL", "http://tfsserver:8080/tfs/DefaultCollection"),
        ("TFS_USER_AGENT", "BuildAgent/3.1"),
        ("TFS_USER", "builduser"),
        ("TFS_PASSWORD", "hunter2"),
        ("TFS_DOMAIN", "CORP"),
      ],
      &["config", "check"],
    );

    let config = cli.resolve_configuration(&netrc_entry()).unwrap();
    let credentials = config.credentials().unwrap();
    assert_eq!(credentials.username, "builduser");
    assert_eq!(credentials.password, "hunter2");
    assert_eq!(credentials.domain.as_deref(), Some("CORP"));
    assert_eq!(config.user_agent(), "BuildAgent/3.1");
  }

  #[test]
  fn test_flags_override_env_vars() {
    let cli = parse_with_env(
      &[("TFS_URL", "https://ignored.example.com")],
      &["--url", "https://tfsserver/tfs", "version"],
    );
    assert_eq!(cli.connection.url.unwrap().as_str(), "https://tfsserver/tfs");
  }

  #[test]
  fn test_token_conflicts_with_user() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let result = Cli::try_parse_from([
      "tfs-client",
      "--url",
      "https://tfsserver/tfs",
      "--token",
      "tok",
      "--user",
      "alice",
      "config",
      "show",
    ]);
    assert!(result.is_err());
  }

  #[test]
  fn test_resolve_token_configuration() {
    let cli = parse(&[
      "--url",
      "https://x.visualstudio.com/DefaultCollection",
      "--user-agent",
      "MyApp/1.0",
      "--token",
      "tok_abc123",
      "config",
      "show",
    ]);
    let config = cli.resolve_configuration(&StaticProvider(None)).unwrap();
    assert_eq!(config.authentication_mode(), AuthenticationMode::TokenBased);
    assert_eq!(config.access_token().unwrap(), "tok_abc123");
    assert_eq!(config.user_agent(), "MyApp/1.0");
  }

  #[test]
  fn test_resolve_basic_from_flags() {
    let cli = parse(&[
      "--url",
      "https://tfsserver/tfs",
      "--user",
      "alice",
      "--password",
      "secret",
      "--domain",
      "CORP",
      "config",
      "show",
    ]);
    let config = cli.resolve_configuration(&netrc_entry()).unwrap();
    let credentials = config.credentials().unwrap();
    assert_eq!(credentials.username, "alice");
    assert_eq!(credentials.password, "secret");
    assert_eq!(credentials.domain.as_deref(), Some("CORP"));
  }

  #[test]
  fn test_resolve_basic_fills_password_from_provider() {
    let cli = parse(&["--url", "https://tfsserver/tfs", "--user", "alice", "config", "show"]);
    let config = cli.resolve_configuration(&netrc_entry()).unwrap();
    let credentials = config.credentials().unwrap();
    assert_eq!(credentials.username, "alice");
    assert_eq!(credentials.password, "netrc-pass");
  }

  #[test]
  fn test_resolve_without_credentials_fails() {
    let cli = parse(&["--url", "https://tfsserver/tfs", "--user", "alice", "config", "show"]);
    let err = cli.resolve_configuration(&StaticProvider(None)).unwrap_err();
    assert!(err.to_string().contains("Credentials not found for tfsserver"));
  }

  #[test]
  fn test_resolve_keeps_config_error_as_source() {
    let cli = parse(&[
      "--url",
      "https://tfsserver/tfs",
      "--user",
      "alice",
      "--password",
      "",
      "config",
      "check",
    ]);
    let err = cli.resolve_configuration(&StaticProvider(None)).unwrap_err();
    assert_eq!(
      err.downcast_ref::<ConfigError>(),
      Some(&ConfigError::InvalidArgument { parameter: "password" })
    );
  }
}
