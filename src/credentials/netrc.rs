//! `.netrc` credential lookup.
//!
//! Keyword/value pairs may share a line or span several lines, so both
//! `machine host login user password secret` and the one-keyword-per-line
//! layout work. `machine <host>` or `default` starts an entry. Everything
//! after a `#` keyword is a comment, `macdef` bodies are skipped up to the
//! next blank line, and unknown keywords are ignored.

use std::path::{Path, PathBuf};
use std::str::SplitWhitespace;

use tracing::{debug, warn};

use super::{Credential, CredentialError, CredentialsProvider};

/// Reads Basic credentials from a `.netrc` file.
///
/// By default the file is `$HOME/.netrc`; [`NetrcProvider::with_path`]
/// points it somewhere else.
#[derive(Debug, Default)]
pub struct NetrcProvider {
  path: Option<PathBuf>,
}

impl NetrcProvider {
  /// Provider for `$HOME/.netrc`.
  pub fn new() -> Self {
    Self { path: None }
  }

  /// Provider for an explicit `.netrc` file.
  pub fn with_path(path: impl Into<PathBuf>) -> Self {
    Self {
      path: Some(path.into()),
    }
  }

  fn resolve_path(&self) -> Result<PathBuf, CredentialError> {
    if let Some(path) = &self.path {
      return Ok(path.clone());
    }
    let home = std::env::var("HOME").map_err(|_| CredentialError::NetrcNotFound)?;
    Ok(Path::new(&home).join(".netrc"))
  }
}

impl CredentialsProvider for NetrcProvider {
  /// # Errors
  /// Returns `Err(CredentialError)` when `$HOME` is unset, the file cannot be
  /// read, or a keyword is missing its value. A missing file is not an error.
  fn get_credentials(&self, host: &str) -> Result<Option<Credential>, CredentialError> {
    let path = self.resolve_path()?;
    if !path.exists() {
      debug!(path = %path.display(), "No .netrc file present");
      return Ok(None);
    }

    let content = std::fs::read_to_string(&path)?;
    let credential = parse_netrc(&content, host)?;
    debug!(host, found = credential.is_some(), "Searched .netrc for credentials");
    Ok(credential)
  }
}

/// One `machine` or `default` block.
#[derive(Debug, Default)]
struct NetrcEntry {
  /// `None` for the `default` block.
  machine: Option<String>,
  login: Option<String>,
  password: Option<String>,
}

impl NetrcEntry {
  fn into_credential(self) -> Option<Credential> {
    match (self.login, self.password) {
      (Some(username), Some(password)) => Some(Credential { username, password }),
      _ => None,
    }
  }
}

/// Value following `keyword` on the same line.
fn take_value(tokens: &mut SplitWhitespace<'_>, keyword: &str, line_number: usize) -> Result<String, CredentialError> {
  tokens
    .next()
    .map(str::to_string)
    .ok_or_else(|| CredentialError::NetrcParseError(format!("line {line_number}: `{keyword}` has no value")))
}

/// Split `.netrc` content into entries.
fn parse_entries(content: &str) -> Result<Vec<NetrcEntry>, CredentialError> {
  let mut entries: Vec<NetrcEntry> = Vec::new();
  let mut in_macdef = false;

  for (index, line) in content.lines().enumerate() {
    let line = line.trim();
    if in_macdef {
      // A macro body runs until the next blank line.
      in_macdef = !line.is_empty();
      continue;
    }

    let line_number = index + 1;
    let mut tokens = line.split_whitespace();
    while let Some(keyword) = tokens.next() {
      match keyword {
        "machine" => entries.push(NetrcEntry {
          machine: Some(take_value(&mut tokens, keyword, line_number)?),
          ..NetrcEntry::default()
        }),
        "default" => entries.push(NetrcEntry::default()),
        "login" | "password" => {
          let value = take_value(&mut tokens, keyword, line_number)?;
          // Values before the first machine belong to no entry.
          if let Some(entry) = entries.last_mut() {
            if keyword == "login" {
              entry.login = Some(value);
            } else {
              entry.password = Some(value);
            }
          }
        }
        "account" => {
          take_value(&mut tokens, keyword, line_number)?;
        }
        "macdef" => {
          in_macdef = true;
          break;
        }
        comment if comment.starts_with('#') => break,
        _ => {}
      }
    }
  }

  Ok(entries)
}

/// Find credentials for `target_host`.
///
/// The first complete `machine` entry for the host wins; otherwise the first
/// complete `default` entry is used. Host names are compared exactly.
fn parse_netrc(content: &str, target_host: &str) -> Result<Option<Credential>, CredentialError> {
  let mut fallback = None;

  for entry in parse_entries(content)? {
    let label = entry.machine.clone().unwrap_or_else(|| "default".to_string());
    let is_default = entry.machine.is_none();
    let matches = entry.machine.as_deref() == Some(target_host);
    if !matches && !is_default {
      continue;
    }

    match entry.into_credential() {
      Some(credential) if matches => return Ok(Some(credential)),
      Some(credential) => {
        fallback.get_or_insert(credential);
      }
      None => warn!(entry = %label, "Ignoring .netrc entry without both login and password"),
    }
  }

  Ok(fallback)
}
