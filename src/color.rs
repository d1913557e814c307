//! Terminal colors for CLI output.
//!
//! Every helper returns plain text when colors are disabled, so output stays
//! readable in logs and when piped.

use std::fmt::Display;

use owo_colors::OwoColorize;

use crate::cli::ColorOption;

/// Semantic color palette for the CLI.
pub struct ColorScheme {
  enabled: bool,
}

impl ColorScheme {
  /// Resolve the user's `--color` choice against the terminal.
  pub fn new(color_option: ColorOption) -> Self {
    let enabled = match color_option {
      ColorOption::Always => true,
      ColorOption::Never => false,
      ColorOption::Auto => {
        use std::io::IsTerminal;
        std::io::stdout().is_terminal()
      }
    };

    Self { enabled }
  }

  fn paint<T: Display>(&self, text: T, styled: impl FnOnce(&T) -> String) -> String {
    if self.enabled { styled(&text) } else { text.to_string() }
  }

  /// Success messages (green).
  pub fn success<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.green().to_string())
  }

  /// Error messages (bright red, bold).
  pub fn error<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.bright_red().bold().to_string())
  }

  /// Warnings (yellow).
  pub fn warning<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.yellow().to_string())
  }

  /// Labels and headings (bright white, bold).
  pub fn emphasis<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.bright_white().bold().to_string())
  }

  /// URLs (blue, underlined).
  pub fn link<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.blue().underline().to_string())
  }

  /// Numbers and versions (bright blue).
  pub fn number<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.bright_blue().to_string())
  }

  /// Identifiers such as commit hashes (bright green).
  pub fn code<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.bright_green().to_string())
  }

  /// Secondary text (dimmed).
  pub fn dimmed<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.dimmed().to_string())
  }
}
