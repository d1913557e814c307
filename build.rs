//! Build script for tfs-client
//!
//! Embeds version metadata used by `tfs-client version` and the default
//! user agent.

use std::env;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
  let git_hash = command_output("git", &["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
  let rustc_version = command_output("rustc", &["--version"]).unwrap_or_else(|| "unknown".to_string());
  let build_timestamp = SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|elapsed| elapsed.as_secs())
    .unwrap_or_default();

  println!("cargo:rustc-env=GIT_HASH={git_hash}");
  println!("cargo:rustc-env=BUILD_TIMESTAMP={build_timestamp}");
  println!("cargo:rustc-env=TARGET={}", env::var("TARGET").unwrap_or_default());
  println!("cargo:rustc-env=RUSTC_VERSION={rustc_version}");

  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=.git/HEAD");
  println!("cargo:rerun-if-env-changed=TARGET");
}

/// Trimmed stdout of a successful command, if any.
fn command_output(program: &str, args: &[&str]) -> Option<String> {
  let output = Command::new(program).args(args).output().ok()?;
  if !output.status.success() {
    return None;
  }
  let text = String::from_utf8(output.stdout).ok()?.trim().to_string();
  (!text.is_empty()).then_some(text)
}
