//! tfs-client - Inspect and verify Team Foundation Server client configuration
//!
//! This is the main entry point for the CLI application.

fn main() {
  tfs_client::cli::run();
}
