//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;
use url::Url;

/// Hosted Project Collection URL.
pub fn hosted_collection() -> Url {
  Url::parse("https://x.visualstudio.com/DefaultCollection").unwrap()
}

/// On-premises Project Collection URL.
pub fn on_premises_collection() -> Url {
  Url::parse("http://tfsserver:8080/tfs/DefaultCollection").unwrap()
}

/// Write a `.netrc` with entries for the on-premises server and a default.
pub fn sample_netrc() -> NamedTempFile {
  let mut file = NamedTempFile::new().unwrap();
  write!(
    file,
    r#"
# build agent credentials
machine tfsserver
  login builduser
  password hunter2

default
  login anonymous
  password guest
"#
  )
  .unwrap();
  file
}
