//! Workspace acquisition: resolve a repository reference into a scoped,
//! transient shallow checkout
//!
//! The clone runs through system git with an isolated environment. The
//! checkout directory lives exactly as long as the closure passed to
//! [`with_workspace`]; cleanup happens on every exit path, including a
//! failed clone and an unwinding closure.

use crate::core::error::{LensError, LensResult, ResultExt};
use std::path::Path;
use std::process::Command;

/// A parsed repository reference: the clonable URL plus an optional ref.
///
/// Derived by splitting the incoming URL on the `/tree/` branch marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoReference {
  pub base_url: String,
  pub git_ref: Option<String>,
}

impl RepoReference {
  /// Parse a user-supplied URL.
  ///
  /// Supports forms like:
  ///   - `https://github.com/user/repo`
  ///   - `https://github.com/user/repo/tree/branch-name`
  ///
  /// The base URL is normalized to end with `.git`.
  pub fn parse(input: &str) -> Self {
    let (base, git_ref) = match input.split_once("/tree/") {
      Some((base, branch)) => (base, Some(branch.to_string())),
      None => (input, None),
    };

    let mut base_url = base.to_string();
    if !base_url.ends_with(".git") {
      base_url.push_str(".git");
    }

    Self { base_url, git_ref }
  }
}

/// Acquire a shallow checkout of `reference` and run `f` against it.
///
/// The temporary directory is removed when this function returns, whether
/// `f` succeeds, fails or panics. A non-zero clone exit tears the directory
/// down immediately and surfaces the child's stderr as
/// [`LensError::Acquisition`].
pub fn with_workspace<T>(
  reference: &RepoReference,
  f: impl FnOnce(&Path) -> LensResult<T>,
) -> LensResult<T> {
  let tmp = tempfile::Builder::new()
    .prefix("repolens-")
    .tempdir()
    .context("Failed to create workspace directory")?;

  clone_into(reference, tmp.path())?;

  // TempDir drops (and removes the checkout) on all paths out of here,
  // including unwinds from `f`.
  f(tmp.path())
}

fn clone_into(reference: &RepoReference, dest: &Path) -> LensResult<()> {
  let mut cmd = git_cmd();
  cmd.args(["clone", "--depth", "1"]);
  if let Some(git_ref) = &reference.git_ref {
    cmd.args(["--branch", git_ref]);
  }
  cmd.arg(&reference.base_url).arg(dest);

  let output = cmd.output().context("Failed to execute git clone")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    return Err(LensError::Acquisition { stderr });
  }

  Ok(())
}

/// Create a git command with an isolated environment
///
/// - Clears environment variables
/// - Whitelists only PATH and HOME
/// - Adds safe configuration overrides
fn git_cmd() -> Command {
  let mut cmd = Command::new("git");

  // Isolated environment (don't trust global config)
  cmd.env_clear();
  if let Ok(path) = std::env::var("PATH") {
    cmd.env("PATH", path);
  }
  if let Ok(home) = std::env::var("HOME") {
    cmd.env("HOME", home);
  }

  // Force safe behavior (override user config)
  cmd.arg("-c").arg("protocol.version=2");
  cmd.arg("-c").arg("advice.detachedHead=false");

  cmd
}
