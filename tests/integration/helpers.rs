//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A local Python repository fixture, exposed as a bare repo so it can be
/// cloned through the same path the CLI takes for remote URLs.
pub struct PythonRepo {
  _root: TempDir,
  pub source: PathBuf,
  root_path: PathBuf,
}

impl PythonRepo {
  /// Create a fixture repository with `main` as the default branch
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let root_path = root.path().to_path_buf();
    let source = root_path.join("source");
    std::fs::create_dir_all(&source)?;

    git(&source, &["init", "--initial-branch=main"])?;
    git(&source, &["config", "user.name", "Test User"])?;
    git(&source, &["config", "user.email", "test@example.com"])?;

    Ok(Self {
      _root: root,
      source,
      root_path,
    })
  }

  /// Write a file under the source checkout
  pub fn write_file(&self, name: &str, content: &str) -> Result<()> {
    let path = self.source.join(name);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
  }

  /// Commit current changes
  pub fn commit(&self, message: &str) -> Result<()> {
    git(&self.source, &["add", "."])?;
    git(&self.source, &["commit", "-m", message])?;
    Ok(())
  }

  /// Create a branch with an extra file, then switch back to main
  pub fn add_branch(&self, name: &str, file: &str, content: &str) -> Result<()> {
    git(&self.source, &["checkout", "-b", name])?;
    self.write_file(file, content)?;
    self.commit(&format!("Add {}", file))?;
    git(&self.source, &["checkout", "main"])?;
    Ok(())
  }

  /// Publish the fixture as a bare repository and return its path.
  /// The `.git` suffix keeps reference normalization a no-op.
  pub fn publish(&self) -> Result<PathBuf> {
    let bare = self.root_path.join("fixture.git");
    git(
      &self.root_path,
      &["clone", "--bare", source_str(&self.source)?, "fixture.git"],
    )?;
    Ok(bare)
  }
}

fn source_str(path: &Path) -> Result<&str> {
  path.to_str().context("fixture path is not valid UTF-8")
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the repolens binary, failing the test on a non-zero exit
pub fn run_repolens(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_repolens_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "repolens command failed: repolens {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Run the repolens binary and hand back the output regardless of status
pub fn run_repolens_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_repolens");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run repolens")
}

/// Stdout of a finished run as UTF-8
pub fn stdout_of(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of a finished run as UTF-8
pub fn stderr_of(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
