//! Tests for workspace acquisition through the CLI

use crate::helpers::*;
use anyhow::Result;
use tempfile::TempDir;

const MAIN_MODULE: &str = r#""""Entry point."""

def main():
    """Run the thing."""
    return 0
"#;

const FEATURE_MODULE: &str = r#"def feature_flag(x):
    if x:
        return True
    return False
"#;

fn fixture_with_branch() -> Result<(PythonRepo, std::path::PathBuf)> {
  let repo = PythonRepo::new()?;
  repo.write_file("app.py", MAIN_MODULE)?;
  repo.commit("Initial commit")?;
  repo.add_branch("feature", "feature_only.py", FEATURE_MODULE)?;
  let published = repo.publish()?;
  Ok((repo, published))
}

#[test]
fn test_clones_default_branch_without_suffix() -> Result<()> {
  let (_repo, published) = fixture_with_branch()?;
  let cwd = TempDir::new()?;

  let output = run_repolens(cwd.path(), &[published.to_str().unwrap()])?;
  let stdout = stdout_of(&output);

  assert!(stdout.contains("app.py"));
  assert!(!stdout.contains("feature_only.py"));
  Ok(())
}

#[test]
fn test_clones_named_ref_with_tree_suffix() -> Result<()> {
  let (_repo, published) = fixture_with_branch()?;
  let cwd = TempDir::new()?;

  let reference = format!("{}/tree/feature", published.display());
  let output = run_repolens(cwd.path(), &[&reference])?;
  let stdout = stdout_of(&output);

  assert!(stdout.contains("feature_only.py"));
  Ok(())
}

#[test]
fn test_nonexistent_reference_is_fatal_with_canonical_message() -> Result<()> {
  let cwd = TempDir::new()?;

  let output = run_repolens_raw(cwd.path(), &["/no/such/repository/anywhere"])?;

  assert!(!output.status.success());
  assert!(stderr_of(&output).contains("Failed to clone repository"));
  // no report artifact may be produced for a failed acquisition
  let artifacts: Vec<_> = std::fs::read_dir(cwd.path())?
    .filter_map(|e| e.ok())
    .filter(|e| e.file_name().to_string_lossy().starts_with("repolens-report-"))
    .collect();
  assert!(artifacts.is_empty());
  Ok(())
}

#[test]
fn test_nonexistent_ref_on_real_repository_is_fatal() -> Result<()> {
  let (_repo, published) = fixture_with_branch()?;
  let cwd = TempDir::new()?;

  let reference = format!("{}/tree/no-such-branch", published.display());
  let output = run_repolens_raw(cwd.path(), &[&reference])?;

  assert!(!output.status.success());
  assert!(stderr_of(&output).contains("Failed to clone repository"));
  Ok(())
}
