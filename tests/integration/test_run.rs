//! End-to-end runs over a local fixture repository

use crate::helpers::*;
use anyhow::Result;
use tempfile::TempDir;

const APP: &str = r#""""Application module."""

def tangled(a, b, c):
    if a and b:
        for i in range(10):
            if i > c:
                while b:
                    b -= 1
    elif c:
        return 1
    return 0

class Widget:
    def render(self):
        return "<widget>"
"#;

fn fixture() -> Result<(PythonRepo, std::path::PathBuf)> {
  let repo = PythonRepo::new()?;
  repo.write_file("app.py", APP)?;
  repo.write_file("README.md", "# fixture\n")?;
  repo.commit("Initial commit")?;
  let published = repo.publish()?;
  Ok((repo, published))
}

fn artifacts_in(dir: &std::path::Path) -> Result<Vec<std::path::PathBuf>> {
  Ok(
    std::fs::read_dir(dir)?
      .filter_map(|e| e.ok())
      .filter(|e| e.file_name().to_string_lossy().starts_with("repolens-report-"))
      .map(|e| e.path())
      .collect(),
  )
}

#[test]
fn test_report_has_one_section_per_analyzer() -> Result<()> {
  let (_repo, published) = fixture()?;
  let cwd = TempDir::new()?;

  let output = run_repolens(cwd.path(), &[published.to_str().unwrap()])?;
  let stdout = stdout_of(&output);

  // every configured analyzer reports, success or failure
  for name in ["security", "style", "complexity", "docs"] {
    assert!(stdout.contains(name), "missing section for {}", name);
  }

  // the in-process analyzers see the checkout
  assert!(stdout.contains("✅ complexity"));
  assert!(stdout.contains("✅ docs"));
  assert!(stdout.contains("tangled"));
  Ok(())
}

#[test]
fn test_finding_paths_are_workspace_relative() -> Result<()> {
  let (_repo, published) = fixture()?;
  let cwd = TempDir::new()?;

  let output = run_repolens(cwd.path(), &[published.to_str().unwrap()])?;
  let stdout = stdout_of(&output);

  assert!(stdout.contains("app.py:"));
  assert!(!stdout.contains("/repolens-"), "ephemeral workspace paths leaked");
  Ok(())
}

#[test]
fn test_writes_timestamped_artifact() -> Result<()> {
  let (_repo, published) = fixture()?;
  let cwd = TempDir::new()?;

  run_repolens(cwd.path(), &[published.to_str().unwrap()])?;

  let artifacts = artifacts_in(cwd.path())?;
  assert_eq!(artifacts.len(), 1);
  let contents = std::fs::read_to_string(&artifacts[0])?;
  assert!(contents.contains("Repository analysis report"));
  assert!(contents.contains("complexity"));
  Ok(())
}

#[test]
fn test_json_output_is_a_complete_ordered_mapping() -> Result<()> {
  let (_repo, published) = fixture()?;
  let cwd = TempDir::new()?;

  let output = run_repolens(cwd.path(), &[published.to_str().unwrap(), "--json"])?;
  let stdout = stdout_of(&output);

  let parsed: serde_json::Value = serde_json::from_str(&stdout)?;
  let object = parsed.as_object().expect("report must be a JSON object");
  assert_eq!(object.len(), 4);
  for name in ["security", "style", "complexity", "docs"] {
    assert!(object.contains_key(name), "missing entry for {}", name);
  }

  // an entry is either summary/details or an error, never both
  for (_, entry) in object {
    let entry = entry.as_object().unwrap();
    assert!(entry.contains_key("error") != entry.contains_key("summary"));
  }
  Ok(())
}

#[test]
fn test_empty_repository_still_reports_every_analyzer() -> Result<()> {
  let repo = PythonRepo::new()?;
  repo.write_file("README.md", "# nothing to analyze\n")?;
  repo.commit("Initial commit")?;
  let published = repo.publish()?;
  let cwd = TempDir::new()?;

  let output = run_repolens(cwd.path(), &[published.to_str().unwrap(), "--json"])?;
  let parsed: serde_json::Value = serde_json::from_str(&stdout_of(&output))?;
  let object = parsed.as_object().unwrap();

  assert_eq!(object.len(), 4);
  // the in-process analyzers find nothing analyzable and say so
  assert_eq!(
    object["complexity"]["error"],
    "No issues found or not analyzable files in the repo"
  );
  assert_eq!(
    object["docs"]["error"],
    "No issues found or not analyzable files in the repo"
  );
  Ok(())
}
