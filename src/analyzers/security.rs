//! Security analyzer backed by bandit
//!
//! Bandit is invoked as a child process with JSON output. Its exit status
//! is not an error signal: the tool exits non-zero whenever findings are
//! present, so only a failure to spawn or unparsable output counts as a
//! failure here.

use crate::analyzers::Analyzer;
use crate::core::result::{AnalysisResult, Finding, SecurityFinding, Summary};
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

pub struct SecurityAnalyzer;

#[derive(Deserialize)]
struct BanditOutput {
  #[serde(default)]
  results: Vec<SecurityFinding>,
}

impl Analyzer for SecurityAnalyzer {
  fn name(&self) -> &str {
    "security"
  }

  fn description(&self) -> &str {
    "Scans for common security issues with bandit"
  }

  fn analyze(&self, repo_path: &Path) -> AnalysisResult {
    eprintln!("🔍 Running bandit on {}", repo_path.display());

    let output = match Command::new("bandit")
      .arg("-r")
      .arg(repo_path)
      .args(["-f", "json", "-q"])
      .output()
    {
      Ok(output) => output,
      Err(e) => return AnalysisResult::failure(format!("bandit failed to run: {}", e)),
    };

    // Non-zero exit means findings were present; parse stdout regardless.
    let parsed: BanditOutput = match serde_json::from_slice(&output.stdout) {
      Ok(parsed) => parsed,
      Err(_) => return AnalysisResult::failure("Failed to parse bandit output."),
    };

    let summary = summarize(&parsed.results);
    let details = parsed.results.into_iter().map(Finding::Security).collect();

    AnalysisResult::Success { summary, details }.reclassify_empty()
  }
}

/// Count findings grouped by severity label
fn summarize(findings: &[SecurityFinding]) -> Summary {
  let mut summary = Summary::new();
  for finding in findings {
    let severity = if finding.issue_severity.is_empty() {
      "UNSPECIFIED"
    } else {
      finding.issue_severity.as_str()
    };
    let count = summary.get(severity).and_then(|v| v.as_u64()).unwrap_or(0);
    summary.insert(severity.to_string(), serde_json::Value::from(count + 1));
  }
  summary
}
