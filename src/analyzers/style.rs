//! Style and convention analyzer backed by pylint
//!
//! Pylint is invoked with its JSON reporter and stdout as the capturing
//! sink. `--exit-zero` keeps the lint-findings bitmask out of the exit
//! status, mirroring the security adapter's non-fatal stance; a genuinely
//! broken invocation still shows up as unparsable output.

use crate::analyzers::Analyzer;
use crate::core::result::{AnalysisResult, Finding, StyleIssue, Summary};
use std::path::Path;
use std::process::Command;

pub struct StyleAnalyzer;

impl Analyzer for StyleAnalyzer {
  fn name(&self) -> &str {
    "style"
  }

  fn description(&self) -> &str {
    "Checks style and conventions with pylint"
  }

  fn analyze(&self, repo_path: &Path) -> AnalysisResult {
    eprintln!("🔍 Running pylint on {}", repo_path.display());

    let output = match Command::new("pylint")
      .args(["--recursive=y", "--output-format=json", "--exit-zero"])
      .arg(repo_path)
      .output()
    {
      Ok(output) => output,
      Err(e) => return AnalysisResult::failure(format!("pylint failed to run: {}", e)),
    };

    let issues: Vec<StyleIssue> = match serde_json::from_slice(&output.stdout) {
      Ok(issues) => issues,
      Err(_) => return AnalysisResult::failure("Failed to parse pylint output."),
    };

    let summary = summarize(&issues);
    let details = issues.into_iter().map(Finding::Style).collect();

    AnalysisResult::Success { summary, details }.reclassify_empty()
  }
}

/// Count issues grouped by category (error, warning, refactor, convention)
fn summarize(issues: &[StyleIssue]) -> Summary {
  let mut summary = Summary::new();
  for issue in issues {
    let kind = if issue.kind.is_empty() { "unknown" } else { issue.kind.as_str() };
    let count = summary.get(kind).and_then(|v| v.as_u64()).unwrap_or(0);
    summary.insert(kind.to_string(), serde_json::Value::from(count + 1));
  }
  summary
}
