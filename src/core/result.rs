//! Normalized analyzer output
//!
//! Every adapter funnels its tool's native output into [`AnalysisResult`].
//! The two variants are mutually exclusive by construction: a result is
//! either a summary plus detail findings, or an error string. The JSON
//! shape mirrors the summary/details and error objects the report consumers
//! already understand.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Summary mapping rendered at the top of each report section.
///
/// Counts are integers; the documentation analyzer additionally stores
/// formatted percentage strings.
pub type Summary = serde_json::Map<String, serde_json::Value>;

/// Standardized message for a structurally successful run that produced
/// nothing to report. Reclassified into a `Failure` by the engine.
pub const NO_RESULTS_MSG: &str = "No issues found or not analyzable files in the repo";

/// Normalized output of one analyzer
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
  /// The tool ran and its output was understood
  Success { summary: Summary, details: Vec<Finding> },
  /// Any failure mode of the underlying invocation, translated locally
  Failure { error: String },
}

impl AnalysisResult {
  /// Build a failure result with a tool-attributed message
  pub fn failure(error: impl Into<String>) -> Self {
    AnalysisResult::Failure { error: error.into() }
  }

  #[allow(dead_code)] // Convenience predicate, exercised by the tests
  pub fn is_success(&self) -> bool {
    matches!(self, AnalysisResult::Success { .. })
  }

  /// Apply the empty-result policy: a `Success` with nothing in it is
  /// reported identically to an error. This is the sole case where a
  /// structurally successful call becomes a failure.
  pub fn reclassify_empty(self) -> Self {
    match self {
      AnalysisResult::Success { summary, details } if summary.is_empty() && details.is_empty() => {
        AnalysisResult::failure(NO_RESULTS_MSG)
      }
      other => other,
    }
  }

  /// Rebase every finding path onto the workspace root. The workspace is
  /// torn down before rendering, so absolute paths must not survive here.
  pub fn rebase_paths(&mut self, root: &Path) {
    if let AnalysisResult::Success { details, .. } = self {
      for finding in details {
        finding.rebase_paths(root);
      }
    }
  }
}

/// One reported issue or location. Each analyzer keeps its own record
/// shape; nothing downstream assumes a common schema across adapters.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Finding {
  Security(SecurityFinding),
  Style(StyleIssue),
  Complexity(ComplexityBlock),
  FileError(FileError),
}

impl Finding {
  fn rebase_paths(&mut self, root: &Path) {
    match self {
      Finding::Security(f) => rebase(&mut f.filename, root),
      Finding::Style(i) => rebase(&mut i.path, root),
      Finding::Complexity(b) => rebase(&mut b.file, root),
      Finding::FileError(e) => rebase(&mut e.file, root),
    }
  }
}

fn rebase(path: &mut String, root: &Path) {
  if let Some(rel) = pathdiff::diff_paths(Path::new(path.as_str()), root) {
    if !rel.as_os_str().is_empty() && !rel.starts_with("..") {
      *path = rel.to_string_lossy().into_owned();
    }
  }
}

/// A bandit security finding, deserialized from its `results` array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityFinding {
  pub filename: String,
  pub line_number: u64,
  pub issue_severity: String,
  pub issue_confidence: String,
  pub issue_text: String,
  #[serde(default)]
  pub test_id: String,
}

/// A pylint message, deserialized from its JSON reporter output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleIssue {
  /// Issue category: error, warning, refactor, convention, info or fatal
  #[serde(rename = "type")]
  pub kind: String,
  pub path: String,
  pub line: u64,
  #[serde(default)]
  pub column: u64,
  #[serde(default)]
  pub symbol: String,
  pub message: String,
  #[serde(rename = "message-id", default)]
  pub message_id: String,
}

/// One function, method or class scored by the complexity analyzer
#[derive(Debug, Clone, Serialize)]
pub struct ComplexityBlock {
  pub file: String,
  pub name: String,
  pub complexity: u32,
  /// Block kind: function, method or class
  #[serde(rename = "type")]
  pub kind: String,
  pub lineno: u64,
  /// Letter rank A (simplest) through F
  pub rank: String,
}

/// A per-file analysis error recorded in `details` instead of aborting
/// the whole adapter
#[derive(Debug, Clone, Serialize)]
pub struct FileError {
  pub file: String,
  pub error: String,
}
