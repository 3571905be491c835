//! Analyzer adapters
//!
//! Each adapter translates one external analysis tool's invocation and
//! native output into the normalized [`AnalysisResult`] shape. Adapters
//! carry their own failure domain: no failure mode of the underlying tool
//! may escape `analyze`; every one is caught locally and returned as a
//! `Failure` with a tool-attributed message. Adapters read the workspace,
//! spawn at most one child process, and never mutate anything under the
//! analyzed path.

mod complexity;
mod docs;
mod security;
mod style;

pub use complexity::ComplexityAnalyzer;
pub use docs::DocCoverageAnalyzer;
pub use security::SecurityAnalyzer;
pub use style::StyleAnalyzer;

use crate::core::result::AnalysisResult;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The uniform capability every adapter implements
pub trait Analyzer: Send + Sync {
  /// Unique name for this analyzer (kebab-case)
  fn name(&self) -> &str;

  /// Human-readable description
  fn description(&self) -> &str;

  /// Run the analysis against a checkout. Infallible at the boundary:
  /// failures come back as the `Failure` variant, never as panics or
  /// error returns.
  fn analyze(&self, repo_path: &Path) -> AnalysisResult;
}

/// Every Python file under `root`, in a stable walk order, skipping the
/// `.git` directory. Shared by the in-process analyzers.
pub(crate) fn python_files(root: &Path) -> Vec<PathBuf> {
  WalkDir::new(root)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|e| e.file_name() != ".git")
    .filter_map(|entry| entry.ok())
    .filter(|entry| {
      entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "py")
    })
    .map(|entry| entry.into_path())
    .collect()
}
