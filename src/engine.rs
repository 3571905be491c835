//! Analysis engine: one workspace, many analyzers
//!
//! Runs every registered analyzer, in registration order, against a single
//! acquired workspace. Adapters are expected to contain their own failures;
//! the engine adds a second line of defense by catching panics at the call
//! boundary so one misbehaving analyzer can never abort its siblings. Only
//! workspace acquisition is fatal to the run.

use crate::analyzers::{Analyzer, ComplexityAnalyzer, DocCoverageAnalyzer, SecurityAnalyzer, StyleAnalyzer};
use crate::core::error::{LensError, LensResult};
use crate::core::result::AnalysisResult;
use crate::ui::progress::AnalyzerProgress;
use crate::workspace::{self, RepoReference};
use serde::Serialize;
use serde::ser::SerializeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use std::sync::Arc;

/// Named analyzer results in invocation order. Always holds exactly one
/// entry per registered analyzer; individual failures fill their slot
/// instead of shrinking the mapping.
#[derive(Debug, Clone)]
pub struct OrchestrationReport {
  entries: Vec<(String, AnalysisResult)>,
}

impl OrchestrationReport {
  pub fn entries(&self) -> &[(String, AnalysisResult)] {
    &self.entries
  }

  #[allow(dead_code)] // Convenience lookup, exercised by the tests
  pub fn get(&self, name: &str) -> Option<&AnalysisResult> {
    self.entries.iter().find(|(n, _)| n == name).map(|(_, r)| r)
  }

  #[allow(dead_code)]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[allow(dead_code)]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Convert to JSON
  pub fn to_json(&self) -> LensResult<String> {
    serde_json::to_string_pretty(self)
      .map_err(|e| LensError::message(format!("JSON serialization failed: {}", e)))
  }
}

impl Serialize for OrchestrationReport {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.entries.len()))?;
    for (name, result) in &self.entries {
      map.serialize_entry(name, result)?;
    }
    map.end()
  }
}

/// Orchestrates running the registered analyzers over one acquired
/// workspace per run.
pub struct AnalysisEngine {
  analyzers: Vec<Arc<dyn Analyzer>>,
  show_progress: bool,
}

impl AnalysisEngine {
  /// Create a new empty engine
  pub fn new() -> Self {
    Self {
      analyzers: Vec::new(),
      show_progress: false,
    }
  }

  /// Register an analyzer with the engine
  pub fn register(&mut self, analyzer: Arc<dyn Analyzer>) {
    self.analyzers.push(analyzer);
  }

  /// Toggle the terminal progress bar (off by default; the CLI turns it
  /// on for human-readable runs)
  pub fn show_progress(&mut self, on: bool) {
    self.show_progress = on;
  }

  /// Get all registered analyzers
  pub fn analyzers(&self) -> &[Arc<dyn Analyzer>] {
    &self.analyzers
  }

  /// Acquire a workspace for `reference` and run every analyzer against
  /// it. The workspace is torn down before this returns; finding paths in
  /// the report are relative to the (former) workspace root.
  pub fn run(&self, reference: &RepoReference) -> LensResult<OrchestrationReport> {
    workspace::with_workspace(reference, |path| Ok(self.run_at(path)))
  }

  /// Run every analyzer against an already-acquired checkout, in
  /// registration order.
  pub fn run_at(&self, path: &Path) -> OrchestrationReport {
    let mut progress = self
      .show_progress
      .then(|| AnalyzerProgress::new(self.analyzers.len(), "analyzing"));
    let mut entries = Vec::with_capacity(self.analyzers.len());

    for analyzer in &self.analyzers {
      let mut result = match catch_unwind(AssertUnwindSafe(|| analyzer.analyze(path))) {
        Ok(result) => result,
        Err(payload) => AnalysisResult::failure(format!(
          "{} analyzer aborted: {}",
          analyzer.name(),
          panic_message(&payload)
        )),
      };

      result = result.reclassify_empty();
      result.rebase_paths(path);

      entries.push((analyzer.name().to_string(), result));
      if let Some(bar) = progress.as_mut() {
        bar.inc();
      }
    }

    OrchestrationReport { entries }
  }
}

impl Default for AnalysisEngine {
  fn default() -> Self {
    Self::new()
  }
}

fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> String {
  if let Some(s) = payload.downcast_ref::<&str>() {
    (*s).to_string()
  } else if let Some(s) = payload.downcast_ref::<String>() {
    s.clone()
  } else {
    "unknown panic".to_string()
  }
}

/// Create an engine with the built-in analyzers in their canonical order
pub fn create_default_engine() -> AnalysisEngine {
  let mut engine = AnalysisEngine::new();
  engine.register(Arc::new(SecurityAnalyzer));
  engine.register(Arc::new(StyleAnalyzer));
  engine.register(Arc::new(ComplexityAnalyzer));
  engine.register(Arc::new(DocCoverageAnalyzer));
  engine
}
