//! Report rendering boundary
//!
//! Consumes the orchestration report plus the per-analyzer ranked views
//! and produces the human-readable artifact. Paths in findings are
//! already relative to the (torn down) workspace root. A finding that
//! cannot be formatted gets a fallback line; it never takes the rest of
//! the report down with it.

use crate::core::error::{LensError, LensResult, ResultExt};
use crate::core::result::{AnalysisResult, Finding};
use crate::engine::OrchestrationReport;
use crate::ranking;
use std::path::{Path, PathBuf};

/// Render the full report as displayable text
pub fn render(reference: &str, report: &OrchestrationReport, top_n: usize) -> String {
  let mut out = String::new();

  out.push_str("Repository analysis report\n");
  out.push_str(&format!("Reference: {}\n", reference));
  out.push_str(&format!(
    "Generated: {}\n",
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
  ));

  for (name, result) in report.entries() {
    out.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    match result {
      AnalysisResult::Failure { error } => {
        out.push_str(&format!("❌ {}\n", name));
        out.push_str(&format!("   {}\n", error));
      }
      AnalysisResult::Success { summary, details } => {
        out.push_str(&format!("✅ {}\n", name));

        for (key, value) in summary {
          out.push_str(&format!("   {}: {}\n", key, display_value(value)));
        }

        let ranked = ranking::rank(name, details, top_n);
        if !ranked.is_empty() {
          out.push_str(&format!("\n   Top {} issues:\n", ranked.len()));
          for finding in &ranked {
            match format_finding(name, finding) {
              Ok(line) => out.push_str(&format!("   {}\n", line)),
              Err(e) => out.push_str(&format!("   ⚠️  could not render finding: {}\n", e)),
            }
          }
        }
      }
    }
  }

  out
}

/// One line per finding, field selection depending on the analyzer that
/// produced it
fn format_finding(analyzer_name: &str, finding: &Finding) -> LensResult<String> {
  match finding {
    Finding::Security(f) => Ok(format!(
      "{}:{} [{}] {}",
      f.filename, f.line_number, f.issue_severity, f.issue_text
    )),
    Finding::Style(i) => Ok(format!(
      "{}:{} [{}/{}] {}",
      i.path, i.line, i.kind, i.symbol, i.message
    )),
    Finding::Complexity(b) => Ok(format!(
      "{}:{} [{}] {} {} (complexity {})",
      b.file, b.lineno, b.rank, b.kind, b.name, b.complexity
    )),
    Finding::FileError(e) => Ok(format!("Error processing {}: {}", e.file, e.error)),
  }
  .and_then(|line: String| {
    if line.trim().is_empty() {
      Err(LensError::message(format!("empty {} finding", analyzer_name)))
    } else {
      Ok(line)
    }
  })
}

fn display_value(value: &serde_json::Value) -> String {
  match value {
    serde_json::Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

/// Write the rendered report into `dir` under a timestamped name and
/// return its path
pub fn write_artifact_in(dir: &Path, contents: &str) -> LensResult<PathBuf> {
  let timestamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
  let path = dir.join(format!("repolens-report-{}.txt", timestamp));
  std::fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

/// Write the report artifact into the current working directory
pub fn write_artifact(contents: &str) -> LensResult<PathBuf> {
  write_artifact_in(Path::new("."), contents)
}
