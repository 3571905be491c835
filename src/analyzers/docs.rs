//! Documentation coverage analyzer
//!
//! Parses every Python file into a syntax tree and counts how many
//! modules, functions and classes open with a docstring. Reports the
//! three coverage percentages and their average. A file that cannot be
//! read or parsed is appended to the details as an error entry and the
//! walk continues.

use crate::analyzers::Analyzer;
use crate::core::result::{AnalysisResult, FileError, Finding, Summary};
use std::path::Path;
use tree_sitter::{Node, Parser};

pub struct DocCoverageAnalyzer;

#[derive(Default)]
struct Counts {
  total_modules: u64,
  documented_modules: u64,
  total_functions: u64,
  documented_functions: u64,
  total_classes: u64,
  documented_classes: u64,
}

impl Analyzer for DocCoverageAnalyzer {
  fn name(&self) -> &str {
    "docs"
  }

  fn description(&self) -> &str {
    "Measures docstring coverage for modules, functions and classes"
  }

  fn analyze(&self, repo_path: &Path) -> AnalysisResult {
    eprintln!("🔍 Measuring documentation coverage under {}", repo_path.display());

    let mut parser = Parser::new();
    let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
    if parser.set_language(&language).is_err() {
      return AnalysisResult::failure("Documentation analysis failed: Python grammar unavailable");
    }

    let mut counts = Counts::default();
    let mut details = Vec::new();

    for file in super::python_files(repo_path) {
      let display = file.to_string_lossy().into_owned();
      let outcome = std::fs::read_to_string(&file)
        .map_err(|e| e.to_string())
        .and_then(|source| tally_file(&mut parser, &source, &mut counts));
      if let Err(error) = outcome {
        details.push(Finding::FileError(FileError { file: display, error }));
      }
    }

    if counts.total_modules == 0 && details.is_empty() {
      // Nothing analyzable; let the empty-result policy speak.
      return AnalysisResult::Success {
        summary: Summary::new(),
        details,
      }
      .reclassify_empty();
    }

    AnalysisResult::Success {
      summary: summarize(&counts),
      details,
    }
  }
}

fn tally_file(parser: &mut Parser, source: &str, counts: &mut Counts) -> Result<(), String> {
  let tree = parser
    .parse(source, None)
    .ok_or_else(|| "failed to parse source".to_string())?;
  let root = tree.root_node();
  if root.has_error() {
    return Err("invalid syntax".to_string());
  }

  counts.total_modules += 1;
  if has_docstring(root) {
    counts.documented_modules += 1;
  }

  tally_definitions(root, counts);
  Ok(())
}

fn tally_definitions(node: Node, counts: &mut Counts) {
  let mut cursor = node.walk();
  for child in node.children(&mut cursor) {
    match child.kind() {
      "function_definition" => {
        counts.total_functions += 1;
        if child.child_by_field_name("body").is_some_and(has_docstring) {
          counts.documented_functions += 1;
        }
      }
      "class_definition" => {
        counts.total_classes += 1;
        if child.child_by_field_name("body").is_some_and(has_docstring) {
          counts.documented_classes += 1;
        }
      }
      _ => {}
    }
    tally_definitions(child, counts);
  }
}

/// Whether a body block (or the module root) opens with a docstring:
/// its first statement is a bare string expression.
fn has_docstring(body: Node) -> bool {
  let mut cursor = body.walk();
  for child in body.children(&mut cursor) {
    if child.kind() == "comment" {
      continue;
    }
    if !child.is_named() {
      continue;
    }
    if child.kind() != "expression_statement" {
      return false;
    }
    return child.named_child(0).is_some_and(|n| n.kind() == "string");
  }
  false
}

fn summarize(counts: &Counts) -> Summary {
  let module_coverage = percentage(counts.documented_modules, counts.total_modules);
  let function_coverage = percentage(counts.documented_functions, counts.total_functions);
  let class_coverage = percentage(counts.documented_classes, counts.total_classes);
  let overall = (module_coverage + function_coverage + class_coverage) / 3.0;

  let mut summary = Summary::new();
  summary.insert("total_modules".into(), counts.total_modules.into());
  summary.insert("documented_modules".into(), counts.documented_modules.into());
  summary.insert("module_coverage".into(), format!("{:.2}%", module_coverage).into());
  summary.insert("total_functions".into(), counts.total_functions.into());
  summary.insert("documented_functions".into(), counts.documented_functions.into());
  summary.insert("function_coverage".into(), format!("{:.2}%", function_coverage).into());
  summary.insert("total_classes".into(), counts.total_classes.into());
  summary.insert("documented_classes".into(), counts.documented_classes.into());
  summary.insert("class_coverage".into(), format!("{:.2}%", class_coverage).into());
  summary.insert(
    "overall_documentation_coverage".into(),
    format!("{:.2}%", overall).into(),
  );
  summary
}

fn percentage(documented: u64, total: u64) -> f64 {
  if total == 0 {
    0.0
  } else {
    documented as f64 / total as f64 * 100.0
  }
}
