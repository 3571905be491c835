//! Cyclomatic complexity analyzer
//!
//! Walks every Python file in the checkout, parses it with tree-sitter and
//! scores each function, method and class: one point for the block itself
//! plus one per decision point (branches, loops, exception handlers,
//! boolean operators, comprehension clauses, ternaries, assertions).
//! Scores map to letter ranks A through F. A file that fails to read or
//! parse becomes a per-file error entry; it never aborts the walk.

use crate::analyzers::Analyzer;
use crate::core::result::{AnalysisResult, ComplexityBlock, FileError, Finding, Summary};
use std::path::Path;
use tree_sitter::{Node, Parser};

pub struct ComplexityAnalyzer;

impl Analyzer for ComplexityAnalyzer {
  fn name(&self) -> &str {
    "complexity"
  }

  fn description(&self) -> &str {
    "Scores cyclomatic complexity per function, method and class"
  }

  fn analyze(&self, repo_path: &Path) -> AnalysisResult {
    eprintln!("🔍 Scoring complexity under {}", repo_path.display());

    let mut parser = Parser::new();
    let language: tree_sitter::Language = tree_sitter_python::LANGUAGE.into();
    if parser.set_language(&language).is_err() {
      return AnalysisResult::failure("Complexity analysis failed: Python grammar unavailable");
    }

    let mut details = Vec::new();
    for file in super::python_files(repo_path) {
      let display = file.to_string_lossy().into_owned();
      let source = match std::fs::read_to_string(&file) {
        Ok(source) => source,
        Err(e) => {
          details.push(Finding::FileError(FileError {
            file: display,
            error: e.to_string(),
          }));
          continue;
        }
      };

      match parse_blocks(&mut parser, &source, &display) {
        Ok(blocks) => details.extend(blocks.into_iter().map(Finding::Complexity)),
        Err(error) => details.push(Finding::FileError(FileError { file: display, error })),
      }
    }

    let summary = summarize(&details);
    AnalysisResult::Success { summary, details }.reclassify_empty()
  }
}

fn parse_blocks(parser: &mut Parser, source: &str, file: &str) -> Result<Vec<ComplexityBlock>, String> {
  let tree = parser
    .parse(source, None)
    .ok_or_else(|| "failed to parse source".to_string())?;
  let root = tree.root_node();
  if root.has_error() {
    return Err("invalid syntax".to_string());
  }

  let mut blocks = Vec::new();
  collect_blocks(root, source, file, false, &mut blocks);
  Ok(blocks)
}

/// Recursively collect scored blocks. `in_class` distinguishes methods
/// from plain functions; nested definitions are reported as blocks of
/// their own and excluded from the enclosing score, matching how radon
/// segments code.
fn collect_blocks(node: Node, source: &str, file: &str, in_class: bool, blocks: &mut Vec<ComplexityBlock>) {
  let mut cursor = node.walk();
  for child in node.children(&mut cursor) {
    match child.kind() {
      "function_definition" => {
        let kind = if in_class { "method" } else { "function" };
        blocks.push(score_block(child, source, file, kind));
        if let Some(body) = child.child_by_field_name("body") {
          collect_blocks(body, source, file, false, blocks);
        }
      }
      "class_definition" => {
        blocks.push(score_block(child, source, file, "class"));
        if let Some(body) = child.child_by_field_name("body") {
          collect_blocks(body, source, file, true, blocks);
        }
      }
      _ => collect_blocks(child, source, file, in_class, blocks),
    }
  }
}

fn score_block(node: Node, source: &str, file: &str, kind: &str) -> ComplexityBlock {
  let name = node
    .child_by_field_name("name")
    .map(|n| source[n.byte_range()].to_string())
    .unwrap_or_else(|| "<anonymous>".to_string());

  let complexity = 1
    + node
      .child_by_field_name("body")
      .map(|body| count_decisions(body))
      .unwrap_or(0);

  ComplexityBlock {
    file: file.to_string(),
    name,
    complexity,
    kind: kind.to_string(),
    lineno: node.start_position().row as u64 + 1,
    rank: rank(complexity).to_string(),
  }
}

/// Count decision points below `node`, stopping at nested definitions
/// (they are scored as blocks of their own).
fn count_decisions(node: Node) -> u32 {
  let mut count = 0;
  let mut cursor = node.walk();
  for child in node.children(&mut cursor) {
    if matches!(child.kind(), "function_definition" | "class_definition") {
      continue;
    }
    count += decision_weight(child.kind()) + count_decisions(child);
  }
  count
}

fn decision_weight(kind: &str) -> u32 {
  match kind {
    "if_statement" | "elif_clause" | "for_statement" | "while_statement" | "except_clause"
    | "boolean_operator" | "conditional_expression" | "assert_statement" | "case_clause"
    | "if_clause" | "for_in_clause" => 1,
    _ => 0,
  }
}

/// Letter rank for a complexity score (radon's thresholds)
fn rank(complexity: u32) -> &'static str {
  match complexity {
    0..=5 => "A",
    6..=10 => "B",
    11..=20 => "C",
    21..=30 => "D",
    31..=40 => "E",
    _ => "F",
  }
}

/// Count blocks grouped by rank letter
fn summarize(details: &[Finding]) -> Summary {
  let mut summary = Summary::new();
  for finding in details {
    if let Finding::Complexity(block) = finding {
      let count = summary.get(&block.rank).and_then(|v| v.as_u64()).unwrap_or(0);
      summary.insert(block.rank.clone(), serde_json::Value::from(count + 1));
    }
  }
  summary
}
