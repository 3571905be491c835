//! Finding ranking: most significant first
//!
//! Each analyzer orders its own classifying field through a named weight
//! table. One stable descending sort serves every analyzer, so findings of
//! equal severity keep their scan order and the report renders ties in the
//! order the tool emitted them, deterministically.

use crate::core::result::Finding;
use std::cmp::Reverse;

type WeightTable = &'static [(&'static str, u32)];

const SECURITY_WEIGHTS: WeightTable = &[("HIGH", 2), ("MEDIUM", 1), ("LOW", 0)];

const COMPLEXITY_WEIGHTS: WeightTable =
  &[("F", 5), ("E", 4), ("D", 3), ("C", 2), ("B", 1), ("A", 0)];

const STYLE_WEIGHTS: WeightTable =
  &[("error", 3), ("warning", 2), ("refactor", 1), ("convention", 0)];

/// Weight table for an analyzer, looked up once per ranking pass.
/// Analyzers without a table rank with uniform weight (original order).
fn table_for(analyzer_name: &str) -> Option<WeightTable> {
  match analyzer_name {
    "security" => Some(SECURITY_WEIGHTS),
    "complexity" => Some(COMPLEXITY_WEIGHTS),
    "style" => Some(STYLE_WEIGHTS),
    _ => None,
  }
}

/// The classifying field of a finding, by the owning analyzer's schema
fn classifier(finding: &Finding) -> Option<&str> {
  match finding {
    Finding::Security(f) => Some(&f.issue_severity),
    Finding::Style(i) => Some(&i.kind),
    Finding::Complexity(b) => Some(&b.rank),
    Finding::FileError(_) => None,
  }
}

/// Unknown labels fall to the bottom of the table
fn weight(table: WeightTable, label: Option<&str>) -> u32 {
  label
    .and_then(|label| table.iter().find(|(key, _)| *key == label))
    .map(|(_, weight)| *weight)
    .unwrap_or(0)
}

/// Return the `top_n` most significant findings for `analyzer_name`,
/// stably sorted by descending severity weight. Returns everything, still
/// sorted, when there are fewer than `top_n`.
pub fn rank(analyzer_name: &str, details: &[Finding], top_n: usize) -> Vec<Finding> {
  let mut ranked: Vec<Finding> = details.to_vec();
  if let Some(table) = table_for(analyzer_name) {
    ranked.sort_by_key(|finding| Reverse(weight(table, classifier(finding))));
  }
  ranked.truncate(top_n);
  ranked
}
