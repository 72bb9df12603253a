//! Configuration document schema and severity handling.
//!
//! A configuration maps rule identifiers to severities and may extend named
//! configs exported by plugins. Rule maps use `serde_json::Map`, which with
//! the `preserve_order` feature keeps insertion order, so merged results and
//! emitted bundles are reproducible for identical input.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// Ordered mapping from rule identifier to severity value.
///
/// Severities stay as raw JSON scalars so their literal form (string vs.
/// number) survives into the emitted bundle untouched.
pub type RuleConfig = Map<String, Json>;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
/// A configuration document, either the compile input or a named config
/// exported from a plugin manifest.
pub struct ConfigDocument {
    #[serde(default)]
    pub rules: RuleConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Extends>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
/// An `extends` declaration: one reference or an ordered list.
pub enum Extends {
    Single(String),
    Many(Vec<String>),
}

impl Extends {
    /// View the declaration as an ordered slice of references.
    pub fn entries(&self) -> &[String] {
        match self {
            Extends::Single(s) => std::slice::from_ref(s),
            Extends::Many(list) => list,
        }
    }
}

/// Whether a severity value turns the rule off.
///
/// Only the literal tokens `off` and numeric `0` disable a rule; every other
/// value (including unknown tokens such as `"info"`) counts as enabled and
/// passes through verbatim.
pub fn is_disabled(severity: &Json) -> bool {
    match severity {
        Json::String(s) => s == "off",
        Json::Number(n) => n.as_i64() == Some(0) || n.as_u64() == Some(0),
        _ => false,
    }
}

/// Normalize a severity for output: disabled becomes numeric `0`, anything
/// else is kept exactly as written.
pub fn normalize(severity: &Json) -> Json {
    if is_disabled(severity) {
        Json::from(0)
    } else {
        severity.clone()
    }
}
