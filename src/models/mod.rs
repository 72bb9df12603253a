//! Shared data models for configuration documents, plugin manifests, and
//! compile reports.

pub mod config;
pub mod plugin;

use serde::Serialize;
use serde_json::Value as Json;

#[derive(Serialize)]
/// Per-rule entry of a compile report.
pub struct RuleReport {
    pub name: String,
    pub severity: Json,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_path: Option<String>,
}

#[derive(Serialize)]
/// Aggregated compile summary used by printers.
pub struct CompileSummary {
    pub rules: usize,
    pub imports: usize,
    pub disabled: usize,
}

#[derive(Serialize)]
/// Compile report container.
pub struct CompileReport {
    pub rules: Vec<RuleReport>,
    pub summary: CompileSummary,
}
