//! Plugin manifest schema.
//!
//! A plugin exports a manifest with two maps: `rules` (local rule name to
//! export value, expected to be an import path) and `configs` (config name
//! to a nested configuration document).

use crate::models::config::ConfigDocument;
use serde::Deserialize;
use serde_json::{Map, Value as Json};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Deserialize)]
/// Manifest obtained from the resolver for a plugin package.
pub struct PluginManifest {
    /// Local rule name to export value. Values are kept as raw JSON:
    /// a non-string export is only an error once an enabled rule needs it.
    #[serde(default)]
    pub rules: Map<String, Json>,
    /// Config name to document. Lookup is by name; ordering plays no role.
    #[serde(default)]
    pub configs: HashMap<String, ConfigDocument>,
}
