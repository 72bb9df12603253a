//! Extends resolution: flattening chains of named configs into one rule map.
//!
//! References are applied in declaration order, depth-first: a referenced
//! config's own `extends` is resolved before its `rules` are merged, and
//! later writes overwrite earlier ones wholesale. The recursion carries the
//! active resolution path keyed by `package/configName`; revisiting an entry
//! still on the path fails fast with a circular-extends error, while
//! reaching the same config twice on disjoint paths (a diamond) is legal.
//!
//! Bare rule names inside a plugin's config refer to that plugin's own
//! rules, so merging qualifies them with the plugin namespace
//! (`foreign/<name>`, `@foo/bar/<name>`, `local/<name>`). Names that
//! already carry a `/` are taken verbatim, and built-in configs stay
//! unqualified.

use crate::error::{Error, Result};
use crate::models::config::{ConfigDocument, Extends, RuleConfig};
use crate::naming::{self, CORE_PACKAGE};
use crate::resolver::Resolver;
use std::collections::HashSet;

/// Flatten an `extends` declaration into a single rule config with
/// final-write-wins semantics.
pub fn resolve_extends(extends: &Extends, resolver: &dyn Resolver) -> Result<RuleConfig> {
    let mut merged = RuleConfig::new();
    let mut path = HashSet::new();
    for reference in extends.entries() {
        apply_reference(reference, resolver, &mut path, &mut merged)?;
    }
    Ok(merged)
}

/// Resolve the effective rules of a full config document: extends first
/// (in list order), then the document's own rules on top.
pub fn resolve_effective_rules(
    document: &ConfigDocument,
    resolver: &dyn Resolver,
) -> Result<RuleConfig> {
    let mut merged = match &document.extends {
        Some(extends) => resolve_extends(extends, resolver)?,
        None => RuleConfig::new(),
    };
    for (name, severity) in &document.rules {
        merged.insert(name.clone(), severity.clone());
    }
    Ok(merged)
}

fn apply_reference(
    reference: &str,
    resolver: &dyn Resolver,
    path: &mut HashSet<String>,
    merged: &mut RuleConfig,
) -> Result<()> {
    let parsed = naming::parse_extends_ref(reference)?;
    let plugin = naming::resolve_plugin(&parsed, resolver)?;
    let key = format!("{}/{}", plugin.package_name, parsed.local_name);
    if !path.insert(key.clone()) {
        return Err(Error::CircularExtends {
            reference: reference.to_string(),
        });
    }
    let document = plugin
        .manifest
        .configs
        .get(&parsed.local_name)
        .cloned()
        .ok_or_else(|| Error::ConfigNotFound {
            config_name: parsed.local_name.clone(),
            specifier: plugin.specifier.clone(),
        })?;
    let namespace = if parsed.plugin_name == CORE_PACKAGE {
        None
    } else {
        Some(parsed.namespace())
    };
    apply_document(&document, resolver, path, merged, namespace.as_deref())?;
    path.remove(&key);
    Ok(())
}

fn apply_document(
    document: &ConfigDocument,
    resolver: &dyn Resolver,
    path: &mut HashSet<String>,
    merged: &mut RuleConfig,
    namespace: Option<&str>,
) -> Result<()> {
    if let Some(extends) = &document.extends {
        for reference in extends.entries() {
            apply_reference(reference, resolver, path, merged)?;
        }
    }
    for (name, severity) in &document.rules {
        let key = match namespace {
            Some(ns) if !name.contains('/') => format!("{ns}/{name}"),
            _ => name.clone(),
        };
        merged.insert(key, severity.clone());
    }
    Ok(())
}
