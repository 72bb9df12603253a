//! Rule and plugin identity resolution.
//!
//! Rule identifiers come in three forms:
//! - `ruleName` — bare name, owned by the built-in `bpmnlint` package,
//! - `@scope/pluginName/ruleName` — scoped plugin,
//! - `pluginName/ruleName` — unscoped plugin.
//!
//! The addressable package is `bpmnlint` for bare names,
//! `${scope}/bpmnlint-plugin-${pluginName}` for scoped plugins, and
//! `bpmnlint-plugin-${pluginName}` otherwise. The pseudo-plugin `local`
//! addresses the package currently being compiled: its name is read from
//! `./package.json` and its manifest is loaded via the specifier `.`.
//!
//! Parsing is pure; only `resolve_plugin` goes through the resolver.

use crate::error::{Error, Result};
use crate::models::plugin::PluginManifest;
use crate::resolver::Resolver;
use serde_json::Value as Json;

/// Name of the built-in rule package.
pub const CORE_PACKAGE: &str = "bpmnlint";

const PLUGIN_PREFIX: &str = "bpmnlint-plugin-";
const LOCAL_PLUGIN: &str = "local";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A parsed rule or extends reference: plugin coordinates plus the local
/// name (a rule name, or a config name for extends references).
pub struct PluginRef {
    pub scope: Option<String>,
    pub plugin_name: String,
    pub local_name: String,
}

impl PluginRef {
    /// Derive the addressable package name for this reference.
    pub fn package_name(&self) -> String {
        if self.plugin_name == CORE_PACKAGE {
            return CORE_PACKAGE.to_string();
        }
        match &self.scope {
            Some(scope) => format!("{scope}/{PLUGIN_PREFIX}{}", self.plugin_name),
            None => format!("{PLUGIN_PREFIX}{}", self.plugin_name),
        }
    }

    /// The plugin path as written in identifiers, e.g. `foreign`,
    /// `@foo/bar`, or `local`. Used to qualify bare rule names exported
    /// from a plugin's configs.
    pub fn namespace(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{scope}/{}", self.plugin_name),
            None => self.plugin_name.clone(),
        }
    }

    /// Whether this reference addresses the package under compilation.
    pub fn is_local(&self) -> bool {
        self.scope.is_none() && self.plugin_name == LOCAL_PLUGIN
    }
}

/// Parse a rule identifier into plugin coordinates.
///
/// A local name may itself contain slashes (nested rule module paths);
/// everything past the plugin segments is kept verbatim.
pub fn parse_rule_ref(identifier: &str) -> PluginRef {
    if identifier.starts_with('@') {
        let mut segments = identifier.splitn(3, '/');
        let scope = segments.next().unwrap_or_default().to_string();
        let plugin_name = segments.next().unwrap_or_default().to_string();
        let local_name = segments.next().unwrap_or_default().to_string();
        return PluginRef {
            scope: Some(scope),
            plugin_name,
            local_name,
        };
    }
    match identifier.split_once('/') {
        Some((plugin_name, local_name)) => PluginRef {
            scope: None,
            plugin_name: plugin_name.to_string(),
            local_name: local_name.to_string(),
        },
        None => PluginRef {
            scope: None,
            plugin_name: CORE_PACKAGE.to_string(),
            local_name: identifier.to_string(),
        },
    }
}

/// Parse an extends reference (`bpmnlint:<config>` or
/// `plugin:<pluginRef>/<config>`) into plugin coordinates whose local name
/// is the config name.
pub fn parse_extends_ref(reference: &str) -> Result<PluginRef> {
    if let Some(config_name) = reference.strip_prefix("bpmnlint:") {
        if !config_name.is_empty() {
            return Ok(PluginRef {
                scope: None,
                plugin_name: CORE_PACKAGE.to_string(),
                local_name: config_name.to_string(),
            });
        }
    }
    if let Some(rest) = reference.strip_prefix("plugin:") {
        if rest.contains('/') {
            let parsed = parse_rule_ref(rest);
            if !parsed.local_name.is_empty() {
                return Ok(parsed);
            }
        }
    }
    Err(Error::UnknownConfig {
        reference: reference.to_string(),
    })
}

/// A plugin with its manifest loaded, remembering the specifier the
/// resolver was asked for (error messages embed it verbatim).
#[derive(Debug)]
pub struct ResolvedPlugin {
    pub specifier: String,
    pub package_name: String,
    pub local_source: bool,
    pub manifest: PluginManifest,
}

/// An enabled rule resolved to its importable location.
#[derive(Debug)]
pub struct RuleTarget {
    pub canonical_id: String,
    pub import_path: String,
}

/// Load the manifest for a plugin reference through the resolver.
pub fn resolve_plugin(reference: &PluginRef, resolver: &dyn Resolver) -> Result<ResolvedPlugin> {
    if reference.is_local() {
        let descriptor = resolver.resolve("./package.json")?;
        let package_name = descriptor
            .get("name")
            .and_then(Json::as_str)
            .ok_or_else(|| Error::InvalidManifest {
                specifier: "./package.json".to_string(),
                message: "missing package name".to_string(),
            })?
            .to_string();
        let manifest = parse_manifest(".", resolver.resolve(".")?)?;
        return Ok(ResolvedPlugin {
            specifier: ".".to_string(),
            package_name,
            local_source: true,
            manifest,
        });
    }
    let package_name = reference.package_name();
    let manifest = parse_manifest(&package_name, resolver.resolve(&package_name)?)?;
    Ok(ResolvedPlugin {
        specifier: package_name.clone(),
        package_name,
        local_source: false,
        manifest,
    })
}

fn parse_manifest(specifier: &str, raw: Json) -> Result<PluginManifest> {
    serde_json::from_value(raw).map_err(|err| Error::InvalidManifest {
        specifier: specifier.to_string(),
        message: err.to_string(),
    })
}

/// Resolve a rule's import path and canonical id against a loaded plugin.
///
/// The manifest's `rules` entry names the export path; a missing entry
/// defaults to `rules/<localName>`. A non-string entry is a configuration
/// error for an enabled rule. Local-source plugins import via relative
/// specifiers, external plugins via package-joined paths.
pub fn resolve_rule_target(plugin: &ResolvedPlugin, local_name: &str) -> Result<RuleTarget> {
    let export_path = match plugin.manifest.rules.get(local_name) {
        Some(Json::String(path)) => path.clone(),
        Some(_) => {
            return Err(Error::IllegalRuleExport {
                rule_name: local_name.to_string(),
                specifier: plugin.specifier.clone(),
            })
        }
        None => format!("rules/{local_name}"),
    };
    let import_path = if plugin.local_source {
        format!("./{export_path}")
    } else {
        format!("{}/{export_path}", plugin.package_name)
    };
    Ok(RuleTarget {
        canonical_id: format!("{}/{local_name}", plugin.package_name),
        import_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StaticResolver;
    use serde_json::json;

    #[test]
    fn test_parse_bare_rule_ref() {
        let parsed = parse_rule_ref("conditional-flows");
        assert_eq!(parsed.plugin_name, "bpmnlint");
        assert_eq!(parsed.local_name, "conditional-flows");
        assert_eq!(parsed.package_name(), "bpmnlint");
    }

    #[test]
    fn test_parse_unscoped_rule_ref() {
        let parsed = parse_rule_ref("foreign/rule");
        assert_eq!(parsed.scope, None);
        assert_eq!(parsed.plugin_name, "foreign");
        assert_eq!(parsed.local_name, "rule");
        assert_eq!(parsed.package_name(), "bpmnlint-plugin-foreign");
    }

    #[test]
    fn test_parse_scoped_rule_ref() {
        let parsed = parse_rule_ref("@foo/bar/rule");
        assert_eq!(parsed.scope.as_deref(), Some("@foo"));
        assert_eq!(parsed.plugin_name, "bar");
        assert_eq!(parsed.local_name, "rule");
        assert_eq!(parsed.package_name(), "@foo/bpmnlint-plugin-bar");
    }

    #[test]
    fn test_parse_nested_local_name() {
        let parsed = parse_rule_ref("@foo/bar/rules/nested/check");
        assert_eq!(parsed.local_name, "rules/nested/check");

        let parsed = parse_rule_ref("foreign/nested/check");
        assert_eq!(parsed.local_name, "nested/check");
    }

    #[test]
    fn test_parse_extends_refs() {
        let builtin = parse_extends_ref("bpmnlint:recommended").unwrap();
        assert_eq!(builtin.package_name(), "bpmnlint");
        assert_eq!(builtin.local_name, "recommended");

        let plugin = parse_extends_ref("plugin:foreign/recommended").unwrap();
        assert_eq!(plugin.package_name(), "bpmnlint-plugin-foreign");
        assert_eq!(plugin.local_name, "recommended");

        let scoped = parse_extends_ref("plugin:@foo/bar/custom").unwrap();
        assert_eq!(scoped.package_name(), "@foo/bpmnlint-plugin-bar");
        assert_eq!(scoped.local_name, "custom");
    }

    #[test]
    fn test_parse_extends_ref_rejects_unknown_forms() {
        let err = parse_extends_ref("recommended").unwrap_err();
        assert_eq!(err.to_string(), "unknown config <recommended>");

        assert!(parse_extends_ref("plugin:no-config-name").is_err());
    }

    #[test]
    fn test_parse_extends_ref_rejects_missing_config_name() {
        // a scoped reference without a config segment parses with an
        // empty config name; reject it up front
        let err = parse_extends_ref("plugin:@foo/bar").unwrap_err();
        assert_eq!(err.to_string(), "unknown config <plugin:@foo/bar>");

        assert!(parse_extends_ref("bpmnlint:").is_err());
    }

    #[test]
    fn test_namespace_forms() {
        assert_eq!(parse_rule_ref("foreign/rule").namespace(), "foreign");
        assert_eq!(parse_rule_ref("@foo/bar/rule").namespace(), "@foo/bar");
        assert_eq!(parse_rule_ref("local/rule").namespace(), "local");
    }

    #[test]
    fn test_resolve_local_plugin_reads_own_package_name() {
        let resolver = StaticResolver::new()
            .with_module("./package.json", json!({ "name": "bpmnlint-plugin-local" }))
            .with_module(
                ".",
                json!({
                    "rules": { "exported-path": "lib/rules/exported-path" },
                    "configs": {}
                }),
            );

        let plugin = resolve_plugin(&parse_rule_ref("local/exported-path"), &resolver).unwrap();
        assert_eq!(plugin.specifier, ".");
        assert_eq!(plugin.package_name, "bpmnlint-plugin-local");
        assert!(plugin.local_source);

        let target = resolve_rule_target(&plugin, "exported-path").unwrap();
        assert_eq!(target.import_path, "./lib/rules/exported-path");
        assert_eq!(target.canonical_id, "bpmnlint-plugin-local/exported-path");
    }

    #[test]
    fn test_rule_target_defaults_to_rules_path() {
        let resolver = StaticResolver::new()
            .with_module("bpmnlint-plugin-foreign", json!({ "rules": {}, "configs": {} }));

        let plugin = resolve_plugin(&parse_rule_ref("foreign/rule"), &resolver).unwrap();
        let target = resolve_rule_target(&plugin, "rule").unwrap();
        assert_eq!(target.import_path, "bpmnlint-plugin-foreign/rules/rule");
        assert_eq!(target.canonical_id, "bpmnlint-plugin-foreign/rule");
    }

    #[test]
    fn test_rule_target_rejects_non_string_export() {
        let resolver = StaticResolver::new().with_module(
            "bpmnlint-plugin-foreign",
            json!({ "rules": { "not-a-path": {} }, "configs": {} }),
        );

        let plugin = resolve_plugin(&parse_rule_ref("foreign/not-a-path"), &resolver).unwrap();
        let err = resolve_rule_target(&plugin, "not-a-path").unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to bundle rule <not-a-path> from <bpmnlint-plugin-foreign>: illegal rule export (expected path reference)"
        );
    }
}
