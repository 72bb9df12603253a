//! Bundler and code generator.
//!
//! Walks the merged rule set in a single deterministic pass, resolves each
//! enabled rule to an importable path, deduplicates by canonical rule id,
//! and renders an ES-module artifact: import statements, a cache table
//! keyed by canonical id, the configuration object, an inline caching
//! resolver, and a default-exported bundle value.
//!
//! Identifier allocation is a counter plus an ordered map: `rule_<n>`
//! advances only when a new canonical id is first seen among enabled rules.
//! Disabled rules keep their config entry (normalized to `0`) but get no
//! import, no cache line, and no identifier. Resolver calls are issued
//! strictly sequentially so generated identifiers are stable across runs.

use crate::error::Result;
use crate::extends::resolve_effective_rules;
use crate::models::config::{is_disabled, normalize, ConfigDocument, RuleConfig};
use crate::models::{CompileReport, CompileSummary, RuleReport};
use crate::naming::{self, ResolvedPlugin};
use crate::resolver::Resolver;
use serde_json::{Map, Value as Json};
use std::collections::HashMap;

/// One generated import statement.
pub struct ImportRecord {
    pub identifier: String,
    pub source: String,
}

/// One generated cache entry binding a canonical id to an identifier.
pub struct CacheRecord {
    pub canonical_id: String,
    pub identifier: String,
}

/// The planned bundle: everything `render_bundle` needs, plus per-rule
/// records for reporting.
pub struct BundlePlan {
    pub imports: Vec<ImportRecord>,
    pub cache: Vec<CacheRecord>,
    pub config: RuleConfig,
    pub rules: Vec<RuleReport>,
}

impl BundlePlan {
    /// Summarize the plan for printers.
    pub fn report(self) -> CompileReport {
        let summary = CompileSummary {
            rules: self.rules.len(),
            imports: self.imports.len(),
            disabled: self.rules.iter().filter(|r| !r.enabled).count(),
        };
        CompileReport {
            rules: self.rules,
            summary,
        }
    }
}

/// Compile a configuration document into the generated module text.
pub fn compile_config(document: &ConfigDocument, resolver: &dyn Resolver) -> Result<String> {
    let plan = plan_bundle(document, resolver)?;
    Ok(render_bundle(&plan))
}

/// Resolve the merged rule set and plan imports, cache entries, and the
/// output configuration.
pub fn plan_bundle(document: &ConfigDocument, resolver: &dyn Resolver) -> Result<BundlePlan> {
    let rules = resolve_effective_rules(document, resolver)?;

    let mut plan = BundlePlan {
        imports: Vec::new(),
        cache: Vec::new(),
        config: RuleConfig::new(),
        rules: Vec::new(),
    };
    let mut identifiers: HashMap<String, String> = HashMap::new();
    // Cache manifests per specifier so a plugin referenced by many rules
    // is resolved once per compile.
    let mut plugins: HashMap<String, ResolvedPlugin> = HashMap::new();

    for (name, severity) in &rules {
        let normalized = normalize(severity);
        if is_disabled(severity) {
            plan.config.insert(name.clone(), normalized.clone());
            plan.rules.push(RuleReport {
                name: name.clone(),
                severity: normalized,
                enabled: false,
                canonical_id: None,
                import_path: None,
            });
            continue;
        }

        let parsed = naming::parse_rule_ref(name);
        let key = if parsed.is_local() {
            ".".to_string()
        } else {
            parsed.package_name()
        };
        if !plugins.contains_key(&key) {
            let plugin = naming::resolve_plugin(&parsed, resolver)?;
            plugins.insert(key.clone(), plugin);
        }
        let plugin = plugins.get(&key).unwrap();

        let target = naming::resolve_rule_target(plugin, &parsed.local_name)?;
        if !identifiers.contains_key(&target.canonical_id) {
            let identifier = format!("rule_{}", identifiers.len());
            plan.imports.push(ImportRecord {
                identifier: identifier.clone(),
                source: target.import_path.clone(),
            });
            plan.cache.push(CacheRecord {
                canonical_id: target.canonical_id.clone(),
                identifier: identifier.clone(),
            });
            identifiers.insert(target.canonical_id.clone(), identifier);
        }

        plan.config.insert(name.clone(), normalized.clone());
        plan.rules.push(RuleReport {
            name: name.clone(),
            severity: normalized,
            enabled: true,
            canonical_id: Some(target.canonical_id),
            import_path: Some(target.import_path),
        });
    }

    Ok(plan)
}

/// Render a planned bundle to ES-module text. The output is valid even
/// with zero enabled rules: empty import list, empty cache, empty config
/// object, exports still emitted.
pub fn render_bundle(plan: &BundlePlan) -> String {
    let mut out = String::new();

    for import in &plan.imports {
        out.push_str(&format!(
            "import {} from {};\n",
            import.identifier,
            quote(&import.source)
        ));
    }
    if !plan.imports.is_empty() {
        out.push('\n');
    }

    out.push_str("const cache = {};\n");
    if !plan.cache.is_empty() {
        out.push('\n');
    }
    for entry in &plan.cache {
        out.push_str(&format!(
            "cache[{}] = {};\n",
            quote(&entry.canonical_id),
            entry.identifier
        ));
    }
    out.push('\n');

    let mut wrapper = Map::new();
    wrapper.insert("rules".to_string(), Json::Object(plan.config.clone()));
    let config_json = serde_json::to_string_pretty(&Json::Object(wrapper)).unwrap();
    out.push_str(&format!("const config = {config_json};\n\n"));

    out.push_str(RESOLVER_SNIPPET);
    out.push_str("\nconst bundle = { resolver, config };\n");
    out.push_str("\nexport { resolver, config };\n");
    out.push_str("\nexport default bundle;\n");
    out
}

/// The caching resolver emitted into every bundle: rule lookups hit the
/// generated cache; config lookups cannot occur in a pre-compiled bundle.
const RESOLVER_SNIPPET: &str = r#"const resolver = {
  resolveRule(pkg, ruleName) {
    const rule = cache[pkg + '/' + ruleName];

    if (!rule) {
      throw new Error('cannot resolve rule <' + pkg + '/' + ruleName + '>');
    }

    return rule;
  },
  resolveConfig(pkg, configName) {
    throw new Error('cannot resolve config <' + configName + '> in <' + pkg + '>');
  }
};
"#;

fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;
    use crate::resolver::StaticResolver;
    use serde_json::json;

    fn core_resolver() -> StaticResolver {
        StaticResolver::new().with_module("bpmnlint", builtin::manifest())
    }

    fn document(value: serde_json::Value) -> ConfigDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_imports_enabled_rules() {
        let code = compile_config(
            &document(json!({
                "rules": {
                    "conditional-flows": "error",
                    "single-blank-start-event": "off",
                    "end-event-required": "info",
                    "no-bpmndi": 1,
                    "no-implicit-split": "warn"
                }
            })),
            &core_resolver(),
        )
        .unwrap();

        assert!(code.contains("import rule_0 from 'bpmnlint/rules/conditional-flows';"));
        assert!(code.contains("cache['bpmnlint/conditional-flows'] = rule_0;"));

        // the disabled rule does not advance the identifier counter
        assert!(code.contains("import rule_1 from 'bpmnlint/rules/end-event-required';"));
        assert!(code.contains("cache['bpmnlint/end-event-required'] = rule_1;"));
        assert!(code.contains("import rule_2 from 'bpmnlint/rules/no-bpmndi';"));
        assert!(code.contains("cache['bpmnlint/no-bpmndi'] = rule_2;"));
        assert!(code.contains("import rule_3 from 'bpmnlint/rules/no-implicit-split';"));
        assert!(code.contains("cache['bpmnlint/no-implicit-split'] = rule_3;"));

        // the disabled rule is neither imported nor cached
        assert!(!code.contains("cache['bpmnlint/single-blank-start-event']"));
        assert!(!code.contains("bpmnlint/rules/single-blank-start-event"));

        // all rules are configured, literal severity forms preserved
        assert!(code.contains("\"conditional-flows\": \"error\""));
        assert!(code.contains("\"single-blank-start-event\": 0"));
        assert!(code.contains("\"end-event-required\": \"info\""));
        assert!(code.contains("\"no-bpmndi\": 1"));
        assert!(code.contains("\"no-implicit-split\": \"warn\""));

        assert!(code.contains("export { resolver, config };"));
        assert!(code.contains("export default bundle;"));
    }

    #[test]
    fn test_imports_namespaced_rule() {
        let resolver = StaticResolver::new()
            .with_module("@foo/bpmnlint-plugin-bar", json!({ "rules": {}, "configs": {} }));

        let code = compile_config(
            &document(json!({ "rules": { "@foo/bar/rule": "warn" } })),
            &resolver,
        )
        .unwrap();

        assert!(code.contains("import rule_0 from '@foo/bpmnlint-plugin-bar/rules/rule';"));
        assert!(code.contains("cache['@foo/bpmnlint-plugin-bar/rule'] = rule_0;"));
    }

    #[test]
    fn test_imports_custom_path_through_external_source() {
        let resolver = StaticResolver::new().with_module(
            "bpmnlint-plugin-foreign",
            json!({
                "configs": {
                    "recommended": { "rules": { "exported-path": "error" } }
                },
                "rules": { "exported-path": "lib/rules/exported-path" }
            }),
        );

        let code = compile_config(
            &document(json!({ "extends": "plugin:foreign/recommended" })),
            &resolver,
        )
        .unwrap();

        assert!(
            code.contains("import rule_0 from 'bpmnlint-plugin-foreign/lib/rules/exported-path';")
        );
        assert!(code.contains("cache['bpmnlint-plugin-foreign/exported-path'] = rule_0;"));
    }

    #[test]
    fn test_imports_custom_path_through_local_source() {
        let resolver = StaticResolver::new()
            .with_module("./package.json", json!({ "name": "bpmnlint-plugin-local" }))
            .with_module(
                ".",
                json!({
                    "configs": {
                        "recommended": { "rules": { "exported-path": "error" } }
                    },
                    "rules": { "exported-path": "lib/rules/exported-path" }
                }),
            );

        let code = compile_config(
            &document(json!({ "extends": "plugin:local/recommended" })),
            &resolver,
        )
        .unwrap();

        assert!(code.contains("import rule_0 from './lib/rules/exported-path';"));
        assert!(code.contains("cache['bpmnlint-plugin-local/exported-path'] = rule_0;"));
    }

    #[test]
    fn test_illegal_rule_export_surfaces_named_error() {
        let resolver = StaticResolver::new()
            .with_module("./package.json", json!({ "name": "bpmnlint-plugin-local" }))
            .with_module(
                ".",
                json!({
                    "configs": {
                        "recommended": { "rules": { "not-a-path": "error" } }
                    },
                    "rules": { "not-a-path": {} }
                }),
            );

        let err = compile_config(
            &document(json!({ "extends": "plugin:local/recommended" })),
            &resolver,
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "failed to bundle rule <not-a-path> from <.>: illegal rule export (expected path reference)"
        );
    }

    #[test]
    fn test_illegal_export_of_disabled_rule_is_ignored() {
        let resolver = StaticResolver::new().with_module(
            "bpmnlint-plugin-foreign",
            json!({ "configs": {}, "rules": { "not-a-path": {} } }),
        );

        let code = compile_config(
            &document(json!({ "rules": { "foreign/not-a-path": "off" } })),
            &resolver,
        )
        .unwrap();
        assert!(code.contains("\"foreign/not-a-path\": 0"));
        assert!(!code.contains("import "));
    }

    #[test]
    fn test_resolves_builtin_extends() {
        let code = compile_config(
            &document(json!({ "extends": "bpmnlint:recommended" })),
            &core_resolver(),
        )
        .unwrap();

        assert!(code.contains("conditional-flows"));
        assert!(code.contains("single-blank-start-event"));
    }

    #[test]
    fn test_identifiers_deduplicate_by_canonical_id() {
        // a bare name and its package-qualified form resolve identically
        let code = compile_config(
            &document(json!({
                "rules": {
                    "conditional-flows": "error",
                    "bpmnlint/conditional-flows": "warn"
                }
            })),
            &core_resolver(),
        )
        .unwrap();

        assert_eq!(code.matches("import ").count(), 1);
        assert_eq!(
            code.matches("cache['bpmnlint/conditional-flows']").count(),
            1
        );
        // both identifiers keep their own config entries
        assert!(code.contains("\"conditional-flows\": \"error\""));
        assert!(code.contains("\"bpmnlint/conditional-flows\": \"warn\""));
    }

    #[test]
    fn test_empty_config_renders_valid_module() {
        let code = compile_config(&document(json!({})), &core_resolver()).unwrap();

        assert!(!code.contains("import "));
        assert!(code.contains("const cache = {};"));
        assert!(code.contains("\"rules\": {}"));
        assert!(code.contains("export { resolver, config };"));
        assert!(code.contains("export default bundle;"));
    }

    #[test]
    fn test_report_summarizes_plan() {
        let plan = plan_bundle(
            &document(json!({
                "rules": {
                    "conditional-flows": "error",
                    "single-blank-start-event": "off"
                }
            })),
            &core_resolver(),
        )
        .unwrap();

        let report = plan.report();
        assert_eq!(report.summary.rules, 2);
        assert_eq!(report.summary.imports, 1);
        assert_eq!(report.summary.disabled, 1);
        assert_eq!(
            report.rules[0].canonical_id.as_deref(),
            Some("bpmnlint/conditional-flows")
        );
        assert!(report.rules[1].canonical_id.is_none());
    }

    #[test]
    fn test_quote_escapes_specifiers() {
        assert_eq!(quote("plain/path"), "'plain/path'");
        assert_eq!(quote("it's"), r"'it\'s'");
        assert_eq!(quote(r"back\slash"), r"'back\\slash'");
    }
}
