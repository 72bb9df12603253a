//! Output rendering for compile and rules commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-rule fields and a top-level summary.

use crate::models::config::{is_disabled, RuleConfig};
use crate::models::CompileReport;
use crate::utils::colors_enabled;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && colors_enabled()
}

fn severity_token(severity: &JsonVal, color: bool) -> String {
    let token = match severity {
        JsonVal::String(s) => s.clone(),
        other => other.to_string(),
    };
    if !color {
        return token;
    }
    if is_disabled(severity) {
        token.bright_black().to_string()
    } else {
        match token.as_str() {
            "error" | "2" => token.red().bold().to_string(),
            "warn" | "warning" | "1" => token.yellow().bold().to_string(),
            _ => token.blue().bold().to_string(),
        }
    }
}

/// Print a compile report in the requested format.
pub fn print_compile(report: &CompileReport, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_compile_json(report)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for rule in &report.rules {
                let sev = severity_token(&rule.severity, color);
                if rule.enabled {
                    let path = rule.import_path.as_deref().unwrap_or_default();
                    println!("✓ {} [{}] <- {}", rule.name, sev, path);
                } else {
                    println!("- {} [{}]", rule.name, sev);
                }
            }
            let summary = format!(
                "— Summary — rules={} imports={} disabled={}",
                report.summary.rules, report.summary.imports, report.summary.disabled
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Print a flattened effective rule configuration.
pub fn print_rules(rules: &RuleConfig, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_rules_json(rules)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for (name, severity) in rules {
                let sev = severity_token(severity, color);
                let shown = if color {
                    name.clone().bold().to_string()
                } else {
                    name.clone()
                };
                println!("{} [{}]", shown, sev);
            }
            let enabled = rules.values().filter(|s| !is_disabled(s)).count();
            let summary = format!(
                "— Summary — rules={} enabled={} disabled={}",
                rules.len(),
                enabled,
                rules.len() - enabled
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Compose compile JSON object (pure) for testing/snapshot purposes.
pub fn compose_compile_json(report: &CompileReport) -> JsonVal {
    serde_json::to_value(report).unwrap()
}

/// Compose rules JSON object (pure) for testing/snapshot purposes.
pub fn compose_rules_json(rules: &RuleConfig) -> JsonVal {
    let enabled = rules.values().filter(|s| !is_disabled(s)).count();
    json!({
        "rules": rules,
        "summary": {
            "rules": rules.len(),
            "enabled": enabled,
            "disabled": rules.len() - enabled,
        }
    })
}
