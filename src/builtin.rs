//! Embedded manifest of the built-in `bpmnlint` rule package.
//!
//! The core rules ship with the `bpmnlint` package itself. When no installed
//! copy can be resolved from `node_modules`, `NodeResolver` falls back to
//! this manifest so bare rule names and `bpmnlint:<config>` extends keep
//! working against the shipped rule set.

use serde_json::{json, Map, Value as Json};

/// Rule names shipped with the core package, each exported from
/// `rules/<name>`.
const RULE_NAMES: &[&str] = &[
    "conditional-flows",
    "end-event-required",
    "event-sub-process-typed-start-event",
    "fake-join",
    "label-required",
    "link-event",
    "no-bpmndi",
    "no-complex-gateway",
    "no-disconnected",
    "no-duplicate-sequence-flows",
    "no-gateway-join-fork",
    "no-implicit-end",
    "no-implicit-split",
    "no-implicit-start",
    "no-inclusive-gateway",
    "no-overlapping-elements",
    "single-blank-start-event",
    "single-event-definition",
    "start-event-required",
    "superfluous-gateway",
    "superfluous-termination",
];

/// Rules enabled by the `recommended` config with their severities.
const RECOMMENDED: &[(&str, &str)] = &[
    ("conditional-flows", "error"),
    ("end-event-required", "error"),
    ("event-sub-process-typed-start-event", "error"),
    ("fake-join", "warn"),
    ("label-required", "error"),
    ("link-event", "error"),
    ("no-bpmndi", "error"),
    ("no-complex-gateway", "error"),
    ("no-disconnected", "error"),
    ("no-duplicate-sequence-flows", "error"),
    ("no-gateway-join-fork", "error"),
    ("no-implicit-split", "error"),
    ("no-inclusive-gateway", "error"),
    ("single-blank-start-event", "error"),
    ("single-event-definition", "error"),
    ("start-event-required", "error"),
    ("superfluous-gateway", "warn"),
    ("superfluous-termination", "warn"),
];

/// Build the built-in plugin manifest as raw JSON, shaped exactly like a
/// manifest returned by the resolver for an installed package.
pub fn manifest() -> Json {
    let mut rules = Map::new();
    for name in RULE_NAMES {
        rules.insert((*name).to_string(), Json::from(format!("rules/{name}")));
    }

    let mut recommended = Map::new();
    for (name, severity) in RECOMMENDED {
        recommended.insert((*name).to_string(), Json::from(*severity));
    }

    let mut all = Map::new();
    for name in RULE_NAMES {
        all.insert((*name).to_string(), Json::from("error"));
    }

    json!({
        "rules": rules,
        "configs": {
            "recommended": { "rules": recommended },
            "all": { "rules": all }
        }
    })
}
