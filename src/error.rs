//! Error types for config compilation and bundling.

use thiserror::Error;

/// Result type alias for compile operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compiling a configuration into a bundle.
///
/// All variants are fatal to the current compile call; nothing is retried
/// and no partial bundle is ever returned. The message texts of
/// `IllegalRuleExport` and friends are a compatibility surface: downstream
/// tooling pattern-matches on them.
#[derive(Error, Debug)]
pub enum Error {
    /// A plugin manifest has no config under the requested name.
    #[error("config <{config_name}> not found in <{specifier}>")]
    ConfigNotFound {
        config_name: String,
        specifier: String,
    },

    /// An enabled rule's manifest entry is not a path reference.
    #[error("failed to bundle rule <{rule_name}> from <{specifier}>: illegal rule export (expected path reference)")]
    IllegalRuleExport {
        rule_name: String,
        specifier: String,
    },

    /// An extends chain revisited a config already on the resolution path.
    #[error("circular extends <{reference}>")]
    CircularExtends { reference: String },

    /// An extends reference is neither `bpmnlint:<name>` nor `plugin:<ref>/<name>`.
    #[error("unknown config <{reference}>")]
    UnknownConfig { reference: String },

    /// A configuration file could not be read or parsed.
    #[error("invalid config <{path}>: {message}")]
    InvalidConfig { path: String, message: String },

    /// A resolved value could not be interpreted as a plugin manifest
    /// or package descriptor.
    #[error("invalid manifest <{specifier}>: {message}")]
    InvalidManifest { specifier: String, message: String },

    /// The external resolver could not locate or read a specifier.
    #[error(transparent)]
    Resolver(#[from] ResolveError),
}

/// Errors surfaced by `Resolver` implementations.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The specifier does not resolve to any known package or file.
    #[error("cannot resolve <{0}>")]
    NotFound(String),

    /// The specifier resolved to a file that could not be read.
    #[error("failed to read <{specifier}>: {source}")]
    Io {
        specifier: String,
        source: std::io::Error,
    },

    /// The specifier resolved to a file that is not valid JSON.
    #[error("failed to parse <{specifier}>: {source}")]
    Parse {
        specifier: String,
        source: serde_json::Error,
    },
}
