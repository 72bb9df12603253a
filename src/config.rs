//! Configuration discovery and effective settings resolution.
//!
//! The compiler reads a `.bpmnlintrc` (JSON) or `.bpmnlintrc.yml|yaml`
//! (YAML) from the project root, detected by walking upward from the
//! starting directory until an rc file, a `package.json`, or a `.git`
//! directory is found.
//!
//! Overrides precedence: CLI > rc file > defaults.

use crate::error::{Error, Result};
use crate::models::config::ConfigDocument;
use std::fs;
use std::path::{Path, PathBuf};

const RC_NAMES: [&str; 4] = [
    ".bpmnlintrc",
    ".bpmnlintrc.json",
    ".bpmnlintrc.yml",
    ".bpmnlintrc.yaml",
];

#[derive(Debug, Clone)]
/// Fully-resolved settings used by commands after applying precedence.
pub struct Effective {
    pub project_root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub output: String,
}

/// Walk upward from `start` to detect the project root.
///
/// Stops when an rc file, a `package.json`, or a `.git` directory is found.
pub fn detect_project_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if RC_NAMES.iter().any(|name| cur.join(name).exists()) {
            return cur.to_path_buf();
        }
        if cur.join("package.json").exists() || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Locate the rc file in `root`, if any, in precedence order.
pub fn find_rc_file(root: &Path) -> Option<PathBuf> {
    RC_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
}

/// Load a `ConfigDocument` from an rc file. `.yml`/`.yaml` files are
/// parsed as YAML, everything else as JSON.
pub fn load_config_document(path: &Path) -> Result<ConfigDocument> {
    let display = path.to_string_lossy().to_string();
    let data = fs::read_to_string(path).map_err(|err| Error::InvalidConfig {
        path: display.clone(),
        message: err.to_string(),
    })?;
    let yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml") | Some("yaml")
    );
    if yaml {
        serde_yaml::from_str(&data).map_err(|err| Error::InvalidConfig {
            path: display,
            message: err.to_string(),
        })
    } else {
        serde_json::from_str(&data).map_err(|err| Error::InvalidConfig {
            path: display,
            message: err.to_string(),
        })
    }
}

/// Resolve `Effective` by merging CLI flags, discovery, and defaults.
pub fn resolve_effective(
    cli_project_root: Option<&str>,
    cli_config: Option<&str>,
    cli_output: Option<&str>,
) -> Effective {
    let start = PathBuf::from(cli_project_root.unwrap_or("."));
    let project_root = detect_project_root(&start);

    let config_path = cli_config
        .map(PathBuf::from)
        .or_else(|| find_rc_file(&project_root));

    let output = cli_output.unwrap_or("human").to_string();

    Effective {
        project_root,
        config_path,
        output,
    }
}
