//! Package resolution for plugin manifests.
//!
//! The compile engine never touches storage itself; it asks a `Resolver`
//! for three kinds of specifiers only:
//! - a package name, to obtain a plugin manifest,
//! - `./package.json`, to read the in-progress package's own name when the
//!   `local` plugin sentinel is used,
//! - `.`, to obtain the in-progress package's own manifest.
//!
//! `NodeResolver` implements node-style lookup against a project directory.
//! A Rust process cannot evaluate a plugin's JS entry module, so the
//! manifest of a package directory is taken from a `bpmnlint.json` file
//! beside its `package.json`, or from the `"bpmnlint"` field inside
//! `package.json` when no such file exists.

use crate::builtin;
use crate::error::ResolveError;
use crate::naming::CORE_PACKAGE;
use serde_json::Value as Json;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads the module or package identified by a specifier and returns its
/// exported value.
pub trait Resolver {
    fn resolve(&self, specifier: &str) -> Result<Json, ResolveError>;
}

/// Resolver over the file system, rooted at a project directory, walking
/// ancestor `node_modules` directories node-style.
pub struct NodeResolver {
    root: PathBuf,
}

impl NodeResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        NodeResolver { root: root.into() }
    }

    fn read_json(&self, specifier: &str, path: &Path) -> Result<Json, ResolveError> {
        let data = fs::read_to_string(path).map_err(|source| ResolveError::Io {
            specifier: specifier.to_string(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ResolveError::Parse {
            specifier: specifier.to_string(),
            source,
        })
    }

    /// Extract the manifest of a package directory: `bpmnlint.json` wins,
    /// then the `"bpmnlint"` field of `package.json`.
    fn package_manifest(&self, specifier: &str, dir: &Path) -> Result<Json, ResolveError> {
        let manifest_path = dir.join("bpmnlint.json");
        if manifest_path.is_file() {
            return self.read_json(specifier, &manifest_path);
        }
        let descriptor_path = dir.join("package.json");
        if !descriptor_path.is_file() {
            return Err(ResolveError::NotFound(specifier.to_string()));
        }
        let descriptor = self.read_json(specifier, &descriptor_path)?;
        match descriptor.get("bpmnlint") {
            Some(manifest) => Ok(manifest.clone()),
            None => Err(ResolveError::NotFound(specifier.to_string())),
        }
    }

    fn find_package_dir(&self, package: &str) -> Option<PathBuf> {
        let mut current = Some(self.root.as_path());
        while let Some(dir) = current {
            let candidate = dir.join("node_modules").join(package);
            if candidate.is_dir() {
                return Some(candidate);
            }
            current = dir.parent();
        }
        None
    }
}

impl Resolver for NodeResolver {
    fn resolve(&self, specifier: &str) -> Result<Json, ResolveError> {
        if specifier == "./package.json" {
            let path = self.root.join("package.json");
            if !path.is_file() {
                return Err(ResolveError::NotFound(specifier.to_string()));
            }
            return self.read_json(specifier, &path);
        }
        if specifier == "." {
            return self.package_manifest(".", &self.root);
        }
        let resolved = match self.find_package_dir(specifier) {
            Some(dir) => self.package_manifest(specifier, &dir),
            None => Err(ResolveError::NotFound(specifier.to_string())),
        };
        match resolved {
            // The core package ships with the compiler; an uninstalled
            // `bpmnlint` falls back to the embedded manifest.
            Err(ResolveError::NotFound(_)) if specifier == CORE_PACKAGE => {
                Ok(builtin::manifest())
            }
            other => other,
        }
    }
}

/// In-memory resolver mapping specifiers to module values. Used by tests
/// and by callers that embed manifests directly.
#[derive(Default)]
pub struct StaticResolver {
    modules: HashMap<String, Json>,
}

impl StaticResolver {
    pub fn new() -> Self {
        StaticResolver::default()
    }

    pub fn with_module(mut self, specifier: impl Into<String>, value: Json) -> Self {
        self.modules.insert(specifier.into(), value);
        self
    }
}

impl Resolver for StaticResolver {
    fn resolve(&self, specifier: &str) -> Result<Json, ResolveError> {
        self.modules
            .get(specifier)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(specifier.to_string()))
    }
}
