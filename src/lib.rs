//! bpmnlint-pack core library.
//!
//! This crate exposes programmatic APIs for compiling bpmnlint
//! configurations — named rules with severities, optionally extending
//! named configs exported by plugins — into self-contained, statically
//! analyzable ES-module bundles.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and loading of `.bpmnlintrc` files.
//! - `models`: Data models for config documents, manifests, and reports.
//! - `naming`: Rule identifier parsing and plugin identity resolution.
//! - `extends`: Recursive extends resolution and rule merging.
//! - `bundle`: Bundle planning and ES-module code generation.
//! - `resolver`: The resolver contract plus node-style and in-memory
//!   implementations.
//! - `builtin`: Embedded manifest of the built-in rule package.
//! - `output`: Human/JSON printers for compile/rules results.
//! - `error`: Error types shared across the crate.
//! - `utils`: Supporting helpers.
pub mod builtin;
pub mod bundle;
pub mod cli;
pub mod config;
pub mod error;
pub mod extends;
pub mod models;
pub mod naming;
pub mod output;
pub mod resolver;
pub mod utils;
