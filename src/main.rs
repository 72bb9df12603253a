//! bpmnlint-pack CLI binary entry point.
//! Delegates to modules for compiling and inspecting configurations.

mod builtin;
mod bundle;
mod cli;
mod config;
mod error;
mod extends;
mod models;
mod naming;
mod output;
mod resolver;
mod utils;

use crate::models::config::{ConfigDocument, Extends};
use crate::resolver::NodeResolver;
use clap::Parser;
use cli::{Cli, Commands};
use std::fs;
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Compile {
            project_root,
            config,
            out,
            output,
        } => {
            let eff = config::resolve_effective(
                project_root.as_deref(),
                config.as_deref(),
                output.as_deref(),
            );
            let document = load_document(&eff, config.is_some());
            let resolver = NodeResolver::new(eff.project_root.clone());
            let plan = match bundle::plan_bundle(&document, &resolver) {
                Ok(plan) => plan,
                Err(e) => {
                    eprintln!("{} {}", utils::error_prefix(), e);
                    std::process::exit(1);
                }
            };
            let code = bundle::render_bundle(&plan);
            match out {
                Some(path) => {
                    let path = PathBuf::from(path);
                    if let Err(e) = fs::write(&path, &code) {
                        eprintln!(
                            "{} {}",
                            utils::error_prefix(),
                            format!("failed to write {}: {}", path.to_string_lossy(), e)
                        );
                        std::process::exit(2);
                    }
                    output::print_compile(&plan.report(), &eff.output);
                }
                None => {
                    print!("{code}");
                }
            }
        }
        Commands::Rules {
            project_root,
            config,
            output,
        } => {
            let eff = config::resolve_effective(
                project_root.as_deref(),
                config.as_deref(),
                output.as_deref(),
            );
            let document = load_document(&eff, config.is_some());
            let resolver = NodeResolver::new(eff.project_root.clone());
            match extends::resolve_effective_rules(&document, &resolver) {
                Ok(rules) => output::print_rules(&rules, &eff.output),
                Err(e) => {
                    eprintln!("{} {}", utils::error_prefix(), e);
                    std::process::exit(1);
                }
            }
        }
    }
}

/// Load the configuration document for a command, exiting with code 2 on
/// configuration problems. Falls back to `bpmnlint:recommended` when no
/// rc file exists, with a note on stderr.
fn load_document(eff: &config::Effective, explicit: bool) -> ConfigDocument {
    let Some(config_path) = eff.config_path.as_ref() else {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            "No .bpmnlintrc found; using bpmnlint:recommended."
        );
        return ConfigDocument {
            rules: Default::default(),
            extends: Some(Extends::Single("bpmnlint:recommended".to_string())),
        };
    };
    if !explicit && eff.output != "json" {
        eprintln!(
            "{} {}",
            utils::info_prefix(),
            format!("Using config: {}", config_path.to_string_lossy())
        );
    }
    match config::load_config_document(config_path) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    }
}
