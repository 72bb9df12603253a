//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bpmnlint-pack",
    version,
    about = "Compile bpmnlint configurations into self-contained bundles",
    long_about = "bpmnlint-pack — compile a bpmnlint configuration (rules plus extends chains) into a single statically analyzable ES module with importable rule references.\n\nConfiguration precedence: CLI > .bpmnlintrc > defaults.",
    after_help = "Examples:\n  bpmnlint-pack compile --out .bpmnlintrc.js\n  bpmnlint-pack compile --config custom.bpmnlintrc --out dist/linter.js\n  bpmnlint-pack rules --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for compiling and inspecting configurations.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current bpmnlint-pack version."
    )]
    Version,
    /// Compile a configuration into a bundle
    #[command(
        about = "Compile a configuration into a bundle",
        long_about = "Resolve extends chains and rule references, then emit an importable ES module. Writes to stdout unless --out is given.",
        after_help = "Examples:\n  bpmnlint-pack compile\n  bpmnlint-pack compile --out .bpmnlintrc.js --output json"
    )]
    Compile {
        #[arg(long, help = "Project root (default: current dir)")]
        project_root: Option<String>,
        #[arg(long, help = "Path to the config file (default: discovered .bpmnlintrc)")]
        config: Option<String>,
        #[arg(long, help = "Write the bundle to this file instead of stdout")]
        out: Option<String>,
        #[arg(long, help = "Report mode when --out is set: human|json (default: human)")]
        output: Option<String>,
    },
    /// Print the flattened effective rule configuration
    #[command(
        about = "Print effective rules",
        long_about = "Resolve the extends chain and print the merged rule severities without generating a bundle.",
        after_help = "Examples:\n  bpmnlint-pack rules\n  bpmnlint-pack rules --output json"
    )]
    Rules {
        #[arg(long, help = "Project root (default: current dir)")]
        project_root: Option<String>,
        #[arg(long, help = "Path to the config file (default: discovered .bpmnlintrc)")]
        config: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
