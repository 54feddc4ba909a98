//! CLI Tooling
//!
//! Command-line interface over closure analysis. Every command prints a
//! JSON document on stdout; logs go to the configured log destination.

use crate::artifact::ArtifactDigestResolver;
use crate::closure::{resolve_output, ClosureAnalyzer};
use crate::config::{ConfigLoader, StoreGraphConfig};
use crate::error::ClosureError;
use crate::graph::JsonGraphFile;
use crate::store::IdentityParser;
use crate::tree::ContentHasher;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

/// storegraph - Content-addressed dependency graphs for store outputs
#[derive(Parser)]
#[command(name = "storegraph")]
#[command(about = "Content-addressed dependency graphs for package store outputs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Store root directory (overrides configuration)
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file"); outranks STOREGRAPH_LOG_FILE
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Summarize a build output and enrich its dependency graph
    Closure {
        /// Build output, usually the `result` symlink
        #[arg(long, default_value = "result")]
        output: PathBuf,
        /// Dependency graph of the output, as JSON
        #[arg(long)]
        graph: PathBuf,
        /// Application name to report instead of the parsed one
        #[arg(long)]
        name: Option<String>,
    },
    /// Print the canonical content hash of a path
    Hash {
        path: PathBuf,
    },
    /// Print the identity parsed from a store path
    Identify {
        path: PathBuf,
    },
    /// Print the installed artifact digest of a build output
    ArtifactDigest {
        /// Build output, usually the `result` symlink
        #[arg(default_value = "result")]
        output: PathBuf,
    },
}

impl Cli {
    /// Load configuration and fold command-line overrides into it.
    ///
    /// `--log-file` is not folded in; it is handed to logging setup
    /// separately so it can outrank `STOREGRAPH_LOG_FILE`.
    pub fn resolve_config(&self) -> Result<StoreGraphConfig, ClosureError> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from_file(path),
            None => ConfigLoader::load(Path::new(".")),
        }
        .map_err(|e| ClosureError::ConfigError(e.to_string()))?;

        if let Some(store_dir) = &self.store_dir {
            config.store_dir = store_dir.clone();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        Ok(config)
    }
}

/// Executes commands against one configuration.
pub struct CliContext {
    config: StoreGraphConfig,
}

impl CliContext {
    pub fn new(config: StoreGraphConfig) -> Self {
        Self { config }
    }

    /// Run `command` and return its JSON output.
    pub fn execute(&self, command: &Commands) -> Result<String, ClosureError> {
        info!(command = ?command, store_dir = %self.config.store_dir.display(), "Executing command");
        match command {
            Commands::Closure {
                output,
                graph,
                name,
            } => {
                let analyzer = ClosureAnalyzer::new(&self.config.store_dir);
                let report =
                    analyzer.analyze(output, &JsonGraphFile::new(graph), name.as_deref())?;
                to_json(&report)
            }
            Commands::Hash { path } => {
                let hash = ContentHasher::new().hash(path)?;
                to_json(&json!({
                    "path": path,
                    "hash": hash,
                }))
            }
            Commands::Identify { path } => {
                let identity = IdentityParser::new(&self.config.store_dir).parse(path)?;
                to_json(&identity)
            }
            Commands::ArtifactDigest { output } => {
                let store_path = resolve_output(output)?;
                let digest = ArtifactDigestResolver::new().resolve(&store_path)?;
                to_json(&json!({
                    "store_path": store_path,
                    "artifact_digest": digest,
                }))
            }
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ClosureError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ClosureError::ConfigError(format!("Failed to serialize output: {}", e)))
}
