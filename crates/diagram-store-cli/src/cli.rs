//! Command-line interface for driving a diagram store from a script

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;

use crate::script::parse_script;
use crate::session::{render_listing, Session};
use diagram_store::core::logging::init_logging;
use diagram_store::{DiagramStore, IdStrategy, StoreConfig, StoreError};

/// diagram-store - run use-case diagram editing scripts
#[derive(Parser)]
#[command(name = "diagram-store")]
#[command(about = "Drive an in-memory use-case diagram store from a session script")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a session script and print the resulting diagram state
    Run {
        /// Script file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// How element ids are generated
        #[arg(long, value_enum, default_value_t = IdChoice::Sequential)]
        ids: IdChoice,

        /// Tool selected before the script starts
        #[arg(long)]
        default_tool: Option<String>,

        /// Title given to use cases created without one
        #[arg(long)]
        default_title: Option<String>,
    },

    /// Parse a session script without running it
    Check {
        /// Script file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Id generation choices
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum IdChoice {
    /// Per-kind counters: actor-1, actor-2, usecase-1
    #[default]
    Sequential,
    /// Millisecond timestamps
    Timestamp,
}

impl From<IdChoice> for IdStrategy {
    fn from(value: IdChoice) -> Self {
        match value {
            IdChoice::Sequential => IdStrategy::Sequential,
            IdChoice::Timestamp => IdStrategy::Timestamp,
        }
    }
}

/// Main CLI application
#[derive(Default)]
pub struct DiagramStoreApp;

impl DiagramStoreApp {
    pub fn new() -> Self {
        Self
    }

    /// Build the store configuration from `run` flags
    pub fn build_config(
        ids: IdChoice,
        default_tool: Option<String>,
        default_title: Option<String>,
    ) -> StoreConfig {
        let mut config = StoreConfig::new().with_id_strategy(ids.into());
        if let Some(tool) = default_tool {
            config = config.with_default_tool(tool);
        }
        if let Some(title) = default_title {
            config = config.with_default_use_case_title(title);
        }
        config
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("DIAGRAM_STORE_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("DIAGRAM_STORE_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("diagram-store v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Run {
                input,
                ids,
                default_tool,
                default_title,
            } => {
                let config = Self::build_config(ids, default_tool, default_title);
                self.run_command(input, config, cli.verbose)
            }
            Commands::Check { input } => self.check_command(input, cli.verbose),
        }
    }

    /// Handle the run command
    fn run_command(
        &mut self,
        input: Option<PathBuf>,
        config: StoreConfig,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let output = Self::execute(&content, config)?;
        self.write_output(&output)
    }

    /// Parse and run a script against a fresh store, returning the listing
    pub fn execute(content: &str, config: StoreConfig) -> Result<String> {
        let statements = parse_script(content)?;
        info!(statement_count = statements.len(), "Parsed script");

        let mut session = Session::new(DiagramStore::with_config(config));
        session.run(&statements)?;
        Ok(render_listing(session.store()))
    }

    /// Handle the check command
    fn check_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match parse_script(&content) {
            Ok(statements) => {
                println!("✓ Valid script ({} statements)", statements.len());
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid script: {}", e);
                Err(e.into())
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(StoreError::from)
                .with_context(|| format!("Failed to read input file '{}'", path.display())),
            _ => {
                let mut content = String::new();
                io::stdin()
                    .read_to_string(&mut content)
                    .map_err(StoreError::from)
                    .context("Failed to read script from stdin")?;
                Ok(content)
            }
        }
    }

    fn write_output(&self, content: &str) -> Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
