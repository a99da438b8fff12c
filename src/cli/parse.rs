//! CLI parse: clap types for ctxstore. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// ctxstore CLI - Named endpoint contexts
#[derive(Parser, Debug)]
#[command(name = "ctxstore")]
#[command(about = "Create, list, inspect, and remove named endpoint contexts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Store root directory (overrides store.root)
    #[arg(long, global = true)]
    pub store_root: Option<PathBuf>,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a context
    Create(CreateArgs),
    /// List contexts
    #[command(name = "ls", visible_alias = "list")]
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Only print context names
        #[arg(long, short = 'q')]
        names_only: bool,
    },
    /// Show a context record as JSON
    Inspect {
        /// Context name
        name: String,
    },
    /// Remove a context
    #[command(name = "rm", visible_alias = "remove")]
    Remove {
        /// Context name
        name: String,
    },
}

/// `create NAME` composes docker and kubernetes endpoints; the subcommands
/// create a single endpoint of another kind.
#[derive(Args, Debug)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct CreateArgs {
    #[command(subcommand)]
    pub command: Option<CreateCommands>,

    /// Context name
    #[arg(required = true)]
    pub name: Option<String>,

    /// Description of the context
    #[arg(long, default_value = "")]
    pub description: String,

    /// Default orchestrator for stack operations, stored as given
    #[arg(long)]
    pub default_stack_orchestrator: Option<String>,

    /// Docker endpoint options: host=,ca=,cert=,key=,skip-tls-verify=,from=
    #[arg(long, value_name = "KEY=VALUE,...")]
    pub docker: Option<String>,

    /// Kubernetes endpoint options: config-file=,context-override=,namespace-override=,from=
    #[arg(long, value_name = "KEY=VALUE,...")]
    pub kubernetes: Option<String>,

    /// Copy endpoints from an existing context
    #[arg(long)]
    pub from: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CreateCommands {
    /// Create a context for the local engine
    Local {
        /// Context name
        name: String,
        /// Description of the context
        #[arg(long, default_value = "")]
        description: String,
        /// Copy the local endpoint from an existing context
        #[arg(long)]
        from: Option<String>,
    },
    /// Create an example context with free-form fields
    Example {
        /// Context name
        name: String,
        /// Description of the context
        #[arg(long, default_value = "")]
        description: String,
        /// Endpoint field, repeatable
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
        /// Copy the example endpoint from an existing context
        #[arg(long)]
        from: Option<String>,
    },
    /// Create a cloud container instance context
    Aci {
        /// Context name
        name: String,
        /// Description of the context
        #[arg(long, default_value = "")]
        description: String,
        /// Subscription to run containers in
        #[arg(long)]
        subscription_id: Option<String>,
        /// Resource group to run containers in
        #[arg(long)]
        resource_group: Option<String>,
        /// Region to run containers in
        #[arg(long)]
        location: Option<String>,
        /// Copy the aci endpoint from an existing context
        #[arg(long)]
        from: Option<String>,
    },
}
