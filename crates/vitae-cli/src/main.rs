//! Vitae CLI
//!
//! Command-line interface for Vitae - local-first resume building.
//!
//! State lives in the mirror directory: on startup every `{title}.json`
//! found there is loaded into the in-memory store, and every mutation
//! is written back through the mirror worker before exit.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use vitae_core::mirror::{load_mirrored, spawn_mirror_task};
use vitae_core::{Config, DirectoryAccess, FsDirectory, ResumeStore};

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "vitae")]
#[command(about = "Vitae - Local-first resume builder")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new resume
    New {
        /// Resume title (a default is generated if omitted)
        title: Option<String>,
        /// Visual template id
        #[arg(long)]
        template: Option<String>,
    },
    /// List all resumes
    #[command(alias = "ls")]
    List,
    /// Show resume details
    Show {
        /// Resume id, id prefix, or title
        id: String,
    },
    /// Rename a resume (also renames its mirrored file)
    Rename {
        /// Resume id, id prefix, or title
        id: String,
        /// New title
        title: String,
    },
    /// Duplicate a resume
    Duplicate {
        /// Resume id, id prefix, or title
        id: String,
    },
    /// Delete a resume
    #[command(alias = "rm")]
    Delete {
        /// Resume id, id prefix, or title
        id: String,
    },
    /// Manage resume sections
    Section {
        #[command(subcommand)]
        command: SectionCommands,
    },
    /// Compute page breaks for a measured content height
    Pages {
        /// Rendered content height in px
        #[arg(long)]
        height: f64,
        /// Resume whose page padding to use (defaults to the active one)
        #[arg(long)]
        resume: Option<String>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum SectionCommands {
    /// List sections in render order
    #[command(alias = "ls")]
    List {
        /// Resume id, id prefix, or title
        id: String,
    },
    /// Reorder sections (named sections first, basic stays pinned)
    Reorder {
        /// Resume id, id prefix, or title
        id: String,
        /// Section ids in the desired order
        order: Vec<String>,
    },
    /// Enable a section
    Enable {
        /// Resume id, id prefix, or title
        id: String,
        /// Section id
        section: String,
    },
    /// Disable a section
    Disable {
        /// Resume id, id prefix, or title
        id: String,
        /// Section id
        section: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (mirror_dir, mirror_enabled)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the store
    if let Commands::Config { command } = &cli.command {
        return match command.clone() {
            Some(ConfigCommands::Show) | None => commands::config::show(&output),
            Some(ConfigCommands::Set { key, value }) => {
                commands::config::set(key, value, &output)
            }
        };
    }

    let config = Config::load()?;
    let dir: Arc<dyn DirectoryAccess> = Arc::new(FsDirectory::new(config.mirror_root()));

    // Hydrate the store from the mirror directory, then route all
    // further writes through the mirror worker
    let loaded = load_mirrored(dir.as_ref());
    let (outbox_tx, outbox_rx) = mpsc::unbounded_channel();
    let worker = spawn_mirror_task(Arc::clone(&dir), outbox_rx);

    let mut store = ResumeStore::with_outbox(outbox_tx);
    for resume in loaded {
        store.import(resume);
    }

    let result = match cli.command {
        Commands::New { title, template } => {
            commands::resume::create(&mut store, title, template, &output)
        }
        Commands::List => commands::resume::list(&store, &output),
        Commands::Show { id } => commands::resume::show(&store, id, &output),
        Commands::Rename { id, title } => commands::resume::rename(&mut store, id, title, &output),
        Commands::Duplicate { id } => commands::resume::duplicate(&mut store, id, &output),
        Commands::Delete { id } => commands::resume::delete(&mut store, id, &output),
        Commands::Section { command } => handle_section_command(command, &mut store, &output),
        Commands::Pages { height, resume } => {
            commands::pages::show(&store, resume, height, &output)
        }
        Commands::Config { .. } => unreachable!(), // Handled above
    };

    // Dropping the store closes the outbox; the worker drains any
    // queued mirror writes before exiting
    drop(store);
    worker.await?;

    result
}

fn handle_section_command(
    command: SectionCommands,
    store: &mut ResumeStore,
    output: &Output,
) -> Result<()> {
    match command {
        SectionCommands::List { id } => commands::section::list(store, id, output),
        SectionCommands::Reorder { id, order } => {
            commands::section::reorder(store, id, order, output)
        }
        SectionCommands::Enable { id, section } => {
            commands::section::enable(store, id, section, output)
        }
        SectionCommands::Disable { id, section } => {
            commands::section::disable(store, id, section, output)
        }
    }
}

/// Initialize stderr logging, filterable with RUST_LOG
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vitae_core=warn,vitae=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
