//! roster CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "roster", version, about = "Student enrollment and performance roster")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the initial roster comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Seed TOML file to pre-populate the roster
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Start with an empty roster instead of the sample students
    #[arg(long)]
    no_sample: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive or scripted session over a live roster
    Session {
        /// Read commands from this file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the roster as a table
    List {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Write the roster as an HTML page
    Render {
        /// Output file (default: <output_dir>/roster.html)
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Load and lint a seed file
    Validate {
        /// Path to the seed TOML file
        #[arg(long)]
        seed: PathBuf,
    },

    /// Create starter config and example seed file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("roster=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Session { script, source } => commands::session::execute(script, source),
        Commands::List { source } => commands::list::execute(source),
        Commands::Render { output, source } => commands::render::execute(output, source),
        Commands::Validate { seed } => commands::validate::execute(seed),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
