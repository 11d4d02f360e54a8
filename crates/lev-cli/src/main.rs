mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, serve::StorageArgs, waitlist::WaitlistSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lev",
    about = "Lev site server: waitlist intake and booking redirects",
    version,
    propagate_version = true
)]
struct Cli {
    /// Site root holding lev.yaml and the local database (default: auto-detect)
    #[arg(long, global = true, env = "LEV_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on
        #[arg(long, env = "LEV_PORT", default_value = "3000")]
        port: u16,

        /// Open the site in a browser once listening
        #[arg(long)]
        open: bool,

        #[command(flatten)]
        storage: StorageArgs,
    },

    /// Join or inspect the waitlist
    Waitlist {
        #[command(subcommand)]
        subcommand: WaitlistSubcommand,
    },

    /// Inspect or scaffold site configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Serve {
            port,
            open,
            storage,
        } => cmd::serve::run(&root, port, open, &storage),
        Commands::Waitlist { subcommand } => cmd::waitlist::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
