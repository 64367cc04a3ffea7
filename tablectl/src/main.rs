use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use reservation_store::MergePolicy;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "tablectl", version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(clap::Args, Debug, Default)]
pub struct GlobalArgs {
    /// Directory holding the local reservation store
    #[arg(long, global = true, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// Minutes before the slot when edits and cancellations close
    #[arg(long, global = true)]
    pub cutoff_minutes: Option<i64>,

    /// IANA timezone the restaurant's dates and times are written in
    #[arg(long, global = true)]
    pub timezone: Option<String>,

    /// Which copy wins when local and remote share an id (prefer-local, prefer-remote)
    #[arg(long, global = true)]
    pub merge_policy: Option<MergePolicy>,

    /// Evaluate the policy at this instant instead of the current time
    #[arg(long, global = true, hide = true, env = "TABLECTL_NOW")]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Book a table
    Book(commands::book::BookArgs),
    /// List reservations with their edit/cancel status
    List(commands::list::ListArgs),
    /// Change the date, time or party size of a reservation
    Edit(commands::edit::EditArgs),
    /// Cancel a reservation
    Cancel(commands::cancel::CancelArgs),
    /// Show whether a reservation can still be changed
    Check(commands::check::CheckArgs),
    /// Remove every locally stored reservation
    Clear,
    /// Print version and exit
    Version,
}

fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if let Commands::Version = cli.cmd {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let ctx = commands::Context::from_args(&cli.global)?;
    match cli.cmd {
        Commands::Book(args) => commands::book::run(&ctx, args).await,
        Commands::List(args) => commands::list::run(&ctx, args).await,
        Commands::Edit(args) => commands::edit::run(&ctx, args).await,
        Commands::Cancel(args) => commands::cancel::run(&ctx, args).await,
        Commands::Check(args) => commands::check::run(&ctx, args).await,
        Commands::Clear => commands::clear(&ctx),
        Commands::Version => Ok(()),
    }
}
