use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "objd",
    about = "objd: small object store over HTTP",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// List all object ids in the database
    List(DbArgs),
    /// Print one object
    Get(KeyArgs),
    /// Delete one object
    Delete(KeyArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(Args)]
pub struct DbArgs {
    #[arg(long, default_value = "objects.db")]
    pub db: PathBuf,
    /// How long to wait for a running server to release the database
    #[arg(long, default_value = "1000")]
    pub timeout_ms: u64,
}

#[derive(Args)]
pub struct KeyArgs {
    pub id: String,
    #[command(flatten)]
    pub db: DbArgs,
}
