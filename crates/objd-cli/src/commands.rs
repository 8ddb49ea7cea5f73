use std::time::Duration;

use anyhow::Context;
use colored::Colorize;

use objd_server::{ObjdServer, ServerConfig};
use objd_store::{ObjectStore, RedbObjectStore};
use objd_types::{ObjectKey, RecordCodec};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args, cli.verbose),
        Command::List(args) => {
            init_tracing("warn", cli.verbose);
            cmd_list(args, &cli.format)
        }
        Command::Get(args) => {
            init_tracing("warn", cli.verbose);
            cmd_get(args, &cli.format)
        }
        Command::Delete(args) => {
            init_tracing("warn", cli.verbose);
            cmd_delete(args)
        }
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `default`.
fn init_tracing(default: &str, verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { default };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub(crate) fn resolve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(db) = &args.db {
        config.db_path = db.clone();
    }
    config.validate()?;
    Ok(config)
}

fn cmd_serve(args: ServeArgs, verbose: bool) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    init_tracing(&config.log_level, verbose);

    let server = ObjdServer::open(config.clone())
        .with_context(|| format!("cannot open object store {}", config.db_path.display()))?;
    println!(
        "{} objd on {} (db: {})",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config.db_path.display()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

/// Offline commands inspect an existing database; they never create one.
fn open_store(args: &DbArgs) -> anyhow::Result<RedbObjectStore> {
    tracing::debug!(path = %args.db.display(), timeout_ms = args.timeout_ms, "opening object store");
    RedbObjectStore::open_existing(&args.db, Duration::from_millis(args.timeout_ms))
        .with_context(|| format!("cannot open object store {}", args.db.display()))
}

fn cmd_list(args: DbArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let store = open_store(&args)?;
    let keys = store.list_keys()?;
    match format {
        OutputFormat::Json => println!("{}", String::from_utf8(RecordCodec::encode_keys(&keys)?)?),
        OutputFormat::Text if keys.is_empty() => println!("No objects."),
        OutputFormat::Text => {
            for key in &keys {
                println!("{}", key.yellow());
            }
        }
    }
    Ok(())
}

fn cmd_get(args: KeyArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let key = ObjectKey::parse(&args.id)?;
    let store = open_store(&args.db)?;
    let record = store
        .read(&key)?
        .ok_or_else(|| anyhow::anyhow!("{key} does not exist"))?;

    match format {
        OutputFormat::Json => println!("{}", String::from_utf8(RecordCodec::encode(&record)?)?),
        OutputFormat::Text => {
            println!("{}  {}", key.to_string().yellow().bold(), record.content_type.cyan());
            println!("{}", record.data);
        }
    }
    Ok(())
}

fn cmd_delete(args: KeyArgs) -> anyhow::Result<()> {
    let key = ObjectKey::parse(&args.id)?;
    let store = open_store(&args.db)?;
    if !store.delete(&key)? {
        anyhow::bail!("{key} does not exist");
    }
    println!("{} Deleted {}", "✓".green(), key.to_string().yellow());
    Ok(())
}
