use std::io::Read;
use std::path::Path;

use anyhow::Context;
use casket_crypto::ContentHasher;
use casket_server::{CasketServer, ServerConfig};
use colored::Colorize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Hash(args) => cmd_hash(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = serve_config(&args)?;
    println!(
        "{} Casket server on {} (max object {} bytes)",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config.max_object_size,
    );
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(CasketServer::new(config).serve())?;
    Ok(())
}

fn serve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(max) = args.max_object_size {
        config.max_object_size = max;
    }
    tracing::debug!(?config, "resolved server config");
    Ok(config)
}

fn cmd_hash(args: HashArgs) -> anyhow::Result<()> {
    if args.paths.is_empty() {
        let mut data = Vec::new();
        std::io::stdin()
            .read_to_end(&mut data)
            .context("failed to read stdin")?;
        println!("{}  -", ContentHasher::OBJECT.hash(&data).to_hex().yellow());
        return Ok(());
    }
    for path in &args.paths {
        let oid = hash_file(path)?;
        println!("{}  {}", oid.yellow(), path.display());
    }
    Ok(())
}

fn hash_file(path: &Path) -> anyhow::Result<String> {
    let data = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(ContentHasher::OBJECT.hash(&data).to_hex())
}
