use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "casket",
    about = "Casket — in-memory content-addressed object store",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP object server
    Serve(ServeArgs),
    /// Print the object id a file would be stored under
    Hash(HashArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Largest accepted object, in bytes
    #[arg(long)]
    pub max_object_size: Option<usize>,
}

#[derive(Args)]
pub struct HashArgs {
    /// Files to hash; reads stdin when empty
    pub paths: Vec<PathBuf>,
}
