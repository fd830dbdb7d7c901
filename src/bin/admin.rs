//! SessionKV Admin Binary
//!
//! Inspects and maintains a session directory written by a SessionStore.
//! Opening the directory runs rehydration, so expired and corrupt files
//! are purged as a side effect of every command.

use std::process;

use clap::{Parser, Subcommand};
use sessionkv::{Config, Record, SessionStore};
use tracing_subscriber::{fmt, EnvFilter};

/// SessionKV Admin
#[derive(Parser, Debug)]
#[command(name = "sessionkv-admin")]
#[command(about = "Inspect and maintain a SessionKV session directory")]
#[command(version)]
struct Args {
    /// Session directory
    #[arg(short, long, default_value = "./sessions")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List live sessions (optionally for one owner)
    List {
        /// Only sessions owned by this id
        #[arg(short, long)]
        owner: Option<String>,
    },

    /// Print one session as JSON without touching it
    Show {
        /// The session id
        id: String,
    },

    /// Print the raw and live session counts
    Count,

    /// Delete every expired session
    Sweep,

    /// Delete every session
    Clear,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sessionkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("SessionKV Admin v{}", sessionkv::VERSION);

    let config = Config::builder().data_dir(&args.data_dir).build();
    let store = match SessionStore::open(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open session directory {}: {}", args.data_dir, e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&store, args.command) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(store: &SessionStore, command: Commands) -> sessionkv::Result<()> {
    match command {
        Commands::List { owner } => {
            let sessions = match owner {
                Some(owner) => store.list_by_owner(&owner),
                None => store.ids().iter().filter_map(|id| store.peek(id)).collect(),
            };
            for record in &sessions {
                print_summary(record);
            }
        }
        Commands::Show { id } => match store.peek(&id) {
            Some(record) => {
                let blob = record.to_bytes()?;
                println!("{}", String::from_utf8_lossy(&blob));
            }
            None => {
                eprintln!("no live session {}", id);
                process::exit(2);
            }
        },
        Commands::Count => {
            println!("total: {}", store.count());
            println!("live:  {}", store.live_count());
        }
        Commands::Sweep => {
            let removed = store.sweep_expired()?;
            println!("removed {} expired session(s)", removed);
        }
        Commands::Clear => {
            let before = store.count();
            store.clear()?;
            println!("removed {} session(s)", before);
        }
    }
    Ok(())
}

fn print_summary(record: &Record) {
    println!(
        "{}  owner={}  created={}  expires={}  keys={}",
        record.id(),
        record.owner(),
        record.created_at().to_rfc3339(),
        record.expires_at().to_rfc3339(),
        record.payload().len()
    );
}
