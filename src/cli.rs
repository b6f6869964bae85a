//! CLI definitions and command routing.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, LhmPaths};
use crate::engine::Engine;
use crate::hosts::render_entry;
use crate::record::Record;

#[derive(Parser)]
#[command(name = "lhm")]
#[command(about = "Edit the managed block of the hosts file")]
pub struct Cli {
    /// Hosts file to edit (default: config, then the system hosts file)
    #[arg(long, global = true)]
    pub hosts_file: Option<PathBuf>,

    /// Print the resulting file instead of writing it
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List managed entries with their row numbers
    List,
    /// Print the hosts file as it would be written
    Show,
    /// Enable the entry at ROW
    Enable { row: usize },
    /// Disable (comment out) the entry at ROW
    Disable { row: usize },
    /// Change the address of the entry at ROW
    SetAddress { row: usize, address: String },
    /// Replace the hostnames of the entry at ROW
    SetHosts {
        row: usize,
        #[arg(num_args = 1..)]
        hosts: Vec<String>,
    },
    /// Append a new entry
    Add {
        address: String,
        #[arg(num_args = 1..)]
        hosts: Vec<String>,
        /// Add the entry commented out
        #[arg(long)]
        disabled: bool,
    },
    /// Remove the entry at ROW
    Remove { row: usize },
    /// Check the hosts file and managed block for problems
    Doctor,
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = LhmPaths::default_paths();
    let config = Config::load(&paths)?;
    let hosts_file = config.hosts_file(cli.hosts_file.as_deref());
    let storage = crate::platform::default_hosts_storage(hosts_file, config.privileged_write);

    let mut engine = Engine::new(storage);
    if !matches!(cli.command, Commands::Doctor) {
        engine.load()?;
    }

    match cli.command {
        Commands::List => {
            for (row, record) in engine.table().records().iter().enumerate() {
                let state = if record.enabled { "on" } else { "off" };
                println!("{row}\t{state}\t{}\t{}", record.address, record.hosts_line());
            }
            return Ok(());
        }
        Commands::Show => {
            print!("{}", engine.rendered());
            return Ok(());
        }
        Commands::Enable { row } => engine.set_enabled(row, true)?,
        Commands::Disable { row } => engine.set_enabled(row, false)?,
        Commands::SetAddress { row, address } => engine.set_address(row, &address)?,
        Commands::SetHosts { row, hosts } => engine.set_hostnames(row, &hosts.join(" "))?,
        Commands::Add {
            address,
            hosts,
            disabled,
        } => {
            let mut record = Record::parse(&address, &hosts.join(" "))?;
            record.set_enabled(!disabled);
            engine.push_record(record);
        }
        Commands::Remove { row } => {
            let removed = engine.remove_record(row)?;
            println!("Removed: {}", render_entry(&removed));
        }
        Commands::Doctor => return cmd_doctor(engine.storage()),
    }

    commit(&mut engine, cli.dry_run)
}

fn commit(engine: &mut Engine, dry_run: bool) -> Result<()> {
    if !engine.dirty() {
        println!("No changes");
        return Ok(());
    }
    if dry_run {
        print!("{}", engine.rendered());
        return Ok(());
    }
    engine.apply()?;
    println!("Updated {}", engine.storage().path().display());
    Ok(())
}

fn cmd_doctor(storage: &dyn crate::platform::HostsStorage) -> Result<()> {
    let results = crate::doctor::run_checks(storage);
    let mut failed = 0;
    for r in &results {
        let mark = if r.ok { "ok" } else { "FAIL" };
        println!("[{mark}] {}", r.message);
        if !r.ok {
            failed += 1;
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} check(s) failed");
    }
    Ok(())
}
