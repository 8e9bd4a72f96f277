//! # portload
//!
//! Reads a JSON port catalogue and logs every port it contains, in file order.
//!
//! Usage:
//!   portload [-f <path>]

use std::fs::File;
use std::io::BufReader;

use anyhow::Context;
use clap::Parser;
use ports::load_ports;
use ports::logging::init_tracing;

#[derive(Parser)]
#[command(name = "portload")]
#[command(version, about = "Decode a JSON port catalogue")]
struct Cli {
    /// Path to JSON file
    #[arg(short, long, default_value = "testdata/ports.json")]
    file: String,
}

fn main() -> anyhow::Result<()> {
    init_tracing("info");
    let cli = Cli::parse();

    let file = File::open(&cli.file).with_context(|| format!("opening file {}", cli.file))?;

    let count = load_ports(BufReader::new(file), |i, port| {
        tracing::info!(index = i, port_id = %port.id, name = %port.name, "Port: {:?}", port);
    })?;

    tracing::info!(count, file = %cli.file, "Finished decoding ports");
    Ok(())
}
