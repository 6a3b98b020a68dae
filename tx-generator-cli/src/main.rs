use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tx_generator::generator::{
    Generator, GeneratorConfig, DEFAULT_CLIENT_COUNT, DEFAULT_TRANSACTION_COUNT,
};
use tx_generator::source::RngSource;

/// Generates random deposit, withdrawal, dispute, resolve and chargeback records as CSV
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Number of transaction ids to visit
    #[clap(short = 'n', long, default_value_t = DEFAULT_TRANSACTION_COUNT)]
    pub(crate) transactions: u32,
    /// Number of distinct client ids
    #[clap(short, long, default_value_t = DEFAULT_CLIENT_COUNT)]
    pub(crate) clients: u16,
    /// Fixed seed, for reproducible output
    #[clap(short, long)]
    pub(crate) seed: Option<u64>,
    /// Write to this file instead of stdout
    #[clap(short, long, parse(from_os_str))]
    pub(crate) output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = GeneratorConfig::new(cli.transactions, cli.clients);
    let rng = match cli.seed {
        Some(seed) => {
            info!("Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let mut generator = Generator::new(config, RngSource::new(rng))?;
    debug!("Generating with {:?}", generator.config());

    let sink: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    generator.write_csv(sink)?;

    Ok(())
}
