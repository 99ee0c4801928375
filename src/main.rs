//! Entropy Converter CLI
//!
//! Command-line interface for rolling dice, shuffling and measuring the
//! entropy consumption of the converter.

use clap::{Parser, Subcommand};
use entropy_converter::{
    analysis::{self, Measurement},
    config::FileConfig,
    metrics::{MetricsRegistry, MetricsSnapshot},
    EntropyConverter, Generator, RngSource, Word,
};
use std::error::Error;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Seed a reproducible ChaCha20 source instead of reading the OS source
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Width in bits of the converter buffer (16, 32 or 64)
    #[arg(short, long, global = true)]
    width: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw uniform values in [min, max]
    Roll {
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        min: i64,
        #[arg(long, default_value_t = 6, allow_negative_numbers = true)]
        max: i64,
        /// Number of values to draw
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u64,
    },

    /// Print a uniformly random permutation of 0..size
    Shuffle {
        #[arg(short = 'n', long, default_value_t = 20)]
        size: usize,
    },

    /// Measure entropy consumption against the theoretical bounds
    Measure {
        /// Print Prometheus metrics after the report
        #[arg(long)]
        metrics: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    if let Some(width) = cli.width {
        config.converter.width = width;
    }
    if let Some(seed) = cli.seed {
        config.converter.seed = Some(seed);
    }
    config.validate()?;

    info!(
        "Entropy Converter v{} ({}-bit buffer)",
        entropy_converter::VERSION,
        config.converter.width
    );

    match config.converter.seed {
        Some(seed) => {
            warn!(seed, "Using a seeded pseudorandom source; output is reproducible");
            run_with_width(RngSource::seeded(seed), &cli.command, &config)
        }
        None => run_with_width(RngSource::from_os_entropy(), &cli.command, &config),
    }
}

fn run_with_width<G>(gen: G, command: &Commands, config: &FileConfig) -> Result<(), Box<dyn Error>>
where
    G: Generator,
    G::Error: Error + 'static,
{
    match config.converter.width {
        16 => run::<u16, G>(gen, command, config),
        32 => run::<u32, G>(gen, command, config),
        _ => run::<u64, G>(gen, command, config),
    }
}

fn run<T, G>(mut gen: G, command: &Commands, config: &FileConfig) -> Result<(), Box<dyn Error>>
where
    T: Word,
    G: Generator,
    G::Error: Error + 'static,
{
    let mut converter = EntropyConverter::<T>::new();

    match command {
        Commands::Roll { min, max, count } => {
            let mut die = converter.make_uniform_with(*min, *max, &mut gen);
            let rolls = (0..*count)
                .map(|_| die().map(|v| v.to_string()))
                .collect::<Result<Vec<_>, _>>()?;
            println!("{}", rolls.join(" "));
        }
        Commands::Shuffle { size } => {
            let mut items: Vec<usize> = (0..*size).collect();
            converter.shuffle(&mut items, &mut gen)?;
            println!(
                "{}",
                items
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }
        Commands::Measure { metrics } => {
            let measurements = measure_all::<T, G>(gen, config)?;
            if *metrics {
                let registry = MetricsRegistry::new()?;
                let mut snapshot = MetricsSnapshot::default();
                for m in &measurements {
                    snapshot.record(m);
                }
                registry.update(&snapshot);
                print!("{}", registry.encode()?);
            }
        }
    }

    info!(buffered_bits = converter.buffered_entropy(), "Done");
    Ok(())
}

fn measure_all<T, G>(mut gen: G, config: &FileConfig) -> Result<Vec<Measurement>, Box<dyn Error>>
where
    T: Word,
    G: Generator,
    G::Error: Error + 'static,
{
    let trials = config.measurement.trials;
    let deck = config.measurement.deck_size;

    println!(
        "Upper bound entropy loss of generating a 1-6 = {:.6e} bits",
        analysis::max_entropy_loss::<T>(6, 2)
    );
    println!(
        "Upper bound entropy loss of shuffling {} cards = {:.6e} bits",
        deck,
        analysis::max_shuffle_loss::<T>(deck)
    );
    println!(
        "Worst-case shuffle efficiency = {:.9}",
        analysis::shuffle_efficiency::<T>(deck)
    );

    let measurements = vec![
        analysis::measure_shuffle::<T, _>(&mut gen, trials, deck)?,
        analysis::measure_conversion::<T, _>(&mut gen, 10, 11, trials)?,
        analysis::measure_conversion::<T, _>(&mut gen, 10, 9, trials)?,
        analysis::measure_fixed_target::<T, _>(&mut gen, 6, trials)?,
        analysis::measure_random_targets::<T, _>(&mut gen, trials)?,
    ];

    for m in &measurements {
        print_report(m);
        if !m.within_bound(1.0) {
            warn!(label = %m.label, "Measured loss exceeds the theoretical bound");
        }
    }
    Ok(measurements)
}

fn print_report(m: &Measurement) {
    println!("\nMeasuring {} using {} bits:", m.label, m.width);
    println!("  Input entropy  = {:.12} bits", m.input_bits);
    println!("  Output entropy = {:.12} bits", m.output_bits);
    println!("  Measured entropy loss per trial = {:.6e} bits", m.loss_per_trial());
    println!("  Upper bound entropy loss per trial = {:.6e} bits", m.bound_per_trial());
    if let Some(expected) = m.expected_bits {
        println!("  Expected entropy loss = {:.6e} bits", expected);
    }
    println!("  Efficiency = {:.9}", m.efficiency());
}
