//! Floating-point coprocessor CLI.
//!
//! This binary drives the accelerators either through `/dev/mem` on the target board or
//! through the built-in simulator. It provides:
//! 1. **pi:** Leibniz and Monte-Carlo π estimates computed on the accelerators.
//! 2. **selftest:** Hardware versus host comparison for every configured unit.
//! 3. **random:** Distribution capture from the random unit.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use coproc_core::diag::{self, Histogram};
use coproc_core::pi::{Leibniz, MonteCarlo};
use coproc_core::transport::RegisterTransport;
use coproc_core::{Config, Coprocessor, Error, System};

#[derive(Parser, Debug)]
#[command(
    name = "coproc",
    author,
    version,
    about = "Floating-point coprocessor driver",
    long_about = "Estimate π, self-test the accelerators, or capture the random unit's distribution.\n\nWithout --config the reference memory map is used. The simulator backend needs no hardware.\n\nExamples:\n  coproc pi --method leibniz --iterations 1000\n  coproc --backend devmem selftest\n  coproc random --samples 26000 --hex > samples.txt"
)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where register accesses go.
    #[arg(short, long, value_enum, default_value_t = Backend::Sim)]
    backend: Backend,

    /// Log every accelerator request.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Simulated accelerators.
    Sim,
    /// Physical accelerators through `/dev/mem`.
    Devmem,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    /// Leibniz series.
    Leibniz,
    /// Monte-Carlo circle-area sampling.
    MonteCarlo,
    /// Leibniz, then Monte-Carlo.
    Both,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Estimate π on the accelerators.
    Pi {
        /// Estimator to run.
        #[arg(short, long, value_enum, default_value_t = MethodArg::Both)]
        method: MethodArg,

        /// Series terms or sample points, overriding the configuration.
        #[arg(short = 'n', long)]
        iterations: Option<u32>,
    },

    /// Compare every configured unit against host arithmetic. Exits 1 on any mismatch.
    Selftest,

    /// Sample the random unit and print a histogram.
    Random {
        /// Samples to draw, overriding the configuration.
        #[arg(short = 'n', long)]
        samples: Option<u32>,

        /// Histogram bins, overriding the configuration.
        #[arg(short = 'k', long)]
        bins: Option<usize>,

        /// Print raw sample words in hex, one per line, instead of the histogram.
        #[arg(long)]
        hex: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error loading config {}: {}", path.display(), e);
            process::exit(1);
        }),
        None => Config::default(),
    };

    let outcome = match cli.backend {
        Backend::Sim => {
            info!("backend: simulator");
            execute(System::new(&config).into_coprocessor(), &cli.command, &config)
        }
        Backend::Devmem => open_devmem(&config).and_then(|cp| execute(cp, &cli.command, &config)),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("\n[!] {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr subscriber; `--verbose` overrides `RUST_LOG` with `trace`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(unix)]
fn open_devmem(config: &Config) -> coproc_core::Result<Coprocessor<coproc_core::transport::DevMem>> {
    use coproc_core::transport::DevMem;

    let units = config.units.unit_map();
    let io = DevMem::open(units.iter().map(|(_, block)| block.base()))?;
    info!("backend: /dev/mem, {} windows mapped", io.window_count());
    Ok(Coprocessor::new(io, units))
}

#[cfg(not(unix))]
fn open_devmem(_config: &Config) -> coproc_core::Result<Coprocessor<coproc_core::soc::Bus>> {
    Err(Error::Io(io::Error::new(
        io::ErrorKind::Unsupported,
        "/dev/mem backend requires a Unix target",
    )))
}

/// Runs `command`; returns `false` when it completed but reported a failure.
fn execute<T: RegisterTransport>(
    mut cp: Coprocessor<T>,
    command: &Commands,
    config: &Config,
) -> coproc_core::Result<bool> {
    match *command {
        Commands::Pi { method, iterations } => {
            if matches!(method, MethodArg::Leibniz | MethodArg::Both) {
                let n = iterations.unwrap_or(config.estimators.leibniz_iterations);
                let estimate = Leibniz::new(n).run(&mut cp)?;
                println!("{estimate}");
                println!("  terms: {n}  error: {:.3e}", estimate.abs_error());
            }
            if matches!(method, MethodArg::MonteCarlo | MethodArg::Both) {
                let n = iterations.unwrap_or(config.estimators.monte_carlo_samples);
                let result = MonteCarlo::new(n).run(&mut cp)?;
                println!("{}", result.estimate);
                println!(
                    "  inside: {}/{}  error: {:.3e}",
                    result.inside,
                    n,
                    result.estimate.abs_error()
                );
            }
            println!();
            cp.stats().print();
            Ok(true)
        }
        Commands::Selftest => {
            let report = diag::selftest::run(&mut cp, config.diagnostics.random_samples)?;
            print!("{report}");
            if report.passed() {
                println!("\nSelf-test passed.");
            } else {
                println!("\nSelf-test FAILED: {} findings.", report.finding_count());
            }
            Ok(report.passed())
        }
        Commands::Random { samples, bins, hex } => {
            let n = samples.unwrap_or(config.diagnostics.random_samples);
            let bins = bins.unwrap_or(config.diagnostics.histogram_bins);
            if bins == 0 {
                return Err(Error::InvalidConfig("histogram needs at least one bin".into()));
            }
            let words = diag::histogram::sample_words(&mut cp, n)?;
            if hex {
                let mut out = io::stdout().lock();
                diag::histogram::write_hex(&mut out, &words)?;
                out.flush()?;
            } else {
                println!("{}", Histogram::from_words(&words, bins));
            }
            Ok(true)
        }
    }
}
