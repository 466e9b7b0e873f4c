use clap::Parser;
use metar::{normalize_all, suspend_progress, Metar, MetarError};
use std::io::{self, Write};
use std::process;
use std::time::{Duration, Instant};
use tracing_subscriber::filter::LevelFilter;

/// Fetch and decode the current METAR for one or more airports.
#[derive(Debug, Clone, Parser)]
#[command(name = "metar", version, about)]
struct Args {
    /// Airport identifiers, e.g. `jfk` or `EGLL`. Three-letter codes get a `K` prefix.
    #[arg(required = true, value_name = "AIRPORT")]
    airports: Vec<String>,

    /// Root URL of the METAR service
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// AVWX API token
    #[arg(long, env = "METAR_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Give up on a station after this many seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Do not show the progress spinner
    #[arg(long)]
    no_progress: bool,

    /// Increase log output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// Stderr log writer that hides the progress spinner while a line is written.
struct SpinnerAwareStderr;

impl Write for SpinnerAwareStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        suspend_progress(|| io::stderr().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_writer(|| SpinnerAwareStderr)
        .init();

    // Every identifier is validated before anything goes over the network.
    let stations = match normalize_all(&args.airports) {
        Ok(stations) => stations,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    if let Err(e) = runtime.block_on(run(&args, &stations)) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: &Args, stations: &[metar::StationCode]) -> Result<(), MetarError> {
    let client = Metar::builder()
        .maybe_base_url(args.base_url.clone())
        .maybe_token(args.token.clone())
        .maybe_timeout(args.timeout.map(Duration::from_secs))
        .progress(!args.no_progress)
        .build()?;

    let start = Instant::now();
    let batch = client.fetch(stations).await;
    println!(
        "All stations fetched in {:.2}s",
        start.elapsed().as_secs_f64()
    );

    // Failed stations were already logged as they came in.
    for entry in batch.reports() {
        if let Ok(report) = entry.report {
            println!();
            print!("{}", report);
        }
    }
    println!();

    Ok(())
}
