use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tomlet::{Document, Entry, LineError, decode, number};
use tracing::{info, warn};

/// Decode a restricted TOML file and print its entries.
#[derive(Debug, Parser)]
#[command(name = "tomlet", version)]
struct Args {
    /// File to decode
    path: PathBuf,

    /// Base used to print integer values (2, 8, 10, or 16)
    #[arg(long, default_value_t = 10, value_parser = parse_radix)]
    radix: u32,

    /// Print entries grouped under their section headers
    #[arg(long)]
    group: bool,

    /// Stop at the first line that fails to decode
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_radix(s: &str) -> Result<u32, String> {
    let base = s.parse::<u32>().map_err(|e| e.to_string())?;
    number::base_prefix(base)
        .map(|_| base)
        .map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(args.verbose);

    match run(&args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            warn!(failed, "some lines could not be decoded");
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tomlet={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Returns the number of lines that failed to decode.
fn run(args: &Args) -> anyhow::Result<usize> {
    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    info!(path = %args.path.display(), bytes = text.len(), "decoding");

    let mut stop = false;
    let results = decode(&text).map_while(|result| {
        if stop {
            return None;
        }
        stop = args.strict && result.is_err();
        Some(result)
    });

    if args.group {
        let document = results.collect::<Document>();

        for section in document.sections() {
            if !section.name().is_empty() {
                println!("[{}]", section.name());
            }
            for entry in section.entries() {
                println!("{} = {}", entry.key(), entry.value().render(args.radix)?);
            }
            println!();
        }

        document.errors().iter().for_each(report);
        return Ok(document.errors().len());
    }

    let mut failed = 0;
    for result in results {
        match result {
            Ok(entry) => print_entry(&entry, args.radix)?,
            Err(error) => {
                report(&error);
                failed += 1;
            }
        }
    }

    Ok(failed)
}

fn print_entry(entry: &Entry, radix: u32) -> anyhow::Result<()> {
    let value = entry.value().render(radix)?;

    if entry.section().is_empty() {
        println!("{} = {value}", entry.key());
    } else {
        println!("[{}] {} = {value}", entry.section(), entry.key());
    }

    Ok(())
}

fn report(error: &LineError) {
    eprintln!("{error}");
}
