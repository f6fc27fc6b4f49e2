use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tempora_edtf::{Edtf, InstantDate};
use tempora_normalize::{Config, DatesNormalizer, NormalizationResult, TimeSpan};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize date values (reads one value per stdin line when none are given)
    Normalize {
        /// Raw date values
        values: Vec<String>,

        /// Path to a YAML/JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only accept strict EDTF
        #[arg(long)]
        strict: bool,

        /// Treat values as a generic property (subject, coverage)
        #[arg(long)]
        generic: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Plain)]
        format: Format,
    },
    /// Parse a single value with the strict EDTF grammar
    Parse {
        value: String,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum Format {
    Plain,
    Json,
    Ntriples,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Plain => write!(f, "plain"),
            Format::Json => write!(f, "json"),
            Format::Ntriples => write!(f, "ntriples"),
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Normalize {
            values,
            config,
            strict,
            generic,
            format,
        } => {
            let mut config = match config {
                Some(path) => match Config::from_path(&path) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!("Error loading config: {}", e);
                        std::process::exit(1);
                    }
                },
                None => Config::default(),
            };
            if strict {
                config.normalizer.legacy_strategies = false;
            }
            if generic {
                config.normalizer.generic_property = true;
            }

            let values = if values.is_empty() {
                match io::stdin().lock().lines().collect::<Result<Vec<_>, _>>() {
                    Ok(lines) => lines,
                    Err(e) => {
                        eprintln!("Error reading stdin: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                values
            };

            tracing::debug!(count = values.len(), %format, "normalizing values");
            let normalizer = DatesNormalizer::new(config.normalizer.clone());
            for value in &values {
                match normalizer.normalize_date_property(value) {
                    Ok(result) => {
                        if let Err(e) = print_result(value, &result, &config, format) {
                            eprintln!("Error writing value {:?}: {}", value, e);
                            std::process::exit(1);
                        }
                    }
                    Err(e) => {
                        eprintln!("Error in value {:?}: {}", value, e);
                        std::process::exit(1);
                    }
                }
            }
        }
        Commands::Parse { value } => match value.parse::<Edtf>() {
            Ok(edtf) => print_parsed(&edtf),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
    }
}

fn print_result(
    value: &str,
    result: &NormalizationResult,
    config: &Config,
    format: Format,
) -> tempora_normalize::Result<()> {
    match (result, format) {
        (NormalizationResult::Matched(resolved), Format::Plain) => {
            let mut line = format!("{}\t{}\t{}", value, resolved.canonical(), resolved.strategy());
            if let Some(operation) = resolved.clean_operation() {
                line.push_str(&format!("\t{}", operation));
            }
            println!("{}", line);
        }
        (NormalizationResult::Matched(resolved), Format::Json) => {
            let span = TimeSpan::from_resolved(resolved, &config.linked_data);
            let output = json!({
                "input": value,
                "strategy": resolved.strategy(),
                "cleanOperation": resolved.clean_operation(),
                "timeSpan": span.to_json()?,
            });
            println!("{}", output);
        }
        (NormalizationResult::Matched(resolved), Format::Ntriples) => {
            let span = TimeSpan::from_resolved(resolved, &config.linked_data);
            print!("{}", span.to_ntriples());
        }
        (NormalizationResult::NoMatch(_), Format::Plain) => println!("{}\tno match", value),
        (NormalizationResult::NoMatch(_), Format::Json) => {
            println!("{}", json!({ "input": value, "timeSpan": null }));
        }
        (NormalizationResult::NoMatch(_), Format::Ntriples) => {
            println!("# no match: {:?}", value);
        }
    }
    Ok(())
}

fn print_parsed(edtf: &Edtf) {
    println!("canonical: {}", edtf);
    let quality = edtf.quality();
    println!(
        "uncertain: {}, approximate: {}",
        quality.uncertain, quality.approximate
    );
    let describe = |day: Option<InstantDate>| match day {
        Some(day) => format!(
            "{} (century {})",
            day,
            day.century().map_or_else(|| "-".to_string(), |c| c.to_string())
        ),
        None => "open or unknown".to_string(),
    };
    println!("begin: {}", describe(edtf.first_day()));
    println!("end: {}", describe(edtf.last_day()));
    if let Edtf::Instant(instant) = edtf {
        if let Some(century) = instant.century() {
            println!("century: {}", century);
        }
    }
}
