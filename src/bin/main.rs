use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use ycbvideo::{read_expected_counts, DatasetReport, DiskInventory, Error, Loader};

/// Inspect and select frames of a YCB-Video dataset.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize which frame sequences and frames are available
    Info {
        /// Dataset root directory
        root: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// File of expected frame counts, lines of the form '0003: 2953'
        #[arg(long, value_name = "FILE")]
        frame_counts: Option<PathBuf>,
        /// Also list sequences without incomplete frames (-v) and available ranges (-vv)
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },
    /// Resolve selection expressions and print the frame descriptors
    Select {
        /// Dataset root directory
        root: PathBuf,
        /// Selection expressions, e.g. 'data_syn/*' or '[1,2]/42:56'
        expressions: Vec<String>,
        /// Read expressions from a file instead (relative to the root)
        #[arg(long, value_name = "FILE", conflicts_with = "expressions")]
        file: Option<PathBuf>,
        /// Shuffle the final descriptor order
        #[arg(long)]
        shuffle: bool,
        /// Seed for a reproducible shuffle (implies --shuffle)
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), Error> {
    match command {
        Commands::Info {
            root,
            json,
            frame_counts,
            verbose,
        } => {
            let inventory = DiskInventory::scan_with_progress(&root)?;
            let mut report = DatasetReport::from_inventory(&inventory);
            if let Some(path) = frame_counts {
                report.apply_expected_counts(&read_expected_counts(path)?);
            }

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).expect("report serializes")
                );
                return Ok(());
            }

            println!("Frame sequences available: {}", report.sequences.len());
            if verbose > 1 {
                println!("Available: {}", report.sequence_ranges().join(", "));
            }
            if !report.missing.is_empty() {
                println!("Missing: {}", report.missing_ranges().join(", "));
            }
            println!();
            let with_totals = report.sequences.iter().any(|s| s.expected.is_some());
            if with_totals {
                println!("sequence: complete/incomplete/dataset total");
            } else {
                println!("sequence: complete/incomplete");
            }
            for sequence in &report.sequences {
                if sequence.incomplete.is_empty() && verbose == 0 {
                    continue;
                }
                print!(
                    "{:>8}: {}/{}",
                    sequence.sequence,
                    sequence.complete,
                    sequence.incomplete.len()
                );
                match sequence.expected {
                    Some(expected) => println!("/{}", expected),
                    None => println!(),
                }
                for frame in &sequence.incomplete {
                    println!("          {} missing {:?}", frame.frame, frame.missing);
                }
            }
            Ok(())
        }
        Commands::Select {
            root,
            expressions,
            file,
            shuffle,
            seed,
        } => {
            let loader = Loader::new(&root)?;
            let mut collection = match file {
                Some(file) => loader.frames_from_file(file)?,
                None => loader.frames(&expressions)?,
            };
            if shuffle || seed.is_some() {
                collection.shuffle(seed);
            }
            for descriptor in collection.descriptors() {
                println!("{}", descriptor);
            }
            Ok(())
        }
    }
}
