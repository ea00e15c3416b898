//! Brood War replay (.rep) parser CLI
//!
//! A command-line interface for decoding and inspecting replay files.
//!
//! ## Commands
//!
//! - `info` - Display quick replay metadata
//! - `parse` - Full decode with output format options
//! - `validate` - Validate replay format (exit codes for scripting)

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use bwrep_parser::{decode, DecodeError, ReplayResult};

/// Callers reject files outside this range before decoding (input
/// contract: the decoder itself only validates structural bytes).
const MIN_FILE_SIZE: u64 = 1024;
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Brood War replay (.rep) parser
#[derive(Parser)]
#[command(name = "bwrep-parser")]
#[command(about = "StarCraft: Brood War replay (.rep) parser", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display replay information
    Info {
        /// Path to the replay file
        file: PathBuf,
    },
    /// Decode a replay file
    Parse {
        /// Path to the replay file
        file: PathBuf,
        /// Output format: json, pretty
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
        /// Include the full command log in output
        #[arg(long)]
        commands: bool,
        /// Include per-player build orders
        #[arg(long)]
        build_orders: bool,
    },
    /// Validate replay format
    Validate {
        /// Path to the replay file
        file: PathBuf,
        /// Verbose error reporting
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Output format options
#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { file } => run_info(&file),
        Commands::Parse {
            file,
            output,
            commands,
            build_orders,
        } => run_parse(&file, &output, commands, build_orders),
        Commands::Validate { file, verbose } => run_validate(&file, verbose),
    }
}

/// Reads a replay file, enforcing the caller-side size contract.
fn read_replay(path: &Path) -> Result<Vec<u8>, String> {
    let metadata =
        std::fs::metadata(path).map_err(|e| format!("{}: {e}", path.display()))?;

    let size = metadata.len();
    if size < MIN_FILE_SIZE {
        return Err(format!(
            "{}: {size} bytes is below the {MIN_FILE_SIZE}-byte minimum for a replay",
            path.display()
        ));
    }
    if size > MAX_FILE_SIZE {
        return Err(format!(
            "{}: {size} bytes exceeds the {MAX_FILE_SIZE}-byte maximum for a replay",
            path.display()
        ));
    }

    std::fs::read(path).map_err(|e| format!("{}: {e}", path.display()))
}

fn run_info(file: &Path) -> ExitCode {
    let data = match read_replay(file) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match decode(&data) {
        Ok(result) => {
            print_summary(&result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_parse(file: &Path, output: &OutputFormat, commands: bool, build_orders: bool) -> ExitCode {
    let data = match read_replay(file) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match decode(&data) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match output {
        OutputFormat::Json => {
            let mut value = match serde_json::to_value(&result) {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("error: JSON serialization failed: {e}");
                    return ExitCode::FAILURE;
                }
            };

            // The command log dominates output size; drop it unless asked
            if let Some(object) = value.as_object_mut() {
                if !commands {
                    object.remove("commands");
                }
                if !build_orders {
                    object.remove("buildOrders");
                }
            }

            match serde_json::to_string_pretty(&value) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("error: JSON serialization failed: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        OutputFormat::Pretty => {
            print_summary(&result);
            if build_orders {
                print_build_orders(&result);
            }
            if commands {
                print_commands(&result);
            }
        }
    }

    ExitCode::SUCCESS
}

fn run_validate(file: &Path, verbose: bool) -> ExitCode {
    let data = match read_replay(file) {
        Ok(data) => data,
        Err(e) => {
            if verbose {
                eprintln!("INVALID: {e}");
            }
            return ExitCode::FAILURE;
        }
    };

    match decode(&data) {
        Ok(result) => {
            if verbose {
                println!(
                    "VALID: {} on {}, {} players, {} commands",
                    result.header.engine_version,
                    result.header.map_name,
                    result.players.len(),
                    result.commands.len()
                );
            } else {
                println!("VALID");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            if verbose {
                match &e {
                    DecodeError::UnknownOpcode { opcode, offset } => {
                        eprintln!("INVALID: unknown opcode 0x{opcode:02X} at offset {offset}");
                    }
                    other => eprintln!("INVALID: {other}"),
                }
            } else {
                println!("INVALID");
            }
            ExitCode::FAILURE
        }
    }
}

fn print_summary(result: &ReplayResult) {
    println!("=== Replay ===");
    println!("Engine:   {}", result.header.engine_version);
    println!("Map:      {}", result.header.map_name);
    println!("Type:     {:?}", result.header.game_type);
    println!(
        "Duration: {} ({} frames)",
        result.header.duration, result.header.frame_count
    );

    println!("\n=== Players ===");
    for player in &result.players {
        let metrics = result.metrics_for(player.slot_id);
        let (apm, eapm) = metrics.map_or((0, 0), |m| (m.apm, m.eapm));
        let control = if player.is_computer { "CPU" } else { "Human" };
        println!(
            "  [{}] {} - {} ({control}, team {}) APM {apm} / EAPM {eapm}",
            player.slot_id, player.name, player.race, player.team
        );
    }
}

fn print_build_orders(result: &ReplayResult) {
    println!("\n=== Build Orders ===");
    for player in &result.players {
        let Some(entries) = result.build_order_for(player.slot_id) else {
            continue;
        };
        println!("  {}:", player.name);
        for entry in entries {
            println!(
                "    {} [{:>3}] {:?} {}",
                entry.time, entry.supply, entry.action, entry.unit_or_building
            );
        }
    }
}

fn print_commands(result: &ReplayResult) {
    println!("\n=== Commands ===");
    for command in &result.commands {
        let name = command.info().map_or("?", |info| info.name);
        println!(
            "  frame {:>7} slot {} {} ({} payload bytes)",
            command.frame,
            command.slot_id,
            name,
            command.payload.len()
        );
    }
}
