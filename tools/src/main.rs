use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use codec::CodecLimits;
use photon_tools::{
    collect_datagram_paths, decode_files, format_pretty, inspect_datagram, DecodeReport,
    InspectReport,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "photon-tools",
    version,
    about = "Photon datagram inspection and decoding tools"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the layer header and command table of one datagram.
    Inspect {
        /// Path to the datagram bytes.
        datagram_path: PathBuf,
    },
    /// Decode datagrams into messages.
    Decode {
        /// Datagram file, or a directory of datagram files decoded in name order.
        path: PathBuf,
        /// Optional glob filter when decoding a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
        /// Maximum number of incomplete fragmented messages kept.
        #[arg(long, default_value_t = codec::DEFAULT_REASSEMBLY_CAPACITY)]
        reassembly_capacity: usize,
        /// Maximum payload bytes collected for one fragmented message.
        #[arg(long, default_value_t = codec::DEFAULT_MAX_MESSAGE_BYTES)]
        max_message_bytes: usize,
        /// Maximum nesting of dictionaries and arrays.
        #[arg(long)]
        max_depth: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Inspect { datagram_path } => {
            let bytes = fs::read(&datagram_path)
                .with_context(|| format!("read datagram {}", datagram_path.display()))?;
            let report = inspect_datagram(&bytes, &wire::Limits::default())
                .with_context(|| format!("decode datagram {}", datagram_path.display()))?;
            print_inspect_report(&report);
        }
        Command::Decode {
            path,
            glob,
            format,
            reassembly_capacity,
            max_message_bytes,
            max_depth,
        } => {
            let mut limits = CodecLimits {
                reassembly_capacity,
                max_message_bytes,
                ..CodecLimits::default()
            };
            if let Some(max_depth) = max_depth {
                limits.value.max_depth = max_depth;
            }
            let paths = datagram_paths(&path, glob.as_deref())?;
            let report = decode_files(&paths, &limits)?;
            match format {
                DecodeFormat::Json => {
                    let json =
                        serde_json::to_string_pretty(&report.messages).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    print!("{}", format_pretty(&report.messages));
                }
            }
            print_summary(&report);
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn datagram_paths(path: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        collect_datagram_paths(path, glob)
    } else {
        Ok(vec![path.to_path_buf()])
    }
}

fn print_inspect_report(report: &InspectReport) {
    let header = report.header;
    println!(
        "peer_id: 0x{:04x} crc: {} commands: {}",
        header.peer_id,
        header.has_crc(),
        header.command_count
    );
    println!(
        "timestamp: {} challenge: {}",
        header.timestamp, header.challenge
    );
    println!("commands:");
    for (index, command) in report.commands.iter().enumerate() {
        let kind = command
            .kind
            .map_or_else(|| format!("Unknown({})", command.command_type), |kind| format!("{kind:?}"));
        println!(
            "  {index}: {kind} channel={} flags=0x{:02x} seq={} ({} bytes)",
            command.channel_id, command.flags, command.reliable_sequence_number, command.length
        );
    }
    if report.trailing_bytes > 0 {
        println!("trailing: {} bytes", report.trailing_bytes);
    }
}

fn print_summary(report: &DecodeReport) {
    let stats = report.stats;
    eprintln!(
        "{} datagrams, {} messages ({} reassembled), {} encrypted, {} failed, {} malformed datagrams",
        stats.datagrams,
        stats.messages,
        stats.reassembled,
        stats.encrypted,
        stats.failed,
        stats.malformed_datagrams
    );
    for failure in &report.failures {
        eprintln!("  {}: {}", failure.path.display(), failure.error);
    }
}
