//! t2c-cli - Command-line interface for T2C
//!
//! A command-line tool for compressing and decompressing files with the T2C
//! codec. Both directions use the library's two-pass pattern: a size query,
//! one allocation, then the real pass.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{LevelFilter, Metadata, Record};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use t2c::{decompress, CompressionStats, Compressor, Token, TokenIter, DEFAULT_BUCKET_COUNT};

#[derive(Parser)]
#[command(name = "t2c-cli")]
#[command(about = "A CLI tool for T2C compression and decompression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    Compress {
        /// Input file to compress
        input: PathBuf,

        /// Output compressed file
        output: PathBuf,

        /// Number of Match Index buckets (power of two)
        #[arg(short, long, default_value_t = DEFAULT_BUCKET_COUNT)]
        buckets: usize,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a T2C-compressed file
    Decompress {
        /// Input compressed file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Walk the token stream of a compressed file and print a summary
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },
}

/// Minimal stderr backend for the library's `log` output
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() {
    let cli = Cli::parse();

    if cli.verbose && log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            buckets,
            force,
        } => compress_file(&input, &output, buckets, force, cli.verbose, cli.quiet),
        Commands::Decompress {
            input,
            output,
            force,
        } => decompress_file(&input, &output, force, cli.verbose, cli.quiet),
        Commands::Info { input } => show_file_info(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn check_paths(input: &Path, output: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    Ok(())
}

fn read_input(path: &Path) -> t2c::Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

fn write_output(path: &Path, data: &[u8]) -> t2c::Result<()> {
    Ok(fs::write(path, data)?)
}

/// Two-step bar (size query, fill) for inputs over 1 MiB
fn progress_bar(input_size: usize, quiet: bool, message: &'static str) -> Option<ProgressBar> {
    if quiet || input_size <= 1024 * 1024 {
        return None;
    }

    let pb = ProgressBar::new(2);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message);
    Some(pb)
}

fn compress_file(
    input: &Path,
    output: &Path,
    buckets: usize,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;
    let compressor = Compressor::new(buckets)?;

    if verbose {
        println!(
            "Compressing '{}' to '{}'",
            input.display(),
            output.display()
        );
        println!("Match Index: {} buckets", compressor.bucket_count());
    }

    let start_time = Instant::now();

    let input_data = read_input(input)?;
    let input_size = input_data.len();

    if verbose {
        println!("Input size: {} bytes", input_size);
    }

    let progress = progress_bar(input_size, quiet, "Compressing...");

    // First pass: required output size
    let output_size = compressor
        .compress(&input_data, None)
        .map_err(|e| format!("Compression failed: {}", e))?;
    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    // Second pass: fill the buffer
    let mut compressed_data = vec![0u8; output_size];
    let output_size = compressor
        .compress(&input_data, Some(&mut compressed_data[..]))
        .map_err(|e| format!("Compression failed: {}", e))?;
    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Compression complete");
    }

    write_output(output, &compressed_data[..output_size])?;

    let compression_time = start_time.elapsed();

    if !quiet {
        println!(
            "Compressed {} bytes down to {} bytes: ratio: {:.2}%",
            input_size,
            output_size,
            percent(output_size, input_size)
        );
        if verbose {
            println!("  Time:   {:.2?}", compression_time);
        }
    }

    Ok(())
}

fn decompress_file(
    input: &Path,
    output: &Path,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Decompressing '{}' to '{}'",
            input.display(),
            output.display()
        );
    }

    let start_time = Instant::now();

    let compressed_data = read_input(input)?;
    let input_size = compressed_data.len();

    if verbose {
        println!("Compressed size: {} bytes", input_size);
    }

    let progress = progress_bar(input_size, quiet, "Decompressing...");

    let output_size = decompress(&compressed_data, None)
        .map_err(|e| format!("Decompression failed: {}", e))?;
    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let mut decompressed_data = vec![0u8; output_size];
    let output_size = decompress(&compressed_data, Some(&mut decompressed_data[..]))
        .map_err(|e| format!("Decompression failed: {}", e))?;
    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decompression complete");
    }

    write_output(output, &decompressed_data[..output_size])?;

    let decompression_time = start_time.elapsed();

    if !quiet {
        println!(
            "Decompressed {} bytes up to {} bytes: ratio: {:.2}%",
            input_size,
            output_size,
            percent(output_size, input_size)
        );
        if verbose {
            println!("  Time:   {:.2?}", decompression_time);
        }
    }

    Ok(())
}

fn show_file_info(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = read_input(input)?;

    println!("T2C File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", data.len());

    let mut stats = CompressionStats {
        compressed_bytes: data.len(),
        ..Default::default()
    };
    let mut tokens = TokenIter::new(&data);
    let mut error = None;

    for item in tokens.by_ref() {
        match item {
            Ok((position, token)) => {
                if verbose {
                    print_token(position, &token);
                }
                match token {
                    Token::Literal(_) => stats.literal_count += 1,
                    Token::Match { length, .. } => {
                        stats.match_count += 1;
                        stats.longest_match = stats.longest_match.max(length);
                    }
                }
            }
            Err(e) => error = Some(e),
        }
    }
    stats.group_count = tokens.group_count();
    stats.uncompressed_bytes = tokens.output_position();

    println!("  Groups: {}", stats.group_count);
    println!("  Literals: {}", stats.literal_count);
    println!("  Matches: {}", stats.match_count);
    println!("  Longest Match: {} bytes", stats.longest_match);

    match error {
        None => {
            println!("  Decompressed Size: {} bytes", stats.uncompressed_bytes);
            println!(
                "  Compression Ratio: {:.1}%",
                percent(stats.compressed_bytes, stats.uncompressed_bytes)
            );
            println!("  Status: ✓ Valid T2C stream");
        }
        Some(e) => {
            println!("  Status: ✗ Invalid or corrupted T2C stream");
            println!("  Error: {}", e);
        }
    }

    Ok(())
}

fn print_token(position: usize, token: &Token) {
    match token {
        Token::Literal(byte) => println!("    {:>8}  literal 0x{:02x}", position, byte),
        Token::Match { offset, length } => {
            println!("    {:>8}  match   offset {:>4} length {:>2}", position, offset, length)
        }
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
