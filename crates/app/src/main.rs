//! huffile: command-line Huffman file compressor.
//!
//! Runs one command (compress, decompress, or demo), then prints the metrics
//! summary unless `--no-metrics` is given.

mod config;
mod input_gen;

use config::{Command, Config};
use huffile_core::metrics::Metrics;
use huffile_core::{codec, CompressReport, Error, HuffmanTree, Result};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("run `huffile --help` for usage");
            return ExitCode::from(2);
        }
    };

    if config.command == Command::Help {
        config::print_help();
        return ExitCode::SUCCESS;
    }

    init_logging(config.verbose);

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the selected command. `Ok(false)` means the run finished but its
/// result is not the one asked for (demo mismatch).
fn run(config: &Config) -> Result<bool> {
    let mut exports = Vec::new();
    let ok = match &config.command {
        Command::Compress(path) => run_compress(config, path, &mut exports).map(|_| true)?,
        Command::Decompress(path) => run_decompress(config, path, &mut exports).map(|_| true)?,
        Command::Demo => run_demo(config, &mut exports)?,
        Command::Help => true,
    };

    if let Some(path) = &config.export_metrics {
        fs::write(path, exports.join("\n"))?;
        info!("metrics written to {}", path.display());
    }
    Ok(ok)
}

fn run_compress(config: &Config, path: &Path, exports: &mut Vec<String>) -> Result<CompressReport> {
    let mut metrics = Metrics::new();
    let report = codec::compress(path)?;
    metrics.record_compress(&report);
    metrics.complete();

    if config.print_codes {
        println!("=== Code Table ===");
        print!("{}", report.codes.render());
        println!();
    }
    if config.print_tree {
        let tree = HuffmanTree::from_frequencies(&report.table)?;
        println!("=== Huffman Tree ===");
        print!("{}", tree.render());
        println!();
    }

    println!("Wrote {}", report.artifact.display());
    report_metrics(config, &metrics);
    exports.push(format!("run=compress\n{}", metrics.export_text()));
    Ok(report)
}

fn run_decompress(config: &Config, path: &Path, exports: &mut Vec<String>) -> Result<Vec<u8>> {
    let mut metrics = Metrics::new();
    let report = codec::decompress(path)?;
    metrics.record_decompress(&report);
    metrics.complete();

    if !report.outcome.is_complete() {
        warn!(
            "{} ended before the end-of-stream marker; {} holds a partial result",
            path.display(),
            report.output.display()
        );
    }

    println!("Wrote {}", report.output.display());
    report_metrics(config, &metrics);
    exports.push(format!("run=decompress\n{}", metrics.export_text()));
    Ok(report.outcome.bytes)
}

/// Generate a sample, compress it, decompress the artifact, and compare.
fn run_demo(config: &Config, exports: &mut Vec<String>) -> Result<bool> {
    if !config.work_dir.is_dir() {
        return Err(Error::Config(format!(
            "demo directory {} does not exist",
            config.work_dir.display()
        )));
    }

    info!(
        "demo: seed {} ({} bytes) in {}",
        config.seed,
        config.sample_bytes,
        config.work_dir.display()
    );

    let sample = config.work_dir.join(format!("huffile-demo-{}.txt", config.seed));
    input_gen::write_sample_file(&sample, config.seed, config.sample_bytes)?;

    println!("=== Compress ===");
    let report = run_compress(config, &sample, exports)?;

    println!("=== Decompress ===");
    let restored = run_decompress(config, &report.artifact, exports)?;

    let original = fs::read(&sample)?;
    if restored == original {
        println!("✓ Round trip verified ({} bytes, seed {})", original.len(), config.seed);
        Ok(true)
    } else {
        let first_diff = original
            .iter()
            .zip(&restored)
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| original.len().min(restored.len()));
        error!(
            "round trip mismatch at byte {} (original {} bytes, restored {} bytes)",
            first_diff,
            original.len(),
            restored.len()
        );
        println!("✗ Round trip FAILED (seed {})", config.seed);
        Ok(false)
    }
}

fn report_metrics(config: &Config, metrics: &Metrics) {
    if config.print_metrics {
        metrics.print_summary();
    }
    metrics.print_result();
}
