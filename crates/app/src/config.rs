//! Configuration for the huffile application.
//!
//! Handles parsing command-line arguments into a command plus options with
//! sensible defaults.
//!
//! # Philosophy
//!
//! `huffile demo` works with ZERO further arguments: it picks a seed from the
//! clock and prints it, so any demo run can be reproduced with `--seed`.

use std::path::PathBuf;

/// Default demo sample size: 64 KiB
pub const DEFAULT_SAMPLE_BYTES: usize = 65536;

/// What to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compress a file into `<PATH>.huf`
    Compress(PathBuf),
    /// Decompress an artifact into `<NAME>_unc<EXT>`
    Decompress(PathBuf),
    /// Generate sample data, compress it, decompress it, and compare
    Demo,
    /// Print usage and exit
    Help,
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub command: Command,

    // === Demo ===
    /// Seed for sample data
    pub seed: u64,

    /// Sample size in bytes
    pub sample_bytes: usize,

    /// Directory the sample and artifacts are written to
    pub work_dir: PathBuf,

    // === Behavior ===
    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print the code table after compression
    pub print_codes: bool,

    /// Whether to print the tree after compression
    pub print_tree: bool,

    /// Whether to print detailed metrics summary
    pub print_metrics: bool,

    /// Write metrics as `key=value` lines to this file
    pub export_metrics: Option<PathBuf>,

    /// Debug-level logging
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded).
    ///
    /// The first positional argument selects the command; `compress` and
    /// `decompress` take exactly one path. Options may appear anywhere.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut positional: Vec<&str> = Vec::new();
        let mut seed: Option<u64> = None;
        let mut sample_bytes: Option<usize> = None;
        let mut work_dir: Option<PathBuf> = None;
        let mut print_config = false;
        let mut print_codes = false;
        let mut print_tree = false;
        let mut print_metrics = true;
        let mut export_metrics: Option<PathBuf> = None;
        let mut verbose = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--size" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--size requires a number".to_string());
                    }
                    sample_bytes = Some(args[i].parse().map_err(|_| "invalid size")?);
                }
                "--dir" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--dir requires a path".to_string());
                    }
                    work_dir = Some(PathBuf::from(&args[i]));
                }
                "--print-config" => {
                    print_config = true;
                }
                "--print-codes" => {
                    print_codes = true;
                }
                "--print-tree" => {
                    print_tree = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--export-metrics" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--export-metrics requires a path".to_string());
                    }
                    export_metrics = Some(PathBuf::from(&args[i]));
                }
                "--verbose" | "-v" => {
                    verbose = true;
                }
                "--help" | "-h" => {
                    positional.clear();
                    positional.push("help");
                    break;
                }
                arg if arg.starts_with('-') && arg.len() > 1 => {
                    return Err(format!("unknown argument: {}", arg));
                }
                arg => positional.push(arg),
            }
            i += 1;
        }

        let command = match positional.as_slice() {
            ["help"] => Command::Help,
            ["compress", path] => Command::Compress(PathBuf::from(path)),
            ["decompress", path] => Command::Decompress(PathBuf::from(path)),
            ["demo"] => Command::Demo,
            ["compress" | "decompress"] => {
                return Err(format!("{} requires a path", positional[0]));
            }
            [] => return Err("missing command".to_string()),
            [name, ..] if !matches!(*name, "compress" | "decompress" | "demo") => {
                return Err(format!("unknown command: {}", name));
            }
            [name, ..] => return Err(format!("too many arguments for {}", name)),
        };

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or_default()
        });

        Ok(Config {
            command,
            seed,
            sample_bytes: sample_bytes.unwrap_or(DEFAULT_SAMPLE_BYTES),
            work_dir: work_dir.unwrap_or_else(|| PathBuf::from(".")),
            print_config,
            print_codes,
            print_tree,
            print_metrics,
            export_metrics,
            verbose,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.command {
            Command::Compress(path) => println!("Command: compress {}", path.display()),
            Command::Decompress(path) => println!("Command: decompress {}", path.display()),
            Command::Demo => println!("Command: demo"),
            Command::Help => println!("Command: help"),
        }
        if self.command == Command::Demo {
            println!();
            println!("=== Demo ===");
            println!("Seed: {}", self.seed);
            println!("Sample size: {} bytes ({} KiB)", self.sample_bytes, self.sample_bytes / 1024);
            println!("Directory: {}", self.work_dir.display());
        }
        println!();
        println!("Print codes: {}", self.print_codes);
        println!("Print tree: {}", self.print_tree);
        println!("Print metrics: {}", self.print_metrics);
        if let Some(path) = &self.export_metrics {
            println!("Export metrics: {}", path.display());
        }
        println!("Verbose: {}", self.verbose);
        println!();
    }
}

pub fn print_help() {
    println!("huffile: Huffman file compressor");
    println!();
    println!("USAGE:");
    println!("    huffile compress <PATH>     Write <PATH>.huf");
    println!("    huffile decompress <PATH>   Write <NAME>_unc<EXT> next to <PATH>");
    println!("    huffile demo                Compress and restore generated sample data");
    println!();
    println!("OPTIONS:");
    println!("    --seed <N>              Seed for demo data (default: time-based)");
    println!("    --size <N>              Demo sample size (default: {})", DEFAULT_SAMPLE_BYTES);
    println!("    --dir <PATH>            Demo working directory (default: .)");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --print-codes           Print the code table after compressing");
    println!("    --print-tree            Print the Huffman tree after compressing");
    println!("    --no-metrics            Don't print metrics summary");
    println!("    --export-metrics <PATH> Write metrics as key=value lines");
    println!("    --verbose, -v           Debug-level logging (RUST_LOG overrides)");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffile compress notes.txt          # writes notes.txt.huf");
    println!("    huffile decompress notes.txt.huf    # writes notes_unc.txt");
    println!("    huffile demo --seed 42 --size 4096  # deterministic demo run");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compress_command() {
        let config = Config::from_args(&args(&["compress", "notes.txt", "--print-codes"])).unwrap();
        assert_eq!(config.command, Command::Compress(PathBuf::from("notes.txt")));
        assert!(config.print_codes);
        assert!(!config.print_tree);
        assert!(config.print_metrics);
    }

    #[test]
    fn test_decompress_command_with_options_first() {
        let config = Config::from_args(&args(&["-v", "--no-metrics", "decompress", "a.huf"])).unwrap();
        assert_eq!(config.command, Command::Decompress(PathBuf::from("a.huf")));
        assert!(config.verbose);
        assert!(!config.print_metrics);
    }

    #[test]
    fn test_demo_defaults() {
        let config = Config::from_args(&args(&["demo"])).unwrap();
        assert_eq!(config.command, Command::Demo);
        assert_eq!(config.sample_bytes, DEFAULT_SAMPLE_BYTES);
        assert_eq!(config.work_dir, PathBuf::from("."));
    }

    #[test]
    fn test_demo_options() {
        let config =
            Config::from_args(&args(&["demo", "--seed", "42", "--size", "1024", "--dir", "/tmp/x"])).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.sample_bytes, 1024);
        assert_eq!(config.work_dir, PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_export_metrics_path() {
        let config = Config::from_args(&args(&["compress", "a.txt", "--export-metrics", "m.txt"])).unwrap();
        assert_eq!(config.export_metrics, Some(PathBuf::from("m.txt")));

        let config = Config::from_args(&args(&["compress", "a.txt"])).unwrap();
        assert_eq!(config.export_metrics, None);
    }

    #[test]
    fn test_help_wins() {
        let config = Config::from_args(&args(&["compress", "--help"])).unwrap();
        assert_eq!(config.command, Command::Help);
    }

    #[test]
    fn test_argument_errors() {
        for bad in [
            &[][..],
            &["compress"][..],
            &["compress", "a", "b"][..],
            &["explode"][..],
            &["demo", "--seed"][..],
            &["demo", "--seed", "abc"][..],
            &["demo", "--frobnicate"][..],
            &["demo", "--export-metrics"][..],
        ] {
            assert!(Config::from_args(&args(bad)).is_err(), "accepted {:?}", bad);
        }
    }
}
