//! scrubtext CLI - Unicode text normalization tool
//!
//! A command-line tool for cleaning invisible characters, smart punctuation
//! and encoding artifacts out of text files.

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use scrubtext::{clean, clean_many, preview, CleaningConfig, CleaningResult, Issue, RuleCategory};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Normalize problematic Unicode in text
#[derive(Parser)]
#[command(
    name = "scrubtext",
    version,
    about = "Normalize problematic Unicode in text",
    long_about = "scrubtext - Rule-based Unicode text normalization.\n\n\
                  Removes invisible characters and replaces smart punctuation, fancy dashes,\n\
                  exotic spaces and mis-decoded sequences with ASCII-safe equivalents.\n\n\
                  Usage:\n  \
                  scrubtext clean <file>          Clean a file to stdout\n  \
                  scrubtext clean < in > out      Clean stdin to stdout\n  \
                  scrubtext preview <file>        List what would change\n  \
                  scrubtext rules                 List available rules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a text (default: stdin to stdout)
    Clean {
        /// Input file path ("-" or omitted for stdin)
        input: Option<PathBuf>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print cleaning statistics to stderr
        #[arg(long)]
        stats: bool,

        /// Output the full result (text, statistics, changes) as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// List what cleaning would change, without changing anything
    Preview {
        /// Input file path ("-" or omitted for stdin)
        input: Option<PathBuf>,

        /// Output issues as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Clean several files at once
    Batch {
        /// Input file paths
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for cleaned files (keeps file names)
        #[arg(short, long, required_unless_present = "in_place")]
        out_dir: Option<PathBuf>,

        /// Overwrite input files
        #[arg(long, conflicts_with = "out_dir")]
        in_place: bool,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// List the available rules in the order they run
    Rules {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

/// Rule selection shared by the cleaning commands
#[derive(Args, Clone)]
struct RuleArgs {
    /// Load rule settings from a JSON file
    #[arg(long, value_name = "FILE", conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Start from a preset
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Enable a rule (repeatable, e.g. --enable markdown-conversion)
    #[arg(long, value_name = "RULE")]
    enable: Vec<RuleCategory>,

    /// Disable a rule (repeatable, e.g. --disable quotes)
    #[arg(long, value_name = "RULE")]
    disable: Vec<RuleCategory>,
}

impl RuleArgs {
    fn resolve(&self) -> Result<CleaningConfig, Box<dyn std::error::Error>> {
        let mut config = match (&self.config, self.preset) {
            (Some(path), _) => CleaningConfig::from_file(path)?,
            (None, Some(preset)) => preset.into(),
            (None, None) => CleaningConfig::default(),
        };

        for category in &self.enable {
            config.set(*category, true);
        }
        for category in &self.disable {
            config.set(*category, false);
        }

        tracing::debug!(
            rules = ?config.enabled().map(RuleCategory::key).collect::<Vec<_>>(),
            "resolved configuration"
        );
        Ok(config)
    }
}

/// Rule preset
#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// Every rule except Markdown conversion (default)
    Default,
    /// Every rule
    All,
    /// No rules
    None,
    /// Hidden characters, non-breaking spaces and trailing whitespace only
    Minimal,
}

impl From<Preset> for CleaningConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Default => CleaningConfig::default(),
            Preset::All => CleaningConfig::all(),
            Preset::None => CleaningConfig::none(),
            Preset::Minimal => CleaningConfig::minimal(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Clean {
            input,
            output,
            stats,
            json,
            rules,
        } => {
            let config = rules.resolve()?;
            let text = read_input(input.as_deref())?;
            let result = clean(&text, &config);

            if json {
                let json = serde_json::to_string_pretty(&result)?;
                write_output(output.as_deref(), &format!("{}\n", json))?;
            } else {
                write_output(output.as_deref(), &result.text)?;
            }

            if stats {
                print_stats(&result);
            }

            if let Some(path) = output {
                eprintln!("{} Cleaned: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Preview { input, json, rules } => {
            let config = rules.resolve()?;
            let text = read_input(input.as_deref())?;
            let issues: Vec<Issue> = preview(&text, &config).collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&issues)?);
            } else if issues.is_empty() {
                println!("{} No issues found", "✓".green().bold());
            } else {
                println!("{}", "Issues Found".cyan().bold());
                println!("{}", "─".repeat(40));
                for issue in &issues {
                    println!("{}: {}", issue.label().bold(), issue.description());
                }
            }
        }

        Commands::Batch {
            inputs,
            out_dir,
            in_place,
            rules,
        } => {
            let config = rules.resolve()?;
            run_batch(&inputs, out_dir.as_deref(), in_place, &config)?;
        }

        Commands::Rules { json } => {
            print_rules(json)?;
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// Run the batch command - cleans every input and writes each result
fn run_batch(
    inputs: &[PathBuf],
    out_dir: Option<&Path>,
    in_place: bool,
    config: &CleaningConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let targets: Vec<PathBuf> = inputs
        .iter()
        .map(|path| match out_dir {
            Some(dir) => dir.join(path.file_name().unwrap_or_default()),
            None => path.clone(),
        })
        .collect();

    // Checked before anything is read or written
    let mut seen = HashSet::new();
    for target in &targets {
        if !seen.insert(target) {
            let message = format!("more than one input would be written to {}", target.display());
            return Err(message.into());
        }
    }

    let pb = create_progress_bar(inputs.len() as u64);

    let mut texts = Vec::with_capacity(inputs.len());
    for path in inputs {
        pb.set_message(format!("Reading {}", path.display()));
        texts.push(read_input(Some(path))?);
        pb.inc(1);
    }

    pb.set_message("Cleaning...");
    let results = clean_many(&texts, config);

    if let Some(dir) = out_dir {
        fs::create_dir_all(dir)?;
    }

    let mut changed = 0;
    let mut removed = 0;
    let mut replaced = 0;
    for (target, result) in targets.iter().zip(&results) {
        if in_place && result.stats.is_unchanged() {
            continue;
        }

        fs::write(target, &result.text)?;
        tracing::debug!(
            file = %target.display(),
            removed = result.stats.removed_count,
            replaced = result.stats.replaced_count,
            "file written"
        );

        if !result.stats.is_unchanged() {
            changed += 1;
        }
        removed += result.stats.removed_count;
        replaced += result.stats.replaced_count;
    }

    pb.finish_and_clear();

    println!("{}", "Batch Complete".green().bold());
    println!("{}", "─".repeat(40));
    if let Some(dir) = out_dir {
        println!("{}: {}", "Output".bold(), dir.display());
    }
    println!("{}: {}", "Files".bold(), inputs.len());
    println!("{}: {}", "Changed".bold(), changed);
    println!("{}: {}", "Removed".bold(), removed);
    println!("{}: {}", "Replaced".bold(), replaced);

    Ok(())
}

fn print_stats(result: &CleaningResult) {
    let stats = &result.stats;
    eprintln!("\n{}", "Statistics".cyan().bold());
    eprintln!("{}", "─".repeat(40));
    eprintln!("{}: {}", "Removed".bold(), stats.removed_count);
    eprintln!("{}: {}", "Replaced".bold(), stats.replaced_count);
    eprintln!(
        "{}: {} → {}",
        "Length".bold(),
        stats.original_length,
        stats.final_length
    );
    for change in &result.changes {
        eprintln!("  {} {}: {}", "✓".green(), change.category.label(), change.count);
    }
}

fn print_rules(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let defaults = CleaningConfig::default();

    if json {
        let rules: Vec<_> = RuleCategory::ALL
            .iter()
            .map(|category| {
                serde_json::json!({
                    "key": category.key(),
                    "label": category.label(),
                    "description": category.description(),
                    "default": defaults.is_enabled(*category),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    println!("{}", "Rules (in execution order)".cyan().bold());
    println!("{}", "─".repeat(40));
    for category in RuleCategory::ALL {
        let state = if defaults.is_enabled(category) {
            "on ".green()
        } else {
            "off".yellow()
        };
        println!(
            "{:>2}. {} {:<22} {}",
            category.order() + 1,
            state,
            category.key().bold(),
            category.description()
        );
    }
    Ok(())
}

fn print_version() {
    println!("{} {}", "scrubtext".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Rule-based Unicode text normalization");
    println!();
    println!("Rules: {}", RuleCategory::ALL.len());
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.blue} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=> "),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Reads a file, or stdin for `None` and `-`.
fn read_input(path: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    let bytes = match path {
        Some(p) if p != Path::new("-") => fs::read(p)?,
        _ => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            buf
        }
    };
    let text = String::from_utf8(bytes).map_err(scrubtext::Error::from)?;
    Ok(text)
}

fn write_output(path: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(content.as_bytes())?;
            handle.flush()?;
        }
    }
    Ok(())
}
