//! pdfbrief CLI - PDF outline extraction and summarization handoff

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfbrief::{JsonFormat, Pdfbrief, Summarizer};

#[derive(Parser)]
#[command(name = "pdfbrief")]
#[command(version)]
#[command(about = "Extract PDF outlines and delegate summarization", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the structured outline as JSON
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Extract the outline and summarize it through an external collaborator
    Summarize {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Summarizer program (e.g. python3)
        #[arg(long, value_name = "PROGRAM", env = "PDFBRIEF_SUMMARIZER")]
        summarizer: String,

        /// Fixed argument passed before the positional ones (repeatable)
        #[arg(long = "summarizer-arg", value_name = "ARG")]
        summarizer_args: Vec<String>,

        /// Collaborator timeout in seconds
        #[arg(long, value_name = "SECS", default_value = "120")]
        timeout: u64,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show outline information for a document
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            output,
            compact,
        }) => cmd_outline(&input, output.as_deref(), compact),
        Some(Commands::Summarize {
            input,
            summarizer,
            summarizer_args,
            timeout,
            output,
            compact,
        }) => cmd_summarize(
            &input,
            &summarizer,
            &summarizer_args,
            timeout,
            output.as_deref(),
            compact,
        ),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_outline(&input, None, false)
            } else {
                println!("{}", "Usage: pdfbrief <FILE>".yellow());
                println!("       pdfbrief --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn write_or_print(json: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }
    Ok(())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Lenient mode: a single undecodable page should not sink the outline.
    let outline = Pdfbrief::new().lenient().extract(input)?;
    log::debug!(
        "extracted outline with {} sections",
        outline.programs.len()
    );

    let json = outline.to_json(json_format(compact))?;
    write_or_print(&json, output)
}

fn cmd_summarize(
    input: &Path,
    program: &str,
    args: &[String],
    timeout_secs: u64,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut summarizer =
        Summarizer::new(program).with_timeout(Duration::from_secs(timeout_secs));
    for arg in args {
        summarizer = summarizer.arg(arg);
    }

    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Extracting outline...");
    let outline = Pdfbrief::new().lenient().extract(input)?;
    pb.inc(1);

    pb.set_message("Summarizing...");
    let brief = pdfbrief::summarize_outline(outline, &summarizer)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    let json = brief.to_json(json_format(compact))?;
    write_or_print(&json, output)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let outline = Pdfbrief::new().lenient().extract(input)?;

    println!("{}", "Document Outline".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Title".bold(), outline.title);
    println!("{}: {}", "Sections".bold(), outline.programs.len());

    for entry in &outline.programs {
        println!("  {} {}", format!("{}.", entry.number).dimmed(), entry.title);
    }

    let words = outline.body_text.split_whitespace().count();
    println!();
    println!("{}: {}", "Body words".bold(), words);
    println!("{}: {}", "Body characters".bold(), outline.body_text.len());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfbrief".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and summarization handoff");
    println!();
    println!("License: MIT");
}
