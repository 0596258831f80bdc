//! docoutline CLI - PDF outline and section ranking tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docoutline::batch::{list_pdfs, process_directory_with_progress};
use docoutline::{
    analyze_collection, extract_outline_from_file_with_options, render, write_report,
    BatchOptions, CorpusRules, DocumentOutline, Error, JsonFormat, OutlineOptions, RankOptions,
};

#[derive(Parser)]
#[command(name = "docoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract heading outlines and rank sections in PDF documents", long_about = None)]
struct Cli {
    /// Load corpus rules from a JSON file
    #[arg(long, global = true, value_name = "FILE", env = "DOCOUTLINE_RULES")]
    rules: Option<PathBuf>,

    /// Disable every corpus-specific rule
    #[arg(long, global = true, conflicts_with = "rules")]
    no_corpus_rules: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the title and outline of one PDF
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

    /// Extract outlines of every PDF in a directory
    Batch {
        /// Directory of PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Directory for the JSON files
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Process one file at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Rank sections across a document collection
    Collection {
        /// Collection request JSON
        #[arg(value_name = "REQUEST_JSON")]
        request: PathBuf,

        /// Directory holding the requested PDFs
        #[arg(value_name = "PDF_DIR")]
        pdf_dir: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            ref input,
            ref output,
            compact,
        }) => outline_options(&cli)
            .and_then(|options| cmd_outline(input, output.as_deref(), compact, &options)),
        Some(Commands::Batch {
            ref input,
            ref output,
            sequential,
        }) => outline_options(&cli)
            .and_then(|options| cmd_batch(input, output, sequential, options)),
        Some(Commands::Collection {
            ref request,
            ref pdf_dir,
            ref output,
        }) => cmd_collection(request, pdf_dir, output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!(
                "{}",
                "Usage: docoutline <outline|batch|collection> ...".yellow()
            );
            println!("       docoutline --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn outline_options(cli: &Cli) -> Result<OutlineOptions, Box<dyn std::error::Error>> {
    let options = OutlineOptions::new();
    if cli.no_corpus_rules {
        return Ok(options.without_corpus_rules());
    }
    match &cli.rules {
        Some(path) => {
            log::info!("Loading corpus rules from {}", path.display());
            Ok(options.with_rules(CorpusRules::from_file(path)?))
        }
        None => Ok(options),
    }
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: &OutlineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = match extract_outline_from_file_with_options(input, options) {
        Ok(outline) => outline,
        Err(Error::Io(e)) => return Err(e.into()),
        Err(e) => {
            log::warn!("Failed to read {}: {}", input.display(), e);
            eprintln!("{}: {}", "Warning".yellow().bold(), e);
            DocumentOutline::empty()
        }
    };

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = render::to_json(&outline, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    sequential: bool,
    outline: OutlineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = BatchOptions::new().with_outline_options(outline);
    if sequential {
        options = options.sequential();
    }

    let total = list_pdfs(input)?.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let summary = process_directory_with_progress(input, output, &options, |item| {
        if let Some(name) = item.input.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} files written to {}",
        "Processed".green().bold(),
        summary.processed(),
        output.display()
    );
    for item in summary.failed() {
        println!(
            "  {} {} ({})",
            "└─".dimmed(),
            item.input.display().to_string().yellow(),
            item.error.as_deref().unwrap_or_default()
        );
    }

    Ok(())
}

fn cmd_collection(
    request: &Path,
    pdf_dir: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = analyze_collection(request, pdf_dir, &RankOptions::default())?;

    if let Some(path) = output {
        write_report(&report, path)?;
        println!(
            "{} {} sections to {}",
            "Saved".green(),
            report.extracted_sections.len(),
            path.display()
        );
    } else {
        println!("{}", render::to_json(&report, JsonFormat::Indented(4))?);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF outline extraction and section ranking tool");
    println!();
    println!("License: MIT");
}
