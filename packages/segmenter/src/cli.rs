//! Command-line interface for the segmenter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::align::{align, align_claims};
use crate::config::{parse_language, validate_directory, ProcessOptions};
use crate::corpus::{process_all_with_progress, CorpusReport, PairOutcome};
use crate::error::Result;
use crate::extract::{SidecarExtractor, TextExtractor};
use crate::matcher::{FileMatcher, MatchReport};
use crate::normalize::clean_text;
use crate::output::{write_report, OutputFormat};
use crate::segmentation::SegmentEngine;
use crate::types::{AlignedClaim, AlignedPair, Language};

/// Patent Segmenter - Split and align bilingual patent documents.
#[derive(Parser)]
#[command(name = "patent-segmenter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Preview source/target file pairs of two directories.
    Match {
        /// Directory with Japanese files
        source_dir: PathBuf,

        /// Directory with Chinese files
        target_dir: PathBuf,

        /// Print the full report as json or yaml instead of the preview
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Print the section map of one document.
    Segment {
        /// Plain-text file, or a document with a .txt rendition beside it
        file: PathBuf,

        /// Document language (ja or zh)
        #[arg(short, long)]
        language: String,

        /// Output format (json or yaml)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Print the claims of one document.
    Claims {
        /// Plain-text file, or a document with a .txt rendition beside it
        file: PathBuf,

        /// Document language (ja or zh)
        #[arg(short, long)]
        language: String,

        /// Output format (json or yaml)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Print the aligned sections and claims of a Japanese/Chinese document pair.
    Align {
        /// Japanese document
        source_file: PathBuf,

        /// Chinese document
        target_file: PathBuf,

        /// Output format (json or yaml)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Match, segment and align every pair of two directories.
    Process {
        /// Directory with Japanese files
        source_dir: PathBuf,

        /// Directory with Chinese files
        target_dir: PathBuf,

        /// Report file (default: no report, summary only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format (json or yaml)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Domain label for every pair (default: detect from the source text)
        #[arg(short, long)]
        domain: Option<String>,
    },
}

/// Aligned content of a single document pair.
#[derive(Debug, Serialize)]
struct PairView {
    sections: Vec<AlignedPair>,
    claims: Vec<AlignedClaim>,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            source_dir,
            target_dir,
            format,
        } => match_command(&source_dir, &target_dir, format.as_deref()),
        Commands::Segment {
            file,
            language,
            format,
        } => segment_command(&file, &language, &format),
        Commands::Claims {
            file,
            language,
            format,
        } => claims_command(&file, &language, &format),
        Commands::Align {
            source_file,
            target_file,
            format,
        } => align_command(&source_file, &target_file, &format),
        Commands::Process {
            source_dir,
            target_dir,
            output,
            format,
            domain,
        } => process_command(
            &source_dir,
            &target_dir,
            output.as_deref(),
            &format,
            domain,
        ),
    }
}

/// Read and lightly clean one document.
fn read_document(path: &Path, language: Language) -> Result<String> {
    let raw = SidecarExtractor::new().extract(path, language)?;
    Ok(clean_text(raw.as_str()))
}

/// Execute the match command.
fn match_command(source_dir: &Path, target_dir: &Path, format: Option<&str>) -> Result<()> {
    let format = format.map(str::parse::<OutputFormat>).transpose()?;
    let matcher = FileMatcher::from_options(&ProcessOptions::from_env());
    let report = matcher.match_directories(source_dir, target_dir)?;

    if let Some(format) = format {
        return write_report(&report, format, None);
    }

    print_match_preview(&report);
    Ok(())
}

fn print_match_preview(report: &MatchReport) {
    println!(
        "{} {} matched pairs",
        style("Found").bold(),
        style(report.pairs.len()).cyan()
    );
    println!();

    for (i, pair) in report.pairs.iter().enumerate() {
        println!("{:3}. [{}]", i + 1, style(&pair.patent_id).cyan());
        println!("     JP: {}", pair.source.name);
        println!("     ZH: {}", pair.target.name);
    }

    if !report.unmatched.is_empty() {
        println!();
        println!("{}", style("Unmatched:").yellow().bold());
        for unmatched in &report.unmatched {
            println!("  {} ({})", unmatched.file.name, unmatched.reason);
        }
    }

    if !report.warnings.is_empty() {
        println!();
        println!("{}", style("Warnings:").yellow().bold());
        for warning in &report.warnings {
            println!("  {warning}");
        }
    }
}

/// Execute the segment command.
fn segment_command(file: &Path, language: &str, format: &str) -> Result<()> {
    let language = parse_language(language)?;
    let format: OutputFormat = format.parse()?;

    let text = read_document(file, language)?;
    let sections = SegmentEngine::new(language).segment(&text);
    write_report(&sections, format, None)
}

/// Execute the claims command.
fn claims_command(file: &Path, language: &str, format: &str) -> Result<()> {
    let language = parse_language(language)?;
    let format: OutputFormat = format.parse()?;

    let text = read_document(file, language)?;
    let claims = SegmentEngine::new(language).segment_document(&text).claims;
    write_report(&claims, format, None)
}

/// Execute the align command.
fn align_command(source_file: &Path, target_file: &Path, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;

    let source = SegmentEngine::new(Language::Japanese)
        .segment_document(&read_document(source_file, Language::Japanese)?);
    let target = SegmentEngine::new(Language::Chinese)
        .segment_document(&read_document(target_file, Language::Chinese)?);

    let view = PairView {
        sections: align(&source.sections, &target.sections),
        claims: align_claims(&source.claims, &target.claims),
    };
    write_report(&view, format, None)
}

/// Execute the process command.
fn process_command(
    source_dir: &Path,
    target_dir: &Path,
    output: Option<&Path>,
    format: &str,
    domain: Option<String>,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    validate_directory(source_dir)?;
    validate_directory(target_dir)?;

    let mut options = ProcessOptions::from_env();
    if let Some(domain) = domain {
        options = options.with_domain(domain);
    }

    println!(
        "{} {} against {}",
        style("Processing").bold(),
        style(source_dir.display()).cyan(),
        style(target_dir.display()).cyan()
    );
    println!();

    let matches = FileMatcher::from_options(&options).match_directories(source_dir, target_dir)?;

    let pb = ProgressBar::new(matches.pairs.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("=> "),
    );
    pb.set_message("Aligning pairs...");

    let extractor = SidecarExtractor::new();
    let report = process_all_with_progress(&matches, &extractor, &options, &|_: &PairOutcome| {
        pb.inc(1)
    });
    pb.finish_and_clear();

    print_summary(&report);

    if let Some(path) = output {
        write_report(&report, format, Some(path))?;
        println!();
        println!("{} {}", style("Saved to:").green().bold(), path.display());
    }

    Ok(())
}

fn print_summary(report: &CorpusReport) {
    let stats = &report.stats;
    println!("{}", style("Summary").bold());
    println!("  Total pairs processed:  {}", stats.total_files);
    println!(
        "  Successfully aligned:   {}",
        style(stats.successful).green()
    );
    println!("  Skipped (OCR needed):   {}", stats.skipped_ocr);
    println!("  Skipped (errors):       {}", stats.skipped_error);
    println!("  Skipped (no match):     {}", stats.skipped_no_match);
    println!();
    println!("  Sections aligned:       {}", stats.sections_imported);
    println!("  Claims aligned:         {}", stats.claims_imported);
    println!("  Total entries:          {}", stats.total_entries());

    if !report.warnings.is_empty() {
        println!(
            "  Warnings:               {}",
            style(report.warnings.len()).yellow().bold()
        );
    }
}
