//! preflight CLI - PDF print and accessibility checker

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use preflight::{scan_document, PdfParser, Profile, ScanOptions, ScanReport, TipStyle};

#[derive(Parser)]
#[command(name = "preflight")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Check PDF files for print production and accessibility issues", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Target output profile
    #[arg(short, long, value_enum)]
    profile: Option<OutputProfile>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the check catalog against a PDF
    Scan {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Target output profile
        #[arg(short, long, value_enum, default_value = "digital")]
        profile: OutputProfile,

        /// Minimum effective image resolution in PPI
        #[arg(long, default_value = "150")]
        min_ppi: u32,

        /// Marker string that must appear in the document info
        #[arg(long, value_name = "TEXT")]
        marker: Option<String>,

        /// Show the full report (every detail plus remediation walkthroughs)
        #[arg(short, long)]
        full: bool,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputProfile {
    /// Digital distribution (accessibility checks)
    Digital,
    /// Print production (bleed, resolution, typography)
    Print,
}

impl From<OutputProfile> for Profile {
    fn from(profile: OutputProfile) -> Self {
        match profile {
            OutputProfile::Digital => Profile::Digital,
            OutputProfile::Print => Profile::Print,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Scan {
            input,
            profile,
            min_ppi,
            marker,
            full,
            json,
            output,
        }) => cmd_scan(&input, profile, min_ppi, marker, full, json, output.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: scan if input is provided
            if let Some(input) = cli.input {
                let profile = cli.profile.unwrap_or(OutputProfile::Digital);
                cmd_scan(&input, profile, 150, None, false, false, None)
            } else {
                println!("{}", "Usage: preflight <FILE> [--profile print]".yellow());
                println!("       preflight --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_scan(
    input: &Path,
    profile: OutputProfile,
    min_ppi: u32,
    marker: Option<String>,
    full: bool,
    json: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Parsing PDF...");
    let document = PdfParser::open(input)?.parse()?;
    pb.inc(1);

    pb.set_message("Running checks...");
    let mut options = ScanOptions::new()
        .with_profile(profile.into())
        .with_min_ppi(min_ppi);
    if let Some(marker) = marker {
        options = options.with_metadata_marker(marker);
    }
    let report = scan_document(&document, options);
    pb.inc(1);
    pb.finish_and_clear();

    if json {
        let text = serde_json::to_string_pretty(&report)?;
        match output {
            Some(path) => {
                fs::write(path, &text)?;
                println!("{} {}", "Saved to".green(), path.display());
            }
            None => println!("{}", text),
        }
    } else {
        match output {
            Some(path) => {
                fs::write(path, render_plain(input, &report, full))?;
                println!("{} {}", "Saved to".green(), path.display());
            }
            None => print_colored(&report, full),
        }
    }

    if !report.stats().all_passed() {
        std::process::exit(1);
    }

    Ok(())
}

/// Plain-text rendering used when writing the report to a file.
fn render_plain(input: &Path, report: &ScanReport, full: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Preflight report: {} ({} profile)\n",
        input.display(),
        report.profile
    ));
    out.push_str(&format!(
        "Generated: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    out.push_str(&"=".repeat(50));
    out.push('\n');

    let lines = if full {
        report.report_lines()
    } else {
        report.dashboard_lines()
    };
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str(&"=".repeat(50));
    out.push('\n');
    let stats = report.stats();
    out.push_str(&format!(
        "{}/{} checks passed ({:.0}%)\n",
        stats.passed,
        stats.total,
        stats.pass_percentage()
    ));

    let style = if full {
        TipStyle::Detailed
    } else {
        TipStyle::Short
    };
    let tips = report.tips(style);
    if !tips.is_empty() {
        out.push('\n');
        out.push_str("Tips:\n");
        for tip in tips {
            out.push_str(&format!("  {}: {}\n", tip.check, tip.text));
        }
    }

    out
}

fn print_colored(report: &ScanReport, full: bool) {
    let title = match report.profile {
        Profile::Print => "Preflight Results (print)",
        Profile::Digital => "Preflight Results (digital)",
    };
    println!("{}", title.cyan().bold());
    println!("{}", "─".repeat(44).dimmed());

    let lines = if full {
        report.report_lines()
    } else {
        report.dashboard_lines()
    };
    for line in lines {
        println!("{}", colorize_line(&line));
    }

    println!("{}", "─".repeat(44).dimmed());
    let stats = report.stats();
    let summary = format!(
        "{}/{} checks passed ({:.0}%)",
        stats.passed,
        stats.total,
        stats.pass_percentage()
    );
    if stats.all_passed() {
        println!("{}", summary.green().bold());
    } else {
        println!("{}", summary.yellow().bold());
    }

    let style = if full {
        TipStyle::Detailed
    } else {
        TipStyle::Short
    };
    let tips = report.tips(style);
    if !tips.is_empty() {
        println!();
        println!("{}", "Tips".cyan().bold());
        for tip in tips {
            println!("  {} {}", format!("{}:", tip.check).bold(), tip.text);
        }
    }
}

/// Color a projection line by its status marker; detail lines are dimmed.
fn colorize_line(line: &str) -> colored::ColoredString {
    if line.starts_with("❌") {
        line.red()
    } else if line.starts_with("⚠") {
        line.yellow()
    } else if line.starts_with("✅") {
        line.green()
    } else {
        line.dimmed()
    }
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = PdfParser::open(input)?.parse()?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), doc.metadata.pdf_version);
    println!("{}: {}", "Pages".bold(), doc.metadata.page_count);
    println!(
        "{}: {}",
        "Tagged".bold(),
        if doc.structure.marked { "Yes" } else { "No" }
    );

    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = doc.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref creator) = doc.metadata.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref producer) = doc.metadata.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }
    if let Some(ref created) = doc.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = doc.metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = doc.plain_text();
    let words: usize = text.split_whitespace().count();
    let chars = text.chars().filter(|c| !c.is_whitespace()).count();

    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Characters".bold(), chars);
    println!("{}: {}", "Images".bold(), doc.image_count());

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "preflight".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("PDF preflight and accessibility checker");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/preflight".dimmed()
    );
    println!("License: MIT");
}
