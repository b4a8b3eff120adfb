//! # preflight
//!
//! Print and accessibility preflight for PDF documents.
//!
//! This library parses a PDF into a flat document model, runs a catalog of
//! production and accessibility checks against it, and aggregates the
//! outcomes into a report with dashboard and full-report projections.
//!
//! ## Quick Start
//!
//! ```no_run
//! use preflight::{scan_file, TipStyle};
//!
//! fn main() -> preflight::Result<()> {
//!     // Scan a PDF with the digital (accessibility) profile
//!     let report = scan_file("booklet.pdf")?;
//!
//!     for line in report.dashboard_lines() {
//!         println!("{}", line);
//!     }
//!     let stats = report.stats();
//!     println!("{}/{} checks passed", stats.passed, stats.total);
//!
//!     for tip in report.tips(TipStyle::Short) {
//!         println!("Tip ({}): {}", tip.check, tip.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two profiles**: print production (bleed, resolution, typography) and
//!   digital accessibility (tagging, alt text, contrast, reading order)
//! - **Structure heuristics**: heading hierarchy, table headers, and reading
//!   order inferred from layout when tags are absent
//! - **Contrast sampling**: page rasterization with background color
//!   reconciliation for WCAG AA ratios
//! - **Projections**: dashboard and report views derived from one finding
//!   batch, plus remediation tips per failing check

pub mod checks;
pub mod color;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod raster;
pub mod report;

// Re-export commonly used types
pub use checks::{Check, CheckSet, ScanContext};
pub use color::Rgb;
pub use detect::{detect_version, detect_version_from_path, is_pdf};
pub use error::{Error, Result};
pub use model::{
    CheckId, Detail, DetailItem, Document, Finding, Metadata, Page, Status,
};
pub use parser::{PdfParser, Profile, ScanOptions};
pub use raster::PageRenderer;
pub use report::{ScanReport, ScanStats, Tip, TipStyle};

use std::path::Path;

/// Scan a PDF file with default options (digital profile).
///
/// # Arguments
///
/// * `path` - Path to the PDF file
///
/// # Returns
///
/// A `Result` containing the [`ScanReport`] or an error. Parse failures are
/// fatal; individual check failures are demoted to failing findings inside
/// the report.
///
/// # Example
///
/// ```no_run
/// use preflight::scan_file;
///
/// let report = scan_file("booklet.pdf").unwrap();
/// println!("{} findings", report.findings.len());
/// ```
pub fn scan_file<P: AsRef<Path>>(path: P) -> Result<ScanReport> {
    scan_file_with_options(path, ScanOptions::default())
}

/// Scan a PDF file with custom options.
///
/// # Arguments
///
/// * `path` - Path to the PDF file
/// * `options` - Scan options (profile, thresholds, marker vocabularies)
///
/// # Example
///
/// ```no_run
/// use preflight::{scan_file_with_options, ScanOptions};
///
/// let options = ScanOptions::print().with_min_ppi(300);
/// let report = scan_file_with_options("flyer.pdf", options).unwrap();
/// ```
pub fn scan_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ScanOptions,
) -> Result<ScanReport> {
    let document = PdfParser::open(path)?.parse()?;
    Ok(scan_document(&document, options))
}

/// Scan a PDF from bytes with default options.
///
/// # Example
///
/// ```no_run
/// use preflight::scan_bytes;
///
/// let data = std::fs::read("booklet.pdf").unwrap();
/// let report = scan_bytes(&data).unwrap();
/// ```
pub fn scan_bytes(data: &[u8]) -> Result<ScanReport> {
    scan_bytes_with_options(data, ScanOptions::default())
}

/// Scan a PDF from bytes with custom options.
pub fn scan_bytes_with_options(data: &[u8], options: ScanOptions) -> Result<ScanReport> {
    let document = PdfParser::from_bytes(data)?.parse()?;
    Ok(scan_document(&document, options))
}

/// Run the default check catalog against an already parsed document.
///
/// This never fails as a whole: a check that cannot complete becomes a
/// failing finding in the report.
pub fn scan_document(document: &Document, options: ScanOptions) -> ScanReport {
    let profile = options.profile;
    let ctx = ScanContext::new(options);
    let findings = CheckSet::with_defaults().run(document, &ctx);
    ScanReport::new(profile, document.metadata.clone(), findings)
}

/// Builder for configuring and running a preflight scan.
///
/// # Example
///
/// ```no_run
/// use preflight::Preflight;
///
/// let report = Preflight::print()
///     .with_min_ppi(300)
///     .with_metadata_marker("ACME-TEMPLATE")
///     .scan_file("flyer.pdf")?;
/// # Ok::<(), preflight::Error>(())
/// ```
pub struct Preflight {
    options: ScanOptions,
    renderer: Option<Box<dyn PageRenderer>>,
}

impl Preflight {
    /// Create a builder with digital-profile defaults.
    pub fn new() -> Self {
        Self {
            options: ScanOptions::default(),
            renderer: None,
        }
    }

    /// Create a builder with the digital (accessibility) profile.
    pub fn digital() -> Self {
        Self::new().with_options(ScanOptions::digital())
    }

    /// Create a builder with the print production profile.
    pub fn print() -> Self {
        Self::new().with_options(ScanOptions::print())
    }

    /// Replace the scan options wholesale.
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the minimum effective image resolution in PPI.
    pub fn with_min_ppi(mut self, ppi: u32) -> Self {
        self.options = self.options.with_min_ppi(ppi);
        self
    }

    /// Set a marker string that must appear in the document info.
    pub fn with_metadata_marker(mut self, marker: impl Into<String>) -> Self {
        self.options = self.options.with_metadata_marker(marker);
        self
    }

    /// Set the placeholder terms to search for.
    pub fn with_placeholder_terms(mut self, terms: Vec<String>) -> Self {
        self.options = self.options.with_placeholder_terms(terms);
        self
    }

    /// Use a caller-supplied page renderer for contrast sampling.
    pub fn with_renderer(mut self, renderer: Box<dyn PageRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Scan a PDF file.
    pub fn scan_file<P: AsRef<Path>>(self, path: P) -> Result<ScanReport> {
        let document = PdfParser::open(path)?.parse()?;
        Ok(self.scan_document(&document))
    }

    /// Scan a PDF from bytes.
    pub fn scan_bytes(self, data: &[u8]) -> Result<ScanReport> {
        let document = PdfParser::from_bytes(data)?.parse()?;
        Ok(self.scan_document(&document))
    }

    /// Run the check catalog against an already parsed document.
    pub fn scan_document(self, document: &Document) -> ScanReport {
        let profile = self.options.profile;
        let ctx = match self.renderer {
            Some(renderer) => ScanContext::with_renderer(self.options, renderer),
            None => ScanContext::new(self.options),
        };
        let findings = CheckSet::with_defaults().run(document, &ctx);
        ScanReport::new(profile, document.metadata.clone(), findings)
    }
}

impl Default for Preflight {
    fn default() -> Self {
        Self::new()
    }
}
