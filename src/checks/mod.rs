//! Check catalog and runner.
//!
//! Each check inspects the parsed document independently and produces one
//! [`Finding`]. The runner executes registered checks sequentially; a check
//! that returns an error becomes a failing finding for that check alone,
//! never aborting the rest of the scan.
//!
//! # Example
//!
//! ```no_run
//! use preflight::checks::{CheckSet, ScanContext};
//! use preflight::parser::{PdfParser, ScanOptions};
//!
//! fn main() -> preflight::Result<()> {
//!     let document = PdfParser::open("booklet.pdf")?.parse()?;
//!     let ctx = ScanContext::new(ScanOptions::default());
//!     let findings = CheckSet::with_defaults().run(&document, &ctx);
//!     for finding in &findings {
//!         println!("{}", finding.marked_summary());
//!     }
//!     Ok(())
//! }
//! ```

mod alt_text;
mod bleed;
mod contrast;
mod headings;
mod metadata;
mod placeholder;
mod reading_order;
mod resolution;
mod structure;
mod tables;
mod typography;

pub use alt_text::AltTextCheck;
pub use bleed::BleedCheck;
pub use contrast::ContrastCheck;
pub use headings::HeadingsCheck;
pub use metadata::{MetadataCheck, TitleCheck};
pub use placeholder::PlaceholderCheck;
pub use reading_order::ReadingOrderCheck;
pub use resolution::ResolutionCheck;
pub use structure::StructureCheck;
pub use tables::TablesCheck;
pub use typography::InchMarksCheck;

use std::rc::Rc;

use crate::error::Result;
use crate::model::{CheckId, Detail, Document, Finding, Page};
use crate::parser::{Profile, ScanOptions};
use crate::raster::{FlatRasterizer, PageRenderer, Pixmap, RenderCache};

/// Shared state for one scan: options, the page renderer, and the pixmap
/// cache that keeps each page rendered at most once.
pub struct ScanContext {
    /// Options the checks read their thresholds and vocabularies from
    pub options: ScanOptions,

    renderer: Box<dyn PageRenderer>,
    cache: RenderCache,
}

impl ScanContext {
    /// Create a context with the built-in flat rasterizer.
    pub fn new(options: ScanOptions) -> Self {
        Self::with_renderer(options, Box::new(FlatRasterizer))
    }

    /// Create a context with a caller-supplied renderer.
    pub fn with_renderer(options: ScanOptions, renderer: Box<dyn PageRenderer>) -> Self {
        Self {
            options,
            renderer,
            cache: RenderCache::new(),
        }
    }

    /// Rendered pixmap for a page at the sampling zoom, cached per scan.
    pub fn page_pixmap(&self, page: &Page) -> Result<Rc<Pixmap>> {
        self.cache
            .page_pixmap(self.renderer.as_ref(), page, self.options.sample_zoom)
    }
}

/// Trait for document checks.
///
/// Implement this trait to add a custom check to a [`CheckSet`].
pub trait Check {
    /// Which catalog entry this check reports as.
    fn id(&self) -> CheckId;

    /// One-line description of what the check verifies.
    fn description(&self) -> &str;

    /// Whether the check applies under the given profile.
    fn applies_to(&self, profile: Profile) -> bool {
        let _ = profile;
        true
    }

    /// Run the check against a parsed document.
    fn run(&self, document: &Document, ctx: &ScanContext) -> Result<Finding>;
}

/// Ordered set of checks to run against a document.
pub struct CheckSet {
    checks: Vec<Box<dyn Check>>,
}

impl CheckSet {
    /// Create an empty check set.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Create a set with the full built-in catalog, in display order.
    pub fn with_defaults() -> Self {
        let mut set = Self::new();
        set.register(Box::new(MetadataCheck));
        set.register(Box::new(BleedCheck));
        set.register(Box::new(InchMarksCheck));
        set.register(Box::new(ResolutionCheck));
        set.register(Box::new(PlaceholderCheck));
        set.register(Box::new(StructureCheck));
        set.register(Box::new(TitleCheck));
        set.register(Box::new(AltTextCheck));
        set.register(Box::new(HeadingsCheck));
        set.register(Box::new(TablesCheck));
        set.register(Box::new(ReadingOrderCheck));
        set.register(Box::new(ContrastCheck));
        set
    }

    /// Register a check. Checks run in registration order.
    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every applicable check sequentially.
    ///
    /// A check error is demoted to a failing finding carrying the error
    /// text, so the remaining checks still run.
    pub fn run(&self, document: &Document, ctx: &ScanContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        for check in &self.checks {
            if !check.applies_to(ctx.options.profile) {
                continue;
            }
            let finding = match check.run(document, ctx) {
                Ok(finding) => finding,
                Err(e) => {
                    log::warn!("Check '{}' failed: {}", check.id().name(), e);
                    Finding::fail(check.id(), format!("{}: Check failed", check.id().name()))
                        .with_details(vec![Detail::flag(e.to_string())])
                }
            };
            findings.push(finding);
        }

        findings
    }
}

impl Default for CheckSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}
