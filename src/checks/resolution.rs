//! Effective image resolution check.

use crate::checks::{Check, ScanContext};
use crate::error::Result;
use crate::model::{CheckId, Detail, DetailItem, Document, Finding, ImageInstance};

/// Flags images whose effective resolution falls below the minimum PPI.
///
/// Effective resolution is the intrinsic pixel width divided by the placed
/// width in inches; an image stretched to twice its natural size halves
/// its PPI.
pub struct ResolutionCheck;

impl ResolutionCheck {
    /// Effective pixels per inch of a placed image.
    ///
    /// A degenerate placement (zero or negative width) yields 0, which is
    /// always a failing measurement rather than a skipped one.
    fn effective_ppi(image: &ImageInstance) -> u32 {
        let width_pt = image.bbox.width();
        if width_pt <= 0.0 {
            return 0;
        }
        let width_in = width_pt / 72.0;
        (image.pixel_width as f64 / width_in as f64).round() as u32
    }
}

impl Check for ResolutionCheck {
    fn id(&self) -> CheckId {
        CheckId::Resolution
    }

    fn description(&self) -> &str {
        "Images must meet the minimum effective resolution"
    }

    fn run(&self, document: &Document, ctx: &ScanContext) -> Result<Finding> {
        let min_ppi = ctx.options.min_ppi;
        let mut details = Vec::new();
        let mut total = 0usize;
        let mut failing = 0usize;

        for page in &document.pages {
            for image in &page.images {
                total += 1;
                let ppi = Self::effective_ppi(image);
                let degenerate = image.bbox.width() <= 0.0;
                let flagged = degenerate || ppi < min_ppi;

                let text = if degenerate {
                    format!(
                        "Page {}: image '{}' measurement failed (zero-width placement)",
                        page.number, image.resource_id
                    )
                } else if flagged {
                    format!(
                        "Page {}: image '{}' at {} PPI (minimum {})",
                        page.number, image.resource_id, ppi, min_ppi
                    )
                } else {
                    format!(
                        "Page {}: image '{}' at {} PPI",
                        page.number, image.resource_id, ppi
                    )
                };

                if flagged {
                    failing += 1;
                }
                let detail = if flagged {
                    Detail::flag(text)
                } else {
                    Detail::note(text)
                };
                details.push(detail.with_item(DetailItem {
                    page: page.number,
                    snippet: Some(image.resource_id.clone()),
                    measured: Some(ppi as f64),
                    required: Some(min_ppi as f64),
                    colors: None,
                }));
            }
        }

        let finding = if total == 0 {
            Finding::pass(self.id(), "Resolution: No images found")
        } else if failing > 0 {
            let noun = if failing == 1 { "image" } else { "images" };
            Finding::fail(
                self.id(),
                format!("Resolution: {} {} below {} PPI", failing, noun, min_ppi),
            )
        } else {
            Finding::pass(
                self.id(),
                format!("Resolution: All {} images at or above {} PPI", total, min_ppi),
            )
        };

        Ok(finding.with_details(details))
    }
}
