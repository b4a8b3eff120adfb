//! Print bleed check.

use crate::checks::{Check, ScanContext};
use crate::error::Result;
use crate::model::{CheckId, Detail, Document, Finding};
use crate::parser::Profile;

/// Verifies the first page reserves bleed beyond the trim box.
///
/// Artwork that stops exactly at the trim line leaves white slivers when
/// the cut drifts. The trim box defines the cut size; where it is missing,
/// the crop box stands in. Measured on the first page, which is where
/// print templates define their geometry.
pub struct BleedCheck;

impl Check for BleedCheck {
    fn id(&self) -> CheckId {
        CheckId::Bleed
    }

    fn description(&self) -> &str {
        "Printed pages need bleed beyond the trim box"
    }

    fn applies_to(&self, profile: Profile) -> bool {
        profile == Profile::Print
    }

    fn run(&self, document: &Document, _ctx: &ScanContext) -> Result<Finding> {
        let page = match document.pages.first() {
            Some(page) => page,
            None => {
                return Ok(Finding::fail(self.id(), "Bleed: Document has no pages"));
            }
        };
        let trim = match page.trim_box.or(page.crop_box) {
            Some(trim) => trim,
            None => {
                return Ok(Finding::fail(
                    self.id(),
                    "Bleed: Not present (no trim or crop box defined)",
                ));
            }
        };

        let media = page.media_box;
        let margins = [
            ("left", trim.left - media.left),
            ("bottom", trim.bottom - media.bottom),
            ("right", media.right - trim.right),
            ("top", media.top - trim.top),
        ];

        let flush: Vec<Detail> = margins
            .iter()
            .filter(|(_, margin)| *margin <= 0.0)
            .map(|(edge, _)| Detail::flag(format!("No bleed on the {} edge", edge)))
            .collect();

        let finding = if flush.len() == margins.len() {
            Finding::fail(self.id(), "Bleed: Not present")
        } else {
            let widest = margins.iter().map(|(_, m)| *m).fold(f32::MIN, f32::max);
            Finding::pass(
                self.id(),
                format!("Bleed: Present ({:.1}pt beyond trim)", widest),
            )
        };
        Ok(finding.with_details(flush))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Page, Rect, Status};
    use crate::parser::ScanOptions;

    fn run_check(doc: &Document) -> Finding {
        let ctx = ScanContext::new(ScanOptions::print());
        BleedCheck.run(doc, &ctx).unwrap()
    }

    #[test]
    fn test_empty_document_fails() {
        let doc = Document::new();
        let finding = run_check(&doc);
        assert_eq!(finding.status, Status::Fail);
        assert!(finding.summary.contains("no pages"));
    }

    #[test]
    fn test_missing_trim_box_fails() {
        let mut doc = Document::new();
        doc.add_page(Page::letter(1));
        let finding = run_check(&doc);
        assert_eq!(finding.status, Status::Fail);
        assert!(finding.summary.contains("no trim or crop box"));
    }

    #[test]
    fn test_bleed_on_all_sides_passes() {
        let mut page = Page::letter(1);
        page.trim_box = Some(Rect::new(9.0, 9.0, 603.0, 783.0));
        let mut doc = Document::new();
        doc.add_page(page);

        let finding = run_check(&doc);
        assert_eq!(finding.status, Status::Pass);
        assert!(finding.summary.contains("9.0pt"));
        assert!(finding.details.is_empty());
    }

    #[test]
    fn test_trim_equal_to_media_fails() {
        let mut page = Page::letter(1);
        page.trim_box = Some(page.media_box);
        let mut doc = Document::new();
        doc.add_page(page);

        let finding = run_check(&doc);
        assert_eq!(finding.status, Status::Fail);
        assert!(finding.summary.contains("Not present"));
        assert_eq!(finding.details.len(), 4);
    }

    #[test]
    fn test_crop_box_fallback() {
        let mut page = Page::letter(1);
        page.crop_box = Some(Rect::new(9.0, 9.0, 603.0, 783.0));
        let mut doc = Document::new();
        doc.add_page(page);

        assert_eq!(run_check(&doc).status, Status::Pass);
    }

    #[test]
    fn test_partial_bleed_passes_but_flags_flush_edges() {
        let mut page = Page::letter(1);
        // Top and bottom have bleed, left and right are flush.
        page.trim_box = Some(Rect::new(0.0, 9.0, 612.0, 783.0));
        let mut doc = Document::new();
        doc.add_page(page);

        let finding = run_check(&doc);
        assert_eq!(finding.status, Status::Pass);
        assert_eq!(finding.details.len(), 2);
        assert!(finding.details.iter().any(|d| d.text.contains("left")));
        assert!(finding.details.iter().any(|d| d.text.contains("right")));
    }
}
