//! Image alternate text check.

use crate::checks::{Check, ScanContext};
use crate::error::Result;
use crate::model::{CheckId, Detail, DetailItem, Document, Finding};
use crate::parser::Profile;

/// Verifies every placed image carries alternate text.
///
/// Alt text comes from the image XObject's `/Alt` entry; an entry that is
/// present but blank counts as missing.
pub struct AltTextCheck;

impl Check for AltTextCheck {
    fn id(&self) -> CheckId {
        CheckId::AltText
    }

    fn description(&self) -> &str {
        "Images must have alternate text"
    }

    fn applies_to(&self, profile: Profile) -> bool {
        profile == Profile::Digital
    }

    fn run(&self, document: &Document, _ctx: &ScanContext) -> Result<Finding> {
        let mut details = Vec::new();
        let mut total = 0usize;
        let mut missing = 0usize;

        for page in &document.pages {
            for image in &page.images {
                total += 1;
                if image.has_alt_text() {
                    continue;
                }
                missing += 1;
                details.push(
                    Detail::flag(format!(
                        "Page {}: image '{}' has no alternate text",
                        page.number, image.resource_id
                    ))
                    .with_item(DetailItem {
                        page: page.number,
                        snippet: Some(image.resource_id.clone()),
                        measured: None,
                        required: None,
                        colors: None,
                    }),
                );
            }
        }

        let finding = if total == 0 {
            Finding::pass(self.id(), "Alt Text: No images to describe")
        } else if missing > 0 {
            Finding::fail(
                self.id(),
                format!(
                    "Alt Text: {} of {} images missing alternate text",
                    missing, total
                ),
            )
        } else {
            Finding::pass(
                self.id(),
                format!("Alt Text: All {} images have alternate text", total),
            )
        };
        Ok(finding.with_details(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageInstance, Page, Rect, Status};
    use crate::parser::ScanOptions;

    fn image(id: &str, alt: Option<&str>) -> ImageInstance {
        let img = ImageInstance::new(id, Rect::new(72.0, 400.0, 272.0, 600.0), 800, 800);
        match alt {
            Some(alt) => img.with_alt_text(alt),
            None => img,
        }
    }

    fn run_check(doc: &Document) -> Finding {
        let ctx = ScanContext::new(ScanOptions::default());
        AltTextCheck.run(doc, &ctx).unwrap()
    }

    #[test]
    fn test_no_images_passes() {
        let mut doc = Document::new();
        doc.add_page(Page::letter(1));
        let finding = run_check(&doc);
        assert_eq!(finding.status, Status::Pass);
        assert!(finding.summary.contains("No images"));
    }

    #[test]
    fn test_all_described_passes() {
        let mut page = Page::letter(1);
        page.add_image(image("Im1", Some("Company logo")));
        page.add_image(image("Im2", Some("Org chart for 2026")));
        let mut doc = Document::new();
        doc.add_page(page);

        let finding = run_check(&doc);
        assert_eq!(finding.status, Status::Pass);
        assert!(finding.summary.contains("All 2 images"));
    }

    #[test]
    fn test_missing_alt_text_fails_per_image() {
        let mut page1 = Page::letter(1);
        page1.add_image(image("Im1", Some("Described")));
        page1.add_image(image("Im2", None));
        let mut page2 = Page::letter(2);
        page2.add_image(image("Im1", None));
        let mut doc = Document::new();
        doc.add_page(page1);
        doc.add_page(page2);

        let finding = run_check(&doc);
        assert_eq!(finding.status, Status::Fail);
        assert!(finding.summary.contains("2 of 3"));
        assert_eq!(finding.details.len(), 2);
        assert!(finding.details[0].text.contains("Page 1"));
        assert!(finding.details[1].text.contains("Page 2"));
    }

    #[test]
    fn test_blank_alt_text_counts_as_missing() {
        let mut page = Page::letter(1);
        page.add_image(image("Im1", Some("   ")));
        let mut doc = Document::new();
        doc.add_page(page);

        assert_eq!(run_check(&doc).status, Status::Fail);
    }
}
