//! Typographic character checks.

use crate::checks::{Check, ScanContext};
use crate::error::Result;
use crate::model::{CheckId, Detail, Document, Finding};
use std::collections::BTreeSet;

/// Characters that typically arrive via copy-paste or autocorrect where a
/// straight quote was meant, paired with their display names.
const SUSPECT_MARKS: [(char, &str); 6] = [
    ('\u{2032}', "prime"),
    ('\u{2033}', "double prime"),
    ('\u{00B4}', "acute"),
    ('\u{02DD}', "double acute"),
    ('\u{02B9}', "modifier prime"),
    ('\u{02EE}', "modifier double apostrophe"),
];

/// Flags prime and accent characters masquerading as inch or quote marks.
///
/// These render fine on screen and then ship to print as the wrong glyph,
/// or confuse text-to-speech. The finding lists each offending character
/// with every page it appears on.
pub struct InchMarksCheck;

impl Check for InchMarksCheck {
    fn id(&self) -> CheckId {
        CheckId::InchMarks
    }

    fn description(&self) -> &str {
        "Text must not contain stray prime or accent characters"
    }

    fn run(&self, document: &Document, _ctx: &ScanContext) -> Result<Finding> {
        let mut pages_by_mark: [BTreeSet<u32>; SUSPECT_MARKS.len()] = Default::default();

        for page in &document.pages {
            let text = page.text();
            if text.is_empty() {
                continue;
            }
            for (index, (mark, _)) in SUSPECT_MARKS.iter().enumerate() {
                if text.contains(*mark) {
                    pages_by_mark[index].insert(page.number);
                }
            }
        }

        let mut details = Vec::new();
        for (index, (mark, name)) in SUSPECT_MARKS.iter().enumerate() {
            let pages = &pages_by_mark[index];
            if pages.is_empty() {
                continue;
            }
            let noun = if pages.len() == 1 { "page" } else { "pages" };
            let list = pages
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            details.push(Detail::flag(format!(
                "'{}' ({}) on {} {}",
                mark, name, noun, list
            )));
        }

        let finding = if details.is_empty() {
            Finding::pass(self.id(), "Inch Marks: None found")
        } else {
            Finding::fail(self.id(), "Inch Marks: Found unusual characters")
        };
        Ok(finding.with_details(details))
    }
}
