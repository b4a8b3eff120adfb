//! Multi-column reading-order heuristic.

use crate::checks::{Check, ScanContext};
use crate::error::Result;
use crate::model::{CheckId, Detail, DetailItem, Document, Finding};
use crate::parser::{group_blocks, group_lines, Profile};
use std::collections::HashSet;

/// Flags pages that look multi-column but declare no column structure.
///
/// Text blocks are bucketed by their exact left edge; more than one bucket
/// means side-by-side content, which screen readers can only linearize
/// correctly when the structure tree says how. The finding is a warning,
/// not a failure: left-edge bucketing cannot tell a second column from a
/// pull quote.
pub struct ReadingOrderCheck;

impl Check for ReadingOrderCheck {
    fn id(&self) -> CheckId {
        CheckId::ReadingOrder
    }

    fn description(&self) -> &str {
        "Multi-column pages must declare column structure"
    }

    fn applies_to(&self, profile: Profile) -> bool {
        profile == Profile::Digital
    }

    fn run(&self, document: &Document, ctx: &ScanContext) -> Result<Finding> {
        let markers = &ctx.options.markers.column_markers;
        let mut details = Vec::new();

        for page in &document.pages {
            let lines = group_lines(&page.runs);
            let blocks = group_blocks(lines);

            let mut lefts: HashSet<u32> = HashSet::new();
            for block in blocks.iter().filter(|b| !b.is_empty()) {
                lefts.insert(block.left().to_bits());
            }
            if lefts.len() < 2 {
                continue;
            }

            let declared = markers.iter().any(|marker| {
                page.structure.contains(marker) || document.structure.contains(marker)
            });
            if declared {
                continue;
            }

            details.push(
                Detail::flag(format!(
                    "Page {}: {} column positions with no column or section structure",
                    page.number,
                    lefts.len()
                ))
                .with_item(DetailItem {
                    page: page.number,
                    snippet: None,
                    measured: None,
                    required: None,
                    colors: None,
                }),
            );
        }

        let finding = if details.is_empty() {
            Finding::pass(
                self.id(),
                "Reading Order: No reading-order risks detected",
            )
        } else {
            let noun = if details.len() == 1 { "page" } else { "pages" };
            Finding::warn(
                self.id(),
                format!(
                    "Reading Order: Potential reading-order issues on {} {}",
                    details.len(),
                    noun
                ),
            )
        };

        Ok(finding.with_details(details))
    }
}
