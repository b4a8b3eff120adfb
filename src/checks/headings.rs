//! Heading hierarchy check.
//!
//! Untagged documents have no H1/H2 elements to inspect, so heading levels
//! are inferred from font sizes: every run larger than the body-size
//! threshold is a heading candidate, and the distinct candidate sizes in
//! descending order become the level ranks. Jumping down more than one
//! rank between consecutive headings breaks assistive-technology outline
//! navigation the same way skipping from H1 to H3 does in HTML.

use crate::checks::{Check, ScanContext};
use crate::error::Result;
use crate::model::{snippet, CheckId, Detail, DetailItem, Document, Finding};
use crate::parser::Profile;

/// Verifies inferred heading levels descend without skips.
pub struct HeadingsCheck;

const SNIPPET_CHARS: usize = 50;

struct Candidate<'a> {
    page: u32,
    text: &'a str,
    size: f32,
}

/// Distinct candidate sizes, largest first. Position in this list is the
/// heading rank (0 = H1).
fn size_ranks(candidates: &[Candidate<'_>]) -> Vec<f32> {
    let mut sizes: Vec<f32> = candidates.iter().map(|c| c.size).collect();
    sizes.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    sizes.dedup();
    sizes
}

impl Check for HeadingsCheck {
    fn id(&self) -> CheckId {
        CheckId::Headings
    }

    fn description(&self) -> &str {
        "Inferred heading levels must not skip"
    }

    fn applies_to(&self, profile: Profile) -> bool {
        profile == Profile::Digital
    }

    fn run(&self, document: &Document, ctx: &ScanContext) -> Result<Finding> {
        let min_size = ctx.options.heading_min_size;
        let mut candidates = Vec::new();
        for page in &document.pages {
            for run in &page.runs {
                if run.font_size > min_size {
                    candidates.push(Candidate {
                        page: page.number,
                        text: &run.text,
                        size: run.font_size,
                    });
                }
            }
        }

        // Whitespace-only candidates still contribute their size to the
        // rank table; they just cannot be headings themselves.
        let ranks = size_ranks(&candidates);

        let mut details = Vec::new();
        let mut headings = 0usize;
        let mut skips = 0usize;
        let mut previous_rank: Option<usize> = None;

        for candidate in candidates.iter().filter(|c| !c.text.trim().is_empty()) {
            headings += 1;
            let rank = ranks
                .iter()
                .position(|s| *s == candidate.size)
                .unwrap_or(0);
            let excerpt = snippet(candidate.text, SNIPPET_CHARS);

            details.push(
                Detail::note(format!(
                    "Page {}: H{} \"{}\"",
                    candidate.page,
                    rank + 1,
                    excerpt
                ))
                .with_item(DetailItem {
                    page: candidate.page,
                    snippet: Some(excerpt.clone()),
                    measured: None,
                    required: None,
                    colors: None,
                }),
            );

            if let Some(previous) = previous_rank {
                if rank > previous + 1 {
                    skips += 1;
                    details.push(
                        Detail::flag(format!(
                            "Page {}: heading level jumps from H{} to H{}: \"{}\"",
                            candidate.page,
                            previous + 1,
                            rank + 1,
                            excerpt
                        ))
                        .with_item(DetailItem {
                            page: candidate.page,
                            snippet: Some(excerpt),
                            measured: None,
                            required: None,
                            colors: None,
                        }),
                    );
                }
            }
            previous_rank = Some(rank);
        }

        let finding = if headings == 0 {
            Finding::warn(
                self.id(),
                "Heading Structure: No clear headings detected",
            )
        } else if skips > 0 {
            let noun = if skips == 1 { "skip" } else { "skips" };
            Finding::fail(
                self.id(),
                format!("Heading Structure: {} heading level {} detected", skips, noun),
            )
        } else {
            Finding::pass(
                self.id(),
                format!(
                    "Heading Structure: {} headings with consistent levels",
                    headings
                ),
            )
        };

        Ok(finding.with_details(details))
    }
}
