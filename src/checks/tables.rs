//! Table header accessibility check.

use crate::checks::{Check, ScanContext};
use crate::error::Result;
use crate::model::{CheckId, Detail, DetailItem, Document, Finding, TextRun};
use crate::parser::{group_lines, Profile};

/// Verifies detected tables carry header-cell markup.
///
/// Header evidence is textual: the marker vocabulary is searched across the
/// page's structure serializations and the document tree. A table with no
/// header marker is only reported when an independent cue says a table is
/// actually there, either a table role marker on the page or consecutive
/// lines of positionally aligned cells.
pub struct TablesCheck;

/// Minimum horizontal gap between positional cells, in points.
const CELL_GAP: f32 = 15.0;

/// How far cell left edges may drift between rows and still align.
const ALIGN_TOLERANCE: f32 = 3.0;

/// True when at least two consecutive lines form aligned multi-cell rows.
fn has_aligned_rows(runs: &[TextRun]) -> bool {
    let lines = group_lines(runs);
    let mut previous: Option<Vec<f32>> = None;

    for line in &lines {
        let cells = line.cell_lefts(CELL_GAP);
        if cells.len() < 2 {
            previous = None;
            continue;
        }
        if let Some(prev) = &previous {
            if prev.len() == cells.len()
                && prev
                    .iter()
                    .zip(&cells)
                    .all(|(a, b)| (a - b).abs() <= ALIGN_TOLERANCE)
            {
                return true;
            }
        }
        previous = Some(cells);
    }
    false
}

impl Check for TablesCheck {
    fn id(&self) -> CheckId {
        CheckId::Tables
    }

    fn description(&self) -> &str {
        "Tables must have header cell markup"
    }

    fn applies_to(&self, profile: Profile) -> bool {
        profile == Profile::Digital
    }

    fn run(&self, document: &Document, ctx: &ScanContext) -> Result<Finding> {
        let vocab = &ctx.options.markers;
        let doc_headers = vocab
            .header_markers
            .iter()
            .any(|m| document.structure.contains(m));

        let mut details = Vec::new();
        let mut tables = 0usize;
        let mut missing = 0usize;

        for page in &document.pages {
            let page_headers = vocab
                .header_markers
                .iter()
                .any(|m| page.structure.contains(m));
            let marker_cue = vocab
                .table_markers
                .iter()
                .any(|m| page.structure.contains(m));
            let table_present = page_headers || marker_cue || has_aligned_rows(&page.runs);
            if !table_present {
                continue;
            }

            tables += 1;
            let item = DetailItem {
                page: page.number,
                snippet: None,
                measured: None,
                required: None,
                colors: None,
            };
            if page_headers || doc_headers {
                details.push(
                    Detail::note(format!("Page {}: table with header markup", page.number))
                        .with_item(item),
                );
            } else {
                missing += 1;
                details.push(
                    Detail::flag(format!(
                        "Page {}: table without header markup",
                        page.number
                    ))
                    .with_item(item),
                );
            }
        }

        let finding = if tables == 0 {
            Finding::pass(self.id(), "Accessible Tables: No tables detected")
        } else if missing > 0 {
            let noun = if missing == 1 { "page" } else { "pages" };
            Finding::fail(
                self.id(),
                format!(
                    "Accessible Tables: {} {} with tables missing header markup",
                    missing, noun
                ),
            )
        } else {
            Finding::pass(
                self.id(),
                "Accessible Tables: All tables have header markup",
            )
        };

        Ok(finding.with_details(details))
    }
}
