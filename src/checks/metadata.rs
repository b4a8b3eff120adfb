//! Document information checks.

use crate::checks::{Check, ScanContext};
use crate::error::Result;
use crate::model::{snippet, CheckId, Detail, Document, Finding};
use crate::parser::Profile;

/// Verifies the document info dictionary is filled in.
///
/// With a metadata marker configured, the check instead looks for that
/// marker in any info field, which is how production templates are
/// verified to come from the expected source.
pub struct MetadataCheck;

impl Check for MetadataCheck {
    fn id(&self) -> CheckId {
        CheckId::Metadata
    }

    fn description(&self) -> &str {
        "Document info must identify the document"
    }

    fn run(&self, document: &Document, ctx: &ScanContext) -> Result<Finding> {
        let metadata = &document.metadata;

        if let Some(marker) = &ctx.options.metadata_marker {
            let finding = if metadata.any_field_contains(marker) {
                Finding::pass(
                    self.id(),
                    format!("Metadata: Marker '{}' found in document info", marker),
                )
            } else {
                Finding::fail(
                    self.id(),
                    format!("Metadata: Marker '{}' not found in document info", marker),
                )
            };
            return Ok(finding);
        }

        let has_title = metadata.has_title();
        let has_producer = metadata
            .creator
            .as_deref()
            .map_or(false, |s| !s.trim().is_empty())
            || metadata
                .producer
                .as_deref()
                .map_or(false, |s| !s.trim().is_empty());

        if has_title && has_producer {
            return Ok(Finding::pass(
                self.id(),
                "Metadata: Title and producer information present",
            ));
        }

        let mut details = Vec::new();
        if !has_title {
            details.push(Detail::flag("No title set"));
        }
        if !has_producer {
            details.push(Detail::flag("No creator or producer set"));
        }
        Ok(Finding::fail(self.id(), "Metadata: Missing document information").with_details(details))
    }
}

/// Verifies a display title is set.
///
/// Screen readers announce the document title before anything else; a
/// missing title degrades to the filename.
pub struct TitleCheck;

impl Check for TitleCheck {
    fn id(&self) -> CheckId {
        CheckId::Title
    }

    fn description(&self) -> &str {
        "Document must have a title"
    }

    fn applies_to(&self, profile: Profile) -> bool {
        profile == Profile::Digital
    }

    fn run(&self, document: &Document, _ctx: &ScanContext) -> Result<Finding> {
        let finding = match document.metadata.title.as_deref() {
            Some(title) if !title.trim().is_empty() => Finding::pass(
                self.id(),
                format!("Document Title: \"{}\"", snippet(title, 50)),
            ),
            _ => Finding::fail(
                self.id(),
                "Document Title: No title set in document properties",
            ),
        };
        Ok(finding)
    }
}
