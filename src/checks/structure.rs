//! Tagged-PDF structure check.

use crate::checks::{Check, ScanContext};
use crate::error::Result;
use crate::model::{CheckId, Document, Finding};
use crate::parser::Profile;

/// Verifies the document carries a usable structure tree.
///
/// The conditions are ordered from coarse to fine so the failure message
/// names the first thing actually missing: text content, the tagged flag,
/// the structure tree root, then the root's children. A document can claim
/// to be tagged while its tree is an empty shell.
pub struct StructureCheck;

impl Check for StructureCheck {
    fn id(&self) -> CheckId {
        CheckId::Structure
    }

    fn description(&self) -> &str {
        "Document must be tagged with a populated structure tree"
    }

    fn applies_to(&self, profile: Profile) -> bool {
        profile == Profile::Digital
    }

    fn run(&self, document: &Document, ctx: &ScanContext) -> Result<Finding> {
        let structure = &document.structure;

        if !document.has_text() {
            return Ok(Finding::fail(
                self.id(),
                "PDF Structure: No extractable text (document appears to be scanned images)",
            ));
        }
        if !structure.marked {
            return Ok(Finding::fail(
                self.id(),
                "PDF Structure: Document is not marked as tagged",
            ));
        }
        if !structure.has_struct_root {
            return Ok(Finding::fail(
                self.id(),
                "PDF Structure: No structure tree root present",
            ));
        }
        if !structure.struct_root_populated {
            return Ok(Finding::fail(
                self.id(),
                "PDF Structure: Structure tree root has no children",
            ));
        }

        if let Some(producer) = &document.metadata.producer {
            if ctx
                .options
                .flagged_producers
                .iter()
                .any(|flagged| producer.contains(flagged.as_str()))
            {
                return Ok(Finding::fail(
                    self.id(),
                    format!(
                        "PDF Structure: Tagged output from {} does not reflect reading structure",
                        producer
                    ),
                ));
            }
        }

        Ok(Finding::pass(
            self.id(),
            "PDF Structure: Document is properly tagged",
        ))
    }
}
