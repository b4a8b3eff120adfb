//! Document-level types.

use super::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed PDF document ready for analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    pub metadata: Metadata,

    /// Pages in order
    pub pages: Vec<Page>,

    /// Tag-tree facts and structure dump
    pub structure: StructureInfo,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page to the document, keeping the page count in sync.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
        self.metadata.page_count = self.pages.len() as u32;
    }

    /// Get a page by 1-indexed number.
    pub fn get_page(&self, number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.number == number)
    }

    /// Check whether any page carries non-whitespace text.
    pub fn has_text(&self) -> bool {
        self.pages.iter().any(|p| p.has_text())
    }

    /// Concatenated text of every page.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Total number of image placements across all pages.
    pub fn image_count(&self) -> usize {
        self.pages.iter().map(|p| p.images.len()).sum()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Author name
    pub author: Option<String>,

    /// Subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Creating application
    pub creator: Option<String>,

    /// Producing application
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,

    /// PDF version (e.g. "1.7")
    pub pdf_version: String,

    /// Number of pages
    pub page_count: u32,

    /// Size of the source buffer in bytes
    pub file_size: u64,

    /// Whether the document is encrypted
    pub encrypted: bool,

    /// Whether the document carries interactive features (forms, annotations)
    pub interactive: bool,
}

impl Metadata {
    /// Create metadata with the given PDF version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            pdf_version: version.into(),
            ..Default::default()
        }
    }

    /// Check whether the title is set to a non-empty value.
    pub fn has_title(&self) -> bool {
        self.title
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false)
    }

    /// Case-insensitive search across all textual metadata fields.
    pub fn any_field_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [
            &self.title,
            &self.author,
            &self.subject,
            &self.keywords,
            &self.creator,
            &self.producer,
        ]
        .iter()
        .any(|field| {
            field
                .as_deref()
                .map(|v| v.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
    }
}

/// Tag-tree facts resolved from the document catalog.
///
/// These four booleans drive the tagging check in order: text presence is
/// checked on the pages, then `marked`, then `has_struct_root`, then
/// `struct_root_populated`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureInfo {
    /// MarkInfo dictionary declares /Marked true
    pub marked: bool,

    /// Catalog carries a /StructTreeRoot entry
    pub has_struct_root: bool,

    /// The structure tree root has non-empty child content (/K)
    pub struct_root_populated: bool,

    /// Bounded textual dump of the structure tree, searched by heuristics
    pub tree_dump: String,
}

impl StructureInfo {
    /// Check whether the structure dump contains a marker string.
    pub fn contains(&self, marker: &str) -> bool {
        self.tree_dump.contains(marker)
    }
}
