//! Scan options and configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which production context the document is checked against.
///
/// The profile selects the applicable subset of the check catalog:
/// bleed only matters for print, the accessibility checks only for
/// digital distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Digital distribution (accessibility checks enabled)
    #[default]
    Digital,
    /// Print production (bleed enabled, accessibility checks skipped)
    Print,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Profile::Digital => "digital",
            Profile::Print => "print",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "digital" | "web" | "screen" => Ok(Profile::Digital),
            "print" => Ok(Profile::Print),
            other => Err(format!("unknown profile: {}", other)),
        }
    }
}

/// Token vocabularies the structural heuristics search for.
///
/// PDF producers expose structure inconsistently, so these are matched
/// against several textual serializations of the same page. The lists are
/// configuration, not ground truth; extend them for producers with
/// unusual role names.
#[derive(Debug, Clone)]
pub struct MarkerVocabulary {
    /// Tokens indicating an intentional multi-column or sectioned layout
    pub column_markers: Vec<String>,

    /// Tokens indicating a semantic table
    pub table_markers: Vec<String>,

    /// Tokens indicating table header cells
    pub header_markers: Vec<String>,
}

impl Default for MarkerVocabulary {
    fn default() -> Self {
        Self {
            column_markers: vec![
                "/Column".to_string(),
                "/Art".to_string(),
                "/Sect".to_string(),
            ],
            table_markers: vec!["/Table".to_string()],
            header_markers: vec![
                "/TH".to_string(),
                "role=\"TH\"".to_string(),
                "type='TH'".to_string(),
                "<th".to_string(),
                "TableHeader".to_string(),
                "HeaderCell".to_string(),
                "Table.Head".to_string(),
                "Table.Header".to_string(),
                "TableHeaderCell".to_string(),
            ],
        }
    }
}

/// Options controlling a document scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Production profile (selects the applicable checks)
    pub profile: Profile,

    /// Minimum acceptable image resolution in pixels per inch
    pub min_ppi: u32,

    /// Device pixels per point when sampling page colors
    pub sample_zoom: f32,

    /// Side length of the color sampling window, in device pixels (odd)
    pub sample_window: u32,

    /// Channel-mean threshold below which a sampled pixel counts as ink
    pub ink_threshold: f32,

    /// Font size above which a run is a heading candidate, in points
    pub heading_min_size: f32,

    /// Structural marker vocabularies
    pub markers: MarkerVocabulary,

    /// Placeholder terms searched for as whole words, case-insensitive
    pub placeholder_terms: Vec<String>,

    /// Marker string expected somewhere in the document metadata
    pub metadata_marker: Option<String>,

    /// Producer names whose tagging claims are not trusted
    pub flagged_producers: Vec<String>,
}

impl ScanOptions {
    /// Create scan options with defaults (digital profile).
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for the digital profile.
    pub fn digital() -> Self {
        Self::default()
    }

    /// Options for the print profile.
    pub fn print() -> Self {
        Self {
            profile: Profile::Print,
            ..Self::default()
        }
    }

    /// Set the production profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Set the minimum acceptable image resolution in PPI.
    pub fn with_min_ppi(mut self, ppi: u32) -> Self {
        self.min_ppi = ppi;
        self
    }

    /// Set the sampling zoom factor.
    pub fn with_sample_zoom(mut self, zoom: f32) -> Self {
        self.sample_zoom = zoom;
        self
    }

    /// Set the sampling window side length.
    ///
    /// The window must be odd so it centers on a pixel; even values are
    /// rounded up, zero becomes 1.
    pub fn with_sample_window(mut self, size: u32) -> Self {
        let size = size.max(1);
        self.sample_window = if size % 2 == 0 { size + 1 } else { size };
        self
    }

    /// Set the ink classification threshold (clamped to 0..=1).
    pub fn with_ink_threshold(mut self, threshold: f32) -> Self {
        self.ink_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the heading candidate size threshold in points.
    pub fn with_heading_min_size(mut self, size: f32) -> Self {
        self.heading_min_size = size;
        self
    }

    /// Replace the structural marker vocabularies.
    pub fn with_markers(mut self, markers: MarkerVocabulary) -> Self {
        self.markers = markers;
        self
    }

    /// Replace the column/section marker list.
    pub fn with_column_markers(mut self, markers: Vec<String>) -> Self {
        self.markers.column_markers = markers;
        self
    }

    /// Replace the table-header marker list.
    pub fn with_header_markers(mut self, markers: Vec<String>) -> Self {
        self.markers.header_markers = markers;
        self
    }

    /// Replace the placeholder term list.
    pub fn with_placeholder_terms(mut self, terms: Vec<String>) -> Self {
        self.placeholder_terms = terms;
        self
    }

    /// Require a marker string in the document metadata.
    pub fn with_metadata_marker(mut self, marker: impl Into<String>) -> Self {
        self.metadata_marker = Some(marker.into());
        self
    }

    /// Replace the flagged producer list.
    pub fn with_flagged_producers(mut self, producers: Vec<String>) -> Self {
        self.flagged_producers = producers;
        self
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            profile: Profile::Digital,
            min_ppi: 150,
            sample_zoom: 4.0,
            sample_window: 5,
            ink_threshold: 0.2,
            heading_min_size: 12.0,
            markers: MarkerVocabulary::default(),
            placeholder_terms: vec![
                "lorem ipsum".to_string(),
                "placeholder".to_string(),
                "your text here".to_string(),
            ],
            metadata_marker: None,
            flagged_producers: vec!["Canva".to_string()],
        }
    }
}
