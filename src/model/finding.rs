//! Check findings and their projection policies.

use crate::color::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome status of a check or a detail item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pass,
    Fail,
    Warn,
}

impl Status {
    /// Display marker prefixed to projection lines.
    pub fn marker(&self) -> &'static str {
        match self {
            Status::Pass => "✅",
            Status::Fail => "❌",
            Status::Warn => "⚠️",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Pass => "pass",
            Status::Fail => "fail",
            Status::Warn => "warn",
        };
        write!(f, "{}", s)
    }
}

/// Check category, used for display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Production quality checks (resolution, bleed, typography)
    General,
    /// Accessibility checks (tagging, contrast, structure)
    Accessibility,
}

/// Identifier for each built-in check, in fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    Metadata,
    Bleed,
    InchMarks,
    Resolution,
    Placeholder,
    Structure,
    Title,
    AltText,
    Headings,
    Tables,
    ReadingOrder,
    Contrast,
}

impl CheckId {
    /// All checks in display order (general before accessibility).
    pub const ALL: [CheckId; 12] = [
        CheckId::Metadata,
        CheckId::Bleed,
        CheckId::InchMarks,
        CheckId::Resolution,
        CheckId::Placeholder,
        CheckId::Structure,
        CheckId::Title,
        CheckId::AltText,
        CheckId::Headings,
        CheckId::Tables,
        CheckId::ReadingOrder,
        CheckId::Contrast,
    ];

    /// Display name, used as the summary prefix and the tip lookup key.
    pub fn name(&self) -> &'static str {
        match self {
            CheckId::Metadata => "Metadata",
            CheckId::Bleed => "Bleed",
            CheckId::InchMarks => "Inch Marks",
            CheckId::Resolution => "Resolution",
            CheckId::Placeholder => "Placeholder Text",
            CheckId::Structure => "PDF Structure",
            CheckId::Title => "Document Title",
            CheckId::AltText => "Alt Text",
            CheckId::Headings => "Heading Structure",
            CheckId::Tables => "Accessible Tables",
            CheckId::ReadingOrder => "Reading Order",
            CheckId::Contrast => "Color Contrast",
        }
    }

    /// Category the check belongs to.
    pub fn category(&self) -> Category {
        match self {
            CheckId::Metadata
            | CheckId::Bleed
            | CheckId::InchMarks
            | CheckId::Resolution
            | CheckId::Placeholder => Category::General,
            _ => Category::Accessibility,
        }
    }

    /// Whether the report projection shows every detail item, passing ones
    /// included. Other checks only surface flagged details.
    pub fn detail_complete(&self) -> bool {
        matches!(
            self,
            CheckId::Resolution | CheckId::Contrast | CheckId::Headings | CheckId::Tables
        )
    }

    /// Whether flagged details also appear in the dashboard projection.
    /// Verbose checks keep their details report-only.
    pub fn dashboard_details(&self) -> bool {
        matches!(
            self,
            CheckId::Resolution
                | CheckId::InchMarks
                | CheckId::Placeholder
                | CheckId::AltText
                | CheckId::ReadingOrder
        )
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Foreground/background color pair attached to a contrast detail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorPair {
    pub foreground: Rgb,
    pub background: Rgb,
}

impl fmt::Display for ColorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.foreground.to_hex(), self.background.to_hex())
    }
}

/// Structured payload of a detail line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailItem {
    /// Page number (1-based)
    pub page: u32,

    /// Snippet of the offending text, truncated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,

    /// Measured value (PPI, contrast ratio)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured: Option<f64>,

    /// Threshold the measurement is compared against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<f64>,

    /// Foreground/background colors for contrast items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorPair>,
}

/// One detail line under a finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detail {
    /// Rendered line, self-contained (carries its own page reference)
    pub text: String,

    /// Whether the line represents a problem (projection filters on this)
    pub flagged: bool,

    /// Structured payload, when the check measures something
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<DetailItem>,
}

impl Detail {
    /// An informational line (kept out of the dashboard).
    pub fn note(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            flagged: false,
            item: None,
        }
    }

    /// A line describing a problem.
    pub fn flag(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            flagged: true,
            item: None,
        }
    }

    /// Attach a structured payload.
    pub fn with_item(mut self, item: DetailItem) -> Self {
        self.item = Some(item);
        self
    }
}

/// The outcome of one check: a summary plus ordered detail lines.
///
/// A finding is projection-agnostic; [`ScanReport`](crate::report::ScanReport)
/// derives the dashboard and report line sets from the same batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Which check produced this finding
    pub check: CheckId,

    /// Overall status
    pub status: Status,

    /// Summary line without a status marker (projections prefix it)
    pub summary: String,

    /// Ordered detail lines
    pub details: Vec<Detail>,
}

impl Finding {
    /// Create a passing finding.
    pub fn pass(check: CheckId, summary: impl Into<String>) -> Self {
        Self::with_status(check, Status::Pass, summary)
    }

    /// Create a failing finding.
    pub fn fail(check: CheckId, summary: impl Into<String>) -> Self {
        Self::with_status(check, Status::Fail, summary)
    }

    /// Create a warning finding.
    pub fn warn(check: CheckId, summary: impl Into<String>) -> Self {
        Self::with_status(check, Status::Warn, summary)
    }

    /// Create a finding with an explicit status.
    pub fn with_status(check: CheckId, status: Status, summary: impl Into<String>) -> Self {
        Self {
            check,
            status,
            summary: summary.into(),
            details: Vec::new(),
        }
    }

    /// Attach detail lines.
    pub fn with_details(mut self, details: Vec<Detail>) -> Self {
        self.details = details;
        self
    }

    /// Append one detail line.
    pub fn push_detail(&mut self, detail: Detail) {
        self.details.push(detail);
    }

    /// Iterate over flagged details only.
    pub fn flagged_details(&self) -> impl Iterator<Item = &Detail> {
        self.details.iter().filter(|d| d.flagged)
    }

    /// Summary line with the status marker, as shown in projections.
    pub fn marked_summary(&self) -> String {
        format!("{} {}", self.status.marker(), self.summary)
    }
}

/// Truncate text to at most `max_chars` characters, on a char boundary.
pub fn snippet(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
