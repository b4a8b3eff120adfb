//! Page-level types.
//!
//! All coordinates are PDF points (1 point = 1/72 inch) with the origin at
//! the bottom-left of the page and y increasing upward. For text runs the
//! bbox bottom edge is the baseline.

use crate::color::Rgb;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Width in points. May be zero or negative for degenerate placements.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height in points.
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Horizontal midpoint.
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// Check whether a point lies inside the rectangle (edges inclusive).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.bottom && y <= self.top
    }

    /// Check whether this rectangle fully contains another.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.bottom >= self.bottom
            && other.top <= self.top
    }
}

/// A run of text with uniform style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Bounding box; `bbox.bottom` is the baseline
    pub bbox: Rect,

    /// Font size in points
    pub font_size: f32,

    /// Resolved base font name (e.g. "Helvetica-Bold"), when known
    pub font_name: Option<String>,

    /// Whether the font appears to be bold
    pub bold: bool,

    /// Whether the font appears to be italic
    pub italic: bool,

    /// Fill color the text is painted with
    pub color: Rgb,

    /// Declared background: the last filled rectangle under the baseline
    pub background: Option<Rgb>,
}

impl TextRun {
    /// Create a run at a baseline position. The bbox width is estimated
    /// from the character count and the top from the font ascender.
    pub fn new(text: impl Into<String>, x: f32, baseline: f32, font_size: f32) -> Self {
        let text = text.into();
        let width = text.chars().count() as f32 * font_size * 0.5;
        Self {
            bbox: Rect::new(x, baseline, x + width, baseline + font_size * 0.8),
            text,
            font_size,
            font_name: None,
            bold: false,
            italic: false,
            color: Rgb::BLACK,
            background: None,
        }
    }

    /// Set the font name, deriving bold/italic from its spelling.
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let lower = name.to_lowercase();
        self.bold =
            lower.contains("bold") || lower.contains("black") || lower.contains("heavy");
        self.italic = lower.contains("italic") || lower.contains("oblique");
        self.font_name = Some(name);
        self
    }

    /// Set the fill color.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Set the declared background color.
    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = Some(background);
        self
    }

    /// Mark the run as bold.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Baseline y coordinate.
    pub fn baseline(&self) -> f32 {
        self.bbox.bottom
    }

    /// Check if the run holds only whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// One placement of an image XObject on a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInstance {
    /// XObject resource name (e.g. "Im1")
    pub resource_id: String,

    /// Placed rectangle on the page, in points
    pub bbox: Rect,

    /// Intrinsic pixel width from the XObject dictionary (0 if unreadable)
    pub pixel_width: u32,

    /// Intrinsic pixel height from the XObject dictionary (0 if unreadable)
    pub pixel_height: u32,

    /// Alternative text from the XObject dictionary, when present
    pub alt_text: Option<String>,
}

impl ImageInstance {
    /// Create an image placement.
    pub fn new(resource_id: impl Into<String>, bbox: Rect, pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            resource_id: resource_id.into(),
            bbox,
            pixel_width,
            pixel_height,
            alt_text: None,
        }
    }

    /// Set the alternative text.
    pub fn with_alt_text(mut self, alt: impl Into<String>) -> Self {
        self.alt_text = Some(alt.into());
        self
    }

    /// Check whether usable alternative text is present.
    pub fn has_alt_text(&self) -> bool {
        self.alt_text
            .as_deref()
            .map(|a| !a.trim().is_empty())
            .unwrap_or(false)
    }
}

/// A rectangle painted with a solid fill color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillRect {
    pub rect: Rect,
    pub color: Rgb,
}

/// Textual serializations of a page's structural information.
///
/// Tagging conventions vary wildly between producers, so structural
/// heuristics search these dumps (plus the document-level structure tree
/// dump) for marker strings rather than relying on a single encoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureFragment {
    /// Marked-content tags from the content stream, in order (e.g. "/P /TH")
    pub content_tags: String,

    /// Raw serialization of the page dictionary
    pub dict_dump: String,
}

impl StructureFragment {
    /// Check whether any serialization contains the marker.
    pub fn contains(&self, marker: &str) -> bool {
        self.content_tags.contains(marker) || self.dict_dump.contains(marker)
    }
}

/// A single page in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Media box (full physical page)
    pub media_box: Rect,

    /// Trim box (finished page size), when declared
    pub trim_box: Option<Rect>,

    /// Crop box, when declared
    pub crop_box: Option<Rect>,

    /// Text runs in content-stream order
    pub runs: Vec<TextRun>,

    /// Image placements in content-stream order
    pub images: Vec<ImageInstance>,

    /// Filled rectangles in paint order
    pub fills: Vec<FillRect>,

    /// Structural serializations for heuristic checks
    pub structure: StructureFragment,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            media_box: Rect::new(0.0, 0.0, width, height),
            trim_box: None,
            crop_box: None,
            runs: Vec::new(),
            images: Vec::new(),
            fills: Vec::new(),
            structure: StructureFragment::default(),
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Add a text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Add an image placement.
    pub fn add_image(&mut self, image: ImageInstance) {
        self.images.push(image);
    }

    /// Add a filled rectangle.
    pub fn add_fill(&mut self, fill: FillRect) {
        self.fills.push(fill);
    }

    /// Check whether the page carries any non-whitespace text.
    pub fn has_text(&self) -> bool {
        self.runs.iter().any(|r| !r.is_blank())
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::letter(1)
    }
}
