//! Document model types.
//!
//! The parser flattens a PDF into these types; checks only ever see this
//! model, never raw PDF objects.

mod document;
mod finding;
mod page;

pub use document::{Document, Metadata, StructureInfo};
pub use finding::{
    snippet, Category, CheckId, ColorPair, Detail, DetailItem, Finding, Status,
};
pub use page::{FillRect, ImageInstance, Page, Rect, StructureFragment, TextRun};
