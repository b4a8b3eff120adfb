//! PDF parsing module.

pub mod content;
pub mod layout;
mod options;
mod pdf;

pub use content::{ContentInterpreter, ImageResource, PageContent};
pub use layout::{group_blocks, group_lines, Block, Line};
pub use options::{MarkerVocabulary, Profile, ScanOptions};
pub use pdf::PdfParser;
