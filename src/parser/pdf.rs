//! PDF document adapter built on lopdf.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::detect;
use crate::error::{Error, Result};
use crate::model::{Document, Metadata, Page, Rect, StructureFragment, StructureInfo};
use crate::parser::content::{
    decode_text_simple, ContentInterpreter, ImageResource, PageContent,
};

/// Upper bound on the structure tree dump, in bytes.
const TREE_DUMP_BUDGET: usize = 64 * 1024;

/// Recursion limit when dumping PDF object graphs.
const DUMP_MAX_DEPTH: usize = 8;

/// Reads a PDF and flattens it into the document model.
#[derive(Debug)]
pub struct PdfParser {
    doc: LopdfDocument,
    file_size: u64,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect::detect_version(data)?;

        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        Ok(Self {
            doc,
            file_size: data.len() as u64,
        })
    }

    /// Parse the document into the analysis model.
    ///
    /// Per-page extraction failures are recovered as empty pages so one
    /// broken page never aborts the whole scan.
    pub fn parse(&self) -> Result<Document> {
        let mut document = Document::new();
        document.metadata = self.extract_metadata()?;
        document.structure = self.extract_structure();

        let page_ids = self.doc.get_pages();
        for (page_num, page_id) in page_ids.iter() {
            let page = match self.parse_page(*page_num, *page_id) {
                Ok(page) => page,
                Err(e) => {
                    log::warn!("Failed to parse page {}: {}", page_num, e);
                    Page::letter(*page_num)
                }
            };
            document.add_page(page);
        }

        Ok(document)
    }

    /// Extract document metadata.
    fn extract_metadata(&self) -> Result<Metadata> {
        let mut metadata = Metadata::with_version(self.doc.version.to_string());

        if let Ok(info) = self.doc.trailer.get(b"Info") {
            if let Ok(info_ref) = info.as_reference() {
                if let Ok(info_dict) = self.doc.get_dictionary(info_ref) {
                    metadata.title = get_string_from_dict(info_dict, b"Title");
                    metadata.author = get_string_from_dict(info_dict, b"Author");
                    metadata.subject = get_string_from_dict(info_dict, b"Subject");
                    metadata.keywords = get_string_from_dict(info_dict, b"Keywords");
                    metadata.creator = get_string_from_dict(info_dict, b"Creator");
                    metadata.producer = get_string_from_dict(info_dict, b"Producer");

                    if let Some(date_str) = get_string_from_dict(info_dict, b"CreationDate") {
                        metadata.created = parse_pdf_date(&date_str);
                    }
                    if let Some(date_str) = get_string_from_dict(info_dict, b"ModDate") {
                        metadata.modified = parse_pdf_date(&date_str);
                    }
                }
            }
        }

        metadata.encrypted = self.doc.is_encrypted();
        metadata.interactive = self.detect_interactive();
        metadata.file_size = self.file_size;

        Ok(metadata)
    }

    /// Extract tagging information from the catalog.
    fn extract_structure(&self) -> StructureInfo {
        let mut info = StructureInfo::default();

        let catalog = match self.doc.catalog() {
            Ok(catalog) => catalog,
            Err(_) => return info,
        };

        if let Some(mark_info) = self.resolve_dict(catalog.get(b"MarkInfo").ok()) {
            if let Ok(Object::Boolean(marked)) = mark_info.get(b"Marked") {
                info.marked = *marked;
            }
        }

        if let Ok(root) = catalog.get(b"StructTreeRoot") {
            info.has_struct_root = true;
            if let Some(root_dict) = self.resolve_dict(Some(root)) {
                info.struct_root_populated = root_dict
                    .get(b"K")
                    .map(|k| self.kids_populated(k))
                    .unwrap_or(false);
            }
            let mut visited = HashSet::new();
            let mut dump = String::new();
            self.dump_object(root, 0, &mut visited, &mut dump);
            info.tree_dump = dump;
        }

        info
    }

    /// Whether a structure root's `/K` entry holds any children.
    fn kids_populated(&self, kids: &Object) -> bool {
        let resolved = match kids {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(obj) => obj,
                Err(_) => return false,
            },
            other => other,
        };
        match resolved {
            Object::Array(items) => !items.is_empty(),
            Object::Dictionary(_) => true,
            Object::Integer(_) => true,
            _ => false,
        }
    }

    /// Parse a single page.
    fn parse_page(&self, page_num: u32, page_id: ObjectId) -> Result<Page> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::Parse(e.to_string()))?;

        let media_box = self.find_box(page_dict, b"MediaBox");
        let crop_box = self.find_box(page_dict, b"CropBox");
        // TrimBox does not inherit through the page tree.
        let trim_box = get_box(page_dict, b"TrimBox");

        let (width, height) = match &media_box {
            Some(rect) => (rect.width(), rect.height()),
            None => (612.0, 792.0),
        };
        let mut page = Page::new(page_num, width, height);
        if let Some(rect) = media_box {
            // Keep the declared origin; media boxes need not start at (0, 0).
            page.media_box = rect;
        }
        page.trim_box = trim_box;
        page.crop_box = crop_box;

        let images = self.page_image_resources(page_dict);
        let content = match ContentInterpreter::new(&self.doc).interpret_page(page_id, &images)
        {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Failed to read content of page {}: {}", page_num, e);
                PageContent::default()
            }
        };

        let PageContent {
            runs,
            fills,
            images: placed_images,
            content_tags,
        } = content;

        for run in runs {
            // The last rectangle painted under the baseline midpoint is
            // the run's declared background.
            let cx = run.bbox.center_x();
            let cy = run.baseline();
            let run = match fills.iter().rev().find(|f| f.rect.contains(cx, cy)) {
                Some(fill) => run.with_background(fill.color),
                None => run,
            };
            page.add_run(run);
        }
        for image in placed_images {
            page.add_image(image);
        }
        page.fills = fills;
        page.structure = StructureFragment {
            content_tags: content_tags.join(" "),
            dict_dump: self.page_dict_dump(page_id),
        };

        Ok(page)
    }

    /// Image XObject intrinsics for a page, keyed by resource name.
    fn page_image_resources(&self, page_dict: &lopdf::Dictionary) -> HashMap<String, ImageResource> {
        let mut images = HashMap::new();

        let res_dict = match self.resolve_dict(page_dict.get(b"Resources").ok()) {
            Some(dict) => dict,
            None => return images,
        };
        let xobjects = match self.resolve_dict(res_dict.get(b"XObject").ok()) {
            Some(dict) => dict,
            None => return images,
        };

        for (name, obj) in xobjects.iter() {
            if let Ok(obj_ref) = obj.as_reference() {
                if let Ok(Object::Stream(stream)) = self.doc.get_object(obj_ref) {
                    let dict = &stream.dict;
                    let is_image = dict
                        .get(b"Subtype")
                        .ok()
                        .and_then(|s| s.as_name_str().ok())
                        == Some("Image");
                    if !is_image {
                        continue;
                    }

                    let width = dict
                        .get(b"Width")
                        .ok()
                        .and_then(|w| w.as_i64().ok())
                        .unwrap_or(0) as u32;
                    let height = dict
                        .get(b"Height")
                        .ok()
                        .and_then(|h| h.as_i64().ok())
                        .unwrap_or(0) as u32;
                    let alt_text = get_string_from_dict(dict, b"Alt");

                    images.insert(
                        String::from_utf8_lossy(name).to_string(),
                        ImageResource {
                            pixel_width: width,
                            pixel_height: height,
                            alt_text,
                        },
                    );
                }
            }
        }

        images
    }

    /// Check for form fields or non-link annotations.
    fn detect_interactive(&self) -> bool {
        if let Ok(catalog) = self.doc.catalog() {
            if catalog.get(b"AcroForm").is_ok() {
                return true;
            }
        }

        for (_page_num, page_id) in self.doc.get_pages() {
            if let Ok(page_dict) = self.doc.get_dictionary(page_id) {
                if let Ok(annots) = page_dict.get(b"Annots") {
                    if self.has_interactive_annotation(annots) {
                        return true;
                    }
                }
            }
        }

        false
    }

    fn has_interactive_annotation(&self, annots: &Object) -> bool {
        let resolved = match annots {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(obj) => obj,
                Err(_) => return false,
            },
            other => other,
        };

        if let Object::Array(items) = resolved {
            for item in items {
                let dict = match item {
                    Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
                    Object::Dictionary(d) => Some(d),
                    _ => None,
                };
                if let Some(dict) = dict {
                    let subtype = dict
                        .get(b"Subtype")
                        .ok()
                        .and_then(|s| s.as_name_str().ok());
                    // Links are navigation, not interactivity.
                    if !matches!(subtype, Some("Link") | None) {
                        return true;
                    }
                }
            }
        }

        false
    }

    /// Resolve an optional object to a dictionary, following one reference.
    fn resolve_dict<'a>(&'a self, obj: Option<&'a Object>) -> Option<&'a lopdf::Dictionary> {
        match obj? {
            Object::Dictionary(d) => Some(d),
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            _ => None,
        }
    }

    /// A page box, walking the page tree for inherited values.
    fn find_box(&self, page_dict: &lopdf::Dictionary, key: &[u8]) -> Option<Rect> {
        if let Some(rect) = get_box(page_dict, key) {
            return Some(rect);
        }

        let mut parent = page_dict
            .get(b"Parent")
            .ok()
            .and_then(|p| p.as_reference().ok());
        for _ in 0..DUMP_MAX_DEPTH {
            match parent {
                Some(id) => {
                    if let Ok(dict) = self.doc.get_dictionary(id) {
                        if let Some(rect) = get_box(dict, key) {
                            return Some(rect);
                        }
                        parent = dict.get(b"Parent").ok().and_then(|p| p.as_reference().ok());
                    } else {
                        return None;
                    }
                }
                None => return None,
            }
        }
        None
    }

    /// Textual dump of a page dictionary for the marker heuristics.
    fn page_dict_dump(&self, page_id: ObjectId) -> String {
        let mut out = String::new();
        if let Ok(dict) = self.doc.get_dictionary(page_id) {
            let mut visited = HashSet::new();
            for (key, value) in dict.iter() {
                if matches!(key.as_slice(), b"Contents" | b"Parent" | b"Resources") {
                    continue;
                }
                out.push('/');
                out.push_str(&String::from_utf8_lossy(key));
                out.push(' ');
                self.dump_object(value, 1, &mut visited, &mut out);
            }
        }
        out
    }

    /// Append a bounded textual serialization of a PDF object graph.
    ///
    /// Names and strings are kept, numbers dropped; parent back-links are
    /// skipped and a visited set guards against reference cycles.
    fn dump_object(
        &self,
        obj: &Object,
        depth: usize,
        visited: &mut HashSet<ObjectId>,
        out: &mut String,
    ) {
        if depth > DUMP_MAX_DEPTH || out.len() > TREE_DUMP_BUDGET {
            return;
        }
        match obj {
            Object::Name(name) => {
                out.push('/');
                out.push_str(&String::from_utf8_lossy(name));
                out.push(' ');
            }
            Object::String(bytes, _) => {
                out.push('"');
                out.push_str(&decode_text_simple(bytes));
                out.push_str("\" ");
            }
            Object::Array(items) => {
                for item in items {
                    self.dump_object(item, depth + 1, visited, out);
                }
            }
            Object::Dictionary(dict) => {
                for (key, value) in dict.iter() {
                    if out.len() > TREE_DUMP_BUDGET {
                        return;
                    }
                    if matches!(key.as_slice(), b"P" | b"Parent" | b"Pg") {
                        continue;
                    }
                    out.push('/');
                    out.push_str(&String::from_utf8_lossy(key));
                    out.push(' ');
                    self.dump_object(value, depth + 1, visited, out);
                }
            }
            Object::Reference(r) => {
                if visited.insert(*r) {
                    if let Ok(target) = self.doc.get_object(*r) {
                        self.dump_object(target, depth + 1, visited, out);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Read a rectangle entry from a dictionary, normalizing corner order.
fn get_box(dict: &lopdf::Dictionary, key: &[u8]) -> Option<Rect> {
    let array = dict.get(key).ok()?.as_array().ok()?;
    if array.len() < 4 {
        return None;
    }
    let mut coords = [0.0f32; 4];
    for (i, value) in array.iter().take(4).enumerate() {
        coords[i] = value.as_float().ok()?;
    }
    Some(Rect::new(
        coords[0].min(coords[2]),
        coords[1].min(coords[3]),
        coords[0].max(coords[2]),
        coords[1].max(coords[3]),
    ))
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => {
            // UTF-16BE with BOM is the PDF convention for Unicode
            if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let utf16: Vec<u16> = bytes[2..]
                    .chunks(2)
                    .filter_map(|c| {
                        if c.len() == 2 {
                            Some(u16::from_be_bytes([c[0], c[1]]))
                        } else {
                            None
                        }
                    })
                    .collect();
                String::from_utf16(&utf16).ok()
            } else {
                String::from_utf8(bytes.clone())
                    .ok()
                    .or_else(|| Some(bytes.iter().map(|&b| b as char).collect()))
            }
        }
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    })
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let s = s.strip_prefix("D:")?;

    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| chrono::DateTime::from_naive_utc_and_offset(dt, chrono::Utc))
}
