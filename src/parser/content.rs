//! Content-stream interpretation.
//!
//! Walks a page's content stream and recovers the features the checks need:
//! positioned text runs with font and fill color, painted rectangles,
//! image placements, and marked-content tags. This is a flat interpreter,
//! not a renderer; curves and clipping are ignored.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::model::{FillRect, ImageInstance, Rect, TextRun};

/// Intrinsics of one image XObject, keyed by resource name.
#[derive(Debug, Clone)]
pub struct ImageResource {
    /// Pixel width from the XObject dictionary
    pub pixel_width: u32,

    /// Pixel height from the XObject dictionary
    pub pixel_height: u32,

    /// Alternate description (`/Alt`), when present
    pub alt_text: Option<String>,
}

/// Everything recovered from one page's content streams.
#[derive(Debug, Default)]
pub struct PageContent {
    pub runs: Vec<TextRun>,
    pub fills: Vec<FillRect>,
    pub images: Vec<ImageInstance>,
    pub content_tags: Vec<String>,
}

/// A 2D affine transform in PDF operand order `[a b c d e f]`.
#[derive(Debug, Clone, Copy)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl Matrix {
    /// Compose: apply `self`, then `after`.
    fn then(&self, after: &Matrix) -> Matrix {
        Matrix {
            a: self.a * after.a + self.b * after.c,
            b: self.a * after.b + self.b * after.d,
            c: self.c * after.a + self.d * after.c,
            d: self.c * after.b + self.d * after.d,
            e: self.e * after.a + self.f * after.c + after.e,
            f: self.e * after.b + self.f * after.d + after.f,
        }
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }

    /// Bounding rectangle of `rect` after transformation.
    fn apply_rect(&self, rect: &Rect) -> Rect {
        let corners = [
            self.apply(rect.left, rect.bottom),
            self.apply(rect.right, rect.bottom),
            self.apply(rect.left, rect.top),
            self.apply(rect.right, rect.top),
        ];
        let mut left = f32::MAX;
        let mut bottom = f32::MAX;
        let mut right = f32::MIN;
        let mut top = f32::MIN;
        for (x, y) in corners {
            left = left.min(x);
            bottom = bottom.min(y);
            right = right.max(x);
            top = top.max(y);
        }
        Rect::new(left, bottom, right, top)
    }
}

/// Text matrix with the current line origin tracked separately.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
    line_y: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            line_y: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
        self.line_y = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
        if ty != 0.0 {
            self.line_y = self.f;
        }
    }

    fn next_line(&mut self, leading: f32) {
        self.f -= leading * self.d;
        self.line_y = self.f;
    }

    fn get_position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn get_scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

/// Paint state saved and restored by `q`/`Q`.
#[derive(Debug, Clone)]
struct GraphicsState {
    ctm: Matrix,
    fill_color: Rgb,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: Matrix::default(),
            fill_color: Rgb::BLACK,
        }
    }
}

/// Interprets page content streams against a loaded document.
pub struct ContentInterpreter<'a> {
    doc: &'a LopdfDocument,
}

impl<'a> ContentInterpreter<'a> {
    pub fn new(doc: &'a LopdfDocument) -> Self {
        Self { doc }
    }

    /// Interpret one page's content streams.
    ///
    /// `images` maps XObject resource names to their intrinsics so `Do`
    /// placements can be resolved without re-reading the resource tree.
    pub fn interpret_page(
        &self,
        page_id: ObjectId,
        images: &HashMap<String, ImageResource>,
    ) -> Result<PageContent> {
        let fonts = self.doc.get_page_fonts(page_id).unwrap_or_default();

        // Resolve each font resource to its BaseFont name once.
        let mut font_names: HashMap<Vec<u8>, String> = HashMap::new();
        for (name, font) in &fonts {
            let base = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
            font_names.insert(name.clone(), base);
        }

        let data = self.page_content_data(page_id)?;
        self.run_operations(&data, &fonts, &font_names, images)
    }

    /// Concatenated, decompressed content stream bytes for a page.
    fn page_content_data(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::Parse(e.to_string()))?;

        let contents = match page_dict.get(b"Contents") {
            Ok(obj) => obj,
            // A page with no content stream is empty, not broken.
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Stream(s)) => s
                    .decompressed_content()
                    .map_err(|e| Error::Parse(e.to_string())),
                _ => Err(Error::Parse("invalid content stream".to_string())),
            },
            Object::Stream(s) => s
                .decompressed_content()
                .map_err(|e| Error::Parse(e.to_string())),
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::Parse("invalid content stream".to_string())),
        }
    }

    fn run_operations(
        &self,
        data: &[u8],
        fonts: &BTreeMap<Vec<u8>, &lopdf::Dictionary>,
        font_names: &HashMap<Vec<u8>, String>,
        images: &HashMap<String, ImageResource>,
    ) -> Result<PageContent> {
        let content =
            lopdf::content::Content::decode(data).map_err(|e| Error::Parse(e.to_string()))?;

        let mut out = PageContent::default();
        let mut state = GraphicsState::default();
        let mut state_stack: Vec<GraphicsState> = Vec::new();
        let mut text_matrix = TextMatrix::default();
        let mut in_text_block = false;
        let mut current_font_name: Vec<u8> = Vec::new();
        let mut current_font = String::new();
        let mut current_font_size: f32 = 12.0;
        let mut leading: f32 = 12.0;
        let mut pending_rects: Vec<Rect> = Vec::new();

        // Decode a string through the current font's encoding, with a
        // byte-level fallback when the font gives none.
        let decode_str = |font: &[u8], bytes: &[u8]| -> String {
            if let Some(dict) = fonts.get(font) {
                if let Ok(enc) = dict.get_font_encoding(self.doc) {
                    if let Ok(decoded) = LopdfDocument::decode_text(&enc, bytes) {
                        return decoded;
                    }
                }
            }
            decode_text_simple(bytes)
        };

        for op in content.operations {
            match op.operator.as_str() {
                // --- Graphics state ---
                "q" => {
                    state_stack.push(state.clone());
                }
                "Q" => {
                    if let Some(prev) = state_stack.pop() {
                        state = prev;
                    }
                }
                "cm" => {
                    if op.operands.len() >= 6 {
                        let m = Matrix {
                            a: get_number(&op.operands[0]).unwrap_or(1.0),
                            b: get_number(&op.operands[1]).unwrap_or(0.0),
                            c: get_number(&op.operands[2]).unwrap_or(0.0),
                            d: get_number(&op.operands[3]).unwrap_or(1.0),
                            e: get_number(&op.operands[4]).unwrap_or(0.0),
                            f: get_number(&op.operands[5]).unwrap_or(0.0),
                        };
                        state.ctm = m.then(&state.ctm);
                    }
                }

                // --- Fill color (stroke color is not tracked) ---
                "rg" => {
                    if op.operands.len() >= 3 {
                        state.fill_color = Rgb::new(
                            get_number(&op.operands[0]).unwrap_or(0.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                        );
                    }
                }
                "g" => {
                    if let Some(v) = op.operands.first().and_then(get_number) {
                        state.fill_color = Rgb::gray(v);
                    }
                }
                "k" => {
                    if op.operands.len() >= 4 {
                        state.fill_color = cmyk_to_rgb(
                            get_number(&op.operands[0]).unwrap_or(0.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(0.0),
                        );
                    }
                }
                "sc" | "scn" => {
                    // Interpret by operand count; pattern names are skipped.
                    let nums: Vec<f32> =
                        op.operands.iter().filter_map(get_number).collect();
                    match nums.len() {
                        1 => state.fill_color = Rgb::gray(nums[0]),
                        3 => state.fill_color = Rgb::new(nums[0], nums[1], nums[2]),
                        4 => {
                            state.fill_color = cmyk_to_rgb(nums[0], nums[1], nums[2], nums[3])
                        }
                        _ => {}
                    }
                }

                // --- Path construction and painting ---
                "re" => {
                    if op.operands.len() >= 4 {
                        let x = get_number(&op.operands[0]).unwrap_or(0.0);
                        let y = get_number(&op.operands[1]).unwrap_or(0.0);
                        let w = get_number(&op.operands[2]).unwrap_or(0.0);
                        let h = get_number(&op.operands[3]).unwrap_or(0.0);
                        let rect = Rect::new(x, y, x + w, y + h);
                        pending_rects.push(state.ctm.apply_rect(&rect));
                    }
                }
                "f" | "F" | "f*" | "b" | "B" | "b*" | "B*" => {
                    for rect in pending_rects.drain(..) {
                        out.fills.push(FillRect {
                            rect,
                            color: state.fill_color,
                        });
                    }
                }
                "n" | "S" | "s" => {
                    pending_rects.clear();
                }

                // --- XObject placement ---
                "Do" => {
                    if let Some(Object::Name(name)) = op.operands.first() {
                        let key = String::from_utf8_lossy(name).to_string();
                        if let Some(res) = images.get(&key) {
                            // The image occupies the unit square through the CTM.
                            let bbox =
                                state.ctm.apply_rect(&Rect::new(0.0, 0.0, 1.0, 1.0));
                            let mut instance = ImageInstance::new(
                                key,
                                bbox,
                                res.pixel_width,
                                res.pixel_height,
                            );
                            if let Some(alt) = &res.alt_text {
                                instance = instance.with_alt_text(alt.clone());
                            }
                            out.images.push(instance);
                        }
                    }
                }

                // --- Marked content ---
                "BMC" | "BDC" | "MP" | "DP" => {
                    if let Some(Object::Name(tag)) = op.operands.first() {
                        out.content_tags
                            .push(format!("/{}", String::from_utf8_lossy(tag)));
                    }
                }

                // --- Text state and positioning ---
                "BT" => {
                    in_text_block = true;
                    text_matrix = TextMatrix::default();
                }
                "ET" => {
                    in_text_block = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(font_name) = &op.operands[0] {
                            current_font_name = font_name.clone();
                            current_font = font_names
                                .get(font_name.as_slice())
                                .cloned()
                                .unwrap_or_else(|| {
                                    String::from_utf8_lossy(font_name).to_string()
                                });
                        }
                        current_font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(v) = op.operands.first().and_then(get_number) {
                        leading = v;
                    }
                }
                "Td" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        text_matrix.translate(tx, ty);
                    }
                }
                "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        leading = -ty;
                        text_matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        text_matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => {
                    text_matrix.next_line(leading);
                }

                // --- Text showing ---
                "Tj" | "TJ" => {
                    if in_text_block {
                        let text = if op.operator == "TJ" {
                            // Array of strings and kerning adjustments, in
                            // 1/1000 text space units. Large negative
                            // adjustments stand in for word spaces.
                            if let Some(Object::Array(arr)) = op.operands.first() {
                                let mut combined = String::new();
                                let space_threshold = 200.0;

                                for item in arr {
                                    match item {
                                        Object::String(bytes, _) => {
                                            combined.push_str(&decode_str(
                                                &current_font_name,
                                                bytes,
                                            ));
                                        }
                                        Object::Integer(n) => {
                                            let adjustment = -(*n as f32);
                                            if adjustment > space_threshold {
                                                push_word_space(&mut combined);
                                            }
                                        }
                                        Object::Real(n) => {
                                            let adjustment = -n;
                                            if adjustment > space_threshold {
                                                push_word_space(&mut combined);
                                            }
                                        }
                                        _ => {}
                                    }
                                }
                                combined
                            } else {
                                String::new()
                            }
                        } else if let Some(Object::String(bytes, _)) = op.operands.first() {
                            decode_str(&current_font_name, bytes)
                        } else {
                            String::new()
                        };

                        if !text.is_empty() {
                            out.runs.push(self.make_run(
                                text,
                                &text_matrix,
                                &state,
                                current_font_size,
                                &current_font,
                            ));
                        }
                    }
                }
                "'" | "\"" => {
                    text_matrix.next_line(leading);
                    if in_text_block {
                        let text_idx = if op.operator == "\"" { 2 } else { 0 };
                        if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                            let text = decode_str(&current_font_name, bytes);
                            if !text.is_empty() {
                                out.runs.push(self.make_run(
                                    text,
                                    &text_matrix,
                                    &state,
                                    current_font_size,
                                    &current_font,
                                ));
                            }
                        }
                    }
                }

                _ => {}
            }
        }

        Ok(out)
    }

    fn make_run(
        &self,
        text: String,
        text_matrix: &TextMatrix,
        state: &GraphicsState,
        font_size: f32,
        font: &str,
    ) -> TextRun {
        let (tx, ty) = text_matrix.get_position();
        let (x, y) = state.ctm.apply(tx, ty);
        let effective_size = font_size * text_matrix.get_scale() * state.ctm.scale();
        TextRun::new(text, x, y, effective_size)
            .with_font(font)
            .with_color(state.fill_color)
    }
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn cmyk_to_rgb(c: f32, m: f32, y: f32, k: f32) -> Rgb {
    Rgb::new(
        (1.0 - c) * (1.0 - k),
        (1.0 - m) * (1.0 - k),
        (1.0 - y) * (1.0 - k),
    )
}

/// Append a word space unless one is already there or the text is in a
/// script that does not use them.
fn push_word_space(text: &mut String) {
    if text.is_empty() || text.ends_with(' ') || text.ends_with('\u{00A0}') {
        return;
    }
    if let Some(c) = text.chars().last() {
        if !is_spaceless_script_char(c) {
            text.push(' ');
        }
    }
}

/// Check if a character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't separate words; Korean does.
pub(crate) fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions
    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2A6DF).contains(&code)
        || (0x2A700..=0x2B73F).contains(&code)
        || (0x2B740..=0x2B81F).contains(&code)
        || (0x2B820..=0x2CEAF).contains(&code)
        || (0x2CEB0..=0x2EBEF).contains(&code)
        // Hiragana and Katakana
        || (0x3040..=0x309F).contains(&code)
        || (0x30A0..=0x30FF).contains(&code)
        // CJK Symbols and Punctuation
        || (0x3000..=0x303F).contains(&code)
}

/// Simple text decoding fallback when no encoding is available.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
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
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    // UTF-8
    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Stream, StringFormat};

    fn single_page_doc(operations: Vec<Operation>) -> (LopdfDocument, ObjectId) {
        let mut doc = LopdfDocument::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let content = Content { operations };
        let stream_id =
            doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => stream_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => font_id },
            },
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        (doc, page_id)
    }

    #[test]
    fn test_matrix_compose_applies_in_order() {
        let scale = Matrix {
            a: 2.0,
            b: 0.0,
            c: 0.0,
            d: 2.0,
            e: 0.0,
            f: 0.0,
        };
        let translate = Matrix {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 5.0,
            f: 7.0,
        };
        let composed = scale.then(&translate);
        assert_eq!(composed.apply(1.0, 1.0), (7.0, 9.0));
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        // UTF-16BE with BOM
        let utf16 = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_simple(&utf16), "Hi");
        // Latin-1 fallback for invalid UTF-8
        assert_eq!(decode_text_simple(&[0xE9]), "é");
    }

    #[test]
    fn test_cmyk_to_rgb() {
        let black = cmyk_to_rgb(0.0, 0.0, 0.0, 1.0);
        assert!(black.r < 0.001 && black.g < 0.001 && black.b < 0.001);
        let red = cmyk_to_rgb(0.0, 1.0, 1.0, 0.0);
        assert!(red.r > 0.999 && red.g < 0.001 && red.b < 0.001);
    }

    #[test]
    fn test_interpret_text_fill_image_and_tag() {
        let ops = vec![
            Operation::new("BDC", vec![
                Object::Name(b"P".to_vec()),
                Object::Dictionary(dictionary! {}),
            ]),
            // Red rectangle behind the text
            Operation::new("rg", vec![1.into(), 0.into(), 0.into()]),
            Operation::new("re", vec![10.into(), 20.into(), 30.into(), 40.into()]),
            Operation::new("f", vec![]),
            // A line of text
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), 24.into()]),
            Operation::new("Td", vec![72.into(), 700.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(b"Hello".to_vec(), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
            // An image scaled to 200x200 at (50, 100)
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    200.into(),
                    0.into(),
                    0.into(),
                    200.into(),
                    50.into(),
                    100.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im1".to_vec())]),
            Operation::new("Q", vec![]),
            Operation::new("EMC", vec![]),
        ];
        let (doc, page_id) = single_page_doc(ops);

        let mut images = HashMap::new();
        images.insert(
            "Im1".to_string(),
            ImageResource {
                pixel_width: 96,
                pixel_height: 96,
                alt_text: Some("A chart".to_string()),
            },
        );

        let content = ContentInterpreter::new(&doc)
            .interpret_page(page_id, &images)
            .unwrap();

        assert_eq!(content.runs.len(), 1);
        let run = &content.runs[0];
        assert_eq!(run.text, "Hello");
        assert_eq!(run.bbox.left, 72.0);
        assert_eq!(run.baseline(), 700.0);
        assert_eq!(run.font_size, 24.0);
        assert_eq!(run.color, Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(run.font_name.as_deref(), Some("Helvetica"));

        assert_eq!(content.fills.len(), 1);
        let fill = &content.fills[0];
        assert_eq!(fill.rect.left, 10.0);
        assert_eq!(fill.rect.top, 60.0);
        assert_eq!(fill.color, Rgb::new(1.0, 0.0, 0.0));

        assert_eq!(content.images.len(), 1);
        let image = &content.images[0];
        assert_eq!(image.bbox.left, 50.0);
        assert_eq!(image.bbox.right, 250.0);
        assert_eq!(image.bbox.top, 300.0);
        assert_eq!(image.alt_text.as_deref(), Some("A chart"));

        assert_eq!(content.content_tags, vec!["/P".to_string()]);
    }

    #[test]
    fn test_unpainted_rect_is_discarded() {
        let ops = vec![
            Operation::new("re", vec![0.into(), 0.into(), 100.into(), 100.into()]),
            Operation::new("n", vec![]),
        ];
        let (doc, page_id) = single_page_doc(ops);
        let content = ContentInterpreter::new(&doc)
            .interpret_page(page_id, &HashMap::new())
            .unwrap();
        assert!(content.fills.is_empty());
    }

    #[test]
    fn test_tj_kerning_becomes_word_space() {
        let ops = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), 12.into()]),
            Operation::new(
                "TJ",
                vec![Object::Array(vec![
                    Object::String(b"Hello".to_vec(), StringFormat::Literal),
                    Object::Integer(-250),
                    Object::String(b"world".to_vec(), StringFormat::Literal),
                ])],
            ),
            Operation::new("ET", vec![]),
        ];
        let (doc, page_id) = single_page_doc(ops);
        let content = ContentInterpreter::new(&doc)
            .interpret_page(page_id, &HashMap::new())
            .unwrap();
        assert_eq!(content.runs.len(), 1);
        assert_eq!(content.runs[0].text, "Hello world");
    }
}
