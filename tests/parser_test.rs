//! Parser integration tests over documents assembled with lopdf.

use lopdf::{dictionary, Document as LopdfDocument, Object, Stream, StringFormat};
use preflight::{Document, PdfParser};

fn save(mut doc: LopdfDocument) -> Vec<u8> {
    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// One letter-sized page with the given content stream and Helvetica at F1.
///
/// The catalog and trailer are fully wired; callers may keep mutating the
/// document (Info entries, extra page keys) before saving.
fn single_page_doc(content: &str) -> LopdfDocument {
    let mut doc = LopdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let stream_id = doc.add_object(Stream::new(dictionary! {}, content.as_bytes().to_vec()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => stream_id,
        "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
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
    doc
}

fn parse(bytes: &[u8]) -> Document {
    PdfParser::from_bytes(bytes).unwrap().parse().unwrap()
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

#[test]
fn test_metadata_extraction() {
    let mut doc = single_page_doc("BT /F1 12 Tf 72 700 Td (Body) Tj ET");
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Annual Report"),
        "Author" => Object::string_literal("Jane Doe"),
        "Producer" => Object::string_literal("TestWriter 1.0"),
        "CreationDate" => Object::string_literal("D:20240115103045"),
        "ModDate" => Object::string_literal("D:20240301120000"),
    });
    doc.trailer.set("Info", info_id);
    let bytes = save(doc);

    let document = parse(&bytes);
    let metadata = &document.metadata;
    assert_eq!(metadata.title.as_deref(), Some("Annual Report"));
    assert_eq!(metadata.author.as_deref(), Some("Jane Doe"));
    assert_eq!(metadata.producer.as_deref(), Some("TestWriter 1.0"));
    assert_eq!(metadata.pdf_version, "1.5");
    assert_eq!(metadata.page_count, 1);
    assert_eq!(metadata.file_size, bytes.len() as u64);
    assert!(!metadata.encrypted);

    let created = metadata.created.unwrap().to_rfc3339();
    assert!(created.starts_with("2024-01-15T10:30:45"));
    let modified = metadata.modified.unwrap().to_rfc3339();
    assert!(modified.starts_with("2024-03-01T12:00:00"));
}

#[test]
fn test_utf16_title_decoded() {
    let mut doc = single_page_doc("BT /F1 12 Tf 72 700 Td (Body) Tj ET");
    let mut title_bytes = vec![0xFE, 0xFF];
    for unit in "Café Menu".encode_utf16() {
        title_bytes.extend_from_slice(&unit.to_be_bytes());
    }
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(title_bytes, StringFormat::Literal),
    });
    doc.trailer.set("Info", info_id);

    let document = parse(&save(doc));
    assert_eq!(document.metadata.title.as_deref(), Some("Café Menu"));
}

#[test]
fn test_media_and_trim_boxes() {
    let mut doc = single_page_doc("BT /F1 12 Tf 72 700 Td (Body) Tj ET");
    // Find the page dictionary and give it a trim box inset by 9 pt.
    let page_id = doc.get_pages().values().next().copied().unwrap();
    if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
        page.set(
            "TrimBox",
            vec![9.into(), 9.into(), 603.into(), 783.into()],
        );
    }

    let document = parse(&save(doc));
    let page = &document.pages[0];
    assert!(approx(page.width, 612.0));
    assert!(approx(page.height, 792.0));

    let trim = page.trim_box.unwrap();
    assert!(approx(trim.left, 9.0));
    assert!(approx(trim.right, 603.0));
    assert!(page.crop_box.is_none());
}

#[test]
fn test_media_box_inherited_from_pages_node() {
    let mut doc = LopdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();
    let stream_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
    // The page itself declares no MediaBox; the Pages node does.
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => stream_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let document = parse(&save(doc));
    let page = &document.pages[0];
    assert!(approx(page.width, 595.0));
    assert!(approx(page.height, 842.0));
}

#[test]
fn test_text_runs_positioned() {
    let bytes = save(single_page_doc(
        "BT /F1 12 Tf 100 700 Td (Hello world) Tj ET",
    ));
    let document = parse(&bytes);

    let page = &document.pages[0];
    assert_eq!(page.runs.len(), 1);
    let run = &page.runs[0];
    assert_eq!(run.text, "Hello world");
    assert!(approx(run.bbox.left, 100.0));
    assert!(approx(run.baseline(), 700.0));
    assert!(approx(run.font_size, 12.0));
    assert_eq!(run.font_name.as_deref(), Some("Helvetica"));
    assert!(!run.bold);
}

#[test]
fn test_image_instances_extracted() {
    let mut doc = single_page_doc("q 144 0 0 108 300 500 cm /Im1 Do Q");
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => 300,
            "Height" => 225,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Alt" => Object::string_literal("Chart"),
        },
        vec![0u8; 16],
    ));
    let page_id = doc.get_pages().values().next().copied().unwrap();
    if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
        if let Ok(Object::Dictionary(resources)) = page.get_mut(b"Resources") {
            resources.set("XObject", dictionary! { "Im1" => image_id });
        }
    }

    let document = parse(&save(doc));
    let page = &document.pages[0];
    assert_eq!(page.images.len(), 1);
    let image = &page.images[0];
    assert_eq!(image.resource_id, "Im1");
    assert_eq!(image.pixel_width, 300);
    assert_eq!(image.pixel_height, 225);
    assert_eq!(image.alt_text.as_deref(), Some("Chart"));
    assert!(approx(image.bbox.left, 300.0));
    assert!(approx(image.bbox.bottom, 500.0));
    assert!(approx(image.bbox.width(), 144.0));
    assert!(approx(image.bbox.height(), 108.0));
    assert_eq!(document.image_count(), 1);
}

#[test]
fn test_fill_rects_extracted() {
    let bytes = save(single_page_doc("0.9 0.9 0.9 rg 10 20 100 50 re f"));
    let document = parse(&bytes);

    let page = &document.pages[0];
    assert_eq!(page.fills.len(), 1);
    let fill = &page.fills[0];
    assert!(approx(fill.rect.left, 10.0));
    assert!(approx(fill.rect.bottom, 20.0));
    assert!(approx(fill.rect.right, 110.0));
    assert!(approx(fill.rect.top, 70.0));
    assert!(approx(fill.color.r, 0.9));
}

#[test]
fn test_marked_content_tags_recorded() {
    let bytes = save(single_page_doc(
        "/Article <</MCID 0>> BDC BT /F1 12 Tf 72 700 Td (Tagged) Tj ET EMC",
    ));
    let document = parse(&bytes);

    let page = &document.pages[0];
    assert!(page.structure.content_tags.contains("/Article"));
    assert!(page.structure.contains("/Article"));
    assert!(!page.structure.contains("/Table"));
}

#[test]
fn test_structure_tree_extracted() {
    let mut doc = single_page_doc("BT /F1 12 Tf 72 700 Td (Body) Tj ET");
    let heading_id = doc.add_object(dictionary! {
        "Type" => "StructElem",
        "S" => "H1",
    });
    let root_id = doc.add_object(dictionary! {
        "Type" => "StructTreeRoot",
        "K" => vec![heading_id.into()],
    });
    let catalog_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    if let Ok(Object::Dictionary(catalog)) = doc.get_object_mut(catalog_id) {
        catalog.set("MarkInfo", dictionary! { "Marked" => true });
        catalog.set("StructTreeRoot", root_id);
    }

    let document = parse(&save(doc));
    let structure = &document.structure;
    assert!(structure.marked);
    assert!(structure.has_struct_root);
    assert!(structure.struct_root_populated);
    assert!(structure.tree_dump.contains("/H1"));
    assert!(structure.contains("/H1"));
}

#[test]
fn test_untagged_document_has_no_structure() {
    let document = parse(&save(single_page_doc(
        "BT /F1 12 Tf 72 700 Td (Body) Tj ET",
    )));
    let structure = &document.structure;
    assert!(!structure.marked);
    assert!(!structure.has_struct_root);
    assert!(!structure.struct_root_populated);
    assert!(structure.tree_dump.is_empty());
}

#[test]
fn test_broken_content_stream_recovers() {
    let mut doc = LopdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();
    // Contents points at an object that does not exist.
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => Object::Reference((999, 0)),
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

    let document = parse(&save(doc));
    assert_eq!(document.pages.len(), 1);
    assert!(document.pages[0].runs.is_empty());
    assert!(!document.has_text());
}

#[test]
fn test_multi_page_order() {
    let mut doc = LopdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let mut kids: Vec<Object> = Vec::new();
    for text in ["First page", "Second page"] {
        let content = format!("BT /F1 12 Tf 72 700 Td ({}) Tj ET", text);
        let stream_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => stream_id,
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
        });
        kids.push(page_id.into());
    }
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => 2,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let document = parse(&save(doc));
    assert_eq!(document.metadata.page_count, 2);
    assert_eq!(document.pages[0].number, 1);
    assert_eq!(document.pages[1].number, 2);
    assert_eq!(document.pages[0].text(), "First page");

    let all = document.plain_text();
    assert!(all.contains("First page"));
    assert!(all.contains("Second page"));
}

#[test]
fn test_acroform_marks_document_interactive() {
    let mut doc = single_page_doc("BT /F1 12 Tf 72 700 Td (Sign here) Tj ET");
    let catalog_id = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    if let Ok(Object::Dictionary(catalog)) = doc.get_object_mut(catalog_id) {
        catalog.set("AcroForm", dictionary! { "Fields" => Vec::<Object>::new() });
    }

    let document = parse(&save(doc));
    assert!(document.metadata.interactive);
}

#[test]
fn test_plain_document_not_interactive() {
    let document = parse(&save(single_page_doc(
        "BT /F1 12 Tf 72 700 Td (Body) Tj ET",
    )));
    assert!(!document.metadata.interactive);
}
