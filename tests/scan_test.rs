//! End-to-end scan tests over documents assembled with lopdf.
//!
//! Two fixtures anchor these tests: a tagged, titled report that satisfies
//! every digital check, and a print document that trips every print check.

use lopdf::{dictionary, Document as LopdfDocument, Object, Stream};
use preflight::{
    scan_bytes, scan_bytes_with_options, CheckId, Preflight, Profile, ScanOptions, ScanReport,
    Status, TipStyle,
};

fn save(mut doc: LopdfDocument) -> Vec<u8> {
    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A tagged single-page report that passes all eleven digital checks.
///
/// The image is 300 px across placed over 144 pt (2 inches), exactly 150
/// PPI, and carries alternate text. Headings descend 24 pt then 18 pt.
fn clean_digital_pdf() -> Vec<u8> {
    let mut doc = LopdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => 300,
            "Height" => 225,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Alt" => Object::string_literal("Revenue by region, 2024"),
        },
        vec![0u8; 16],
    ));
    let content = "BT /F1 24 Tf 72 720 Td (Annual Report 2024) Tj ET\n\
                   BT /F1 18 Tf 72 680 Td (Overview) Tj ET\n\
                   BT /F1 11 Tf 72 650 Td (Results improved across every region this year.) Tj ET\n\
                   q 144 0 0 108 396 560 cm /Im1 Do Q";
    let stream_id = doc.add_object(Stream::new(dictionary! {}, content.as_bytes().to_vec()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => stream_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
            "XObject" => dictionary! { "Im1" => image_id },
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
    let heading_id = doc.add_object(dictionary! {
        "Type" => "StructElem",
        "S" => "H1",
    });
    let struct_root_id = doc.add_object(dictionary! {
        "Type" => "StructTreeRoot",
        "K" => vec![heading_id.into()],
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "MarkInfo" => dictionary! { "Marked" => true },
        "StructTreeRoot" => struct_root_id,
    });
    doc.trailer.set("Root", catalog_id);
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Annual Report 2024"),
        "Producer" => Object::string_literal("TestWriter 1.0"),
    });
    doc.trailer.set("Info", info_id);
    save(doc)
}

/// A print document that fails all five print checks: no title, no trim or
/// crop box, a 75 PPI image, prime characters, and lorem ipsum filler.
///
/// The inch-mark line goes through /F2, which is absent from the page
/// resources, so its bytes decode as UTF-8 and the primes survive.
fn flawed_print_pdf() -> Vec<u8> {
    let mut doc = LopdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => 300,
            "Height" => 300,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        vec![0u8; 16],
    ));
    let content = "BT /F1 12 Tf 72 700 Td (Lorem ipsum dolor sit amet, consectetur.) Tj ET\n\
                   BT /F2 12 Tf 72 660 Td (Banner size: 36\u{2033} x 24\u{2033}) Tj ET\n\
                   q 288 0 0 288 162 300 cm /Im1 Do Q";
    let stream_id = doc.add_object(Stream::new(dictionary! {}, content.as_bytes().to_vec()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => stream_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
            "XObject" => dictionary! { "Im1" => image_id },
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
    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal("TestWriter 1.0"),
    });
    doc.trailer.set("Info", info_id);
    save(doc)
}

fn failing_summaries(report: &ScanReport) -> Vec<String> {
    report
        .findings
        .iter()
        .filter(|f| f.status != Status::Pass)
        .map(|f| f.summary.clone())
        .collect()
}

// ==================== Digital Profile ====================

#[test]
fn test_clean_document_passes_all_digital_checks() {
    let report = scan_bytes(&clean_digital_pdf()).unwrap();
    assert_eq!(report.profile, Profile::Digital);

    let stats = report.stats();
    assert_eq!(stats.total, 11);
    assert!(
        stats.all_passed(),
        "unexpected failures: {:?}",
        failing_summaries(&report)
    );
    assert_eq!(stats.pass_percentage(), 100.0);
    assert!(report.tips(TipStyle::Short).is_empty());
}

#[test]
fn test_clean_document_individual_findings() {
    let report = scan_bytes(&clean_digital_pdf()).unwrap();

    let title = report.finding(CheckId::Title).unwrap();
    assert!(title.summary.contains("Annual Report 2024"));

    let resolution = report.finding(CheckId::Resolution).unwrap();
    assert!(resolution.summary.contains("150 PPI"));

    let headings = report.finding(CheckId::Headings).unwrap();
    assert!(headings.summary.contains("2 headings"));

    let alt = report.finding(CheckId::AltText).unwrap();
    assert!(alt.summary.contains("All 1 images"));

    // The print-only check is absent from a digital report.
    assert!(report.finding(CheckId::Bleed).is_none());
}

#[test]
fn test_clean_document_metadata_carried_into_report() {
    let report = scan_bytes(&clean_digital_pdf()).unwrap();
    assert_eq!(report.metadata.title.as_deref(), Some("Annual Report 2024"));
    assert_eq!(report.metadata.producer.as_deref(), Some("TestWriter 1.0"));
    assert_eq!(report.metadata.page_count, 1);
    assert_eq!(report.metadata.pdf_version, "1.5");
}

// ==================== Print Profile ====================

#[test]
fn test_flawed_print_document_fails_every_check() {
    let report = scan_bytes_with_options(&flawed_print_pdf(), ScanOptions::print()).unwrap();
    assert_eq!(report.profile, Profile::Print);

    let stats = report.stats();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.passed, 0);
    assert_eq!(stats.failed, 5);
    assert_eq!(stats.pass_percentage(), 0.0);
    for finding in &report.findings {
        assert_eq!(finding.status, Status::Fail, "{}", finding.summary);
    }
}

#[test]
fn test_flawed_print_document_finding_content() {
    let report = scan_bytes_with_options(&flawed_print_pdf(), ScanOptions::print()).unwrap();

    let bleed = report.finding(CheckId::Bleed).unwrap();
    assert!(bleed.summary.contains("no trim or crop box"));

    let resolution = report.finding(CheckId::Resolution).unwrap();
    assert!(resolution.summary.contains("below 150 PPI"));
    assert!(resolution.details[0].text.contains("75 PPI"));

    let inch_marks = report.finding(CheckId::InchMarks).unwrap();
    assert!(inch_marks
        .details
        .iter()
        .any(|d| d.text.contains("double prime")));

    let placeholder = report.finding(CheckId::Placeholder).unwrap();
    assert!(placeholder.details[0].text.contains("lorem ipsum"));

    // Digital-only checks are absent from a print report.
    assert!(report.finding(CheckId::Contrast).is_none());
    assert!(report.finding(CheckId::AltText).is_none());
}

#[test]
fn test_print_failures_pull_print_tips() {
    let report = scan_bytes_with_options(&flawed_print_pdf(), ScanOptions::print()).unwrap();

    let tips = report.tips(TipStyle::Detailed);
    assert_eq!(tips.len(), 5);
    assert!(tips.iter().any(|t| t.check == "Bleed"));
    assert!(tips.iter().any(|t| t.check == "Inch Marks"));
    assert!(tips.iter().all(|t| !t.text.is_empty()));

    // Both styles resolve the same failing checks.
    let short = report.tips(TipStyle::Short);
    assert_eq!(short.len(), tips.len());
}

// ==================== Report Projections ====================

#[test]
fn test_dashboard_lines_for_clean_document() {
    let report = scan_bytes(&clean_digital_pdf()).unwrap();
    let lines = report.dashboard_lines();

    // One summary per finding, nothing flagged to expand.
    assert_eq!(lines.len(), 11);
    assert!(lines.iter().all(|line| line.starts_with('\u{2705}')));
}

#[test]
fn test_dashboard_is_subsequence_of_report() {
    let report = scan_bytes_with_options(&flawed_print_pdf(), ScanOptions::print()).unwrap();
    let dashboard = report.dashboard_lines();
    let full = report.report_lines();

    assert!(dashboard.len() <= full.len());
    let mut rest = full.iter();
    for line in &dashboard {
        assert!(
            rest.any(|candidate| candidate == line),
            "dashboard line missing from report: {}",
            line
        );
    }
}

#[test]
fn test_report_lines_include_passing_resolution_details() {
    let report = scan_bytes(&clean_digital_pdf()).unwrap();
    let full = report.report_lines();
    assert!(full
        .iter()
        .any(|line| line.contains("Im1") && line.contains("150 PPI")));
}

// ==================== Options and Builder ====================

#[test]
fn test_min_ppi_option_tightens_resolution() {
    let report = Preflight::digital()
        .with_min_ppi(300)
        .scan_bytes(&clean_digital_pdf())
        .unwrap();

    let resolution = report.finding(CheckId::Resolution).unwrap();
    assert_eq!(resolution.status, Status::Fail);
    assert!(resolution.summary.contains("below 300 PPI"));
}

#[test]
fn test_metadata_marker_mode() {
    let options = ScanOptions::print().with_metadata_marker("TestWriter");
    let report = scan_bytes_with_options(&flawed_print_pdf(), options).unwrap();

    let metadata = report.finding(CheckId::Metadata).unwrap();
    assert_eq!(metadata.status, Status::Pass);
    assert!(metadata.summary.contains("TestWriter"));
}

// ==================== File Scanning ====================

#[test]
fn test_scan_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, clean_digital_pdf()).unwrap();

    let report = preflight::scan_file(&path).unwrap();
    assert!(report.stats().all_passed());
}

#[test]
fn test_scan_file_missing_path_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(preflight::scan_file(dir.path().join("missing.pdf")).is_err());
}

// ==================== Serialization ====================

#[test]
fn test_report_serializes_to_json() {
    let report = scan_bytes(&clean_digital_pdf()).unwrap();
    let json = serde_json::to_string_pretty(&report).unwrap();
    assert!(json.contains("\"profile\""));
    assert!(json.contains("\"findings\""));

    let back: ScanReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.findings.len(), report.findings.len());
    assert_eq!(back.stats(), report.stats());
}
