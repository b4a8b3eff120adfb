//! Remediation tip catalog.
//!
//! Tips are static per profile and keyed by a prefix of the check name, so
//! "Placeholder" covers "Placeholder Text". Both output targets share the
//! same lookup key and differ only in verbosity.

use crate::parser::Profile;

/// How much detail a tip should carry.
///
/// Dashboards get the one-liner, generated reports the full walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipStyle {
    Short,
    Detailed,
}

/// A remediation tip for one failing check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tip {
    /// Catalog key (check name prefix)
    pub check: &'static str,

    /// Remediation text at the requested style
    pub text: &'static str,
}

struct TipEntry {
    key: &'static str,
    short: &'static str,
    detailed: &'static str,
}

const PRINT_TIPS: &[TipEntry] = &[
    TipEntry {
        key: "Metadata",
        short: "Add title and producer metadata before exporting.",
        detailed: "Fill in File > File Info before export; the title and producer fields \
                   identify the document in production systems.",
    },
    TipEntry {
        key: "Bleed",
        short: "Add 3mm bleed to the layout.",
        detailed: "Ensure the trim box is smaller than the media box and extend background \
                   artwork 3mm past the trim line so cutter drift never shows white edges.",
    },
    TipEntry {
        key: "Inch Marks",
        short: "Replace typographic prime marks with straight quotes (\").",
        detailed: "Search for prime and accent characters and replace them with straight \
                   quotes (\"), which print as intended in measurement callouts.",
    },
    TipEntry {
        key: "Resolution",
        short: "Ensure linked images are at least 150 PPI at their placed size.",
        detailed: "Ensure linked images are at least 150 PPI. Check scaling: an image \
                   enlarged on the page loses effective resolution proportionally.",
    },
    TipEntry {
        key: "Placeholder",
        short: "Search for dummy text like 'Lorem ipsum' before exporting.",
        detailed: "Search the document for dummy text such as 'Lorem ipsum' or 'your text \
                   here' and replace it with final copy before exporting.",
    },
];

const DIGITAL_TIPS: &[TipEntry] = &[
    TipEntry {
        key: "Metadata",
        short: "Add title and producer metadata before exporting.",
        detailed: "Fill in File > File Info before export; the title and producer fields \
                   identify the document in production systems.",
    },
    TipEntry {
        key: "Resolution",
        short: "Ensure linked images are at least 150 PPI at their placed size.",
        detailed: "Ensure linked images are at least 150 PPI. Check scaling: an image \
                   enlarged on the page loses effective resolution proportionally.",
    },
    TipEntry {
        key: "Placeholder",
        short: "Search for dummy text like 'Lorem ipsum' before exporting.",
        detailed: "Search the document for dummy text such as 'Lorem ipsum' or 'your text \
                   here' and replace it with final copy before exporting.",
    },
    TipEntry {
        key: "PDF Structure",
        short: "Export with tagging enabled.",
        detailed: "Use paragraph styles with Export Tagging and enable 'Create Tagged PDF' \
                   in the export settings so the structure tree is generated.",
    },
    TipEntry {
        key: "Document Title",
        short: "Set a document title in the file properties.",
        detailed: "Set the title under File > File Info, and enable 'Display Document \
                   Title' in the PDF export so readers announce it instead of the filename.",
    },
    TipEntry {
        key: "Alt Text",
        short: "Add alt text to every meaningful image.",
        detailed: "Select each image and add alternate text via Object Export Options. \
                   Describe what the image conveys, not what it looks like.",
    },
    TipEntry {
        key: "Heading Structure",
        short: "Map heading styles to H1/H2 levels without skipping.",
        detailed: "Use paragraph styles for headings and set their export tags to matching \
                   levels (H1, H2, ...). Keep the hierarchy contiguous; do not skip levels.",
    },
    TipEntry {
        key: "Accessible Tables",
        short: "Define header rows on every table.",
        detailed: "Use table header rows so header cells export as TH tags, and keep real \
                   table structure instead of tab-aligned text.",
    },
    TipEntry {
        key: "Reading Order",
        short: "Define the content reading order explicitly.",
        detailed: "Use the articles panel to define content flow in reading order, and \
                   verify the structure panel lists columns in the sequence a reader hears.",
    },
    TipEntry {
        key: "Color Contrast",
        short: "Use colors with at least 4.5:1 contrast (3:1 for large text).",
        detailed: "Raise text/background contrast: normal text needs at least 4.5:1, large \
                   text (18pt, or bold 14pt) at least 3:1. Verify sampled ratios, not just \
                   swatch values.",
    },
];

fn catalog(profile: Profile) -> &'static [TipEntry] {
    match profile {
        Profile::Print => PRINT_TIPS,
        Profile::Digital => DIGITAL_TIPS,
    }
}

/// Tips for the given failing check names, in catalog order.
///
/// A catalog entry applies when its key occurs in any failing check name.
pub(crate) fn tips_for(profile: Profile, failing: &[&str], style: TipStyle) -> Vec<Tip> {
    catalog(profile)
        .iter()
        .filter(|entry| failing.iter().any(|name| name.contains(entry.key)))
        .map(|entry| Tip {
            check: entry.key,
            text: match style {
                TipStyle::Short => entry.short,
                TipStyle::Detailed => entry.detailed,
            },
        })
        .collect()
}
