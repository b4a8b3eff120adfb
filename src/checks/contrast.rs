//! WCAG AA color contrast check.
//!
//! Declared fill colors alone are not trustworthy: producers draw text over
//! images, gradients, and rects the text operators never mention. The check
//! therefore samples actual pixels around each run's baseline and reconciles
//! the sampled color with the declared background before computing the ratio.

use crate::checks::{Check, ScanContext};
use crate::color::{contrast_ratio, Rgb};
use crate::error::Result;
use crate::model::{snippet, CheckId, ColorPair, Detail, DetailItem, Document, Finding, Page, TextRun};
use crate::parser::{Profile, ScanOptions};
use crate::raster::Pixmap;

/// Verifies text contrast against WCAG AA thresholds.
pub struct ContrastCheck;

/// Length of the text excerpt carried in each failing detail.
const SNIPPET_CHARS: usize = 50;

/// True for text this tool itself could have emitted (status lines pasted
/// back into a document); measuring those would be self-referential noise.
fn is_status_note(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with('✅') || trimmed.starts_with('❌') || trimmed.starts_with('⚠')
}

/// WCAG AA threshold for a run: 3.0 for large text, 4.5 otherwise.
///
/// Large text is at least 18pt, or at least 14pt when bold.
fn required_ratio(font_size: f32, bold: bool) -> f64 {
    if font_size >= 18.0 || (font_size >= 14.0 && bold) {
        3.0
    } else {
        4.5
    }
}

/// Distance-weighted average of the background pixels around a run's
/// baseline midpoint.
///
/// Pixels darker than the ink threshold (by channel mean) are assumed to be
/// the glyphs themselves and are excluded. Off-raster positions contribute
/// nothing. When every sample is rejected the page is assumed white.
fn sample_background(pixmap: &Pixmap, page: &Page, run: &TextRun, options: &ScanOptions) -> Rgb {
    let zoom = options.sample_zoom;
    let window = options.sample_window as i64;
    let half = window / 2;
    let radius = window as f64 / 2.0;
    let cx = (run.bbox.center_x() * zoom).round() as i64;
    let cy = ((page.height - run.baseline()) * zoom).round() as i64;

    let mut sum = [0.0f64; 3];
    let mut weight_total = 0.0f64;
    for dy in -half..=half {
        for dx in -half..=half {
            let pixel = match pixmap.pixel(cx + dx, cy + dy) {
                Some(pixel) => pixel,
                None => continue,
            };
            if pixel.channel_mean() < options.ink_threshold {
                continue;
            }
            let distance = ((dx * dx + dy * dy) as f64).sqrt();
            let weight = 1.0 / (1.0 + (distance / radius).powi(2));
            sum[0] += pixel.r as f64 * weight;
            sum[1] += pixel.g as f64 * weight;
            sum[2] += pixel.b as f64 * weight;
            weight_total += weight;
        }
    }

    if weight_total <= 0.0 {
        Rgb::WHITE
    } else {
        Rgb::new(
            (sum[0] / weight_total) as f32,
            (sum[1] / weight_total) as f32,
            (sum[2] / weight_total) as f32,
        )
    }
}

/// Pick the background to measure against, given what the content stream
/// declared and what the pixels say.
///
/// A declared white background carries no information (it is the default),
/// so sampling wins there. Otherwise the declared color is kept unless the
/// sampled pixels disagree strongly and are clearly light, which is the
/// signature of text placed outside its declared fill.
fn reconcile_background(declared: Option<Rgb>, sampled: Rgb) -> Rgb {
    let declared = match declared {
        None => return sampled,
        Some(color) if color == Rgb::WHITE => return sampled,
        Some(color) => color,
    };
    let declared_lum = declared.luminance();
    let sampled_lum = sampled.luminance();

    if (declared_lum - sampled_lum).abs() < 0.1 {
        declared
    } else if sampled_lum > declared_lum && sampled_lum > 0.8 {
        sampled
    } else if declared_lum > 0.9 && sampled_lum > 0.85 {
        if sampled_lum > declared_lum {
            sampled
        } else {
            declared
        }
    } else {
        declared
    }
}

impl Check for ContrastCheck {
    fn id(&self) -> CheckId {
        CheckId::Contrast
    }

    fn description(&self) -> &str {
        "Text must meet WCAG AA contrast against its background"
    }

    fn applies_to(&self, profile: Profile) -> bool {
        profile == Profile::Digital
    }

    fn run(&self, document: &Document, ctx: &ScanContext) -> Result<Finding> {
        let mut details = Vec::new();
        let mut checked = 0usize;
        let mut failing = 0usize;

        for page in &document.pages {
            if !page.runs.iter().any(|r| !r.is_blank() && !is_status_note(&r.text)) {
                continue;
            }
            let pixmap = match ctx.page_pixmap(page) {
                Ok(pixmap) => Some(pixmap),
                Err(e) => {
                    log::warn!(
                        "Could not render page {} for contrast sampling: {}",
                        page.number,
                        e
                    );
                    None
                }
            };

            for run in &page.runs {
                if run.is_blank() || is_status_note(&run.text) {
                    continue;
                }
                checked += 1;

                let sampled = match &pixmap {
                    Some(pixmap) => sample_background(pixmap, page, run, &ctx.options),
                    None => Rgb::WHITE,
                };
                let background = reconcile_background(run.background, sampled);
                let ratio = contrast_ratio(run.color, background);
                let required = required_ratio(run.font_size, run.bold);

                if ratio < required {
                    failing += 1;
                    let weight = if run.bold { "bold" } else { "normal" };
                    let colors = ColorPair {
                        foreground: run.color,
                        background,
                    };
                    let excerpt = snippet(&run.text, SNIPPET_CHARS);
                    let text = format!(
                        "Page {}: \"{}\" {:.2}:1 (needs {:.1}:1, {:.0}pt {}, {})",
                        page.number, excerpt, ratio, required, run.font_size, weight, colors
                    );
                    details.push(Detail::flag(text).with_item(DetailItem {
                        page: page.number,
                        snippet: Some(excerpt),
                        measured: Some(ratio),
                        required: Some(required),
                        colors: Some(colors),
                    }));
                }
            }
        }

        let finding = if checked == 0 {
            Finding::pass(self.id(), "Color Contrast: No text to evaluate")
        } else if failing > 0 {
            let noun = if failing == 1 { "run" } else { "runs" };
            Finding::fail(
                self.id(),
                format!(
                    "Color Contrast: {} text {} below WCAG AA thresholds",
                    failing, noun
                ),
            )
        } else {
            Finding::pass(
                self.id(),
                format!("Color Contrast: All {} text runs meet WCAG AA", checked),
            )
        };

        Ok(finding.with_details(details))
    }
}
