//! Line and block grouping for layout heuristics.
//!
//! Groups a page's text runs into baseline-aligned lines and vertically
//! contiguous blocks. The reading-order and table checks work over these
//! groupings rather than raw runs.

use crate::model::TextRun;
use crate::parser::content::is_spaceless_script_char;

/// Horizontal gap beyond which same-baseline runs are separate lines.
///
/// Table cells sit closer together than this, column gutters and
/// side-by-side text boxes usually further apart. Runs split here end up
/// in different blocks, which is what lets the column heuristic see a
/// second column at all.
const COLUMN_SPLIT_GAP: f32 = 90.0;

/// A baseline-aligned line of text runs, sorted left to right.
#[derive(Debug, Clone)]
pub struct Line<'a> {
    /// Runs on this baseline, sorted by left edge
    pub runs: Vec<&'a TextRun>,

    /// Baseline Y coordinate
    pub y: f32,

    /// Leftmost X coordinate
    pub left: f32,

    /// Dominant font size, weighted by text length
    pub font_size: f32,
}

impl<'a> Line<'a> {
    fn from_runs(mut runs: Vec<&'a TextRun>) -> Self {
        runs.sort_by(|a, b| {
            a.bbox
                .left
                .partial_cmp(&b.bbox.left)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let total_chars: usize = runs.iter().map(|r| r.text.len()).sum();
        let weighted_size: f32 = runs
            .iter()
            .map(|r| r.font_size * r.text.len() as f32)
            .sum();
        let font_size = if total_chars > 0 {
            weighted_size / total_chars as f32
        } else {
            runs.first().map(|r| r.font_size).unwrap_or(0.0)
        };

        Self {
            y: runs.first().map(|r| r.baseline()).unwrap_or(0.0),
            left: runs.first().map(|r| r.bbox.left).unwrap_or(0.0),
            runs,
            font_size,
        }
    }

    /// Combined text with spaces inserted at positional gaps.
    pub fn text(&self) -> String {
        if self.runs.is_empty() {
            return String::new();
        }
        if self.runs.len() == 1 {
            return self.runs[0].text.clone();
        }

        let mut result = String::new();
        for (i, run) in self.runs.iter().enumerate() {
            if i == 0 {
                result.push_str(&run.text);
                continue;
            }

            let prev = self.runs[i - 1];
            let gap = run.bbox.left - prev.bbox.right;

            let char_count = run.text.chars().count();
            let avg_char_width = if char_count > 0 && run.bbox.width() > 0.0 {
                run.bbox.width() / char_count as f32
            } else {
                run.font_size * 0.5
            };

            let prev_last = prev.text.chars().last();
            let curr_first = run.text.chars().next();
            let both_spaceless = prev_last.map(is_spaceless_script_char).unwrap_or(false)
                && curr_first.map(is_spaceless_script_char).unwrap_or(false);

            let already_spaced = prev.text.ends_with(' ')
                || prev.text.ends_with('\u{00A0}')
                || run.text.starts_with(' ')
                || run.text.starts_with('\u{00A0}');

            if gap > avg_char_width * 0.2 && !both_spaceless && !already_spaced {
                result.push(' ');
            }
            result.push_str(&run.text);
        }
        result
    }

    /// Left edges of positional cells, splitting at gaps wider than
    /// `cell_gap` points.
    pub fn cell_lefts(&self, cell_gap: f32) -> Vec<f32> {
        let mut lefts = Vec::new();
        for (i, run) in self.runs.iter().enumerate() {
            if i == 0 {
                lefts.push(run.bbox.left);
                continue;
            }
            let prev = self.runs[i - 1];
            if run.bbox.left - prev.bbox.right > cell_gap {
                lefts.push(run.bbox.left);
            }
        }
        lefts
    }

    /// Check if the line is predominantly bold.
    pub fn is_bold(&self) -> bool {
        let bold_chars: usize = self
            .runs
            .iter()
            .filter(|r| r.bold)
            .map(|r| r.text.len())
            .sum();
        let total_chars: usize = self.runs.iter().map(|r| r.text.len()).sum();
        total_chars > 0 && bold_chars as f32 / total_chars as f32 > 0.5
    }
}

/// A vertically contiguous block of lines (paragraph-like unit).
#[derive(Debug, Clone)]
pub struct Block<'a> {
    pub lines: Vec<Line<'a>>,
}

impl<'a> Block<'a> {
    /// Leftmost X coordinate across the block's lines.
    pub fn left(&self) -> f32 {
        self.lines
            .iter()
            .map(|l| l.left)
            .fold(f32::MAX, f32::min)
    }

    /// Combined text of all lines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() || self.text().trim().is_empty()
    }
}

/// Group runs into baseline-aligned lines, top to bottom.
///
/// Blank runs are skipped; they carry no layout signal. Runs on the same
/// baseline separated by more than a gutter-width gap become separate
/// lines, so side-by-side columns do not fuse into one.
pub fn group_lines(runs: &[TextRun]) -> Vec<Line<'_>> {
    let mut runs: Vec<&TextRun> = runs.iter().filter(|r| !r.is_blank()).collect();
    if runs.is_empty() {
        return vec![];
    }

    // Sort by baseline (descending, PDF Y is bottom-up) then left edge.
    runs.sort_by(|a, b| {
        let y_cmp = b
            .baseline()
            .partial_cmp(&a.baseline())
            .unwrap_or(std::cmp::Ordering::Equal);
        if y_cmp == std::cmp::Ordering::Equal {
            a.bbox
                .left
                .partial_cmp(&b.bbox.left)
                .unwrap_or(std::cmp::Ordering::Equal)
        } else {
            y_cmp
        }
    });

    let mut lines: Vec<Line<'_>> = Vec::new();
    let mut current: Vec<&TextRun> = Vec::new();
    let mut current_y: Option<f32> = None;

    for run in runs {
        let y_tolerance = run.font_size * 0.3;
        match current_y {
            Some(y) if (run.baseline() - y).abs() <= y_tolerance => {
                current.push(run);
            }
            Some(_) => {
                push_band(&mut lines, std::mem::take(&mut current));
                current_y = Some(run.baseline());
                current.push(run);
            }
            None => {
                current_y = Some(run.baseline());
                current.push(run);
            }
        }
    }
    push_band(&mut lines, current);

    lines
}

/// Split one baseline band into lines at gutter-sized gaps.
fn push_band<'a>(lines: &mut Vec<Line<'a>>, mut band: Vec<&'a TextRun>) {
    if band.is_empty() {
        return;
    }
    band.sort_by(|a, b| {
        a.bbox
            .left
            .partial_cmp(&b.bbox.left)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut segment: Vec<&'a TextRun> = Vec::new();
    for run in band {
        if let Some(prev) = segment.last() {
            if run.bbox.left - prev.bbox.right > COLUMN_SPLIT_GAP {
                lines.push(Line::from_runs(std::mem::take(&mut segment)));
            }
        }
        segment.push(run);
    }
    if !segment.is_empty() {
        lines.push(Line::from_runs(segment));
    }
}

/// Group lines into blocks, breaking on wide spacing, font size change,
/// or indentation shift.
pub fn group_blocks<'a>(lines: Vec<Line<'a>>) -> Vec<Block<'a>> {
    if lines.is_empty() {
        return vec![];
    }

    let avg_spacing = average_line_spacing(&lines);
    let mut blocks: Vec<Block<'a>> = Vec::new();
    let mut current: Vec<Line<'a>> = Vec::new();

    for line in lines {
        let should_break = match current.last() {
            Some(prev) => {
                let spacing = (prev.y - line.y).abs();
                spacing > avg_spacing * 1.5
                    || (prev.font_size - line.font_size).abs() > 1.0
                    || (prev.left - line.left).abs() > 20.0
            }
            None => false,
        };

        if should_break && !current.is_empty() {
            blocks.push(Block {
                lines: std::mem::take(&mut current),
            });
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(Block { lines: current });
    }

    blocks
}

fn average_line_spacing(lines: &[Line<'_>]) -> f32 {
    if lines.len() < 2 {
        return 12.0;
    }
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();
    if spacings.is_empty() {
        return 12.0;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}
