//! Placeholder text detection.

use crate::checks::{Check, ScanContext};
use crate::error::{Error, Result};
use crate::model::{CheckId, Detail, DetailItem, Document, Finding};
use regex::RegexBuilder;
use unicode_normalization::UnicodeNormalization;

/// Finds template filler text that was never replaced.
///
/// Terms are matched as whole words, case-insensitively, against
/// NFC-normalized page text so decomposed accents from odd font encodings
/// do not hide a match.
pub struct PlaceholderCheck;

impl Check for PlaceholderCheck {
    fn id(&self) -> CheckId {
        CheckId::Placeholder
    }

    fn description(&self) -> &str {
        "Template placeholder text must be replaced"
    }

    fn run(&self, document: &Document, ctx: &ScanContext) -> Result<Finding> {
        let mut patterns = Vec::with_capacity(ctx.options.placeholder_terms.len());
        for term in &ctx.options.placeholder_terms {
            let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(term)))
                .case_insensitive(true)
                .build()
                .map_err(|e| Error::Check(format!("bad placeholder term '{}': {}", term, e)))?;
            patterns.push((term.as_str(), pattern));
        }

        let mut details = Vec::new();
        for page in &document.pages {
            let text: String = page.text().nfc().collect();
            if text.is_empty() {
                continue;
            }
            for (term, pattern) in &patterns {
                if pattern.is_match(&text) {
                    details.push(
                        Detail::flag(format!(
                            "Page {}: found '{}'",
                            page.number, term
                        ))
                        .with_item(DetailItem {
                            page: page.number,
                            snippet: Some((*term).to_string()),
                            measured: None,
                            required: None,
                            colors: None,
                        }),
                    );
                }
            }
        }

        let finding = if details.is_empty() {
            Finding::pass(self.id(), "Placeholder Text: None found")
        } else {
            Finding::fail(self.id(), "Placeholder Text: Placeholder text found")
        };
        Ok(finding.with_details(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Page, Status, TextRun};
    use crate::parser::ScanOptions;

    fn doc_with_text(texts: Vec<(u32, &str)>) -> Document {
        let mut doc = Document::new();
        let last_page = texts.iter().map(|(p, _)| *p).max().unwrap_or(1);
        for number in 1..=last_page {
            doc.add_page(Page::letter(number));
        }
        for (page, text) in texts {
            doc.pages[(page - 1) as usize].add_run(TextRun::new(text, 72.0, 700.0, 12.0));
        }
        doc
    }

    fn run_check(doc: &Document) -> Finding {
        let ctx = ScanContext::new(ScanOptions::default());
        PlaceholderCheck.run(doc, &ctx).unwrap()
    }

    #[test]
    fn test_clean_document_passes() {
        let doc = doc_with_text(vec![(1, "Finished marketing copy, ready for print.")]);
        let finding = run_check(&doc);
        assert_eq!(finding.status, Status::Pass);
        assert!(finding.summary.contains("None found"));
    }

    #[test]
    fn test_lorem_ipsum_found_case_insensitive() {
        let doc = doc_with_text(vec![(2, "LOREM IPSUM dolor sit amet")]);
        let finding = run_check(&doc);
        assert_eq!(finding.status, Status::Fail);
        assert_eq!(finding.details.len(), 1);
        assert!(finding.details[0].text.contains("Page 2"));
        assert!(finding.details[0].text.contains("lorem ipsum"));
    }

    #[test]
    fn test_whole_word_matching() {
        // "placeholders" embeds the term but has no trailing word boundary.
        let doc = doc_with_text(vec![(1, "All placeholders were replaced.")]);
        assert_eq!(run_check(&doc).status, Status::Pass);
    }

    #[test]
    fn test_term_reported_per_page() {
        let doc = doc_with_text(vec![
            (1, "Your Text Here"),
            (3, "your text here and more"),
        ]);
        let finding = run_check(&doc);
        assert_eq!(finding.status, Status::Fail);
        assert_eq!(finding.details.len(), 2);
        let pages: Vec<u32> = finding
            .details
            .iter()
            .filter_map(|d| d.item.as_ref())
            .map(|i| i.page)
            .collect();
        assert_eq!(pages, vec![1, 3]);
    }

    #[test]
    fn test_custom_terms() {
        let doc = doc_with_text(vec![(1, "INSERT LOGO before sending")]);
        let options =
            ScanOptions::default().with_placeholder_terms(vec!["insert logo".to_string()]);
        let ctx = ScanContext::new(options);
        let finding = PlaceholderCheck.run(&doc, &ctx).unwrap();
        assert_eq!(finding.status, Status::Fail);
    }
}
