use std::collections::BTreeMap;

use tracing::debug;

use shared::error::Result;

/// One entry of the ordered fallback chain. A strategy returns whatever
/// text it could scrape from the document, tagged with page headers.
/// Returning an error is allowed; the pipeline folds it into an empty
/// contribution and moves on.
pub trait ExtractionStrategy {
    fn label(&self) -> &'static str;
    fn extract(&self, data: &[u8]) -> Result<String>;
}

/// Direct text-layer extraction. Two readings of the content streams are
/// attempted per page: pdf-extract as the primary, lopdf as an
/// alternative interpretation. The alternative is appended only when it
/// produced something different, which trades some duplication for
/// coverage of Word-exported PDFs that confuse one reader but not the
/// other.
pub struct TextLayer;

impl ExtractionStrategy for TextLayer {
    fn label(&self) -> &'static str {
        "text-layer"
    }

    fn extract(&self, data: &[u8]) -> Result<String> {
        let mut sections: Vec<String> = Vec::new();
        let mut primary_by_page: BTreeMap<u32, String> = BTreeMap::new();

        match pdf_extract::extract_text_from_mem_by_pages(data) {
            Ok(pages) => {
                for (idx, page) in pages.iter().enumerate() {
                    let page_no = idx as u32 + 1;
                    let trimmed = page.trim();
                    if !trimmed.is_empty() {
                        sections.push(format!("--- Page {page_no} (Standard) ---\n{trimmed}"));
                    }
                    primary_by_page.insert(page_no, trimmed.to_string());
                }
            }
            Err(e) => debug!(%e, "primary text layer read failed"),
        }

        match lopdf::Document::load_mem(data) {
            Ok(doc) => {
                let mut page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
                page_numbers.sort();
                for page_no in page_numbers {
                    match doc.extract_text(&[page_no]) {
                        Ok(text) => {
                            let trimmed = text.trim();
                            let duplicate = primary_by_page
                                .get(&page_no)
                                .is_some_and(|p| p == trimmed);
                            if !trimmed.is_empty() && !duplicate {
                                sections.push(format!(
                                    "--- Page {page_no} (Alternative) ---\n{trimmed}"
                                ));
                            }
                        }
                        Err(e) => debug!(%e, page = page_no, "alternative text layer read failed"),
                    }
                }
            }
            Err(e) => debug!(%e, "document did not parse for alternative read"),
        }

        Ok(sections.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_input_yields_empty_text() {
        let out = TextLayer.extract(b"not a pdf at all").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_text() {
        let out = TextLayer.extract(&[]).unwrap();
        assert!(out.is_empty());
    }
}
