//! Text extraction from PDF and word-processor documents

use crate::error::{MatcherError, Result};
use log::{debug, warn};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::panic;

pub trait TextExtractor: Send + Sync {
    fn extract(&self, content: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    /// Page texts in page order, each followed by a newline.
    fn extract(&self, content: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed inputs
        let pages = panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(content))
            .map_err(|_| {
                MatcherError::ExtractionFailure("PDF parser aborted on malformed input".to_string())
            })?
            .map_err(|e| MatcherError::ExtractionFailure(format!("Failed to extract text from PDF: {}", e)))?;

        debug!("Extracted {} PDF pages", pages.len());

        let mut text = String::new();
        for (index, page) in pages.iter().enumerate() {
            if page.trim().is_empty() {
                warn!("PDF page {} has no extractable text", index + 1);
            }
            text.push_str(page);
            text.push('\n');
        }
        Ok(text)
    }
}

pub struct DocxExtractor;

const DOCUMENT_PART: &str = "word/document.xml";

impl TextExtractor for DocxExtractor {
    /// Body paragraphs, one per line, followed by the rows of every top-level table.
    fn extract(&self, content: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(content))?;
        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)?
            .read_to_string(&mut xml)
            .map_err(|e| MatcherError::ExtractionFailure(format!("Failed to read {}: {}", DOCUMENT_PART, e)))?;

        let body = parse_document_xml(&xml)?;
        debug!(
            "Extracted {} DOCX paragraphs and {} table rows",
            body.paragraphs.len(),
            body.table_rows.len()
        );

        let mut text = String::new();
        for paragraph in &body.paragraphs {
            text.push_str(paragraph);
            text.push('\n');
        }
        for row in &body.table_rows {
            for cell in row {
                text.push_str(cell);
                text.push(' ');
            }
            text.push('\n');
        }
        Ok(text)
    }
}

#[derive(Debug, Default)]
struct DocxBody {
    paragraphs: Vec<String>,
    table_rows: Vec<Vec<String>>,
}

/// Walks `word/document.xml`.
///
/// Only top-level paragraphs and cells of top-level tables are collected; paragraphs
/// nested in other paragraphs (text boxes) and nested tables are skipped. A cell's
/// text is its paragraphs joined by newlines.
fn parse_document_xml(xml: &str) -> Result<DocxBody> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut body = DocxBody::default();
    let mut table_depth = 0usize;
    let mut paragraph_depth = 0usize;
    let mut in_text = false;
    let mut paragraph = String::new();
    let mut cell_paragraphs: Vec<String> = Vec::new();
    let mut row: Vec<String> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:tr" if table_depth == 1 => row.clear(),
                b"w:tc" if table_depth == 1 => cell_paragraphs.clear(),
                b"w:p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        paragraph.clear();
                    }
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" if paragraph_depth == 0 => match table_depth {
                    0 => body.paragraphs.push(String::new()),
                    1 => cell_paragraphs.push(String::new()),
                    _ => {}
                },
                b"w:tab" if paragraph_depth == 1 => paragraph.push('\t'),
                b"w:br" | b"w:cr" if paragraph_depth == 1 => paragraph.push('\n'),
                _ => {}
            },
            Event::Text(e) => {
                if in_text && paragraph_depth == 1 {
                    let text = e
                        .unescape()
                        .map_err(|err| MatcherError::ExtractionFailure(format!("malformed DOCX text: {}", err)))?;
                    paragraph.push_str(&text);
                }
            }
            Event::CData(e) => {
                if in_text && paragraph_depth == 1 {
                    paragraph.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:tr" if table_depth == 1 => body.table_rows.push(std::mem::take(&mut row)),
                b"w:tc" if table_depth == 1 => {
                    row.push(cell_paragraphs.join("\n"));
                    cell_paragraphs.clear();
                }
                b"w:p" => {
                    if paragraph_depth == 1 {
                        match table_depth {
                            0 => body.paragraphs.push(std::mem::take(&mut paragraph)),
                            1 => cell_paragraphs.push(std::mem::take(&mut paragraph)),
                            _ => paragraph.clear(),
                        }
                    }
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(body)
}
