use docx_rs::{AlignmentType, Docx, LineSpacing, Paragraph, Run, Style, StyleType};
use thiserror::Error;

use crate::export::DocumentSpec;

pub const TITLE_STYLE: &str = "Title";
pub const HEADING_STYLE: &str = "Heading1";

// Run size is in half-points: 24 = 12pt body text.
const BODY_RUN_SIZE: usize = 24;

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("DOCX packaging failed: {0}")]
    Pack(String),
}

/// One node of the flat paragraph sequence the renderer emits. Kept as
/// a plain value so the structure can be asserted without unzipping
/// the produced document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocParagraph {
    pub style: Option<&'static str>,
    pub text: String,
}

/// Title paragraph first, then per section one heading paragraph and
/// one body paragraph per normalized body item.
pub fn build_paragraphs(spec: &DocumentSpec) -> Vec<DocParagraph> {
    let mut paragraphs = vec![DocParagraph {
        style: Some(TITLE_STYLE),
        text: spec.title.clone(),
    }];

    for section in &spec.sections {
        paragraphs.push(DocParagraph {
            style: Some(HEADING_STYLE),
            text: section.heading.clone(),
        });
        for item in section.body.as_items() {
            paragraphs.push(DocParagraph {
                style: None,
                text: item.clone(),
            });
        }
    }

    paragraphs
}

/// Builds the document with named paragraph styles so headings stay
/// structurally distinguished from body text (a generated table of
/// contents keeps working).
pub fn render_docx(spec: &DocumentSpec) -> Result<Vec<u8>, DocxError> {
    let mut docx = Docx::new()
        .add_style(Style::new(TITLE_STYLE, StyleType::Paragraph).name("Title"))
        .add_style(Style::new(HEADING_STYLE, StyleType::Paragraph).name("Heading 1"));

    for paragraph in build_paragraphs(spec) {
        let node = match paragraph.style {
            Some(style) if style == TITLE_STYLE => Paragraph::new()
                .style(TITLE_STYLE)
                .align(AlignmentType::Center)
                .line_spacing(LineSpacing::new().after(400))
                .add_run(Run::new().add_text(paragraph.text)),
            Some(_) => Paragraph::new()
                .style(HEADING_STYLE)
                .line_spacing(LineSpacing::new().before(400).after(200))
                .add_run(Run::new().add_text(paragraph.text)),
            None => Paragraph::new()
                .line_spacing(LineSpacing::new().after(120))
                .add_run(Run::new().add_text(paragraph.text).size(BODY_RUN_SIZE)),
        };
        docx = docx.add_paragraph(node);
    }

    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| DocxError::Pack(e.to_string()))?;
    Ok(cursor.into_inner())
}
