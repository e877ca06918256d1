use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference,
    Point, Rect, Rgb,
};
use thiserror::Error;
use time::OffsetDateTime;

use crate::export::layout::{
    self, Page, PageOp, BODY_SIZE_PT, BANNER_HEIGHT_MM, FOOTER_BASELINE_MM, FOOTER_SIZE_PT,
    HEADING_SIZE_PT, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, TITLE_BASELINE_MM, TITLE_SIZE_PT,
};
use crate::export::DocumentSpec;
use crate::services::labels::APP_NAME;

const BANNER_RGB: (u8, u8, u8) = (37, 99, 235);
const TITLE_RGB: (u8, u8, u8) = (255, 255, 255);
const HEADING_RGB: (u8, u8, u8) = (30, 41, 59);
const RULE_RGB: (u8, u8, u8) = (226, 232, 240);
const BODY_RGB: (u8, u8, u8) = (71, 85, 105);
const FOOTER_RGB: (u8, u8, u8) = (148, 163, 184);

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF rendering failed: {0}")]
    Render(#[from] printpdf::Error),
}

/// Renders the paginated document. Output bytes depend only on the
/// spec: document dates are pinned so identical input yields identical
/// files.
pub fn render_pdf(spec: &DocumentSpec) -> Result<Vec<u8>, PdfError> {
    let pages = layout::paginate(spec);

    let (doc, first_page, first_layer) = PdfDocument::new(
        spec.title.clone(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let doc = doc
        .with_creation_date(OffsetDateTime::UNIX_EPOCH)
        .with_mod_date(OffsetDateTime::UNIX_EPOCH);

    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut page_refs = vec![(first_page, first_layer)];
    for _ in 1..pages.len() {
        page_refs.push(doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1"));
    }

    for (page, (page_idx, layer_idx)) in pages.iter().zip(&page_refs) {
        let layer = doc.get_page(*page_idx).get_layer(*layer_idx);
        draw_page(&layer, page, &regular, &bold);
    }

    stamp_footers(&doc, &page_refs, &regular);

    Ok(doc.save_to_bytes()?)
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &Page,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    for op in &page.ops {
        match op {
            PageOp::Banner { title } => {
                layer.set_fill_color(rgb(BANNER_RGB));
                layer.add_rect(
                    Rect::new(
                        Mm(0.0),
                        Mm(PAGE_HEIGHT_MM - BANNER_HEIGHT_MM),
                        Mm(PAGE_WIDTH_MM),
                        Mm(PAGE_HEIGHT_MM),
                    )
                    .with_mode(PaintMode::Fill),
                );
                layer.set_fill_color(rgb(TITLE_RGB));
                layer.use_text(
                    title.clone(),
                    TITLE_SIZE_PT,
                    Mm(MARGIN_MM),
                    Mm(PAGE_HEIGHT_MM - TITLE_BASELINE_MM),
                    bold,
                );
            }
            PageOp::Heading { text, y_mm } => {
                layer.set_fill_color(rgb(HEADING_RGB));
                layer.use_text(
                    text.clone(),
                    HEADING_SIZE_PT,
                    Mm(MARGIN_MM),
                    Mm(PAGE_HEIGHT_MM - y_mm),
                    bold,
                );
            }
            PageOp::Rule { y_mm } => {
                layer.set_outline_color(rgb(RULE_RGB));
                layer.set_outline_thickness(0.5);
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(MARGIN_MM), Mm(PAGE_HEIGHT_MM - y_mm)), false),
                        (
                            Point::new(Mm(PAGE_WIDTH_MM - MARGIN_MM), Mm(PAGE_HEIGHT_MM - y_mm)),
                            false,
                        ),
                    ],
                    is_closed: false,
                });
            }
            PageOp::BodyLine { text, y_mm } => {
                layer.set_fill_color(rgb(BODY_RGB));
                layer.use_text(
                    text.clone(),
                    BODY_SIZE_PT,
                    Mm(MARGIN_MM),
                    Mm(PAGE_HEIGHT_MM - y_mm),
                    regular,
                );
            }
        }
    }
}

// Second pass: the total page count is only known once the whole
// document is laid out.
fn stamp_footers(
    doc: &printpdf::PdfDocumentReference,
    page_refs: &[(printpdf::PdfPageIndex, printpdf::PdfLayerIndex)],
    font: &IndirectFontRef,
) {
    let total = page_refs.len();
    for (i, (page_idx, layer_idx)) in page_refs.iter().enumerate() {
        let layer = doc.get_page(*page_idx).get_layer(*layer_idx);
        let text = format!("{} | Page {} / {}", APP_NAME, i + 1, total);
        let x = (PAGE_WIDTH_MM - layout::estimate_width_mm(&text, FOOTER_SIZE_PT)) / 2.0;
        layer.set_fill_color(rgb(FOOTER_RGB));
        layer.use_text(
            text,
            FOOTER_SIZE_PT,
            Mm(x.max(MARGIN_MM)),
            Mm(PAGE_HEIGHT_MM - FOOTER_BASELINE_MM),
            font,
        );
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}
