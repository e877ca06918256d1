use crate::export::DocumentSpec;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;
pub const BANNER_HEIGHT_MM: f32 = 50.0;
pub const TITLE_BASELINE_MM: f32 = 35.0;
pub const FIRST_PAGE_TOP_MM: f32 = 70.0;
pub const PAGE_TOP_MM: f32 = 30.0;

const SECTION_BREAK_MARGIN_MM: f32 = 40.0;
const LINE_BREAK_MARGIN_MM: f32 = 20.0;
const RULE_OFFSET_MM: f32 = 2.0;
const HEADING_ADVANCE_MM: f32 = 15.0;
const LINE_ADVANCE_MM: f32 = 7.0;
const ITEM_GAP_MM: f32 = 5.0;
const SECTION_GAP_MM: f32 = 10.0;

pub const TITLE_SIZE_PT: f32 = 24.0;
pub const HEADING_SIZE_PT: f32 = 16.0;
pub const BODY_SIZE_PT: f32 = 11.0;
pub const FOOTER_SIZE_PT: f32 = 9.0;
pub const FOOTER_BASELINE_MM: f32 = PAGE_HEIGHT_MM - 10.0;

const PT_TO_MM: f32 = 0.352_778;
// Average Helvetica glyph width as a fraction of the font size; close
// enough for wrapping at body sizes without embedding font metrics.
const AVG_GLYPH_EM: f32 = 0.5;

/// A positioned drawing operation. `y_mm` measures down from the top
/// edge of the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOp {
    Banner { title: String },
    Heading { text: String, y_mm: f32 },
    Rule { y_mm: f32 },
    BodyLine { text: String, y_mm: f32 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<PageOp>,
}

/// Estimated rendered width of `text` at `size_pt`, in millimetres.
pub fn estimate_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * AVG_GLYPH_EM * PT_TO_MM
}

/// Wraps `text` to `max_width_mm` at `size_pt`. Explicit newlines are
/// respected; words longer than a full line break mid-word.
pub fn wrap_text(text: &str, max_width_mm: f32, size_pt: f32) -> Vec<String> {
    let glyph_mm = size_pt * AVG_GLYPH_EM * PT_TO_MM;
    let max_chars = ((max_width_mm / glyph_mm) as usize).max(1);

    let mut lines = Vec::new();
    for segment in text.split('\n') {
        let words: Vec<&str> = segment.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in words {
            if current.is_empty() {
                push_word(&mut lines, &mut current, word, max_chars);
            } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                push_word(&mut lines, &mut current, word, max_chars);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn push_word(lines: &mut Vec<String>, current: &mut String, word: &str, max_chars: usize) {
    if word.chars().count() <= max_chars {
        current.push_str(word);
        return;
    }
    // Overlong word: emit full chunks, keep the remainder as the
    // current line.
    let chars: Vec<char> = word.chars().collect();
    for chunk in chars.chunks(max_chars) {
        if !current.is_empty() {
            lines.push(std::mem::take(current));
        }
        current.extend(chunk.iter());
    }
}

/// Pure pagination pass. Pages are created lazily, only when a heading
/// or line actually lands on them, so content that exactly fills the
/// final page never produces a trailing blank page.
pub fn paginate(spec: &DocumentSpec) -> Vec<Page> {
    let max_width = PAGE_WIDTH_MM - MARGIN_MM * 2.0;

    let mut pages: Vec<Page> = Vec::new();
    let mut current = Page::default();
    current.ops.push(PageOp::Banner {
        title: spec.title.to_uppercase(),
    });
    let mut y = FIRST_PAGE_TOP_MM;

    for section in &spec.sections {
        if y > PAGE_HEIGHT_MM - SECTION_BREAK_MARGIN_MM {
            pages.push(std::mem::take(&mut current));
            y = PAGE_TOP_MM;
        }

        current.ops.push(PageOp::Heading {
            text: section.heading.clone(),
            y_mm: y,
        });
        current.ops.push(PageOp::Rule {
            y_mm: y + RULE_OFFSET_MM,
        });
        y += HEADING_ADVANCE_MM;

        for item in section.body.as_items() {
            for line in wrap_text(item, max_width, BODY_SIZE_PT) {
                if y > PAGE_HEIGHT_MM - LINE_BREAK_MARGIN_MM {
                    pages.push(std::mem::take(&mut current));
                    y = PAGE_TOP_MM;
                }
                current.ops.push(PageOp::BodyLine { text: line, y_mm: y });
                y += LINE_ADVANCE_MM;
            }
            y += ITEM_GAP_MM;
        }
        y += SECTION_GAP_MM;
    }

    pages.push(current);
    pages
}
