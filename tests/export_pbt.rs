//! Property-based tests for the pagination pass.
//!
//! Invariants:
//! - Wrapping loses no words and keeps their order
//! - Pagination preserves body-line order and count
//! - Pages are created lazily: no page exists without an op on it
//! - The pass is a pure function: same input, same pages

use proptest::prelude::*;

use ustoz_backend_rust::export::layout::{paginate, wrap_text, PageOp, BODY_SIZE_PT};
use ustoz_backend_rust::export::{DocumentSpec, ExportSection};

const WRITABLE_WIDTH_MM: f32 = 170.0;

fn arb_word() -> impl Strategy<Value = String> {
    "[a-z]{1,10}"
}

fn arb_item() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_word(), 1..30).prop_map(|words| words.join(" "))
}

fn arb_section() -> impl Strategy<Value = ExportSection> {
    ("[A-Z][a-z]{1,12}", prop::collection::vec(arb_item(), 0..20))
        .prop_map(|(heading, items)| ExportSection::list(heading, items))
}

fn arb_spec() -> impl Strategy<Value = DocumentSpec> {
    ("[A-Z][a-z]{1,16}", prop::collection::vec(arb_section(), 0..6)).prop_map(
        |(title, sections)| DocumentSpec { title, sections },
    )
}

proptest! {
    #[test]
    fn wrapping_preserves_words(words in prop::collection::vec(arb_word(), 1..200)) {
        let text = words.join(" ");
        let lines = wrap_text(&text, WRITABLE_WIDTH_MM, BODY_SIZE_PT);
        let rejoined: Vec<String> = lines
            .join(" ")
            .split_whitespace()
            .map(|w| w.to_string())
            .collect();
        prop_assert_eq!(rejoined, words);
    }

    #[test]
    fn pagination_preserves_line_count_and_order(spec in arb_spec()) {
        let expected: Vec<String> = spec
            .sections
            .iter()
            .flat_map(|s| s.body.as_items().iter())
            .flat_map(|item| wrap_text(item, WRITABLE_WIDTH_MM, BODY_SIZE_PT))
            .collect();

        let pages = paginate(&spec);
        let rendered: Vec<String> = pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter_map(|op| match op {
                PageOp::BodyLine { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();

        prop_assert_eq!(rendered, expected);
    }

    #[test]
    fn no_page_is_empty(spec in arb_spec()) {
        for page in paginate(&spec) {
            prop_assert!(!page.ops.is_empty());
        }
    }

    #[test]
    fn pagination_is_a_pure_function(spec in arb_spec()) {
        prop_assert_eq!(paginate(&spec), paginate(&spec));
    }
}
