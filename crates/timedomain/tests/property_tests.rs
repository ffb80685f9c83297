//! Property-based tests for translation invariants.
//!
//! - Order independence: the restriction string ignores input order
//! - Wrap-around: hour and month durations wrap at day and year boundaries
//! - Degradation: collections of untranslatable patterns yield no tag
//! - Robustness: arbitrary text never panics the parser

use proptest::prelude::*;
use timedomain::{parse, parse_pattern, render_pattern, PatternEntry};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const TRANSLATABLE: [&str; 8] = [
    "[(h6){h2}]",
    "[(h12)(h22)]",
    "[(M3)(M5)]",
    "[(M10){M5}]",
    "[(t2t6){h10}]",
    "[(h22){h8}]",
    "[[(h11m30){h1}]*[(M11){M1}]]",
    "[[(t2t3t4t5t6h7){h3}]*[(M11){M5}]]",
];

fn entries(patterns: &[&str]) -> Vec<PatternEntry> {
    patterns
        .iter()
        .map(|p| PatternEntry::new(7, *p))
        .collect()
}

/// A pattern whose start group only carries recognized but untranslated codes.
fn untranslatable_pattern() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!['z', 'f', 'l', 'd']),
        1u32..100,
        prop::sample::select(vec!['z', 'd']),
        1u32..100,
    )
        .prop_map(|(a, x, b, y)| format!("[({a}{x}){{{b}{y}}}]"))
}

proptest! {
    #[test]
    fn prop_input_order_is_irrelevant(
        shuffled in Just(TRANSLATABLE.to_vec()).prop_shuffle()
    ) {
        let expected = parse(&entries(&TRANSLATABLE)).unwrap();
        let actual = parse(&entries(&shuffled)).unwrap();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_duplicates_are_irrelevant(
        picks in prop::collection::vec(0usize..TRANSLATABLE.len(), 1..20)
    ) {
        let with_duplicates: Vec<&str> = picks.iter().map(|i| TRANSLATABLE[*i]).collect();
        let mut distinct = with_duplicates.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(
            parse(&entries(&with_duplicates)).unwrap(),
            parse(&entries(&distinct)).unwrap()
        );
    }

    #[test]
    fn prop_hour_duration_wraps_at_midnight(start in 0u32..24, length in 0u32..100) {
        let pattern = format!("[(h{start}){{h{length}}}]");
        let expected = format!("{:02}:00-{:02}:00 off", start, (start + length) % 24);
        prop_assert_eq!(render_pattern(&pattern).unwrap(), Some(expected));
    }

    #[test]
    fn prop_minute_duration_wraps_at_midnight(
        hour in 0u32..24,
        minute in 0u32..60,
        length in 0u32..3000,
    ) {
        let pattern = format!("[(h{hour}m{minute}){{m{length}}}]");
        let start = hour * 60 + minute;
        let end = (start + length) % 1440;
        let expected = format!(
            "{:02}:{:02}-{:02}:{:02} off",
            hour,
            minute,
            end / 60,
            end % 60
        );
        prop_assert_eq!(render_pattern(&pattern).unwrap(), Some(expected));
    }

    #[test]
    fn prop_month_duration_wraps_at_new_year(start in 1u32..=12, length in 0u32..50) {
        let pattern = format!("[(M{start}){{M{length}}}]");
        let begin = MONTHS[(start - 1) as usize];
        let end = MONTHS[((start - 1 + length) % 12) as usize];
        prop_assert_eq!(
            render_pattern(&pattern).unwrap(),
            Some(format!("{begin}-{end} off"))
        );
    }

    #[test]
    fn prop_untranslatable_collection_has_no_tag(
        patterns in prop::collection::vec(untranslatable_pattern(), 1..10)
    ) {
        let refs: Vec<&str> = patterns.iter().map(String::as_str).collect();
        prop_assert_eq!(parse(&entries(&refs)).unwrap(), "");
    }

    #[test]
    fn prop_untranslatable_sibling_is_dropped(extra in untranslatable_pattern()) {
        let alone = parse(&entries(&["[(h6){h2}]"])).unwrap();
        let with_extra = parse(&entries(&["[(h6){h2}]", extra.as_str()])).unwrap();
        prop_assert_eq!(with_extra, alone);
    }

    #[test]
    fn prop_parser_never_panics(text in "\\PC{0,40}") {
        let _ = parse_pattern(&text);
        let _ = render_pattern(&text);
    }

    #[test]
    fn prop_bracketed_garbage_never_panics(text in "[\\[\\](){}*+ a-zA-Z0-9]{0,30}") {
        let _ = render_pattern(&text);
    }

    #[test]
    fn prop_canonical_text_reparses(index in 0usize..TRANSLATABLE.len()) {
        let tree = parse_pattern(TRANSLATABLE[index]).unwrap();
        let reparsed = parse_pattern(&tree.to_string()).unwrap();
        prop_assert_eq!(reparsed, tree);
    }
}
