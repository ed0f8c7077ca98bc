//! Property tests for field encoding.

use fields::{Field, Fields, FieldScratch};
use proptest::prelude::*;
use test_support::{Recorded, RecordingSink};

fn record(field: &Field) -> Vec<Recorded> {
    let mut sink = RecordingSink::new();
    field.add_to(&mut sink).expect("field encodes");
    sink.into_calls()
}

proptest! {
    #[test]
    fn ints_join_matches_reference(values in proptest::collection::vec(any::<isize>(), 0..=32)) {
        let expected = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let calls = record(&Field::ints("k", values));
        prop_assert_eq!(calls, vec![Recorded::String("k".into(), expected)]);
    }

    #[test]
    fn strings_join_matches_reference(values in proptest::collection::vec("[a-z ]{0,8}", 0..=16)) {
        let expected = values.join(", ");
        let calls = record(&Field::strings("k", values));
        prop_assert_eq!(calls, vec![Recorded::String("k".into(), expected)]);
    }

    #[test]
    fn uint64_keeps_full_range(value in any::<u64>()) {
        prop_assert_eq!(record(&Field::uint64("u", value)), vec![Recorded::Uint64("u".into(), value)]);
    }

    #[test]
    fn scratch_reuse_never_leaks_previous_content(
        first in proptest::collection::vec(any::<i64>(), 0..=16),
        second in proptest::collection::vec(any::<i64>(), 0..=16),
    ) {
        let mut scratch = FieldScratch::new();
        let _ = scratch.join(first.iter());
        let reused = scratch.join(second.iter()).to_owned();
        let fresh = FieldScratch::new().join(second.iter()).to_owned();
        prop_assert_eq!(reused, fresh);
    }

    #[test]
    fn with_preserves_order_and_parent(
        parent_keys in proptest::collection::vec("[a-z]{1,4}", 0..=8),
        extra_keys in proptest::collection::vec("[a-z]{1,4}", 0..=8),
    ) {
        let parent: Fields = parent_keys.iter().map(|k| Field::bool(k.as_str(), true)).collect();
        let child = parent.with(extra_keys.iter().map(|k| Field::bool(k.as_str(), false)));

        prop_assert_eq!(parent.len(), parent_keys.len());
        let child_keys: Vec<&str> = child.iter().map(Field::key).collect();
        let expected: Vec<&str> = parent_keys
            .iter()
            .chain(extra_keys.iter())
            .map(String::as_str)
            .collect();
        prop_assert_eq!(child_keys, expected);
    }

    #[test]
    fn to_text_always_ends_with_one_newline(message in "[^\n]{0,16}", n in 0usize..8) {
        let fields: Fields = (0..n).map(|i| Field::uint("i", i)).collect();
        let text = fields.to_text(&message);
        prop_assert!(text.ends_with('\n'));
        prop_assert!(!text.ends_with("\n\n"));
        prop_assert!(text.starts_with(&message));
    }
}
