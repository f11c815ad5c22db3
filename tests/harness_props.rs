// Property checks over the library harness.

use design_patterns::{Harness, HarnessError, Mode};
use proptest::prelude::*;

fn harness() -> Harness {
    Harness::builtin().expect("builtin catalog is valid")
}

fn ids() -> Vec<String> {
    harness().registry().ids().map(str::to_string).collect()
}

proptest! {
    // Running ids back to back into one sink equals concatenating their
    // individual transcripts.
    #[test]
    fn test_sequence_is_concatenation(picks in prop::collection::vec(0usize..23, 0..8)) {
        let harness = harness();
        let ids = ids();
        let mut combined = Vec::new();
        let mut expected = String::new();
        for pick in picks {
            let id = &ids[pick];
            harness.run_one(id, &mut combined).unwrap();
            expected.push_str(&harness.render_one(id).unwrap());
        }
        prop_assert_eq!(String::from_utf8(combined).unwrap(), expected);
    }

    // Anything outside the catalog is rejected without output.
    #[test]
    fn test_unknown_ids_write_nothing(id in "[a-z][a-z-]{0,24}") {
        let harness = harness();
        prop_assume!(harness.registry().get(&id).is_none());
        let mut out = Vec::new();
        let err = harness.run_one(&id, &mut out).unwrap_err();
        let is_unknown = matches!(err, HarnessError::UnknownPattern { .. });
        prop_assert!(is_unknown);
        prop_assert_eq!(err.exit_code(), 1);
        prop_assert!(out.is_empty());
    }

    #[test]
    fn test_single_argument_selects_one(id in "[a-z-]{1,24}") {
        let mode = Mode::from_args(vec![id.clone()]).unwrap();
        if id == "list" {
            prop_assert_eq!(mode, Mode::List);
        } else {
            prop_assert_eq!(mode, Mode::One(id));
        }
    }
}

#[test]
fn test_family_counts() {
    let harness = harness();
    let counts: Vec<usize> = harness
        .registry()
        .family_counts()
        .into_iter()
        .map(|(_, count)| count)
        .collect();
    assert_eq!(counts, vec![5, 7, 11]);
}
