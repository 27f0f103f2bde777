//! Property-based tests for the OT algebra.
//!
//! Operations are generated against random documents (including multi-byte
//! characters) and may leave an uncovered tail, which is retained.

use logos_ot::{transform, Operation, Step, UndoStack};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn document() -> impl Strategy<Value = String> {
    "[a-zé✓ ]{0,24}"
}

/// A random operation over a document of `len` characters.
fn operation_for(len: usize) -> impl Strategy<Value = Operation> {
    prop::collection::vec((0u8..3, 1usize..6, "[A-Zñ]{1,4}"), 0..12).prop_map(move |parts| {
        let mut op = Operation::new(len);
        let mut remaining = len;
        for (kind, n, text) in parts {
            match kind {
                0 => {
                    let n = n.min(remaining);
                    op = op.retain(n);
                    remaining -= n;
                }
                1 => op = op.insert(text),
                _ => {
                    let n = n.min(remaining);
                    op = op.delete(n);
                    remaining -= n;
                }
            }
        }
        op
    })
}

fn document_and_op() -> impl Strategy<Value = (String, Operation)> {
    document().prop_flat_map(|doc| {
        let len = doc.chars().count();
        (Just(doc), operation_for(len))
    })
}

fn concurrent_pair() -> impl Strategy<Value = (String, Operation, Operation)> {
    document().prop_flat_map(|doc| {
        let len = doc.chars().count();
        (Just(doc), operation_for(len), operation_for(len))
    })
}

fn sequential_pair() -> impl Strategy<Value = (String, Operation, Operation)> {
    document_and_op().prop_flat_map(|(doc, a)| {
        let len = a.target_len();
        (Just(doc), Just(a), operation_for(len))
    })
}

fn sequential_triple() -> impl Strategy<Value = (String, Operation, Operation, Operation)> {
    sequential_pair().prop_flat_map(|(doc, a, b)| {
        let len = b.target_len();
        (Just(doc), Just(a), Just(b), operation_for(len))
    })
}

/// Two local edits in sequence, then a remote insert of `#` (a character no
/// generator produces) into the resulting document.
fn local_pair_then_remote() -> impl Strategy<Value = (String, Operation, Operation, Operation)> {
    sequential_pair().prop_flat_map(|(doc, a, b)| {
        let len = b.target_len();
        (Just(doc), Just(a), Just(b), 0..=len).prop_map(move |(doc, a, b, at)| {
            let remote = Operation::new(len).retain(at).insert("#");
            (doc, a, b, remote)
        })
    })
}

fn same_kind(a: &Step, b: &Step) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

// =============================================================================
// Builder
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn builder_keeps_length_invariants((_doc, op) in document_and_op()) {
        let steps = op.steps();
        let consumed: usize = steps
            .iter()
            .map(|s| match s {
                Step::Retain(n) | Step::Delete(n) => *n,
                Step::Insert(_) => 0,
            })
            .sum();
        let produced: usize = steps
            .iter()
            .map(|s| match s {
                Step::Retain(n) => *n,
                Step::Insert(text) => text.chars().count(),
                Step::Delete(_) => 0,
            })
            .sum();

        prop_assert_eq!(consumed, op.base_len());
        prop_assert_eq!(produced, op.target_len());
    }

    #[test]
    fn builder_output_is_canonical((_doc, op) in document_and_op()) {
        let steps = op.steps();
        prop_assert!(steps.iter().all(|s| !s.is_empty()));
        prop_assert!(steps.windows(2).all(|w| !same_kind(&w[0], &w[1])));
    }

    #[test]
    fn apply_produces_target_len((doc, op) in document_and_op()) {
        let out = op.apply(&doc).unwrap();
        prop_assert_eq!(out.chars().count(), op.target_len());
    }
}

// =============================================================================
// Transform
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn transform_converges_with_priority((doc, a, b) in concurrent_pair()) {
        let b_prime = transform(&a, &b, true).unwrap();
        let a_prime = transform(&b, &a, false).unwrap();

        let left = b_prime.apply(&a.apply(&doc).unwrap()).unwrap();
        let right = a_prime.apply(&b.apply(&doc).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn transform_converges_without_priority((doc, a, b) in concurrent_pair()) {
        let b_prime = transform(&a, &b, false).unwrap();
        let a_prime = transform(&b, &a, true).unwrap();

        let left = b_prime.apply(&a.apply(&doc).unwrap()).unwrap();
        let right = a_prime.apply(&b.apply(&doc).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn transform_pair_composes_equally((doc, a, b) in concurrent_pair()) {
        let (a_prime, b_prime) = a.transform(&b).unwrap();
        prop_assert_eq!(a_prime.base_len(), b.target_len());
        prop_assert_eq!(b_prime.base_len(), a.target_len());

        let ab = a.compose(&b_prime).unwrap();
        let ba = b.compose(&a_prime).unwrap();
        prop_assert_eq!(ab.apply(&doc).unwrap(), ba.apply(&doc).unwrap());
    }
}

// =============================================================================
// Compose
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn compose_matches_sequential_apply((doc, a, b) in sequential_pair()) {
        let composed = a.compose(&b).unwrap();
        prop_assert_eq!(composed.base_len(), a.base_len());
        prop_assert_eq!(composed.target_len(), b.target_len());

        let sequential = b.apply(&a.apply(&doc).unwrap()).unwrap();
        prop_assert_eq!(composed.apply(&doc).unwrap(), sequential);
    }

    #[test]
    fn compose_is_associative((doc, a, b, c) in sequential_triple()) {
        let left = a.compose(&b).unwrap().compose(&c).unwrap();
        let right = a.compose(&b.compose(&c).unwrap()).unwrap();
        prop_assert_eq!(left.apply(&doc).unwrap(), right.apply(&doc).unwrap());
    }
}

// =============================================================================
// Invert & wire
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn invert_round_trips((doc, op) in document_and_op()) {
        let inverse = op.invert(&doc).unwrap();
        prop_assert_eq!(inverse.base_len(), op.target_len());
        prop_assert_eq!(inverse.target_len(), op.base_len());

        let edited = op.apply(&doc).unwrap();
        prop_assert_eq!(inverse.apply(&edited).unwrap(), doc);
    }

    #[test]
    fn json_round_trips((doc, op) in document_and_op()) {
        let decoded = Operation::from_json(op.to_json()).unwrap();
        prop_assert_eq!(&decoded, &op);
        prop_assert_eq!(decoded.apply(&doc).unwrap(), op.apply(&doc).unwrap());

        let text = op.to_json_string().unwrap();
        prop_assert_eq!(Operation::from_json_str(&text).unwrap(), op);
    }
}

// =============================================================================
// Undo
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn undo_keeps_remote_insert((doc, a, b, remote) in local_pair_then_remote()) {
        let mut stack = UndoStack::default();
        stack.record(&a, &doc).unwrap();
        let after_a = a.apply(&doc).unwrap();
        stack.record(&b, &after_a).unwrap();
        let after_b = b.apply(&after_a).unwrap();

        let mut text = remote.apply(&after_b).unwrap();
        stack.transform_remote(&remote).unwrap();
        let before_undo = text.clone();

        let mut undone = 0;
        while let Some(undo) = stack.undo(&text).unwrap() {
            text = undo.apply(&text).unwrap();
            prop_assert!(text.contains('#'));
            undone += 1;
        }
        prop_assert!(undone <= 2);

        while let Some(redo) = stack.redo(&text).unwrap() {
            text = redo.apply(&text).unwrap();
            prop_assert!(text.contains('#'));
        }
        prop_assert_eq!(text, before_undo);
    }
}
