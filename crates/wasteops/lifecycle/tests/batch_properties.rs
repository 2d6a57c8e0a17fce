//! Property tests: counts, ordering and proration over arbitrary batches.

use proptest::prelude::*;
use wasteops_lifecycle::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_calculation() -> impl Strategy<Value = QuantityCalculation> {
    prop_oneof![
        // well formed: adjusted never exceeds original
        (0.0f64..10_000.0, 0.0f64..=1.0)
            .prop_map(|(original, ratio)| QuantityCalculation::new(original, original * ratio)),
        // anything goes
        (-100.0f64..10_000.0, -100.0f64..10_000.0)
            .prop_map(|(original, adjusted)| QuantityCalculation::new(original, adjusted)),
    ]
}

fn arb_transition() -> impl Strategy<Value = TerminationTransition> {
    (
        any::<bool>(),
        proptest::option::weighted(0.9, "C-[0-9]{1,4}"),
        proptest::option::of(arb_calculation()),
    )
        .prop_map(|(success, number, calculation)| TerminationTransition {
            success,
            old_contract: number.map(|n| OldContractRef::new(n, "2025-01-15")),
            calculation,
        })
}

fn arb_batch() -> impl Strategy<Value = TerminationBatch> {
    prop::collection::vec(arb_transition(), 0..16).prop_map(|terminated| TerminationBatch {
        message: "batch".into(),
        terminated,
    })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn success_count_is_length_of_successful_list(batch in arb_batch()) {
        prop_assert_eq!(success_count(&batch), successful_transitions(&batch).len());
        prop_assert_eq!(TerminationReview::new(&batch).success_count(), success_count(&batch));
    }

    #[test]
    fn successful_list_preserves_processing_order(batch in arb_batch()) {
        let expected: Vec<&TerminationTransition> = batch
            .terminated
            .iter()
            .filter(|t| t.success && t.validate().is_ok())
            .collect();
        prop_assert_eq!(successful_transitions(&batch), expected);

        let review = TerminationReview::new(&batch);
        let positions: Vec<usize> = review.closed.iter().map(|c| c.position).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        prop_assert_eq!(positions, sorted);
    }

    #[test]
    fn quantity_delta_is_never_negative(transition in arb_transition()) {
        match quantity_delta(&transition) {
            Ok(Some(delta)) => prop_assert!(delta >= 0.0),
            Ok(None) => prop_assert!(transition.calculation.is_none()),
            Err(_) => prop_assert!(!transition.is_valid()),
        }
    }

    #[test]
    fn every_record_lands_in_exactly_one_group(batch in arb_batch()) {
        let review = TerminationReview::new(&batch);
        prop_assert_eq!(
            review.closed.len() + review.failed.len() + review.flagged.len(),
            batch.terminated.len()
        );
        prop_assert_eq!(review.is_displayable(), is_displayable(Some(&batch)));
    }
}

#[test]
fn empty_batch_cases() {
    assert!(is_empty_batch(None));
    let empty: TerminationBatch = serde_json::from_str(r#"{"terminated": []}"#).unwrap();
    assert!(is_empty_batch(Some(&empty)));

    let one: TerminationBatch = serde_json::from_str(
        r#"{"terminated": [{"success": true, "oldContract": {"contract_number": "C-1", "new_end_date": "2025-01-15"}}]}"#,
    )
    .unwrap();
    assert!(!is_empty_batch(Some(&one)));
}
