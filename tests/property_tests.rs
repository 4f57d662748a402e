//! Property-based tests for combination enumeration
//!
//! - Test combinatorial invariants of the depth-first walk
//! - Run with ProptestConfig::with_cases(100)

use expauto::enumerator::{Factor, FactorLevel, VariationEnumerator};
use expauto::experiment::{Variation, VariationKind};
use expauto::provider::ValueProviderSpec;
use proptest::prelude::*;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// A factor declaration: provider values plus admissible range.
#[derive(Debug, Clone)]
struct FactorSpec {
    values: Vec<i64>,
    min: i64,
    max: i64,
}

fn arb_factor_spec() -> impl Strategy<Value = FactorSpec> {
    (
        proptest::collection::vec(-20i64..20, 1..5),
        -20i64..0,
        0i64..20,
    )
        .prop_map(|(mut values, min, max)| {
            // strictly increasing providers, as the stop rule assumes
            values.sort_unstable();
            values.dedup();
            FactorSpec { values, min, max }
        })
}

fn arb_factor_specs() -> impl Strategy<Value = Vec<FactorSpec>> {
    proptest::collection::vec(arb_factor_spec(), 0..4)
}

fn variations(specs: &[FactorSpec]) -> Vec<Variation> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            Variation::new(
                format!("f{i}"),
                format!("target-{i}"),
                VariationKind::LoopIteration,
                ValueProviderSpec::Set {
                    values: spec.values.clone(),
                },
            )
            .with_range(spec.min, spec.max)
        })
        .collect()
}

/// Admissible values computed directly from the declaration.
fn expected_admissible(spec: &FactorSpec) -> Vec<i64> {
    spec.values
        .iter()
        .copied()
        .take_while(|v| *v <= spec.max)
        .filter(|v| *v >= spec.min)
        .collect()
}

fn walk(factors: &[Factor<'_>]) -> (usize, Vec<Vec<FactorLevel>>, Vec<String>) {
    let mut levels = Vec::new();
    let mut fragments = Vec::new();
    let count = VariationEnumerator::new(factors)
        .for_each_combination(|c| {
            levels.push(c.levels());
            fragments.push(c.fragment());
            Ok::<(), ()>(())
        })
        .unwrap();
    (count, levels, fragments)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: callback count is the product of admissible-set sizes
    #[test]
    fn prop_count_is_product_of_admissible_sizes(specs in arb_factor_specs()) {
        let vars = variations(&specs);
        let factors = Factor::from_variations(&vars).unwrap();

        let expected: usize = specs.iter().map(|s| expected_admissible(s).len()).product();
        let (count, levels, _) = walk(&factors);

        prop_assert_eq!(count, expected);
        prop_assert_eq!(levels.len(), expected);
        prop_assert_eq!(VariationEnumerator::new(&factors).count(), expected as u128);
    }

    /// Property: every enumerated value lies in its factor's range
    #[test]
    fn prop_values_within_range(specs in arb_factor_specs()) {
        let vars = variations(&specs);
        let factors = Factor::from_variations(&vars).unwrap();
        let (_, levels, _) = walk(&factors);

        for combination in &levels {
            prop_assert_eq!(combination.len(), specs.len());
            for (level, spec) in combination.iter().zip(&specs) {
                prop_assert!(level.value >= spec.min && level.value <= spec.max);
            }
        }
    }

    /// Property: combinations follow nested-loop order, first factor slowest
    #[test]
    fn prop_nested_loop_order(specs in arb_factor_specs()) {
        let vars = variations(&specs);
        let factors = Factor::from_variations(&vars).unwrap();
        let (_, levels, _) = walk(&factors);

        let mut expected: Vec<Vec<i64>> = vec![Vec::new()];
        for spec in &specs {
            let admissible = expected_admissible(spec);
            expected = expected
                .into_iter()
                .flat_map(|prefix| {
                    admissible.iter().map(move |v| {
                        let mut next = prefix.clone();
                        next.push(*v);
                        next
                    })
                })
                .collect();
        }

        let actual: Vec<Vec<i64>> = levels
            .iter()
            .map(|c| c.iter().map(|l| l.value).collect())
            .collect();
        prop_assert_eq!(actual, expected);
    }

    /// Property: enumerating twice yields the same sequence
    #[test]
    fn prop_enumeration_idempotent(specs in arb_factor_specs()) {
        let vars = variations(&specs);
        let factors = Factor::from_variations(&vars).unwrap();

        let (_, first, first_fragments) = walk(&factors);
        let (_, second, second_fragments) = walk(&factors);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first_fragments, second_fragments);
    }

    /// Property: fragments are unique and name every factor in order
    #[test]
    fn prop_fragments_deterministic_and_unique(specs in arb_factor_specs()) {
        let vars = variations(&specs);
        let factors = Factor::from_variations(&vars).unwrap();
        let (_, levels, fragments) = walk(&factors);

        for (combination, fragment) in levels.iter().zip(&fragments) {
            let rebuilt: Vec<String> = combination
                .iter()
                .map(|l| format!("{}={}", l.name, l.value))
                .collect();
            prop_assert_eq!(fragment, &rebuilt.join(", "));
        }

        let mut unique = fragments.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), fragments.len());
    }

    /// Property: a cap on probes never admits more values than it allows
    #[test]
    fn prop_max_variations_caps_probes(spec in arb_factor_spec(), cap in 0u64..6) {
        let var = variations(std::slice::from_ref(&spec))
            .remove(0)
            .with_max_variations(cap);
        let factor = Factor::from_variation(&var).unwrap();

        let admissible = factor.admissible_values();
        prop_assert!(admissible.len() as u64 <= cap);

        let probed = usize::try_from(cap).unwrap().min(spec.values.len());
        let truncated = FactorSpec { values: spec.values[..probed].to_vec(), ..spec };
        prop_assert_eq!(admissible, expected_admissible(&truncated));
    }
}
