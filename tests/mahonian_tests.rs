use consensus_axis::cultures::factorial;
use consensus_axis::metric::max_inversions;
use consensus_axis::InversionEngine;
use rstest::rstest;

#[rstest]
#[case(4, 0, 1)]
#[case(4, 1, 3)]
#[case(4, 2, 5)]
#[case(4, 3, 6)]
#[case(4, 4, 5)]
#[case(4, 5, 3)]
#[case(4, 6, 1)]
#[case(4, 7, 0)]
#[case(0, 0, 1)]
#[case(0, 1, 0)]
#[case(1, 0, 1)]
#[case(1, 1, 0)]
#[case(5, 5, 22)]
#[case(6, 7, 101)]
fn test_mahonian_numbers(#[case] n: usize, #[case] k: usize, #[case] expected: u128) {
    let engine = InversionEngine::new();
    assert_eq!(engine.permutations_with_inversions(n, k), expected);
}

#[test]
fn test_rows_sum_to_factorial() {
    let engine = InversionEngine::new();
    for n in 0..=12 {
        let row = engine.mahonian_row(n);
        assert_eq!(row.len(), max_inversions(n) + 1);
        assert_eq!(row.iter().sum::<u128>(), factorial(n), "row {}", n);
    }
}

#[test]
fn test_row_four() {
    let engine = InversionEngine::new();
    assert_eq!(engine.mahonian_row(4), vec![1, 3, 5, 6, 5, 3, 1]);
}

#[test]
fn test_rows_are_symmetric() {
    let engine = InversionEngine::new();
    for n in 1..=9 {
        let row = engine.mahonian_row(n);
        let reversed: Vec<u128> = row.iter().rev().copied().collect();
        assert_eq!(row, reversed);
    }
}

#[test]
fn test_at_most_is_running_sum() {
    let engine = InversionEngine::new();
    assert_eq!(engine.permutations_with_at_most_inversions(4, 0), 1);
    assert_eq!(engine.permutations_with_at_most_inversions(4, 2), 9);
    assert_eq!(engine.permutations_with_at_most_inversions(4, 6), 24);
    assert_eq!(engine.permutations_with_at_most_inversions(4, 100), 24);
}

#[test]
fn test_exact_at_largest_supported_size() {
    let engine = InversionEngine::new();
    let total = engine
        .mahonian_row(34)
        .iter()
        .fold(0u128, |acc, v| acc.checked_add(*v).expect("fits"));
    assert_eq!(total, factorial(34));
}

#[test]
fn test_precomputed_engine_matches_lazy() {
    let lazy = InversionEngine::new();
    let eager = InversionEngine::with_capacity(10);
    assert_eq!(eager.cached_rows(), 11);
    for k in 0..=max_inversions(10) {
        assert_eq!(
            lazy.permutations_with_inversions(10, k),
            eager.permutations_with_inversions(10, k)
        );
    }
}

#[test]
fn test_reset_then_recompute() {
    let engine = InversionEngine::new();
    let before = engine.mahonian_row(7);
    engine.reset();
    assert_eq!(engine.cached_rows(), 1);
    assert_eq!(engine.mahonian_row(7), before);
}
