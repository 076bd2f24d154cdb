use consensus_axis::consensus::{
    candidate_axes, level1_consensus, AxisVerdict, ConsensusDetector, ConsensusMode,
    DetectorOptions,
};
use consensus_axis::error::ConsensusError;
use consensus_axis::{InversionEngine, WeightedProfile};
use rstest::rstest;
use std::sync::Arc;

mod common;
use common::{profile, ranking};

fn detectors() -> [ConsensusDetector; 2] {
    let engine = Arc::new(InversionEngine::new());
    [
        ConsensusDetector::new(engine.clone()),
        ConsensusDetector::with_options(engine, DetectorOptions { parallel: true }),
    ]
}

#[rstest]
#[case::clear_peak(&[(&[1, 2, 3][..], 3), (&[1, 3, 2][..], 2), (&[2, 1, 3][..], 2)], ConsensusMode::Strict, Some(&[1, 2, 3][..]))]
#[case::second_candidate(&[(&[1, 2, 3][..], 4), (&[1, 3, 2][..], 4), (&[3, 1, 2][..], 4), (&[2, 1, 3][..], 2), (&[3, 2, 1][..], 2)], ConsensusMode::Strict, Some(&[1, 3, 2][..]))]
#[case::equal_distance_strict(&[(&[1, 2, 3][..], 3), (&[1, 3, 2][..], 2), (&[2, 1, 3][..], 1)], ConsensusMode::Strict, None)]
#[case::equal_distance_flexible(&[(&[1, 2, 3][..], 3), (&[1, 3, 2][..], 2), (&[2, 1, 3][..], 1)], ConsensusMode::Flexible, Some(&[1, 2, 3][..]))]
#[case::partial_shell_strict(&[(&[1, 2, 3][..], 3), (&[1, 3, 2][..], 2)], ConsensusMode::Strict, None)]
#[case::partial_shell_flexible(&[(&[1, 2, 3][..], 3), (&[1, 3, 2][..], 2)], ConsensusMode::Flexible, Some(&[1, 2, 3][..]))]
fn test_level1_consensus(
    #[case] pairs: &[(&[u32], u64)],
    #[case] mode: ConsensusMode,
    #[case] expected: Option<&[u32]>,
) {
    let p = profile(pairs);
    for detector in detectors() {
        let axis = detector.find_axis(&p, mode).unwrap();
        assert_eq!(axis.as_ref().map(|r| r.as_slice()), expected);
    }
    assert_eq!(
        level1_consensus(&p, mode).unwrap().as_ref().map(|r| r.as_slice()),
        expected
    );
}

#[rstest]
#[case(ConsensusMode::Strict)]
#[case(ConsensusMode::Flexible)]
fn test_single_alternative(#[case] mode: ConsensusMode) {
    let p = profile(&[(&[7], 5)]);
    let axis = level1_consensus(&p, mode).unwrap();
    assert_eq!(axis, Some(ranking(&[7])));
}

#[test]
fn test_single_ranking_is_its_own_axis() {
    let p = profile(&[(&[2, 0, 1, 3], 9)]);
    for mode in [ConsensusMode::Strict, ConsensusMode::Flexible] {
        assert_eq!(
            level1_consensus(&p, mode).unwrap(),
            Some(ranking(&[2, 0, 1, 3]))
        );
    }
}

#[test]
fn test_empty_profile_is_an_error() {
    let p: WeightedProfile<u32> = WeightedProfile::new();
    let err = level1_consensus(&p, ConsensusMode::Strict).unwrap_err();
    assert!(matches!(err, ConsensusError::InvalidInput(_)));
}

#[rstest]
#[case(ConsensusMode::Strict)]
#[case(ConsensusMode::Flexible)]
fn test_rankings_need_an_alternative(#[case] mode: ConsensusMode) {
    let err = WeightedProfile::from_orders(vec![(Vec::<u32>::new(), 1)]).unwrap_err();
    assert!(matches!(err, ConsensusError::InvalidInput(_)), "{:?}", err);

    // the only way to reach detection is through an empty profile, which is refused
    let p: WeightedProfile<u32> = WeightedProfile::new();
    assert!(matches!(
        level1_consensus(&p, mode),
        Err(ConsensusError::InvalidInput(_))
    ));
}

#[test]
fn test_first_passing_candidate_wins() {
    // both rankings are valid axes; profile order decides
    let forward = profile(&[(&[1, 2], 1), (&[2, 1], 1)]);
    let backward = profile(&[(&[2, 1], 1), (&[1, 2], 1)]);

    for detector in detectors() {
        assert_eq!(
            detector.find_axis(&forward, ConsensusMode::Strict).unwrap(),
            Some(ranking(&[1, 2]))
        );
        assert_eq!(
            detector.find_axis(&backward, ConsensusMode::Strict).unwrap(),
            Some(ranking(&[2, 1]))
        );
    }
}

#[test]
fn test_lower_weight_rankings_are_never_tried() {
    // only the heaviest ranking is hypothesised as the axis
    let p = profile(&[(&[1, 3, 2], 2), (&[1, 2, 3], 3), (&[3, 1, 2], 1), (&[2, 3, 1], 1)]);
    assert_eq!(candidate_axes(&p), vec![&ranking(&[1, 2, 3])]);
    assert_eq!(level1_consensus(&p, ConsensusMode::Strict).unwrap(), None);
}

#[test]
fn test_candidates_follow_profile_order() {
    let p = profile(&[(&[3, 1, 2], 4), (&[1, 2, 3], 2), (&[1, 3, 2], 4)]);
    assert_eq!(
        candidate_axes(&p),
        vec![&ranking(&[3, 1, 2]), &ranking(&[1, 3, 2])]
    );
}

#[test]
fn test_verdict_reasons() {
    let detector = ConsensusDetector::default();
    let axis = ranking(&[1, 2, 3]);

    let p = profile(&[(&[1, 2, 3], 3), (&[1, 3, 2], 2), (&[2, 1, 3], 1)]);
    assert_eq!(
        detector.evaluate_axis(&p, &axis, ConsensusMode::Strict).unwrap(),
        AxisVerdict::NotMonotone {
            position: 1,
            heavier_distance: 1,
            lighter_distance: 1
        }
    );

    let p = profile(&[(&[1, 2, 3], 3), (&[1, 3, 2], 2)]);
    assert_eq!(
        detector.evaluate_axis(&p, &axis, ConsensusMode::Strict).unwrap(),
        AxisVerdict::Incomplete {
            distance: 1,
            required: 2,
            available: 1
        }
    );
    assert!(detector
        .evaluate_axis(&p, &axis, ConsensusMode::Flexible)
        .unwrap()
        .is_consensus());
}

#[test]
fn test_axis_from_other_alternatives_is_rejected() {
    let detector = ConsensusDetector::default();
    let p = profile(&[(&[1, 2, 3], 3)]);
    let err = detector
        .evaluate_axis(&p, &ranking(&[4, 5, 6]), ConsensusMode::Strict)
        .unwrap_err();
    assert!(matches!(err, ConsensusError::InvalidInput(_)));
}

#[test]
fn test_scored_records_order() {
    let detector = ConsensusDetector::default();
    let p = profile(&[
        (&[3, 2, 1], 1),
        (&[2, 1, 3], 2),
        (&[1, 3, 2], 2),
        (&[1, 2, 3], 4),
    ]);
    let records = detector.score_records(&p, &ranking(&[1, 2, 3])).unwrap();
    let summary: Vec<(u64, u64)> = records.iter().map(|r| (r.weight, r.distance)).collect();
    assert_eq!(summary, vec![(4, 0), (2, 1), (2, 1), (1, 3)]);
    // ties keep profile order
    assert_eq!(records[1].ranking, &ranking(&[2, 1, 3]));
}

#[test]
fn test_detection_does_not_touch_profile() {
    let p = profile(&[(&[1, 2, 3], 3), (&[1, 3, 2], 2), (&[2, 1, 3], 2)]);
    let before = p.clone();
    level1_consensus(&p, ConsensusMode::Strict).unwrap();
    level1_consensus(&p, ConsensusMode::Flexible).unwrap();
    assert_eq!(p, before);
}

#[test]
fn test_profile_json_round_trip_keeps_verdict() {
    let json = r#"[{"ranking":[1,2,3],"weight":3},{"ranking":[1,3,2],"weight":2},{"ranking":[2,1,3],"weight":2}]"#;
    let p: WeightedProfile<u32> = serde_json::from_str(json).unwrap();
    assert_eq!(
        level1_consensus(&p, ConsensusMode::Strict).unwrap(),
        Some(ranking(&[1, 2, 3]))
    );
    assert_eq!(serde_json::to_string(&p).unwrap(), json);
}

#[rstest]
#[case::zero_weight(r#"[{"ranking":[1,2],"weight":0}]"#)]
#[case::duplicate_alternative(r#"[{"ranking":[1,1],"weight":2}]"#)]
#[case::no_alternatives(r#"[{"ranking":[],"weight":1}]"#)]
#[case::mixed_sets(r#"[{"ranking":[1,2],"weight":2},{"ranking":[1,3],"weight":1}]"#)]
fn test_malformed_profiles_fail_to_parse(#[case] json: &str) {
    assert!(serde_json::from_str::<WeightedProfile<u32>>(json).is_err());
}
