//! Behavior-driven tests for CAN-SLIM scoring
//!
//! These tests verify how the six criteria are graded, how missing data is
//! treated, and how the weighted composite behaves across the input space.

use canslim_core::{
    score_canslim, CanslimInputs, CriterionCode, Grade, ScreenerFilter, ValidationError,
};
use canslim_tests::leader_inputs;

fn with_value(code: CriterionCode, value: Option<f64>) -> CanslimInputs {
    with_value_in(leader_inputs(), code, value)
}

fn with_value_in(
    mut inputs: CanslimInputs,
    code: CriterionCode,
    value: Option<f64>,
) -> CanslimInputs {
    match code {
        CriterionCode::C => inputs.eps_growth_quarterly = value,
        CriterionCode::A => inputs.eps_growth_annual = value,
        CriterionCode::N => inputs.distance_from_52w_high = value,
        CriterionCode::S => inputs.volume_ratio = value,
        CriterionCode::L => inputs.rs_rating = value,
        CriterionCode::I => inputs.institutional_ownership = value,
    }
    inputs
}

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn when_stock_clears_every_threshold_it_earns_grade_a() {
    // Given: A leader clearing every default threshold
    let inputs = leader_inputs();

    // When: The stock is scored with the default filter
    let score = score_canslim(&inputs, &ScreenerFilter::default()).expect("valid input");

    // Then: All six criteria pass and the composite is an A
    assert_eq!(score.passing_count, 6);
    assert_eq!(score.total_score, 77);
    assert_eq!(score.overall_grade, Grade::A);
    for criterion in score.criteria() {
        assert_eq!(criterion.grade, Grade::A, "criterion {:?}", criterion.code);
    }
}

#[test]
fn when_quarterly_growth_is_missing_only_that_criterion_fails() {
    // Given: The same leader with no quarterly EPS figure
    let inputs = with_value(CriterionCode::C, None);

    // When: The stock is scored
    let score = score_canslim(&inputs, &ScreenerFilter::default()).expect("valid input");

    // Then: C drops to F/0 and the composite loses its weight
    assert_eq!(score.c_score.grade, Grade::F);
    assert_eq!(score.c_score.score, 0);
    assert_eq!(score.c_score.value, None);
    assert_eq!(score.passing_count, 5);
    assert_eq!(score.total_score, 62);
    assert_eq!(score.overall_grade, Grade::B);
}

// =============================================================================
// Null safety and bounds
// =============================================================================

#[test]
fn when_any_subset_of_metrics_is_missing_scoring_still_succeeds() {
    // Given: Every one of the 64 presence patterns over the six metrics
    for mask in 0_u8..64 {
        let mut inputs = leader_inputs();
        for (bit, code) in CriterionCode::ALL.iter().enumerate() {
            if mask & (1 << bit) == 0 {
                inputs = with_value_in(inputs, *code, None);
            }
        }

        // When: The stock is scored
        let score = score_canslim(&inputs, &ScreenerFilter::default())
            .unwrap_or_else(|err| panic!("mask {mask:06b} failed: {err}"));

        // Then: Missing criteria read F/0 and the totals stay in range
        for criterion in score.criteria() {
            if criterion.value.is_none() {
                assert_eq!(criterion.score, 0);
                assert_eq!(criterion.grade, Grade::F);
            }
        }
        assert!(score.total_score <= 100);
        assert!(score.passing_count <= 6);
        assert_eq!(u32::from(score.passing_count), mask.count_ones());
    }
}

#[test]
fn when_values_are_extreme_scores_saturate_within_bounds() {
    // Given: Far-beyond-threshold and deeply negative readings
    let huge = CanslimInputs {
        eps_growth_quarterly: Some(10_000.0),
        eps_growth_annual: Some(1e12),
        distance_from_52w_high: Some(0.0),
        volume_ratio: Some(500.0),
        rs_rating: Some(100.0),
        institutional_ownership: Some(100.0),
    };
    let dismal = CanslimInputs {
        eps_growth_quarterly: Some(-95.0),
        eps_growth_annual: Some(-1e9),
        distance_from_52w_high: Some(1e6),
        volume_ratio: Some(0.0),
        rs_rating: Some(0.0),
        institutional_ownership: Some(0.0),
    };

    // When: Both are scored, with an RS bar the top reading doubles
    let filter = ScreenerFilter {
        min_rs_rating: 50.0,
        ..ScreenerFilter::default()
    };
    let top = score_canslim(&huge, &filter).expect("valid");
    let bottom = score_canslim(&dismal, &ScreenerFilter::default()).expect("valid");

    // Then: Scores pin to the ends of the scale
    assert_eq!(top.total_score, 100);
    assert_eq!(top.passing_count, 6);
    assert_eq!(bottom.total_score, 0);
    assert_eq!(bottom.overall_grade, Grade::F);
}

// =============================================================================
// Monotonicity
// =============================================================================

#[test]
fn when_a_higher_is_better_metric_improves_its_grade_never_worsens() {
    // Given: Rising values for each higher-is-better criterion
    let sweeps = [
        (CriterionCode::C, -50.0, 5.0),
        (CriterionCode::A, -50.0, 5.0),
        (CriterionCode::S, 0.0, 0.1),
        (CriterionCode::L, 0.0, 2.5),
        (CriterionCode::I, 0.0, 2.5),
    ];

    for (code, start, step) in sweeps {
        let mut previous: Option<(u8, Grade)> = None;
        for i in 0..40 {
            // When: The stock is scored at each value
            let value = start + step * f64::from(i);
            let score = score_canslim(&with_value(code, Some(value)), &ScreenerFilter::default())
                .expect("valid");
            let criterion = score.criterion(code);

            // Then: Score and grade never move backwards
            if let Some((last_score, last_grade)) = previous {
                assert!(criterion.score >= last_score, "{code:?} at {value}");
                assert!(criterion.grade <= last_grade, "{code:?} at {value}");
            }
            previous = Some((criterion.score, criterion.grade));
        }
    }
}

#[test]
fn when_distance_from_high_grows_new_highs_score_never_improves() {
    // Given: A widening gap below the 52-week high
    let mut previous = u8::MAX;
    for i in 0..60 {
        let distance = f64::from(i);

        // When: The stock is scored
        let score = score_canslim(
            &with_value(CriterionCode::N, Some(distance)),
            &ScreenerFilter::default(),
        )
        .expect("valid");

        // Then: The N score is non-increasing
        assert!(score.n_score.score <= previous, "distance {distance}");
        previous = score.n_score.score;
    }
}

#[test]
fn when_metric_sits_exactly_on_threshold_it_passes() {
    // Given: Every metric equal to its default threshold
    let inputs = CanslimInputs {
        eps_growth_quarterly: Some(25.0),
        eps_growth_annual: Some(25.0),
        distance_from_52w_high: Some(15.0),
        volume_ratio: Some(1.5),
        rs_rating: Some(80.0),
        institutional_ownership: Some(25.0),
    };

    // When: The stock is scored
    let score = score_canslim(&inputs, &ScreenerFilter::default()).expect("valid");

    // Then: Each criterion scores exactly 70 and passes
    assert!(score.criteria().iter().all(|criterion| criterion.score == 70));
    assert_eq!(score.passing_count, 6);
    assert_eq!(score.total_score, 70);
}

// =============================================================================
// Idempotence and atomic failure
// =============================================================================

#[test]
fn when_scoring_twice_results_are_identical() {
    let inputs = with_value(CriterionCode::S, Some(1.23));
    let first = score_canslim(&inputs, &ScreenerFilter::default()).expect("valid");
    let second = score_canslim(&inputs, &ScreenerFilter::default()).expect("valid");
    assert_eq!(first, second);
}

#[test]
fn when_one_metric_is_invalid_no_partial_score_is_returned() {
    // Given: A negative distance alongside otherwise valid data
    let inputs = with_value(CriterionCode::N, Some(-4.0));

    // When: The stock is scored
    let result = score_canslim(&inputs, &ScreenerFilter::default());

    // Then: The call fails as a whole and names the field
    assert_eq!(
        result,
        Err(ValidationError::NegativeValue {
            field: "distance_from_52w_high"
        })
    );
}

#[test]
fn when_rs_rating_exceeds_scale_scoring_fails() {
    let inputs = with_value(CriterionCode::L, Some(101.0));
    let err = score_canslim(&inputs, &ScreenerFilter::default()).expect_err("must fail");
    assert_eq!(err.field(), Some("rs_rating"));
}
