//! ASME B31.3 304.1.2 요구 두께 회귀 테스트. 손계산 값과 비교한다.
use pipe_wall_toolbox::b31_3::{
    evaluate, required_thickness, DegenerateInput, DesignParameters, ThicknessInput,
};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn input(p: f64, d: f64, s: Option<f64>, ca: f64) -> ThicknessInput {
    ThicknessInput {
        pressure: p,
        outer_diameter: d,
        allowable_stress: s,
        corrosion_allowance: ca,
        ..ThicknessInput::default()
    }
}

#[test]
fn imperial_ten_inch_a106b() {
    let t = required_thickness(&input(1000.0, 10.75, Some(20000.0), 0.0625));
    assert_close("t", t, 0.37255, 1e-5);
}

#[test]
fn metric_dn500_in_kpa_and_mm() {
    // 식은 단위에 무관하므로 kPa/mm 를 그대로 넣어도 된다.
    let t = required_thickness(&input(5110.0, 508.0, Some(138000.0), 1.6));
    assert_close("t", t, 12.42067, 1e-6);
}

#[test]
fn missing_stress_counts_as_zero() {
    let t = required_thickness(&input(1000.0, 10.75, None, 0.0625));
    assert_close("t", t, 15.42857, 1e-6);
    let t = required_thickness(&input(1000.0, 10.0, None, 0.0625));
    assert_close("t", t, 14.3571428, 1e-7);
}

#[test]
fn round_diameter_with_and_without_corrosion_allowance() {
    let with_ca = required_thickness(&input(1000.0, 10.0, Some(20000.0), 0.0625));
    let without = required_thickness(&input(1000.0, 10.0, Some(20000.0), 0.0));
    assert_close("with ca", with_ca, 0.3515406, 1e-7);
    assert_close("without ca", without, 0.280112, 1e-6);
    // c 는 (1 - 제작공차) 로 나눈 만큼 더해진다.
    assert_close("ca share", with_ca - without, 0.0625 / 0.875, 1e-9);
}

#[test]
fn custom_coefficients() {
    let t = required_thickness(&ThicknessInput {
        gamma: 1.0,
        mill_tolerance: 0.0,
        ..input(500.0, 5.0, Some(10000.0), 0.0)
    });
    assert_close("gamma=1, no mill tolerance", t, 0.1190476, 1e-7);

    let t = required_thickness(&ThicknessInput {
        e: 0.9,
        w: 0.8,
        gamma: 0.5,
        mill_tolerance: 0.1,
        ..input(5000.0, 24.0, Some(30000.0), 0.25)
    });
    assert_close("welded pipe", t, 3.0440295, 1e-7);
}

#[test]
fn mill_tolerance_at_or_above_one_reports_zero() {
    for mill_tolerance in [1.0, 2.0] {
        let result = evaluate(&ThicknessInput {
            mill_tolerance,
            ..input(1000.0, 10.0, Some(20000.0), 0.0625)
        });
        assert_eq!(result.required_thickness, 0.0);
        assert_eq!(
            result.degenerate,
            Some(DegenerateInput::MillToleranceAtOrAboveOne)
        );
    }
}

#[test]
fn zero_denominator_reports_zero() {
    let result = evaluate(&input(0.0, 10.0, None, 0.0625));
    assert_eq!(result.required_thickness, 0.0);
    assert_eq!(result.degenerate, Some(DegenerateInput::ZeroDenominator));
}

#[test]
fn regular_result_is_not_degenerate() {
    let result = evaluate(&input(1000.0, 10.0, Some(20000.0), 0.0));
    assert!(result.degenerate.is_none());
    assert_close(
        "pressure design thickness",
        result.pressure_design_thickness,
        10000.0 / 40800.0,
        1e-12,
    );
}

#[test]
fn design_parameters_feed_thickness_input() {
    let params = DesignParameters {
        pressure: 1000.0,
        corrosion_allowance: 0.0625,
        allowable_stress: Some(20000.0),
        ..DesignParameters::default()
    };
    let t = required_thickness(&params.thickness_input(10.75));
    assert_close("t", t, 0.37255, 1e-5);
}
