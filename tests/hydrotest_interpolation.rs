use pipe_wall_toolbox::hydrotest::{hydrotest_pressure, HydrotestError};
use pipe_wall_toolbox::interpolation::linear_interpolation;
use proptest::prelude::*;

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

#[test]
fn test_pressure_is_one_and_a_half_times_design_at_equal_stress() {
    assert_close("Pt", hydrotest_pressure(100.0, 20000.0, 20000.0).unwrap(), 150.0, 1e-12);
}

#[test]
fn stress_ratio_raises_test_pressure() {
    // A106B: 100 °F 20000 psi, 650 °F 17300 psi
    let pt = hydrotest_pressure(1000.0, 20000.0, 17300.0).unwrap();
    assert_close("Pt", pt, 1734.104_046, 1e-9);
}

#[test]
fn zero_design_stress_is_an_error() {
    assert_eq!(
        hydrotest_pressure(1000.0, 20000.0, 0.0),
        Err(HydrotestError::ZeroDesignStress)
    );
}

#[test]
fn non_finite_input_is_an_error() {
    assert_eq!(
        hydrotest_pressure(f64::NAN, 20000.0, 20000.0),
        Err(HydrotestError::NonFinite("design_pressure"))
    );
    assert!(hydrotest_pressure(1000.0, f64::INFINITY, 20000.0).is_err());
}

#[test]
fn interpolates_between_points() {
    assert_eq!(linear_interpolation(5.0, 0.0, 0.0, 10.0, 100.0), 50.0);
    assert_close(
        "descending",
        linear_interpolation(725.0, 700.0, 16700.0, 750.0, 13900.0),
        15300.0,
        1e-12,
    );
}

#[test]
fn interpolation_extrapolates_outside_span() {
    assert_eq!(linear_interpolation(15.0, 0.0, 0.0, 10.0, 100.0), 150.0);
    assert_eq!(linear_interpolation(-5.0, 0.0, 0.0, 10.0, 100.0), -50.0);
}

#[test]
fn coincident_abscissae_return_first_ordinate() {
    assert_eq!(linear_interpolation(3.0, 2.0, 7.0, 2.0, 9.0), 7.0);
}

proptest! {
    #[test]
    fn coincident_abscissae_always_return_y0(
        x in -1.0e6f64..1.0e6,
        x0 in -1.0e6f64..1.0e6,
        y0 in -1.0e6f64..1.0e6,
        y1 in -1.0e6f64..1.0e6,
    ) {
        prop_assert_eq!(linear_interpolation(x, x0, y0, x0, y1), y0);
    }

    #[test]
    fn end_points_are_reproduced(
        x0 in -1.0e3f64..1.0e3,
        dx in 1.0e-3f64..1.0e3,
        y0 in -1.0e3f64..1.0e3,
        y1 in -1.0e3f64..1.0e3,
    ) {
        let x1 = x0 + dx;
        prop_assert!((linear_interpolation(x0, x0, y0, x1, y1) - y0).abs() <= 1e-9);
        prop_assert!((linear_interpolation(x1, x0, y0, x1, y1) - y1).abs() <= 1e-6);
    }
}
