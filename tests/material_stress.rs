use pipe_wall_toolbox::material_db::{
    allowable_stress, design_stress, exact_stress, materials, stepped_stress, stress_table, MaterialLookupError,
};
use pipe_wall_toolbox::units::{Units, KPA_PER_PSI};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

#[test]
fn exact_column_is_returned_without_interpolation() {
    let v = allowable_stress("A106B", Units::Imperial, 400.0, Units::Imperial).expect("lookup");
    assert_eq!(v.stress_psi, 19900.0);
    assert!(!v.interpolated);
    assert_eq!(v.lookup_temperature, 400.0);
}

#[test]
fn between_columns_is_linear() {
    let v = allowable_stress("A106B", Units::Imperial, 725.0, Units::Imperial).expect("lookup");
    assert!(v.interpolated);
    assert_close("725F", v.stress_psi, 15300.0, 1e-12);
}

#[test]
fn outside_table_is_rejected() {
    for t in [50.0, 1200.0] {
        let err = allowable_stress("A106B", Units::Imperial, t, Units::Imperial).unwrap_err();
        assert!(
            matches!(err, MaterialLookupError::OutOfRange { min, max, .. } if min == 100.0 && max == 1100.0),
            "{t}: {err:?}"
        );
    }
}

#[test]
fn outside_metric_table_is_rejected() {
    for t in [30.0, 650.0] {
        let err = allowable_stress("A106B", Units::Metric, t, Units::Metric).unwrap_err();
        assert!(
            matches!(err, MaterialLookupError::OutOfRange { min, max, .. } if min == 40.0 && max == 600.0),
            "{t}: {err:?}"
        );
    }
}

#[test]
fn design_lookup_clamps_only_below_first_column() {
    // 100 °F = 37.8 °C
    let s = design_stress("A106B", Units::Metric, 100.0, Units::Imperial).expect("below 40C");
    assert_close("40C column", s, 138000.0 / KPA_PER_PSI, 1e-12);
    assert_eq!(design_stress("A106B", Units::Imperial, 50.0, Units::Imperial), Some(20000.0));
    assert_eq!(design_stress("A106B", Units::Metric, 650.0, Units::Metric), None);
    assert_eq!(design_stress("A106B", Units::Imperial, f64::NAN, Units::Imperial), None);
    assert_eq!(design_stress("A999", Units::Imperial, 400.0, Units::Imperial), None);
}

#[test]
fn unknown_material() {
    let err = allowable_stress("A999", Units::Imperial, 400.0, Units::Imperial).unwrap_err();
    assert!(matches!(err, MaterialLookupError::UnknownMaterial { .. }));
}

#[test]
fn codes_match_loosely() {
    for code in ["a106b", "A106 B", "a-106-b"] {
        let v = allowable_stress(code, Units::Imperial, 100.0, Units::Imperial).expect(code);
        assert_eq!(v.stress_psi, 20000.0);
    }
    let v = allowable_stress("ASTM A333 Gr.6", Units::Imperial, 100.0, Units::Imperial)
        .expect("by name");
    assert_eq!(v.stress_psi, 20000.0);
}

#[test]
fn short_metric_row_reports_insufficient_data() {
    // TP304L 은 525 °C 열까지만 값이 있다.
    for t in [530.0, 550.0, 600.0] {
        let err =
            allowable_stress("A312TP304L", Units::Metric, t, Units::Metric).unwrap_err();
        assert!(
            matches!(err, MaterialLookupError::InsufficientData { code: "A312TP304L", .. }),
            "{t}: {err:?}"
        );
    }
    let v = allowable_stress("A312TP304L", Units::Metric, 525.0, Units::Metric).expect("525C");
    assert_close("525C", v.stress_psi, 97300.0 / KPA_PER_PSI, 1e-12);
}

#[test]
fn metric_table_is_normalized_to_psi() {
    let v = allowable_stress("A106B", Units::Metric, 40.0, Units::Metric).expect("40C");
    assert_close("138000 kPa", v.stress_psi, 20015.2, 1e-6);
}

#[test]
fn display_temperature_is_converted_to_table_units() {
    // 260 °C = 500 °F
    let v = allowable_stress("A106B", Units::Imperial, 260.0, Units::Metric).expect("260C");
    assert_close("500F", v.stress_psi, 19000.0, 1e-9);
    // 104 °F = 40 °C
    let v = allowable_stress("A106B", Units::Metric, 104.0, Units::Imperial).expect("104F");
    assert_close("40C", v.stress_psi, 138000.0 / KPA_PER_PSI, 1e-9);
}

#[test]
fn stepped_lookup_uses_column_at_or_below() {
    let v = stepped_stress("A106B", Units::Imperial, 725.0).expect("stepped");
    assert_eq!(v.stress_psi, 16700.0);
    assert_eq!(v.lookup_temperature, 700.0);
    assert!(!v.interpolated);

    let v = stepped_stress("A106B", Units::Imperial, 50.0).expect("below first column");
    assert_eq!(v.lookup_temperature, 100.0);

    let err = stepped_stress("A312TP304L", Units::Metric, 560.0).unwrap_err();
    assert!(matches!(err, MaterialLookupError::InsufficientData { .. }));
}

#[test]
fn exact_stress_only_matches_table_columns() {
    assert_eq!(exact_stress(Units::Imperial, "A106B", 650.0), Some(17300.0));
    assert_eq!(exact_stress(Units::Metric, "A106B", 40.0), Some(138000.0));
    assert_eq!(exact_stress(Units::Imperial, "A106B", 655.0), None);
    assert_eq!(exact_stress(Units::Metric, "A312TP304L", 550.0), None);
}

#[test]
fn table_layout() {
    for units in [Units::Imperial, Units::Metric] {
        let table = stress_table(units);
        assert_eq!(table.category, units);
        assert!(table.temperatures.windows(2).all(|w| w[0] < w[1]));
        let codes: Vec<_> = materials(units).collect();
        assert_eq!(codes, ["A106B", "A3336", "A312TP316L", "A312TP304L"]);
    }
    assert_eq!(stress_table(Units::Metric).temperatures.len(), 19);
    assert_eq!(stress_table(Units::Imperial).temperatures.len(), 16);
    assert_eq!(stress_table(Units::Metric).label, "Up to 40 °C (kPa)");
    let tp304l = stress_table(Units::Metric)
        .find_material("A312TP304L")
        .expect("TP304L");
    assert!(tp304l.notes.contains("525"));
}
