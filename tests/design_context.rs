use pipe_wall_toolbox::design::{
    DesignCondition, DesignError, GlobalDesignParams, MultiplePressureDesign, SinglePressureDesign,
    DEFAULT_MATERIAL, DEFAULT_NPS, DEFAULT_SCHEDULE,
};
use pipe_wall_toolbox::pipe_schedule::{Schedule, ScheduleError};
use pipe_wall_toolbox::units::{Units, KPA_PER_PSI};
use uuid::Uuid;

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn single() -> SinglePressureDesign {
    SinglePressureDesign::new(
        GlobalDesignParams::default(),
        DesignCondition::default(),
        Units::Imperial,
    )
}

#[test]
fn default_pipe_is_recalculated_on_add() {
    let mut design = single();
    let id = design.add_pipe(DEFAULT_NPS, DEFAULT_SCHEDULE).unwrap();
    let pipe = design.pipe(id).unwrap();
    assert_eq!(pipe.dn, Some(100));
    assert_eq!(pipe.outer_diameter, 4.5);
    assert_eq!(pipe.wall_thickness, 0.237);
    assert_eq!(pipe.allowable_stress, Some(20000.0));
    // 1440·4.5 / (2·(20000 + 0.4·1440)) / 0.875
    assert_close("t", pipe.required_thickness, 0.179_960_01, 1e-7);
    assert!(pipe.is_adequate());
}

#[test]
fn condition_changes_recalculate_every_pipe() {
    let mut design = single();
    let a = design.add_pipe(4.0, Schedule::S40).unwrap();
    let b = design.add_pipe(4.0, Schedule::S160).unwrap();

    design.set_pressure(3000.0).unwrap();
    assert_close("a", design.pipe(a).unwrap().required_thickness, 0.363_881_4, 1e-7);
    assert!(!design.pipe(a).unwrap().is_adequate());
    assert!(design.pipe(b).unwrap().is_adequate());

    design.set_pressure(1440.0).unwrap();
    design.set_temperature(725.0).unwrap();
    assert_eq!(design.pipe(a).unwrap().allowable_stress, Some(15300.0));
    assert_close("725F", design.pipe(a).unwrap().required_thickness, 0.233_236_2, 1e-7);

    design.set_corrosion_allowance(0.0625).unwrap();
    assert_close(
        "with ca",
        design.pipe(b).unwrap().required_thickness,
        0.233_236_2 + 0.0625 / 0.875,
        1e-7,
    );
}

#[test]
fn unknown_material_falls_back_to_zero_stress() {
    let mut design = single();
    let id = design.add_pipe(4.0, Schedule::S40).unwrap();
    design.set_material("A999").unwrap();
    let pipe = design.pipe(id).unwrap();
    assert_eq!(pipe.allowable_stress, None);
    // 1440·4.5 / (2·0.4·1440) / 0.875
    assert_close("t", pipe.required_thickness, 5.625 / 0.875, 1e-9);
}

#[test]
fn stress_override_survives_condition_changes() {
    let mut design = single();
    let id = design.add_pipe(4.0, Schedule::S40).unwrap();
    design.set_allowable_stress(id, Some(10000.0)).unwrap();
    design.set_temperature(725.0).unwrap();
    design.set_material("A312TP316L").unwrap();
    let pipe = design.pipe(id).unwrap();
    assert_eq!(pipe.allowable_stress, Some(10000.0));
    assert_close("t", pipe.required_thickness, 0.350_118_9, 1e-7);

    design.set_allowable_stress(id, None).unwrap();
    assert_ne!(design.pipe(id).unwrap().allowable_stress, Some(10000.0));
}

#[test]
fn nps_change_keeps_or_replaces_schedule() {
    let mut design = single();
    let id = design.add_pipe(4.0, Schedule::S40S).unwrap();
    design.set_nps(id, 6.0).unwrap();
    assert_eq!(design.pipe(id).unwrap().schedule, Schedule::S40S);
    assert_eq!(design.pipe(id).unwrap().outer_diameter, 6.625);

    // NPS 20 에는 40S 가 없어 첫 번째 가용 스케줄로 바뀐다.
    design.set_nps(id, 20.0).unwrap();
    assert_eq!(design.pipe(id).unwrap().schedule, Schedule::S5S);
    assert_eq!(design.pipe(id).unwrap().dn, Some(500));

    assert_eq!(
        design.set_nps(id, 3.5),
        Err(DesignError::Schedule(ScheduleError::NpsNotFound(3.5)))
    );
}

#[test]
fn invalid_pipes_are_rejected() {
    let mut design = single();
    assert!(matches!(
        design.add_pipe(3.5, Schedule::S40),
        Err(DesignError::Schedule(ScheduleError::NpsNotFound(_)))
    ));
    assert!(matches!(
        design.add_pipe(0.5, Schedule::S30),
        Err(DesignError::Schedule(ScheduleError::ScheduleNotAvailable { .. }))
    ));
    let id = design.add_pipe(0.5, Schedule::S40).unwrap();
    assert!(design.set_schedule(id, Schedule::S30).is_err());
    assert_eq!(design.pipe(id).unwrap().schedule, Schedule::S40);
    assert_eq!(design.pipes().len(), 1);
}

#[test]
fn unknown_pipe_id() {
    let mut design = single();
    let missing = Uuid::new_v4();
    assert_eq!(design.remove_pipe(missing), Err(DesignError::PipeNotFound(missing)));
    assert_eq!(
        design.set_schedule(missing, Schedule::S80),
        Err(DesignError::PipeNotFound(missing))
    );
}

#[test]
fn remove_and_reset() {
    let mut design = single();
    let a = design.add_pipe(2.0, Schedule::S40).unwrap();
    let b = design.add_pipe(6.0, Schedule::S80).unwrap();
    let removed = design.remove_pipe(a).unwrap();
    assert_eq!(removed.id, a);
    assert_eq!(design.pipes().len(), 1);
    assert!(design.pipe(b).is_some());

    design.set_units(Units::Metric).unwrap();
    design.set_pressure(2000.0).unwrap();
    design.reset();
    assert!(design.pipes().is_empty());
    assert_eq!(design.units(), Units::Metric);
    assert_eq!(design.condition(), &DesignCondition::default());
    assert_eq!(design.condition().material, DEFAULT_MATERIAL);
}

#[test]
fn metric_units_use_metric_table_and_views() {
    let mut design = SinglePressureDesign::new(
        GlobalDesignParams::default(),
        DesignCondition {
            temperature: 104.0, // 40 °C
            ..DesignCondition::default()
        },
        Units::Metric,
    );
    let id = design.add_pipe(4.0, Schedule::S40).unwrap();
    let stress = design.pipe(id).unwrap().allowable_stress.unwrap();
    assert_close("psi", stress, 138000.0 / KPA_PER_PSI, 1e-9);

    let view = &design.views()[0];
    assert_eq!(view.size, "DN 100");
    assert_close("OD mm", view.outer_diameter, 114.3, 1e-12);
    assert_close("kPa", view.allowable_stress.unwrap(), 138000.0, 1e-9);

    design.set_units(Units::Imperial).unwrap();
    assert_eq!(design.views()[0].size, "NPS 4");
    assert_eq!(design.pipe(id).unwrap().allowable_stress, Some(20000.0));
}

#[test]
fn multiple_design_keeps_conditions_per_pipe() {
    let mut design = MultiplePressureDesign::new(GlobalDesignParams::default(), Units::Imperial);
    let a = design.add_pipe().unwrap();
    let b = design
        .add_pipe_with(
            6.0,
            Schedule::S80,
            DesignCondition {
                pressure: 500.0,
                temperature: 725.0,
                material: "A312TP316L".into(),
            },
        )
        .unwrap();

    let case_a = design.case(a).unwrap();
    assert_eq!(case_a.condition, DesignCondition::default());
    assert_eq!(case_a.pipe.schedule, DEFAULT_SCHEDULE);
    let case_b = design.case(b).unwrap();
    assert_eq!(case_b.pipe.allowable_stress, Some(16200.0));
    assert_close("b", case_b.pipe.required_thickness, 0.115_418_1, 1e-7);

    let before_b = design.case(b).unwrap().pipe.required_thickness;
    design.set_pressure(a, 3000.0).unwrap();
    assert_close("a", design.case(a).unwrap().pipe.required_thickness, 0.363_881_4, 1e-7);
    assert_eq!(design.case(b).unwrap().pipe.required_thickness, before_b);

    design.set_temperature(b, 100.0).unwrap();
    assert_eq!(design.case(b).unwrap().pipe.allowable_stress, Some(20000.0));
    design.set_material(b, "A999").unwrap();
    assert_eq!(design.case(b).unwrap().pipe.allowable_stress, None);

    design.set_corrosion_allowance(0.0625).unwrap();
    assert_eq!(design.global().corrosion_allowance, 0.0625);
    assert_eq!(design.views().len(), 2);

    design.remove_pipe(a).unwrap();
    assert_eq!(design.cases().len(), 1);
    assert!(matches!(design.remove_pipe(a), Err(DesignError::PipeNotFound(id)) if id == a));
}

#[test]
fn default_temperature_has_stress_in_both_unit_systems() {
    // 100 °F = 37.8 °C 는 Metric 표의 첫 열(40 °C)보다 낮아 첫 열 값을 쓴다.
    for units in [Units::Imperial, Units::Metric] {
        let mut design =
            SinglePressureDesign::new(GlobalDesignParams::default(), DesignCondition::default(), units);
        let id = design.add_pipe(DEFAULT_NPS, DEFAULT_SCHEDULE).unwrap();
        let pipe = design.pipe(id).unwrap();
        assert!(pipe.allowable_stress.is_some(), "{units:?}");
        assert!(pipe.is_adequate(), "{units:?}: t_req {}", pipe.required_thickness);

        let mut multi = MultiplePressureDesign::new(GlobalDesignParams::default(), units);
        let id = multi.add_pipe().unwrap();
        assert!(multi.case(id).unwrap().pipe.allowable_stress.is_some(), "{units:?}");
    }

    let mut metric =
        SinglePressureDesign::new(GlobalDesignParams::default(), DesignCondition::default(), Units::Metric);
    let id = metric.add_pipe(DEFAULT_NPS, DEFAULT_SCHEDULE).unwrap();
    let stress = metric.pipe(id).unwrap().allowable_stress.unwrap();
    assert_close("first column", stress, 138000.0 / KPA_PER_PSI, 1e-9);
    // 1440·4.5 / (2·(S + 0.4·1440)) / 0.875
    let expected = 1440.0 * 4.5 / (2.0 * (stress + 576.0)) / 0.875;
    assert_close("t", metric.pipe(id).unwrap().required_thickness, expected, 1e-12);
}

#[test]
fn temperature_above_table_still_has_no_stress() {
    let mut design = single();
    let id = design.add_pipe(4.0, Schedule::S40).unwrap();
    design.set_temperature(1200.0).unwrap();
    assert_eq!(design.pipe(id).unwrap().allowable_stress, None);
}
