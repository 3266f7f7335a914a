use pipe_wall_toolbox::pipe_schedule::{
    available_schedules, describe_nps, outer_diameter, pipe_dimensions, pipe_sizes, Schedule,
    ScheduleError,
};
use pipe_wall_toolbox::units::Units;

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

#[test]
fn four_inch_schedule_40() {
    let dims = pipe_dimensions(4.0, Schedule::S40, Units::Imperial).unwrap();
    assert_eq!(dims.outer_diameter, 4.5);
    assert_eq!(dims.wall_thickness, 0.237);
    let dims = pipe_dimensions(4.0, Schedule::S40, Units::Metric).unwrap();
    assert_close("OD mm", dims.outer_diameter, 114.3, 1e-12);
    assert_close("t mm", dims.wall_thickness, 6.0198, 1e-12);
    assert_close("OD only", outer_diameter(10.0, Units::Imperial).unwrap(), 10.75, 1e-12);
}

#[test]
fn missing_size_or_schedule() {
    assert_eq!(
        pipe_dimensions(3.5, Schedule::S40, Units::Imperial),
        Err(ScheduleError::NpsNotFound(3.5))
    );
    assert_eq!(
        pipe_dimensions(0.5, Schedule::S30, Units::Imperial),
        Err(ScheduleError::ScheduleNotAvailable {
            nps: 0.5,
            schedule: Schedule::S30
        })
    );
    assert!(available_schedules(3.5).is_empty());
}

#[test]
fn schedules_follow_display_order() {
    let schedules = available_schedules(0.5);
    assert_eq!(schedules.first(), Some(&Schedule::S5S));
    assert_eq!(schedules.last(), Some(&Schedule::Xxh));
    let positions: Vec<usize> = schedules
        .iter()
        .map(|s| Schedule::ALL.iter().position(|a| a == s).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(!available_schedules(20.0).contains(&Schedule::S40S));
}

#[test]
fn every_size_has_walls() {
    let sizes: Vec<f64> = pipe_sizes().collect();
    assert_eq!(sizes.first(), Some(&0.5));
    assert_eq!(sizes.last(), Some(&24.0));
    for nps in sizes {
        assert!(!available_schedules(nps).is_empty(), "{nps}");
    }
}

#[test]
fn schedule_names_parse() {
    assert_eq!("40".parse::<Schedule>(), Ok(Schedule::S40));
    assert_eq!("Sch 40".parse::<Schedule>(), Ok(Schedule::S40));
    assert_eq!("sch80s".parse::<Schedule>(), Ok(Schedule::S80S));
    assert_eq!("std".parse::<Schedule>(), Ok(Schedule::Std));
    assert_eq!("XS".parse::<Schedule>(), Ok(Schedule::Xh));
    assert_eq!("xxs".parse::<Schedule>(), Ok(Schedule::Xxh));
    assert!(matches!(
        "abc".parse::<Schedule>(),
        Err(ScheduleError::UnknownSchedule(_))
    ));
    for schedule in Schedule::ALL {
        assert_eq!(schedule.label().parse::<Schedule>(), Ok(schedule));
    }
}

#[test]
fn nps_descriptions() {
    assert_eq!(describe_nps(1.5), "NPS 1-1/2");
    assert_eq!(describe_nps(10.0), "NPS 10");
    assert_eq!(describe_nps(22.5), "NPS 22.5");
}
