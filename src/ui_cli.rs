use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::conversion;
use crate::design::{DesignCondition, SinglePressureDesign};
use crate::hydrotest::hydrotest_pressure;
use crate::i18n::{keys, Translator};
use crate::interpolation::linear_interpolation;
use crate::material_db;
use crate::pipe_schedule::{self, Schedule};
use crate::quantity::{ConversionDirection, QuantityKind};
use crate::units::{
    dn_to_nps, from_inch, from_psi, length, parse_nps_label, pressure, temperature, to_fahrenheit,
    to_inch, to_psi, Units,
};
use crate::z662::{self, FluidService, LocationClass, PipeJointType, Z662Input};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    UnitConversion,
    AllowableStress,
    B31_3Thickness,
    Hydrotest,
    Interpolation,
    Z662,
    PipeSchedules,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_ITEMS));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::UnitConversion),
            "2" => return Ok(MenuChoice::AllowableStress),
            "3" => return Ok(MenuChoice::B31_3Thickness),
            "4" => return Ok(MenuChoice::Hydrotest),
            "5" => return Ok(MenuChoice::Interpolation),
            "6" => return Ok(MenuChoice::Z662),
            "7" => return Ok(MenuChoice::PipeSchedules),
            "8" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 단위 변환 메뉴를 처리한다.
pub fn handle_unit_conversion(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::UNIT_CONVERSION_HEADING));
    println!("{}", tr.t(keys::UNIT_CONVERSION_OPTIONS));
    let kind = loop {
        if let Some(kind) = read_choice(tr)?.and_then(map_quantity) {
            break kind;
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    };
    println!("{}", tr.t(keys::UNIT_CONVERSION_DIRECTIONS));
    let direction = loop {
        if let Some(direction) = read_choice(tr)?.and_then(map_direction) {
            break direction;
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    };
    let value = read_f64(tr, tr.t(keys::UNIT_CONVERSION_PROMPT_VALUE))?;
    let result = conversion::convert(kind, cfg.units, value, direction)?;
    let target = match direction {
        ConversionDirection::ToDisplay | ConversionDirection::FromImperial => cfg.units,
        ConversionDirection::FromDisplay | ConversionDirection::ToImperial => Units::Imperial,
    };
    println!(
        "{} {result} {}",
        tr.t(keys::UNIT_CONVERSION_RESULT),
        kind.unit_label(target)
    );
    Ok(())
}

fn map_quantity(n: u32) -> Option<QuantityKind> {
    match n {
        1 => Some(QuantityKind::Pressure),
        2 => Some(QuantityKind::Length),
        3 => Some(QuantityKind::Temperature),
        4 => Some(QuantityKind::NominalSize),
        _ => None,
    }
}

fn map_direction(n: u32) -> Option<ConversionDirection> {
    match n {
        1 => Some(ConversionDirection::ToDisplay),
        2 => Some(ConversionDirection::FromDisplay),
        3 => Some(ConversionDirection::ToImperial),
        4 => Some(ConversionDirection::FromImperial),
        _ => None,
    }
}

/// 허용응력 조회 메뉴. 표시 단위 체계의 재료표를 사용한다.
pub fn handle_allowable_stress(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let units = cfg.units;
    println!("{}", tr.t(keys::STRESS_HEADING));
    println!("{}", tr.t(keys::STRESS_AVAILABLE));
    let table = material_db::stress_table(units);
    println!("  [{}]", table.label);
    for material in table.materials {
        println!("  {:<12} {:<18} {}", material.code, material.name, material.notes);
    }
    let code = read_line(tr.t(keys::PROMPT_MATERIAL))?;
    let code = match code.trim() {
        "" => cfg.default_material.as_str(),
        other => other,
    };
    let t = read_f64(tr, &quantity_prompt(tr, keys::PROMPT_TEMPERATURE, temperature::unit_label(units)))?;
    let value = material_db::allowable_stress(code, units, t, units)?;
    let note = if value.interpolated {
        tr.t(keys::RESULT_INTERPOLATED)
    } else {
        tr.t(keys::RESULT_EXACT)
    };
    println!(
        "{} {:.1} {} {note}",
        tr.t(keys::RESULT_STRESS),
        from_psi(value.stress_psi, units),
        pressure::unit_label(units)
    );
    Ok(())
}

/// B31.3 요구 두께 메뉴. 설계 조건을 받은 뒤 배관을 여러 개 추가해 표로 보여준다.
pub fn handle_b31_3(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let units = cfg.units;
    println!("{}", tr.t(keys::B31_3_HEADING));
    println!("{}", tr.t(keys::B31_3_FORMULA));
    let p = read_f64(tr, &quantity_prompt(tr, keys::PROMPT_PRESSURE, pressure::unit_label(units)))?;
    let t = read_f64(tr, &quantity_prompt(tr, keys::PROMPT_TEMPERATURE, temperature::unit_label(units)))?;
    let material = read_line(tr.t(keys::PROMPT_MATERIAL))?;
    let material = match material.trim() {
        "" => cfg.default_material.clone(),
        other => other.to_string(),
    };
    let condition = DesignCondition {
        pressure: to_psi(p, units),
        temperature: to_fahrenheit(t, units),
        material,
    };
    let mut design = SinglePressureDesign::new(cfg.design, condition, units);

    loop {
        let line = read_line(tr.t(keys::PROMPT_NPS))?;
        if line.trim().is_empty() {
            break;
        }
        let Some(nps) = parse_size(line.trim(), units) else {
            println!("{}", tr.t(keys::SCHEDULE_NONE));
            continue;
        };
        let sch = read_line(tr.t(keys::PROMPT_SCHEDULE))?;
        let added = sch
            .trim()
            .parse::<Schedule>()
            .map_err(AppError::from)
            .and_then(|schedule| design.add_pipe(nps, schedule).map_err(AppError::from));
        if let Err(err) = added {
            println!("{}: {err}", tr.t(keys::ERROR_PREFIX));
        }
    }

    let views = design.views();
    if views.is_empty() {
        return Ok(());
    }
    println!("{}", tr.t(keys::B31_3_TABLE_HEADER));
    let len = length::unit_label(units);
    for v in &views {
        let check = if v.adequate {
            tr.t(keys::RESULT_ADEQUATE)
        } else {
            tr.t(keys::RESULT_INADEQUATE)
        };
        println!(
            "{:<15} {:<6} {:>8.3} {len:<3} {:>8.3} {len:<3} {:>8.3} {len:<3} {check}",
            v.size,
            v.schedule.label(),
            v.outer_diameter,
            v.wall_thickness,
            v.required_thickness,
        );
    }
    if views.iter().any(|v| v.allowable_stress.is_none()) {
        println!("{}", tr.t(keys::RESULT_NO_STRESS));
    }
    Ok(())
}

/// 수압 시험 압력 메뉴.
pub fn handle_hydrotest(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let unit = pressure::unit_label(cfg.units);
    println!("{}", tr.t(keys::HYDROTEST_HEADING));
    println!("{}", tr.t(keys::HYDROTEST_FORMULA));
    let p = read_f64(tr, &quantity_prompt(tr, keys::PROMPT_DESIGN_PRESSURE, unit))?;
    let st = read_f64(tr, &quantity_prompt(tr, keys::PROMPT_STRESS_TEST_TEMP, unit))?;
    let s = read_f64(tr, &quantity_prompt(tr, keys::PROMPT_STRESS_DESIGN_TEMP, unit))?;
    let pt = hydrotest_pressure(p, st, s)?;
    println!("{} {pt:.2} {unit}", tr.t(keys::RESULT_TEST_PRESSURE));
    Ok(())
}

/// 두 점 사이 선형 보간 메뉴.
pub fn handle_interpolation(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::INTERPOLATION_HEADING));
    let x0 = read_f64(tr, "x0: ")?;
    let y0 = read_f64(tr, "y0: ")?;
    let x1 = read_f64(tr, "x1: ")?;
    let y1 = read_f64(tr, "y1: ")?;
    let x = read_f64(tr, "x: ")?;
    println!(
        "{} {}",
        tr.t(keys::RESULT_INTERPOLATED_Y),
        linear_interpolation(x, x0, y0, x1, y1)
    );
    Ok(())
}

/// CSA Z662 요구 두께 메뉴.
pub fn handle_z662(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let units = cfg.units;
    let p_unit = pressure::unit_label(units);
    let l_unit = length::unit_label(units);
    println!("{}", tr.t(keys::Z662_HEADING));
    let p = read_f64(tr, &quantity_prompt(tr, keys::PROMPT_PRESSURE, p_unit))?;
    let od = read_f64(tr, &quantity_prompt(tr, keys::PROMPT_OUTER_DIAMETER, l_unit))?;
    let smys = read_f64(tr, &quantity_prompt(tr, keys::PROMPT_SMYS, p_unit))?;
    println!("{}", tr.t(keys::Z662_SERVICE_OPTIONS));
    let service = loop {
        let sel = read_choice(tr)?;
        let service = match sel {
            Some(1) => FluidService::NonSourGas,
            Some(2) => FluidService::SourGas,
            Some(3) => FluidService::HvpAndCo2,
            Some(4) => FluidService::Lvp,
            _ => {
                println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
                continue;
            }
        };
        break service;
    };
    let class = loop {
        let sel = read_line(tr.t(keys::Z662_CLASS_PROMPT))?;
        match sel.trim().parse::<u8>().ok().and_then(LocationClass::from_number) {
            Some(class) => break class,
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    };
    println!("{}", tr.t(keys::Z662_JOINT_OPTIONS));
    let joint = loop {
        let sel = read_choice(tr)?;
        let joint = match sel {
            Some(1) => PipeJointType::Seamless,
            Some(2) => PipeJointType::ElectricWelded,
            Some(3) => PipeJointType::SubmergedArcWelded,
            Some(4) => PipeJointType::FlashWelded,
            Some(5) => PipeJointType::ContinuousWelded,
            _ => {
                println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
                continue;
            }
        };
        break joint;
    };
    let t = read_f64(tr, &quantity_prompt(tr, keys::PROMPT_TEMPERATURE, temperature::unit_label(units)))?;
    let ca = read_f64(tr, &quantity_prompt(tr, keys::PROMPT_CORROSION_ALLOWANCE, l_unit))?;

    let result = z662::required_wall_thickness(&Z662Input {
        pressure: to_psi(p, units),
        outer_diameter: to_inch(od, units),
        smys: to_psi(smys, units),
        service,
        class,
        joint,
        temperature: to_fahrenheit(t, units),
        corrosion_allowance: to_inch(ca, units),
    })?;
    println!(
        "{} {:.2} / {:.3} / {:.2} / {:.3}",
        tr.t(keys::RESULT_FACTORS),
        result.design_factor,
        result.location_factor,
        result.joint_factor,
        result.temperature_factor
    );
    println!(
        "{} {:.3} {l_unit}",
        tr.t(keys::RESULT_REQUIRED_THICKNESS),
        from_inch(result.required_thickness, units)
    );
    Ok(())
}

/// 호칭경별 스케줄 두께표를 보여준다.
pub fn handle_pipe_schedules(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let units = cfg.units;
    let len = length::unit_label(units);
    println!("{}", tr.t(keys::SCHEDULE_HEADING));
    let line = read_line(tr.t(keys::PROMPT_NPS))?;
    let Some(nps) = parse_size(line.trim(), units) else {
        println!("{}", tr.t(keys::SCHEDULE_NONE));
        return Ok(());
    };
    let od = pipe_schedule::outer_diameter(nps, units)?;
    println!("{}  OD {od:.3} {len}", pipe_schedule::describe_nps(nps));
    for schedule in pipe_schedule::available_schedules(nps) {
        let dims = pipe_schedule::pipe_dimensions(nps, schedule, units)?;
        println!("  {:<6} {:>8.3} {len}", schedule.label(), dims.wall_thickness);
    }
    Ok(())
}

/// 단위 체계와 언어를 바꾼다. 저장은 호출 측에서 한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_UNITS), cfg.units);
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        cfg.language.as_deref().unwrap_or("auto")
    );
    println!("{}", tr.t(keys::SETTINGS_MENU));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "" => {}
        "1" => {
            println!("{}", tr.t(keys::SETTINGS_OPTIONS));
            let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
            cfg.units = match sel.trim() {
                "" => cfg.units,
                "1" => Units::Imperial,
                "2" => Units::Metric,
                _ => {
                    println!("{}", tr.t(keys::SETTINGS_INVALID));
                    cfg.units
                }
            };
            println!("{} {}", tr.t(keys::SETTINGS_SAVED), cfg.units);
        }
        "2" => {
            println!("{}", tr.t(keys::SETTINGS_LANGUAGE_OPTIONS));
            let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
            let lang = match sel.trim() {
                "1" => Some("ko"),
                "2" => Some("en"),
                "3" => Some("auto"),
                _ => None,
            };
            match lang {
                Some(code) => {
                    cfg.language = Some(code.to_string());
                    println!("{} {code}", tr.t(keys::SETTINGS_LANGUAGE_SAVED));
                }
                None => println!("{}", tr.t(keys::SETTINGS_INVALID)),
            }
        }
        _ => println!("{}", tr.t(keys::INVALID_SELECTION)),
    }
    Ok(())
}

/// 표시 단위에 맞춰 호칭경을 해석한다. Metric 은 DN 번호도 받는다.
pub fn parse_size(input: &str, units: Units) -> Option<f64> {
    let trimmed = input.trim_start_matches(['D', 'N', 'd', 'n', ' ']);
    if units == Units::Metric {
        if let Some(nps) = trimmed.parse::<u32>().ok().and_then(dn_to_nps) {
            return Some(nps);
        }
    }
    let input = input.trim_start_matches(['N', 'P', 'S', 'n', 'p', 's', ' ']);
    parse_nps_label(input)
}

fn quantity_prompt(tr: &Translator, key: &str, unit: &str) -> String {
    format!("{} [{unit}]: ", tr.t(key))
}

fn read_choice(tr: &Translator) -> Result<Option<u32>, AppError> {
    let sel = read_line(tr.t(keys::PROMPT_SELECT))?;
    Ok(sel.trim().parse::<u32>().ok())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
