//! CSA Z662 강관 설계 압력 / 요구 두께 (4.3.5).
//!
//! P = (2·S·t / D)·F·L·J·T. 계수표는 일반 구간(general) 값만 담은 참고치이며
//! 도로/철도 횡단 등 특수 구간 계수는 다루지 않는다.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::interpolation::linear_interpolation;
use crate::units::{from_fahrenheit, Units};

/// 설계 계수 F.
pub const DESIGN_FACTOR: f64 = 0.8;

/// 유체 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FluidService {
    /// 비(非)사워 가스
    NonSourGas,
    /// 사워 가스
    SourGas,
    /// 고증기압(HVP) 유체 및 CO2
    HvpAndCo2,
    /// 저증기압(LVP) 유체
    Lvp,
}

/// 지역 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationClass {
    Class1,
    Class2,
    Class3,
    Class4,
}

impl LocationClass {
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(LocationClass::Class1),
            2 => Some(LocationClass::Class2),
            3 => Some(LocationClass::Class3),
            4 => Some(LocationClass::Class4),
            _ => None,
        }
    }
}

impl TryFrom<u8> for LocationClass {
    type Error = Z662Error;

    /// 1~4 밖의 등급은 다른 등급으로 대신하지 않고 거부한다.
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::from_number(n).ok_or(Z662Error::InvalidLocationClass(n))
    }
}

/// 관 제조/이음 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipeJointType {
    Seamless,
    ElectricWelded,
    SubmergedArcWelded,
    FlashWelded,
    ContinuousWelded,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Z662Error {
    #[error("설계 온도 {0:.1} °C 는 온도 계수표 범위(230 °C 이하)를 벗어납니다")]
    TemperatureOutOfRange(f64),
    #[error("입력값이 유한하지 않습니다: {0}")]
    NonFinite(&'static str),
    #[error("지역 등급은 1~4 이어야 합니다: {0}")]
    InvalidLocationClass(u8),
}

/// 지역 계수 L (일반 구간).
pub fn location_factor(service: FluidService, class: LocationClass) -> f64 {
    use FluidService::*;
    use LocationClass::*;
    match (service, class) {
        (NonSourGas, Class1) => 1.00,
        (NonSourGas, Class2) => 0.90,
        (NonSourGas, Class3) => 0.70,
        (NonSourGas, Class4) => 0.55,
        (SourGas, Class1) => 0.90,
        (SourGas, Class2) => 0.75,
        (SourGas, Class3) => 0.625,
        (SourGas, Class4) => 0.50,
        (HvpAndCo2, Class1) => 1.00,
        (HvpAndCo2, Class2) => 0.80,
        (HvpAndCo2, Class3) => 0.65,
        (HvpAndCo2, Class4) => 0.50,
        (Lvp, _) => 1.00,
    }
}

/// 이음 계수 J.
pub fn joint_factor(joint: PipeJointType) -> f64 {
    match joint {
        PipeJointType::ContinuousWelded => 0.60,
        _ => 1.00,
    }
}

// (°C, T)
const TEMPERATURE_FACTORS: &[(f64, f64)] = &[
    (120.0, 1.00),
    (150.0, 0.97),
    (180.0, 0.93),
    (200.0, 0.91),
    (230.0, 0.87),
];

/// 온도 계수 T. `temperature_f` 는 °F 이며 내부에서 °C 로 환산한다.
///
/// 120 °C 이하는 1.0, 표 사이 값은 선형 보간, 230 °C 초과는 오류.
pub fn temperature_factor(temperature_f: f64) -> Result<f64, Z662Error> {
    if !temperature_f.is_finite() {
        return Err(Z662Error::NonFinite("temperature"));
    }
    let t_c = from_fahrenheit(temperature_f, Units::Metric);
    let (first_t, first_factor) = TEMPERATURE_FACTORS[0];
    if t_c <= first_t {
        return Ok(first_factor);
    }
    TEMPERATURE_FACTORS
        .windows(2)
        .find(|w| t_c <= w[1].0)
        .map(|w| linear_interpolation(t_c, w[0].0, w[0].1, w[1].0, w[1].1))
        .ok_or(Z662Error::TemperatureOutOfRange(t_c))
}

/// 요구 두께 계산 입력. psi / in / °F 기준.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Z662Input {
    pub pressure: f64,
    pub outer_diameter: f64,
    /// 규정 최소 항복강도 S
    pub smys: f64,
    pub service: FluidService,
    pub class: LocationClass,
    pub joint: PipeJointType,
    pub temperature: f64,
    pub corrosion_allowance: f64,
}

/// 계수와 두께 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Z662Result {
    pub design_factor: f64,
    pub location_factor: f64,
    pub joint_factor: f64,
    pub temperature_factor: f64,
    /// P·D / (2·S·F·L·J·T)
    pub design_thickness: f64,
    /// 설계 두께 + 부식 여유
    pub required_thickness: f64,
}

/// 주어진 두께에서 허용되는 설계 압력.
///
/// 외경이 0 이면 0 을 돌려준다.
pub fn design_pressure(
    smys: f64,
    wall_thickness: f64,
    outer_diameter: f64,
    location_factor: f64,
    joint_factor: f64,
    temperature_factor: f64,
) -> f64 {
    if outer_diameter == 0.0 {
        warn!("outer diameter is zero; design pressure reported as 0");
        return 0.0;
    }
    2.0 * smys * wall_thickness / outer_diameter
        * DESIGN_FACTOR
        * location_factor
        * joint_factor
        * temperature_factor
}

/// 설계 압력을 견디는 최소 두께에 부식 여유를 더한다.
///
/// 분모 2·S·F·L·J·T 가 0 이면 B31.3 계산과 같이 0 을 돌려준다.
pub fn required_wall_thickness(input: &Z662Input) -> Result<Z662Result, Z662Error> {
    let l = location_factor(input.service, input.class);
    let j = joint_factor(input.joint);
    let t = temperature_factor(input.temperature)?;
    let denominator = 2.0 * input.smys * DESIGN_FACTOR * l * j * t;
    let (design_thickness, required_thickness) = if denominator == 0.0 {
        warn!("denominator 2SFLJT is zero; required thickness reported as 0");
        (0.0, 0.0)
    } else {
        let design = input.pressure * input.outer_diameter / denominator;
        (design, design + input.corrosion_allowance)
    };
    Ok(Z662Result {
        design_factor: DESIGN_FACTOR,
        location_factor: l,
        joint_factor: j,
        temperature_factor: t,
        design_thickness,
        required_thickness,
    })
}
