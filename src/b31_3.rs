//! ASME B31.3 직관 배관 요구 두께 (304.1.2).
//!
//! t = P·D / (2·(S·E·W + P·Y)) + c, 이후 (1 - 제작공차) 로 나눈다.
//! 모든 입력은 Imperial 기준(psi, in)이다.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::units::Units;

/// 용접 이음 효율 E 기본값.
pub const DEFAULT_E: f64 = 1.0;
/// 용접 강도 감소 계수 W 기본값.
pub const DEFAULT_W: f64 = 1.0;
/// 온도 계수 Y(γ) 기본값.
pub const DEFAULT_GAMMA: f64 = 0.4;
/// 제작 공차(mill tolerance) 기본값 12.5%.
pub const DEFAULT_MILL_TOL: f64 = 0.125;

/// 설계 조건 전체. 수치는 모두 Imperial 기준이며 표시 환산은 경계에서만 한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignParameters {
    pub units: Units,
    /// 설계 압력 [psi]
    pub pressure: f64,
    /// 설계 온도 [°F]
    pub temperature: f64,
    /// 부식 여유 [in]
    pub corrosion_allowance: f64,
    /// 허용응력 [psi]. 없으면 계산식에서 0 으로 취급한다.
    pub allowable_stress: Option<f64>,
    pub e: f64,
    pub w: f64,
    pub gamma: f64,
    /// 제작 공차(분율). 계산식이 정의되려면 1 미만이어야 한다.
    pub mill_tolerance: f64,
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self {
            units: Units::Imperial,
            pressure: 1440.0,
            temperature: 100.0,
            corrosion_allowance: 0.0,
            allowable_stress: None,
            e: DEFAULT_E,
            w: DEFAULT_W,
            gamma: DEFAULT_GAMMA,
            mill_tolerance: DEFAULT_MILL_TOL,
        }
    }
}

impl DesignParameters {
    /// 외경을 붙여 두께 계산 입력을 만든다.
    pub fn thickness_input(&self, outer_diameter: f64) -> ThicknessInput {
        ThicknessInput {
            pressure: self.pressure,
            outer_diameter,
            allowable_stress: self.allowable_stress,
            e: self.e,
            w: self.w,
            gamma: self.gamma,
            corrosion_allowance: self.corrosion_allowance,
            mill_tolerance: self.mill_tolerance,
        }
    }
}

/// 요구 두께 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThicknessInput {
    pub pressure: f64,
    pub outer_diameter: f64,
    pub allowable_stress: Option<f64>,
    pub e: f64,
    pub w: f64,
    pub gamma: f64,
    pub corrosion_allowance: f64,
    pub mill_tolerance: f64,
}

impl Default for ThicknessInput {
    fn default() -> Self {
        Self {
            pressure: 0.0,
            outer_diameter: 0.0,
            allowable_stress: None,
            e: DEFAULT_E,
            w: DEFAULT_W,
            gamma: DEFAULT_GAMMA,
            corrosion_allowance: 0.0,
            mill_tolerance: DEFAULT_MILL_TOL,
        }
    }
}

/// 0 으로 가려진 퇴화 입력의 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateInput {
    /// 2·(S·E·W + P·Y) == 0
    ZeroDenominator,
    /// 1 - 제작공차 <= 0
    MillToleranceAtOrAboveOne,
}

/// 요구 두께 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThicknessResult {
    /// 압력 설계 두께 P·D / (2·(S·E·W + P·Y))
    pub pressure_design_thickness: f64,
    /// 부식 여유와 제작 공차를 반영한 요구 두께
    pub required_thickness: f64,
    /// `Some` 이면 계산이 정의되지 않아 결과를 0 으로 돌려준 경우이다.
    pub degenerate: Option<DegenerateInput>,
}

impl ThicknessResult {
    fn degenerate(kind: DegenerateInput) -> Self {
        Self {
            pressure_design_thickness: 0.0,
            required_thickness: 0.0,
            degenerate: Some(kind),
        }
    }
}

/// 요구 두께를 계산하고 퇴화 여부를 함께 돌려준다.
///
/// 분모가 정확히 0 이거나 1 - 제작공차 <= 0 이면 오류 대신 0 을 돌려준다.
/// 음수 압력/직경은 거르지 않고 그대로 계산한다.
// TODO: 퇴화 입력을 Result 오류로 올릴지 결정되면 DegenerateInput 을 오류 타입으로 옮긴다.
pub fn evaluate(input: &ThicknessInput) -> ThicknessResult {
    let s = input.allowable_stress.unwrap_or(0.0);
    let numerator = input.pressure * input.outer_diameter;
    let denominator = 2.0 * (s * input.e * input.w + input.pressure * input.gamma);
    if denominator == 0.0 {
        warn!("denominator 2(SEW + PY) is zero; required thickness reported as 0");
        return ThicknessResult::degenerate(DegenerateInput::ZeroDenominator);
    }
    let pressure_design_thickness = numerator / denominator;

    let mill_factor = 1.0 - input.mill_tolerance;
    if mill_factor <= 0.0 {
        warn!(
            mill_tolerance = input.mill_tolerance,
            "1 - mill tolerance <= 0; required thickness reported as 0"
        );
        return ThicknessResult::degenerate(DegenerateInput::MillToleranceAtOrAboveOne);
    }

    ThicknessResult {
        pressure_design_thickness,
        required_thickness: (pressure_design_thickness + input.corrosion_allowance) / mill_factor,
        degenerate: None,
    }
}

/// 요구 두께만 돌려준다. 퇴화 입력이면 0 이다.
pub fn required_thickness(input: &ThicknessInput) -> f64 {
    evaluate(input).required_thickness
}
