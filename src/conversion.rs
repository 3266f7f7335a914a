use thiserror::Error;
use tracing::warn;

use crate::b31_3::DesignParameters;
use crate::quantity::{ConversionDirection, QuantityKind};
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 체계 문자열
    #[error("알 수 없는 단위 체계: {0}")]
    UnknownUnits(String),
    /// 알 수 없는 물리량 문자열
    #[error("알 수 없는 물리량: {0}")]
    UnknownQuantity(String),
    /// 알 수 없는 변환 방향 문자열
    #[error("알 수 없는 변환 방향: {0}")]
    UnknownDirection(String),
    /// 호칭경 대응표에 없는 값
    #[error("호칭경 대응표에 없는 값: {0}")]
    NominalSizeNotFound(f64),
}

/// 물리량/단위 체계/방향을 받아 값을 환산한다.
///
/// 압력·길이는 선형, 온도는 아핀 변환이며 호칭경은 테이블 조회이다.
/// Imperial 체계에서는 모든 방향이 항등 변환이다.
pub fn convert(
    kind: QuantityKind,
    units: Units,
    value: f64,
    direction: ConversionDirection,
) -> Result<f64, ConversionError> {
    use ConversionDirection::*;
    let to_display = matches!(direction, ToDisplay | FromImperial);
    match kind {
        QuantityKind::Pressure => Ok(if to_display {
            from_psi(value, units)
        } else {
            to_psi(value, units)
        }),
        QuantityKind::Length => Ok(if to_display {
            from_inch(value, units)
        } else {
            to_inch(value, units)
        }),
        QuantityKind::Temperature => Ok(if to_display {
            from_fahrenheit(value, units)
        } else {
            to_fahrenheit(value, units)
        }),
        QuantityKind::NominalSize => convert_nominal_size(units, value, to_display),
    }
}

fn convert_nominal_size(units: Units, value: f64, to_display: bool) -> Result<f64, ConversionError> {
    if units == Units::Imperial {
        return Ok(value);
    }
    let found = if to_display {
        nps_to_dn(value).map(f64::from)
    } else if value.fract() == 0.0 && value >= 0.0 && value <= f64::from(u32::MAX) {
        dn_to_nps(value as u32)
    } else {
        None
    };
    found.ok_or_else(|| {
        warn!(value, ?units, "nominal size missing from NPS/DN table");
        ConversionError::NominalSizeNotFound(value)
    })
}

/// 설계 입력값을 표시 단위로 한 번에 환산한 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayDesignInputs {
    pub pressure: f64,
    pub temperature: f64,
    pub corrosion_allowance: f64,
    /// 허용응력이 비어 있으면 0 으로 표시한다.
    pub allowable_stress: f64,
}

/// 내부 기준(Imperial)의 설계 입력값을 지정한 단위 체계로 환산한다.
pub fn convert_design_inputs(units: Units, design: &DesignParameters) -> DisplayDesignInputs {
    DisplayDesignInputs {
        pressure: from_psi(design.pressure, units),
        temperature: from_fahrenheit(design.temperature, units),
        corrosion_allowance: from_inch(design.corrosion_allowance, units),
        allowable_stress: design
            .allowable_stress
            .map(|s| from_psi(s, units))
            .unwrap_or(0.0),
    }
}

/// 단위 체계 문자열을 enum 으로 변환한다.
pub fn parse_units(s: &str) -> Result<Units, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "imperial" | "us" | "usc" | "i" => Ok(Units::Imperial),
        "metric" | "si" | "m" => Ok(Units::Metric),
        _ => Err(ConversionError::UnknownUnits(s.to_string())),
    }
}

/// 물리량 문자열을 enum 으로 변환한다.
pub fn parse_quantity(s: &str) -> Result<QuantityKind, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "pressure" | "p" => Ok(QuantityKind::Pressure),
        "length" | "l" | "thickness" | "diameter" => Ok(QuantityKind::Length),
        "temperature" | "temp" | "t" => Ok(QuantityKind::Temperature),
        "nps" | "dn" | "nominal" | "nominal-size" => Ok(QuantityKind::NominalSize),
        _ => Err(ConversionError::UnknownQuantity(s.to_string())),
    }
}

/// 변환 방향 문자열을 enum 으로 변환한다.
pub fn parse_direction(s: &str) -> Result<ConversionDirection, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "to" | "to-display" => Ok(ConversionDirection::ToDisplay),
        "from" | "from-display" => Ok(ConversionDirection::FromDisplay),
        "to-imperial" => Ok(ConversionDirection::ToImperial),
        "from-imperial" => Ok(ConversionDirection::FromImperial),
        _ => Err(ConversionError::UnknownDirection(s.to_string())),
    }
}
