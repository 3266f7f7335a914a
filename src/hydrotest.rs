//! ASME B31.3 345.4.2 수압 시험 압력.

use thiserror::Error;

/// 수압 시험 압력 계산 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HydrotestError {
    /// 설계 온도 허용응력 S 가 0 이면 비율이 정의되지 않는다.
    #[error("설계 온도 허용응력이 0 입니다")]
    ZeroDesignStress,
    #[error("입력값이 유한하지 않습니다: {0}")]
    NonFinite(&'static str),
}

/// Pt = 1.5 · P · St / S
///
/// `design_pressure` 와 결과의 단위는 같다. St, S 는 같은 단위이기만 하면 된다.
pub fn hydrotest_pressure(
    design_pressure: f64,
    stress_at_test_temp: f64,
    stress_at_design_temp: f64,
) -> Result<f64, HydrotestError> {
    for (name, v) in [
        ("design_pressure", design_pressure),
        ("stress_at_test_temp", stress_at_test_temp),
        ("stress_at_design_temp", stress_at_design_temp),
    ] {
        if !v.is_finite() {
            return Err(HydrotestError::NonFinite(name));
        }
    }
    if stress_at_design_temp == 0.0 {
        return Err(HydrotestError::ZeroDesignStress);
    }
    Ok(1.5 * design_pressure * stress_at_test_temp / stress_at_design_temp)
}
