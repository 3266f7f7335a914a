//! 재료별 온도-허용응력 테이블과 보간 조회.
//!
//! Metric 테이블은 °C / kPa, Imperial 테이블은 °F / psi 로 작성되어 있다.
//! 조회 결과는 항상 psi 로 정규화한다. 값은 참고용이며 설계 시 최신
//! ASME B31.3 Table A-1 로 검증해야 한다.

use thiserror::Error;
use tracing::{debug, warn};

use crate::interpolation::linear_interpolation;
use crate::units::{convert_temperature, to_psi, Units};

/// 재료 한 줄. `stresses[i]` 는 테이블 온도 `temperatures[i]` 에 대응한다.
///
/// 일부 재료는 테이블 온도 열보다 값이 적다(고온 쪽이 비어 있음).
/// 없는 칸은 인덱스 조회가 `None` 이 되는 부분 매핑으로 다룬다.
#[derive(Debug)]
pub struct MaterialData {
    pub code: &'static str,
    pub name: &'static str,
    pub notes: &'static str,
    pub stresses: &'static [f64],
}

impl MaterialData {
    /// i 번째 온도 열의 응력값. 짧은 행이면 `None`.
    pub fn stress_at(&self, index: usize) -> Option<f64> {
        self.stresses.get(index).copied()
    }
}

/// 단위 카테고리 하나의 허용응력 테이블.
#[derive(Debug)]
pub struct StressTable {
    pub category: Units,
    pub label: &'static str,
    /// 엄격히 증가하는 온도 열 (Metric=°C, Imperial=°F)
    pub temperatures: &'static [f64],
    pub materials: &'static [MaterialData],
}

impl StressTable {
    pub fn find_material(&self, code: &str) -> Option<&'static MaterialData> {
        let wanted = normalize_code(code);
        self.materials
            .iter()
            .find(|m| normalize_code(m.code) == wanted || normalize_code(m.name) == wanted)
    }
}

/// 조회 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialValue {
    /// psi 로 정규화한 허용응력
    pub stress_psi: f64,
    /// 테이블 고유 단위로 환산한 조회 온도
    pub lookup_temperature: f64,
    /// true 면 두 테이블 점 사이를 보간한 값이다.
    pub interpolated: bool,
}

/// 테이블 조회 실패. 모두 "값 없음" 으로 취급되며 계산을 중단시키지 않는다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MaterialLookupError {
    #[error("{category} 테이블에 재료 '{code}' 가 없습니다")]
    UnknownMaterial { code: String, category: Units },
    #[error("{0} 테이블에 온도 데이터가 없습니다")]
    EmptyTable(Units),
    #[error("조회 온도가 유효하지 않습니다: {0}")]
    InvalidTemperature(f64),
    #[error("온도 {temperature} 가 테이블 범위({min}~{max}) 밖입니다")]
    OutOfRange { temperature: f64, min: f64, max: f64 },
    #[error("재료 '{code}' 의 온도 {temperature} 부근 데이터가 부족합니다")]
    InsufficientData { code: &'static str, temperature: f64 },
}

/// 카테고리별 테이블을 반환한다.
pub fn stress_table(category: Units) -> &'static StressTable {
    match category {
        Units::Metric => &METRIC_TABLE,
        Units::Imperial => &IMPERIAL_TABLE,
    }
}

/// 카테고리에서 사용 가능한 재료 코드 목록.
pub fn materials(category: Units) -> impl Iterator<Item = &'static str> {
    stress_table(category).materials.iter().map(|m| m.code)
}

/// 재료/카테고리/온도로 허용응력을 조회한다.
///
/// `temperature` 는 호출 측 표시 단위(`display_units`) 기준이며 테이블 고유
/// 온도 단위로 환산한 뒤 조회한다. 테이블 범위 밖은 외삽하지 않는다.
/// 정확히 테이블 온도와 일치하면 보간 없이 테이블 값을 돌려준다.
pub fn allowable_stress(
    code: &str,
    category: Units,
    temperature: f64,
    display_units: Units,
) -> Result<MaterialValue, MaterialLookupError> {
    let table = stress_table(category);
    let material = table.find_material(code).ok_or_else(|| {
        warn!(code, %category, "material not found in stress table");
        MaterialLookupError::UnknownMaterial {
            code: code.to_string(),
            category,
        }
    })?;
    let columns = table.temperatures;
    let (Some(&min), Some(&max)) = (columns.first(), columns.last()) else {
        return Err(MaterialLookupError::EmptyTable(category));
    };

    let t = convert_temperature(temperature, display_units, category);
    if !t.is_finite() {
        return Err(MaterialLookupError::InvalidTemperature(t));
    }
    if t < min || t > max {
        warn!(temperature = t, min, max, %category, "temperature outside stress table");
        return Err(MaterialLookupError::OutOfRange {
            temperature: t,
            min,
            max,
        });
    }

    // t >= min 이므로 항상 하나 이상 존재한다.
    let lower = columns.iter().rposition(|&c| c <= t).unwrap_or(0);
    let insufficient = || MaterialLookupError::InsufficientData {
        code: material.code,
        temperature: t,
    };

    if columns[lower] == t {
        let raw = material.stress_at(lower).ok_or_else(insufficient)?;
        return Ok(MaterialValue {
            stress_psi: to_psi(raw, category),
            lookup_temperature: t,
            interpolated: false,
        });
    }

    let upper = lower + 1;
    let (Some(&x1), Some(y0), Some(y1)) = (
        columns.get(upper),
        material.stress_at(lower),
        material.stress_at(upper),
    ) else {
        warn!(code = material.code, temperature = t, "stress row ends before interpolation span");
        return Err(insufficient());
    };
    let x0 = columns[lower];
    let raw = linear_interpolation(t, x0, y0, x1, y1);
    debug!(code = material.code, t, x0, x1, y0, y1, raw, "interpolated allowable stress");
    Ok(MaterialValue {
        stress_psi: to_psi(raw, category),
        lookup_temperature: t,
        interpolated: true,
    })
}

/// 설계 컨텍스트용 허용응력 [psi].
///
/// 첫 열보다 낮은 온도는 첫 열 값을 쓰고 나머지는 [`allowable_stress`] 와
/// 같다. 값을 찾지 못하면 `None`.
pub fn design_stress(code: &str, category: Units, temperature: f64, display_units: Units) -> Option<f64> {
    let first = stress_table(category).temperatures.first().copied()?;
    let t = convert_temperature(temperature, display_units, category);
    // NaN 은 그대로 넘겨 InvalidTemperature 로 떨어지게 한다.
    let t = if t < first { first } else { t };
    allowable_stress(code, category, t, category)
        .ok()
        .map(|v| v.stress_psi)
}

/// 정확히 일치하는 테이블 온도에서만 원본 값(테이블 단위)을 돌려준다.
pub fn exact_stress(category: Units, code: &str, temperature: f64) -> Option<f64> {
    let table = stress_table(category);
    let index = table.temperatures.iter().position(|&c| c == temperature)?;
    table.find_material(code)?.stress_at(index)
}

/// 보간 없이 "조회 온도 이하의 가장 큰 테이블 온도" 열 값을 psi 로 돌려준다.
///
/// 첫 열보다 낮은 온도는 첫 열 값을 쓴다. 행이 짧아 해당 열이 비어 있으면
/// 행의 마지막 값으로 대신하지 않고 오류를 돌려준다.
pub fn stepped_stress(
    code: &str,
    units: Units,
    temperature: f64,
) -> Result<MaterialValue, MaterialLookupError> {
    let table = stress_table(units);
    let material = table
        .find_material(code)
        .ok_or_else(|| MaterialLookupError::UnknownMaterial {
            code: code.to_string(),
            category: units,
        })?;
    if table.temperatures.is_empty() {
        return Err(MaterialLookupError::EmptyTable(units));
    }
    if !temperature.is_finite() {
        return Err(MaterialLookupError::InvalidTemperature(temperature));
    }
    let index = table
        .temperatures
        .iter()
        .rposition(|&c| temperature >= c)
        .unwrap_or(0);
    let raw = material
        .stress_at(index)
        .ok_or(MaterialLookupError::InsufficientData {
            code: material.code,
            temperature,
        })?;
    Ok(MaterialValue {
        stress_psi: to_psi(raw, units),
        lookup_temperature: table.temperatures[index],
        interpolated: false,
    })
}

fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

static METRIC_TABLE: StressTable = StressTable {
    category: Units::Metric,
    label: "Up to 40 °C (kPa)",
    temperatures: &[
        40.0, 65.0, 100.0, 150.0, 200.0, 250.0, 300.0, 325.0, 350.0, 375.0, 400.0, 425.0, 450.0,
        475.0, 500.0, 525.0, 550.0, 575.0, 600.0,
    ],
    materials: &[
        MaterialData {
            code: "A106B",
            name: "ASTM A106 Gr.B",
            notes: "Carbon steel seamless",
            stresses: &[
                138000.0, 138000.0, 138000.0, 138000.0, 138000.0, 132000.0, 126000.0, 122000.0,
                118000.0, 113000.0, 95100.0, 79500.0, 62600.0, 45000.0, 31700.0, 21400.0, 14200.0,
                9400.0, 6890.0,
            ],
        },
        MaterialData {
            code: "A3336",
            name: "ASTM A333 Gr.6",
            notes: "Carbon steel, low temperature service",
            stresses: &[
                138000.0, 138000.0, 138000.0, 138000.0, 138000.0, 132000.0, 126000.0, 122000.0,
                118000.0, 113000.0, 95100.0, 79500.0, 62600.0, 45000.0, 31700.0, 21400.0, 14200.0,
                9400.0, 6890.0,
            ],
        },
        MaterialData {
            code: "A312TP316L",
            name: "ASTM A312 TP316L",
            notes: "Austenitic stainless steel",
            stresses: &[
                138000.0, 138000.0, 138000.0, 138000.0, 134000.0, 125000.0, 119000.0, 116000.0,
                114000.0, 112000.0, 111000.0, 110000.0, 109000.0, 108000.0, 107000.0, 106000.0,
                105000.0, 97800.0, 80800.0,
            ],
        },
        MaterialData {
            code: "A312TP304L",
            name: "ASTM A312 TP304L",
            notes: "Austenitic stainless steel; 525 °C 까지만 값이 있음",
            stresses: &[
                138000.0, 138000.0, 138000.0, 138000.0, 129000.0, 122000.0, 116000.0, 113000.0,
                111000.0, 109000.0, 107000.0, 105000.0, 103000.0, 101000.0, 99100.0, 97300.0,
            ],
        },
    ],
};

static IMPERIAL_TABLE: StressTable = StressTable {
    category: Units::Imperial,
    label: "Up to 100 °F (psi)",
    temperatures: &[
        100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 650.0, 700.0, 750.0, 800.0, 850.0, 900.0, 950.0,
        1000.0, 1050.0, 1100.0,
    ],
    materials: &[
        MaterialData {
            code: "A106B",
            name: "ASTM A106 Gr.B",
            notes: "Carbon steel seamless",
            stresses: &[
                20000.0, 20000.0, 20000.0, 19900.0, 19000.0, 17900.0, 17300.0, 16700.0, 13900.0,
                11400.0, 8700.0, 5900.0, 4000.0, 2500.0, 1600.0, 1000.0,
            ],
        },
        MaterialData {
            code: "A3336",
            name: "ASTM A333 Gr.6",
            notes: "Carbon steel, low temperature service",
            stresses: &[
                20000.0, 20000.0, 20000.0, 19900.0, 19000.0, 17900.0, 17300.0, 16700.0, 13900.0,
                11400.0, 8700.0, 5900.0, 4000.0, 2500.0, 1600.0, 1000.0,
            ],
        },
        MaterialData {
            code: "A312TP316L",
            name: "ASTM A312 TP316L",
            notes: "Austenitic stainless steel",
            stresses: &[
                20000.0, 20000.0, 20000.0, 19300.0, 18000.0, 17000.0, 16600.0, 16300.0, 16100.0,
                15900.0, 15700.0, 15600.0, 15400.0, 15300.0, 15100.0, 12400.0,
            ],
        },
        MaterialData {
            code: "A312TP304L",
            name: "ASTM A312 TP304L",
            notes: "Austenitic stainless steel",
            stresses: &[
                20000.0, 20000.0, 20000.0, 18600.0, 17500.0, 16600.0, 16200.0, 15800.0, 15500.0,
                15200.0, 14900.0, 14600.0, 14300.0, 14000.0, 12400.0, 9800.0,
            ],
        },
    ],
};
