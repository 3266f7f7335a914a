use serde::{Deserialize, Serialize};

/// 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantityKind {
    Pressure,
    Length,
    Temperature,
    NominalSize,
}

/// 변환 방향.
///
/// `ToDisplay`/`FromDisplay` 는 내부 기준(Imperial) ↔ 표시 단위,
/// `ToImperial`/`FromImperial` 은 표시 단위 ↔ Imperial 테이블 조회용 값이다.
/// 내부 기준이 Imperial 이므로 `ToImperial` 은 `FromDisplay` 와,
/// `FromImperial` 은 `ToDisplay` 와 결과가 같다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionDirection {
    ToDisplay,
    FromDisplay,
    ToImperial,
    FromImperial,
}

impl QuantityKind {
    /// 표시 단위 라벨.
    pub fn unit_label(&self, units: crate::units::Units) -> &'static str {
        use crate::units::{length, pressure, temperature, Units};
        match self {
            QuantityKind::Pressure => pressure::unit_label(units),
            QuantityKind::Length => length::unit_label(units),
            QuantityKind::Temperature => temperature::unit_label(units),
            QuantityKind::NominalSize => match units {
                Units::Imperial => "in",
                Units::Metric => "DN",
            },
        }
    }
}
