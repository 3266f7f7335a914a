//! 단위 정의 및 변환 모듈 모음.
//!
//! 저장 기준은 항상 Imperial(psi, in, °F)이며 Metric 표시값은 경계에서만 환산한다.

pub mod length;
pub mod nps;
pub mod pressure;
pub mod temperature;

use serde::{Deserialize, Serialize};

pub use length::{convert_length, from_inch, to_inch};
pub use nps::{dn_to_nps, nps_label, nps_to_dn, parse_nps_label, NominalSize};
pub use pressure::{convert_pressure, from_psi, to_psi, KPA_PER_PSI};
pub use temperature::{convert_temperature, from_fahrenheit, to_fahrenheit};

/// 표시 단위 체계. 재료표 카테고리 선택에도 사용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Units {
    #[default]
    Imperial,
    Metric,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Imperial => "Imperial",
            Units::Metric => "Metric",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
