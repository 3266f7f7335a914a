use super::Units;

/// 1 psi 에 해당하는 kPa.
pub const KPA_PER_PSI: f64 = 6.89476;

/// 표시 단위의 압력을 내부 기준(psi)으로 변환한다.
pub fn to_psi(value: f64, units: Units) -> f64 {
    match units {
        Units::Imperial => value,
        Units::Metric => value / KPA_PER_PSI,
    }
}

/// psi 값을 표시 단위로 변환한다.
pub fn from_psi(value_psi: f64, units: Units) -> f64 {
    match units {
        Units::Imperial => value_psi,
        Units::Metric => value_psi * KPA_PER_PSI,
    }
}

/// 압력을 다른 단위 체계로 변환한다.
pub fn convert_pressure(value: f64, from: Units, to: Units) -> f64 {
    from_psi(to_psi(value, from), to)
}

pub fn unit_label(units: Units) -> &'static str {
    match units {
        Units::Imperial => "psi",
        Units::Metric => "kPa",
    }
}
