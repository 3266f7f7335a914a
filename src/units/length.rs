use super::Units;

const MM_PER_INCH: f64 = 25.4;

/// 표시 단위의 길이를 내부 기준(in)으로 변환한다.
pub fn to_inch(value: f64, units: Units) -> f64 {
    match units {
        Units::Imperial => value,
        Units::Metric => value / MM_PER_INCH,
    }
}

/// 인치 값을 표시 단위로 변환한다.
pub fn from_inch(value_in: f64, units: Units) -> f64 {
    match units {
        Units::Imperial => value_in,
        Units::Metric => value_in * MM_PER_INCH,
    }
}

/// 길이를 다른 단위 체계로 변환한다.
pub fn convert_length(value: f64, from: Units, to: Units) -> f64 {
    from_inch(to_inch(value, from), to)
}

pub fn unit_label(units: Units) -> &'static str {
    match units {
        Units::Imperial => "in",
        Units::Metric => "mm",
    }
}
