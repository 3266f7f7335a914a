use super::Units;

/// 표시 단위의 온도를 내부 기준(°F)으로 변환한다.
/// 섭씨 → 화씨는 F = C×9/5+32 의 아핀 변환이다.
pub fn to_fahrenheit(value: f64, units: Units) -> f64 {
    match units {
        Units::Imperial => value,
        Units::Metric => value * 9.0 / 5.0 + 32.0,
    }
}

/// 화씨 값을 표시 단위로 변환한다.
pub fn from_fahrenheit(value_f: f64, units: Units) -> f64 {
    match units {
        Units::Imperial => value_f,
        Units::Metric => (value_f - 32.0) * 5.0 / 9.0,
    }
}

/// 온도를 다른 단위 체계로 변환한다.
pub fn convert_temperature(value: f64, from: Units, to: Units) -> f64 {
    from_fahrenheit(to_fahrenheit(value, from), to)
}

pub fn unit_label(units: Units) -> &'static str {
    match units {
        Units::Imperial => "°F",
        Units::Metric => "°C",
    }
}
