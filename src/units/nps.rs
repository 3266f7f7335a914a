//! 호칭경(NPS) ↔ DN 대응표.
//!
//! 공식이 아닌 고정 테이블 조회이므로 표에 없는 값은 `None` 으로 돌려준다.

/// 호칭경 한 항목. `inches` 는 분수 표기를 소수로 바꾼 값이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NominalSize {
    pub label: &'static str,
    pub inches: f64,
    pub dn: u32,
}

const fn ns(label: &'static str, inches: f64, dn: u32) -> NominalSize {
    NominalSize { label, inches, dn }
}

const NOMINAL_SIZES: &[NominalSize] = &[
    ns("1/8", 0.125, 6),
    ns("1/4", 0.25, 8),
    ns("3/8", 0.375, 10),
    ns("1/2", 0.5, 15),
    ns("3/4", 0.75, 20),
    ns("1", 1.0, 25),
    ns("1-1/4", 1.25, 32),
    ns("1-1/2", 1.5, 40),
    ns("2", 2.0, 50),
    ns("2-1/2", 2.5, 65),
    ns("3", 3.0, 80),
    ns("3-1/2", 3.5, 90),
    ns("4", 4.0, 100),
    ns("5", 5.0, 125),
    ns("6", 6.0, 150),
    ns("8", 8.0, 200),
    ns("10", 10.0, 250),
    ns("12", 12.0, 300),
    ns("14", 14.0, 350),
    ns("16", 16.0, 400),
    ns("18", 18.0, 450),
    ns("20", 20.0, 500),
    ns("24", 24.0, 600),
    ns("26", 26.0, 650),
    ns("28", 28.0, 700),
    ns("30", 30.0, 750),
    ns("32", 32.0, 800),
    ns("34", 34.0, 850),
    ns("36", 36.0, 900),
];

const MATCH_EPS: f64 = 1e-9;

/// 지원하는 호칭경 전체 목록(작은 순).
pub fn nominal_sizes() -> &'static [NominalSize] {
    NOMINAL_SIZES
}

/// 인치 호칭경에 해당하는 항목을 찾는다.
pub fn find_by_inches(inches: f64) -> Option<&'static NominalSize> {
    NOMINAL_SIZES
        .iter()
        .find(|s| (s.inches - inches).abs() < MATCH_EPS)
}

/// 라벨("1-1/2", "3/4", "10")로 항목을 찾는다.
pub fn find_by_label(label: &str) -> Option<&'static NominalSize> {
    let inches = parse_nps_label(label)?;
    find_by_inches(inches)
}

/// NPS(in) → DN.
pub fn nps_to_dn(inches: f64) -> Option<u32> {
    find_by_inches(inches).map(|s| s.dn)
}

/// DN → NPS(in).
pub fn dn_to_nps(dn: u32) -> Option<f64> {
    NOMINAL_SIZES.iter().find(|s| s.dn == dn).map(|s| s.inches)
}

/// NPS(in) 의 분수 라벨.
pub fn nps_label(inches: f64) -> Option<&'static str> {
    find_by_inches(inches).map(|s| s.label)
}

/// 분수/대분수/소수 표기를 인치 값으로 해석한다.
///
/// `1-1/2`, `1 1/2`, `3/4`, `10`, `1.5`, `2"` 를 허용한다.
pub fn parse_nps_label(label: &str) -> Option<f64> {
    let s = label.trim().trim_end_matches('"').trim();
    if s.is_empty() {
        return None;
    }
    let (whole, frac) = match s.split_once(['-', ' ']) {
        Some((w, f)) => (Some(w.trim()), f.trim()),
        None => (None, s),
    };
    let frac_value = match frac.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => frac.parse().ok()?,
    };
    let value = match whole {
        Some(w) => w.parse::<f64>().ok()? + frac_value,
        None => frac_value,
    };
    value.is_finite().then_some(value)
}
