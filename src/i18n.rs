use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_ITEMS: &str = "main_menu.items";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const INVALID_SELECTION: &str = "error.invalid_selection";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const PROMPT_SELECT: &str = "prompt.select";

    pub const UNIT_CONVERSION_HEADING: &str = "unit_conversion.heading";
    pub const UNIT_CONVERSION_OPTIONS: &str = "unit_conversion.options";
    pub const UNIT_CONVERSION_DIRECTIONS: &str = "unit_conversion.directions";
    pub const UNIT_CONVERSION_PROMPT_VALUE: &str = "unit_conversion.prompt_value";
    pub const UNIT_CONVERSION_RESULT: &str = "unit_conversion.result";

    pub const STRESS_HEADING: &str = "stress.heading";
    pub const STRESS_AVAILABLE: &str = "stress.available";
    pub const PROMPT_MATERIAL: &str = "prompt.material";
    pub const PROMPT_TEMPERATURE: &str = "prompt.temperature";
    pub const RESULT_STRESS: &str = "result.stress";
    pub const RESULT_INTERPOLATED: &str = "result.interpolated";
    pub const RESULT_EXACT: &str = "result.exact";

    pub const B31_3_HEADING: &str = "b31_3.heading";
    pub const B31_3_FORMULA: &str = "b31_3.formula";
    pub const PROMPT_PRESSURE: &str = "prompt.pressure";
    pub const PROMPT_NPS: &str = "prompt.nps";
    pub const PROMPT_SCHEDULE: &str = "prompt.schedule";
    pub const B31_3_TABLE_HEADER: &str = "b31_3.table_header";
    pub const RESULT_ADEQUATE: &str = "result.adequate";
    pub const RESULT_INADEQUATE: &str = "result.inadequate";
    pub const RESULT_NO_STRESS: &str = "result.no_stress";

    pub const HYDROTEST_HEADING: &str = "hydrotest.heading";
    pub const HYDROTEST_FORMULA: &str = "hydrotest.formula";
    pub const PROMPT_DESIGN_PRESSURE: &str = "prompt.design_pressure";
    pub const PROMPT_STRESS_TEST_TEMP: &str = "prompt.stress_test_temp";
    pub const PROMPT_STRESS_DESIGN_TEMP: &str = "prompt.stress_design_temp";
    pub const RESULT_TEST_PRESSURE: &str = "result.test_pressure";

    pub const INTERPOLATION_HEADING: &str = "interpolation.heading";
    pub const RESULT_INTERPOLATED_Y: &str = "result.interpolated_y";

    pub const Z662_HEADING: &str = "z662.heading";
    pub const PROMPT_OUTER_DIAMETER: &str = "prompt.outer_diameter";
    pub const PROMPT_SMYS: &str = "prompt.smys";
    pub const PROMPT_CORROSION_ALLOWANCE: &str = "prompt.corrosion_allowance";
    pub const Z662_SERVICE_OPTIONS: &str = "z662.service_options";
    pub const Z662_CLASS_PROMPT: &str = "z662.class_prompt";
    pub const Z662_JOINT_OPTIONS: &str = "z662.joint_options";
    pub const RESULT_FACTORS: &str = "result.factors";
    pub const RESULT_REQUIRED_THICKNESS: &str = "result.required_thickness";

    pub const SCHEDULE_HEADING: &str = "schedule.heading";
    pub const SCHEDULE_NONE: &str = "schedule.none";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_UNITS: &str = "settings.current_units";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_MENU: &str = "settings.menu";
    pub const SETTINGS_LANGUAGE_OPTIONS: &str = "settings.language_options";
    pub const SETTINGS_LANGUAGE_SAVED: &str = "settings.language_saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
}

impl Translator {
    /// 언어 코드에 따라 번역기를 생성한다. ko 로 시작하지 않으면 영어를 쓴다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 한국어 번역이 없으면 영어 문자열로 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        match self.lang {
            Language::Ko => ko(key).unwrap_or_else(|| en(key)),
            Language::En => en(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn detect_system_language() -> Option<String> {
    get_locale().and_then(|l| normalize_lang(&l))
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 배관 두께 계산기 (ASME B31.3 / CSA Z662) ===",
        MAIN_MENU_ITEMS => "1) 단위 변환\n2) 허용응력 조회\n3) B31.3 요구 두께\n4) 수압 시험 압력\n5) 선형 보간\n6) CSA Z662\n7) 배관 스케줄\n8) 설정\n0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        INVALID_SELECTION => "잘못된 선택입니다.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        PROMPT_SELECT => "선택: ",
        UNIT_CONVERSION_HEADING => "\n-- 단위 변환 --",
        UNIT_CONVERSION_OPTIONS => "1) 압력  2) 길이  3) 온도  4) 호칭경(NPS/DN)",
        UNIT_CONVERSION_DIRECTIONS => "1) 기준→표시  2) 표시→기준  3) 표시→Imperial  4) Imperial→표시",
        UNIT_CONVERSION_PROMPT_VALUE => "값 입력: ",
        UNIT_CONVERSION_RESULT => "변환 결과:",
        STRESS_HEADING => "\n-- 허용응력 조회 --",
        STRESS_AVAILABLE => "사용 가능한 재료:",
        PROMPT_MATERIAL => "재료 코드: ",
        PROMPT_TEMPERATURE => "설계 온도",
        RESULT_STRESS => "허용응력:",
        RESULT_INTERPOLATED => "(보간값)",
        RESULT_EXACT => "(테이블값)",
        B31_3_HEADING => "\n-- ASME B31.3 요구 두께 --",
        B31_3_FORMULA => "t = (P·D / (2·(S·E·W + P·Y)) + c) / (1 - 제작공차)",
        PROMPT_PRESSURE => "설계 압력",
        PROMPT_NPS => "호칭경(예: 4, 1-1/2, 빈 입력 시 종료): ",
        PROMPT_SCHEDULE => "스케줄(예: 40, STD, 80S): ",
        B31_3_TABLE_HEADER => "배관            Sch    외경        공칭두께    요구두께    판정",
        RESULT_ADEQUATE => "적합",
        RESULT_INADEQUATE => "부적합",
        RESULT_NO_STRESS => "허용응력을 찾지 못해 0 으로 계산했습니다.",
        HYDROTEST_HEADING => "\n-- 수압 시험 압력 (B31.3 345.4.2) --",
        HYDROTEST_FORMULA => "Pt = 1.5 · P · St / S  (시험 온도는 보통 38 °C 미만)",
        PROMPT_DESIGN_PRESSURE => "내부 설계 게이지 압력 P",
        PROMPT_STRESS_TEST_TEMP => "시험 온도 허용응력 St",
        PROMPT_STRESS_DESIGN_TEMP => "설계 온도 허용응력 S",
        RESULT_TEST_PRESSURE => "시험 게이지 압력 Pt:",
        INTERPOLATION_HEADING => "\n-- 선형 보간 --",
        RESULT_INTERPOLATED_Y => "보간 결과 y:",
        Z662_HEADING => "\n-- CSA Z662 요구 두께 --",
        PROMPT_OUTER_DIAMETER => "외경",
        PROMPT_SMYS => "규정 최소 항복강도 S",
        PROMPT_CORROSION_ALLOWANCE => "부식 여유",
        Z662_SERVICE_OPTIONS => "유체: 1) 비사워 가스 2) 사워 가스 3) HVP/CO2 4) LVP",
        Z662_CLASS_PROMPT => "지역 등급(1~4): ",
        Z662_JOINT_OPTIONS => "관 형식: 1) 무계목 2) ERW 3) SAW 4) 플래시 용접 5) 연속 용접",
        RESULT_FACTORS => "계수 F/L/J/T:",
        RESULT_REQUIRED_THICKNESS => "요구 두께:",
        SCHEDULE_HEADING => "\n-- 배관 스케줄 --",
        SCHEDULE_NONE => "치수표에 없는 호칭경입니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_UNITS => "현재 단위 체계:",
        SETTINGS_OPTIONS => "1) Imperial (psi, in, °F)  2) Metric (kPa, mm, °C)",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "단위 체계가 다음으로 설정되었습니다:",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_MENU => "1) 단위 체계  2) 언어",
        SETTINGS_LANGUAGE_OPTIONS => "1) 한국어  2) English  3) 자동(시스템 로캘)",
        SETTINGS_LANGUAGE_SAVED => "언어가 다음으로 설정되었습니다:",
        _ => return None,
    })
}

fn en(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Pipe Wall Thickness Toolbox (ASME B31.3 / CSA Z662) ===",
        MAIN_MENU_ITEMS => "1) Unit Converter\n2) Allowable Stress Lookup\n3) B31.3 Required Thickness\n4) Hydro Test Pressure\n5) Linear Interpolation\n6) CSA Z662\n7) Pipe Schedules\n8) Settings\n0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        INVALID_SELECTION => "Invalid selection.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        PROMPT_SELECT => "Select: ",
        UNIT_CONVERSION_HEADING => "\n-- Unit Conversion --",
        UNIT_CONVERSION_OPTIONS => "1) Pressure  2) Length  3) Temperature  4) Nominal size (NPS/DN)",
        UNIT_CONVERSION_DIRECTIONS => "1) base→display  2) display→base  3) display→Imperial  4) Imperial→display",
        UNIT_CONVERSION_PROMPT_VALUE => "Value: ",
        UNIT_CONVERSION_RESULT => "Result:",
        STRESS_HEADING => "\n-- Allowable Stress Lookup --",
        STRESS_AVAILABLE => "Available materials:",
        PROMPT_MATERIAL => "Material code: ",
        PROMPT_TEMPERATURE => "Design temperature",
        RESULT_STRESS => "Allowable stress:",
        RESULT_INTERPOLATED => "(interpolated)",
        RESULT_EXACT => "(table value)",
        B31_3_HEADING => "\n-- ASME B31.3 Required Thickness --",
        B31_3_FORMULA => "t = (P·D / (2·(S·E·W + P·Y)) + c) / (1 - mill tolerance)",
        PROMPT_PRESSURE => "Design pressure",
        PROMPT_NPS => "NPS (e.g. 4, 1-1/2; empty to finish): ",
        PROMPT_SCHEDULE => "Schedule (e.g. 40, STD, 80S): ",
        B31_3_TABLE_HEADER => "Pipe            Sch    OD          t nominal   t required  Check",
        RESULT_ADEQUATE => "OK",
        RESULT_INADEQUATE => "NOT OK",
        RESULT_NO_STRESS => "Allowable stress not found; calculated with 0.",
        HYDROTEST_HEADING => "\n-- Hydro Test Pressure (B31.3 345.4.2) --",
        HYDROTEST_FORMULA => "Pt = 1.5 · P · St / S  (test temperature typically < 38 °C)",
        PROMPT_DESIGN_PRESSURE => "Internal design gauge pressure P",
        PROMPT_STRESS_TEST_TEMP => "Allowable stress at test temperature St",
        PROMPT_STRESS_DESIGN_TEMP => "Allowable stress at design temperature S",
        RESULT_TEST_PRESSURE => "Test gauge pressure Pt:",
        INTERPOLATION_HEADING => "\n-- Linear Interpolation --",
        RESULT_INTERPOLATED_Y => "Interpolated y:",
        Z662_HEADING => "\n-- CSA Z662 Required Thickness --",
        PROMPT_OUTER_DIAMETER => "Outer diameter",
        PROMPT_SMYS => "Specified minimum yield strength S",
        PROMPT_CORROSION_ALLOWANCE => "Corrosion allowance",
        Z662_SERVICE_OPTIONS => "Service: 1) Non-sour gas 2) Sour gas 3) HVP/CO2 4) LVP",
        Z662_CLASS_PROMPT => "Location class (1-4): ",
        Z662_JOINT_OPTIONS => "Pipe type: 1) Seamless 2) ERW 3) SAW 4) Flash welded 5) Continuous welded",
        RESULT_FACTORS => "Factors F/L/J/T:",
        RESULT_REQUIRED_THICKNESS => "Required thickness:",
        SCHEDULE_HEADING => "\n-- Pipe Schedules --",
        SCHEDULE_NONE => "NPS not in the dimension table.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_UNITS => "Current unit system:",
        SETTINGS_OPTIONS => "1) Imperial (psi, in, °F)  2) Metric (kPa, mm, °C)",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; unit system unchanged.",
        SETTINGS_SAVED => "Unit system changed to:",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_MENU => "1) Unit system  2) Language",
        SETTINGS_LANGUAGE_OPTIONS => "1) 한국어  2) English  3) Auto (system locale)",
        SETTINGS_LANGUAGE_SAVED => "Language changed to:",
        _ => "[missing translation]",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flag_wins_over_config() {
        assert_eq!(resolve_language(Some("ko-KR"), Some("en")), "ko");
        assert_eq!(resolve_language(Some("auto"), Some("en-US")), "en");
    }

    #[test]
    fn every_korean_key_has_english_text() {
        use keys::*;
        for key in [MAIN_MENU_TITLE, B31_3_FORMULA, SETTINGS_SAVED, RESULT_FACTORS] {
            assert!(ko(key).is_some());
            assert_ne!(en(key), "[missing translation]");
        }
    }
}
