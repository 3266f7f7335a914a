use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::config::{Config, ConfigError};
use crate::conversion::ConversionError;
use crate::design::DesignError;
use crate::hydrotest::HydrotestError;
use crate::i18n::{self, Translator};
use crate::material_db::MaterialLookupError;
use crate::pipe_schedule::ScheduleError;
use crate::ui_cli;
use crate::ui_cli::MenuChoice;
use crate::z662::Z662Error;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
    /// 허용응력 조회 오류
    #[error("허용응력 조회 오류: {0}")]
    MaterialLookup(#[from] MaterialLookupError),
    /// 수압 시험 계산 오류
    #[error("수압 시험 계산 오류: {0}")]
    Hydrotest(#[from] HydrotestError),
    /// 배관 치수 조회 오류
    #[error("배관 치수 오류: {0}")]
    Schedule(#[from] ScheduleError),
    /// 설계 컨텍스트 오류
    #[error("설계 오류: {0}")]
    Design(#[from] DesignError),
    /// CSA Z662 계산 오류
    #[error("CSA Z662 계산 오류: {0}")]
    Z662(#[from] Z662Error),
}

impl AppError {
    /// 입출력/설정 오류는 메뉴 루프를 끝내야 한다.
    fn is_fatal(&self) -> bool {
        matches!(self, AppError::Io(_) | AppError::Config(_))
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 계산 오류는 출력 후 메뉴로 돌아가고, 설정은 설정 변경 시와 종료 시 저장한다.
pub fn run(config: &mut Config, config_path: &Path, mut tr: Translator) -> Result<(), AppError> {
    loop {
        let choice = ui_cli::main_menu(&tr)?;
        debug!(?choice, "menu selected");
        let outcome = match choice {
            MenuChoice::UnitConversion => ui_cli::handle_unit_conversion(&tr, config),
            MenuChoice::AllowableStress => ui_cli::handle_allowable_stress(&tr, config),
            MenuChoice::B31_3Thickness => ui_cli::handle_b31_3(&tr, config),
            MenuChoice::Hydrotest => ui_cli::handle_hydrotest(&tr, config),
            MenuChoice::Interpolation => ui_cli::handle_interpolation(&tr),
            MenuChoice::Z662 => ui_cli::handle_z662(&tr, config),
            MenuChoice::PipeSchedules => ui_cli::handle_pipe_schedules(&tr, config),
            MenuChoice::Settings => {
                ui_cli::handle_settings(&tr, config)?;
                config.save(config_path)?;
                let lang = i18n::resolve_language(None, config.language.as_deref());
                tr = Translator::new(&lang);
                Ok(())
            }
            MenuChoice::Exit => {
                config.save(config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        if let Err(err) = outcome {
            if err.is_fatal() {
                return Err(err);
            }
            debug!(error = %err, "calculation failed");
            println!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
        }
    }
    Ok(())
}
