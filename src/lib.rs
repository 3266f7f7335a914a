//! 핵심 계산 로직을 라이브러리로 분리하여 대화형 메뉴와 서브커맨드가 같은 코드를 쓴다.

pub mod app;
pub mod b31_3;
pub mod config;
pub mod conversion;
pub mod design;
pub mod hydrotest;
pub mod i18n;
pub mod interpolation;
pub mod material_db;
pub mod pipe_schedule;
pub mod quantity;
pub mod ui_cli;
pub mod units;
pub mod z662;
