//! ASME B36.10M / B36.19M 배관 외경·스케줄 두께 (NPS 1/2"~24").
//!
//! 값은 인치 기준으로 저장하고 조회 시 표시 단위로 환산한다. 스케줄이
//! 정의되지 않은 호칭경은 항목 자체가 없다.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::units::{from_inch, nps_label, Units};

/// 배관 스케줄(두께 등급).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Schedule {
    S5S,
    S5,
    S10,
    S10S,
    S20,
    S30,
    S40S,
    Std,
    S40,
    S60,
    S80S,
    Xh,
    S80,
    S100,
    S120,
    S140,
    S160,
    Xxh,
}

impl Schedule {
    /// 화면/보고서 표시 순서.
    pub const ALL: [Schedule; 18] = [
        Schedule::S5S,
        Schedule::S5,
        Schedule::S10,
        Schedule::S10S,
        Schedule::S20,
        Schedule::S30,
        Schedule::S40S,
        Schedule::Std,
        Schedule::S40,
        Schedule::S60,
        Schedule::S80S,
        Schedule::Xh,
        Schedule::S80,
        Schedule::S100,
        Schedule::S120,
        Schedule::S140,
        Schedule::S160,
        Schedule::Xxh,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Schedule::S5S => "5S",
            Schedule::S5 => "5",
            Schedule::S10 => "10",
            Schedule::S10S => "10S",
            Schedule::S20 => "20",
            Schedule::S30 => "30",
            Schedule::S40S => "40S",
            Schedule::Std => "STD",
            Schedule::S40 => "40",
            Schedule::S60 => "60",
            Schedule::S80S => "80S",
            Schedule::Xh => "XH",
            Schedule::S80 => "80",
            Schedule::S100 => "100",
            Schedule::S120 => "120",
            Schedule::S140 => "140",
            Schedule::S160 => "160",
            Schedule::Xxh => "XXH",
        }
    }

    fn order(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(usize::MAX)
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Schedule {
    type Err = ScheduleError;

    /// `40`, `Sch 40`, `sch40`, `xs`, `80s` 등을 허용한다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let key = lower
            .strip_prefix("sch")
            .unwrap_or(&lower)
            .trim_start_matches(['.', ' '])
            .trim();
        let found = match key {
            "xs" => Some(Schedule::Xh),
            "xxs" => Some(Schedule::Xxh),
            other => Schedule::ALL
                .iter()
                .copied()
                .find(|sch| sch.label().eq_ignore_ascii_case(other)),
        };
        found.ok_or_else(|| ScheduleError::UnknownSchedule(s.to_string()))
    }
}

/// 스케줄 조회 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("치수표에 없는 호칭경: {0}\"")]
    NpsNotFound(f64),
    #[error("알 수 없는 스케줄: {0}")]
    UnknownSchedule(String),
    #[error("호칭경을 해석할 수 없습니다: {0}")]
    InvalidNps(String),
    #[error("호칭경 {nps}\" 에는 스케줄 {schedule} 두께가 없습니다")]
    ScheduleNotAvailable { nps: f64, schedule: Schedule },
}

/// 표시 단위로 환산한 배관 치수.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeDimensions {
    pub outer_diameter: f64,
    pub wall_thickness: f64,
}

#[derive(Debug)]
struct PipeSizeData {
    nps: f64,
    od_in: f64,
    walls: &'static [(Schedule, f64)],
}

impl PipeSizeData {
    fn wall(&self, schedule: Schedule) -> Option<f64> {
        self.walls
            .iter()
            .find(|(s, _)| *s == schedule)
            .map(|&(_, t)| t)
    }
}

fn find_size(nps: f64) -> Result<&'static PipeSizeData, ScheduleError> {
    PIPE_SIZES
        .iter()
        .find(|p| (p.nps - nps).abs() < 1e-9)
        .ok_or(ScheduleError::NpsNotFound(nps))
}

/// 치수표에 있는 호칭경(in) 목록.
pub fn pipe_sizes() -> impl Iterator<Item = f64> {
    PIPE_SIZES.iter().map(|p| p.nps)
}

/// 호칭경 외경을 표시 단위로 돌려준다.
pub fn outer_diameter(nps: f64, units: Units) -> Result<f64, ScheduleError> {
    Ok(from_inch(find_size(nps)?.od_in, units))
}

/// 호칭경/스케줄의 외경과 공칭 두께를 표시 단위로 돌려준다.
pub fn pipe_dimensions(
    nps: f64,
    schedule: Schedule,
    units: Units,
) -> Result<PipeDimensions, ScheduleError> {
    let size = find_size(nps)?;
    let wall = size
        .wall(schedule)
        .ok_or(ScheduleError::ScheduleNotAvailable { nps, schedule })?;
    Ok(PipeDimensions {
        outer_diameter: from_inch(size.od_in, units),
        wall_thickness: from_inch(wall, units),
    })
}

/// 호칭경에서 사용 가능한 스케줄(표시 순서). 치수표에 없으면 빈 목록.
pub fn available_schedules(nps: f64) -> Vec<Schedule> {
    let Ok(size) = find_size(nps) else {
        return Vec::new();
    };
    let mut schedules: Vec<Schedule> = size.walls.iter().map(|&(s, _)| s).collect();
    schedules.sort_by_key(Schedule::order);
    schedules
}

/// 보고서용 "NPS 1-1/2" 형식 라벨. 대응표에 없으면 소수 표기.
pub fn describe_nps(nps: f64) -> String {
    match nps_label(nps) {
        Some(label) => format!("NPS {label}"),
        None => format!("NPS {nps}"),
    }
}

use Schedule::*;

static PIPE_SIZES: &[PipeSizeData] = &[
    PipeSizeData {
        nps: 0.5,
        od_in: 0.840,
        walls: &[
            (S5S, 0.065),
            (S10S, 0.083),
            (S40S, 0.109),
            (Std, 0.109),
            (S40, 0.109),
            (S80S, 0.147),
            (Xh, 0.147),
            (S80, 0.147),
            (S160, 0.188),
            (Xxh, 0.294),
        ],
    },
    PipeSizeData {
        nps: 0.75,
        od_in: 1.050,
        walls: &[
            (S5S, 0.065),
            (S10S, 0.083),
            (S40S, 0.113),
            (Std, 0.113),
            (S40, 0.113),
            (S80S, 0.154),
            (Xh, 0.154),
            (S80, 0.154),
            (S160, 0.219),
            (Xxh, 0.308),
        ],
    },
    PipeSizeData {
        nps: 1.0,
        od_in: 1.315,
        walls: &[
            (S5S, 0.065),
            (S10S, 0.109),
            (S40S, 0.133),
            (Std, 0.133),
            (S40, 0.133),
            (S80S, 0.179),
            (Xh, 0.179),
            (S80, 0.179),
            (S160, 0.250),
            (Xxh, 0.358),
        ],
    },
    PipeSizeData {
        nps: 1.25,
        od_in: 1.660,
        walls: &[
            (S5S, 0.065),
            (S10S, 0.109),
            (S40S, 0.140),
            (Std, 0.140),
            (S40, 0.140),
            (S80S, 0.191),
            (Xh, 0.191),
            (S80, 0.191),
            (S160, 0.250),
            (Xxh, 0.382),
        ],
    },
    PipeSizeData {
        nps: 1.5,
        od_in: 1.900,
        walls: &[
            (S5S, 0.065),
            (S10S, 0.109),
            (S40S, 0.145),
            (Std, 0.145),
            (S40, 0.145),
            (S80S, 0.200),
            (Xh, 0.200),
            (S80, 0.200),
            (S160, 0.281),
            (Xxh, 0.400),
        ],
    },
    PipeSizeData {
        nps: 2.0,
        od_in: 2.375,
        walls: &[
            (S5S, 0.065),
            (S10S, 0.109),
            (S40S, 0.154),
            (Std, 0.154),
            (S40, 0.154),
            (S80S, 0.218),
            (Xh, 0.218),
            (S80, 0.218),
            (S160, 0.344),
            (Xxh, 0.436),
        ],
    },
    PipeSizeData {
        nps: 2.5,
        od_in: 2.875,
        walls: &[
            (S5S, 0.083),
            (S10S, 0.120),
            (S40S, 0.203),
            (Std, 0.203),
            (S40, 0.203),
            (S80S, 0.276),
            (Xh, 0.276),
            (S80, 0.276),
            (S160, 0.375),
            (Xxh, 0.552),
        ],
    },
    PipeSizeData {
        nps: 3.0,
        od_in: 3.500,
        walls: &[
            (S5S, 0.083),
            (S10S, 0.120),
            (S40S, 0.216),
            (Std, 0.216),
            (S40, 0.216),
            (S80S, 0.300),
            (Xh, 0.300),
            (S80, 0.300),
            (S160, 0.438),
            (Xxh, 0.600),
        ],
    },
    PipeSizeData {
        nps: 4.0,
        od_in: 4.500,
        walls: &[
            (S5S, 0.083),
            (S10S, 0.120),
            (S40S, 0.237),
            (Std, 0.237),
            (S40, 0.237),
            (S80S, 0.337),
            (Xh, 0.337),
            (S80, 0.337),
            (S120, 0.438),
            (S160, 0.531),
            (Xxh, 0.674),
        ],
    },
    PipeSizeData {
        nps: 6.0,
        od_in: 6.625,
        walls: &[
            (S5S, 0.109),
            (S10S, 0.134),
            (S40S, 0.280),
            (Std, 0.280),
            (S40, 0.280),
            (S80S, 0.432),
            (Xh, 0.432),
            (S80, 0.432),
            (S120, 0.562),
            (S160, 0.719),
            (Xxh, 0.864),
        ],
    },
    PipeSizeData {
        nps: 8.0,
        od_in: 8.625,
        walls: &[
            (S5S, 0.109),
            (S10S, 0.148),
            (S20, 0.250),
            (S30, 0.277),
            (S40S, 0.322),
            (Std, 0.322),
            (S40, 0.322),
            (S60, 0.406),
            (S80S, 0.500),
            (Xh, 0.500),
            (S80, 0.500),
            (S100, 0.594),
            (S120, 0.719),
            (S140, 0.812),
            (S160, 0.906),
            (Xxh, 0.875),
        ],
    },
    PipeSizeData {
        nps: 10.0,
        od_in: 10.750,
        walls: &[
            (S5S, 0.134),
            (S10S, 0.165),
            (S20, 0.250),
            (S30, 0.307),
            (S40S, 0.365),
            (Std, 0.365),
            (S40, 0.365),
            (S60, 0.500),
            (S80S, 0.500),
            (Xh, 0.500),
            (S80, 0.594),
            (S100, 0.719),
            (S120, 0.844),
            (S140, 1.000),
            (S160, 1.125),
            (Xxh, 1.000),
        ],
    },
    PipeSizeData {
        nps: 12.0,
        od_in: 12.750,
        walls: &[
            (S5S, 0.156),
            (S10S, 0.180),
            (S20, 0.250),
            (S30, 0.330),
            (S40S, 0.375),
            (Std, 0.375),
            (S40, 0.406),
            (S60, 0.562),
            (S80S, 0.500),
            (Xh, 0.500),
            (S80, 0.688),
            (S100, 0.844),
            (S120, 1.000),
            (S140, 1.125),
            (S160, 1.312),
            (Xxh, 1.000),
        ],
    },
    PipeSizeData {
        nps: 14.0,
        od_in: 14.000,
        walls: &[
            (S5S, 0.156),
            (S10S, 0.188),
            (S10, 0.250),
            (S20, 0.312),
            (S30, 0.375),
            (Std, 0.375),
            (S40, 0.438),
            (Xh, 0.500),
            (S60, 0.594),
            (S80, 0.750),
            (S100, 0.938),
            (S120, 1.094),
            (S140, 1.250),
            (S160, 1.406),
        ],
    },
    PipeSizeData {
        nps: 16.0,
        od_in: 16.000,
        walls: &[
            (S5S, 0.165),
            (S10S, 0.188),
            (S10, 0.250),
            (S20, 0.312),
            (S30, 0.375),
            (Std, 0.375),
            (S40, 0.500),
            (Xh, 0.500),
            (S60, 0.656),
            (S80, 0.844),
            (S100, 1.031),
            (S120, 1.219),
            (S140, 1.438),
            (S160, 1.594),
        ],
    },
    PipeSizeData {
        nps: 18.0,
        od_in: 18.000,
        walls: &[
            (S5S, 0.165),
            (S10S, 0.188),
            (S10, 0.250),
            (S20, 0.312),
            (Std, 0.375),
            (S30, 0.438),
            (Xh, 0.500),
            (S40, 0.562),
            (S60, 0.750),
            (S80, 0.938),
            (S100, 1.156),
            (S120, 1.375),
            (S140, 1.562),
            (S160, 1.781),
        ],
    },
    PipeSizeData {
        nps: 20.0,
        od_in: 20.000,
        walls: &[
            (S5S, 0.188),
            (S10S, 0.218),
            (S10, 0.250),
            (S20, 0.375),
            (Std, 0.375),
            (S30, 0.500),
            (Xh, 0.500),
            (S40, 0.594),
            (S60, 0.812),
            (S80, 1.031),
            (S100, 1.281),
            (S120, 1.500),
            (S140, 1.750),
            (S160, 1.969),
        ],
    },
    PipeSizeData {
        nps: 24.0,
        od_in: 24.000,
        walls: &[
            (S5S, 0.218),
            (S10S, 0.250),
            (S10, 0.250),
            (S20, 0.375),
            (Std, 0.375),
            (Xh, 0.500),
            (S30, 0.562),
            (S40, 0.688),
            (S60, 0.969),
            (S80, 1.219),
            (S100, 1.531),
            (S120, 1.812),
            (S140, 2.062),
            (S160, 2.344),
        ],
    },
];
