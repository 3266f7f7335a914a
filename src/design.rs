//! 배관 목록과 설계 조건을 묶은 계산 컨텍스트.
//!
//! 단일 압력(모든 배관이 같은 압력/온도/재료) 과 다중 압력(배관마다 조건이
//! 다름) 두 가지를 제공한다. 값은 모두 Imperial 기준으로 저장하며 변경이
//! 일어날 때마다 영향을 받는 배관을 다시 계산한다.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::b31_3::{self, ThicknessInput, DEFAULT_E, DEFAULT_GAMMA, DEFAULT_MILL_TOL, DEFAULT_W};
use crate::material_db;
use crate::pipe_schedule::{self, Schedule, ScheduleError};
use crate::units::{from_inch, from_psi, nps_to_dn, Units};

/// 기본 배관: NPS 4", Sch 40.
pub const DEFAULT_NPS: f64 = 4.0;
pub const DEFAULT_SCHEDULE: Schedule = Schedule::S40;
/// 기본 설계 압력 [psi]
pub const DEFAULT_PRESSURE_PSI: f64 = 1440.0;
/// 기본 설계 온도 [°F]
pub const DEFAULT_TEMPERATURE_F: f64 = 100.0;
pub const DEFAULT_MATERIAL: &str = "A106B";

/// 설계 컨텍스트 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DesignError {
    #[error("배관을 찾을 수 없습니다: {0}")]
    PipeNotFound(Uuid),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// 모든 배관에 공통으로 적용하는 계수.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalDesignParams {
    /// 부식 여유 [in]
    pub corrosion_allowance: f64,
    #[serde(rename = "weld_joint_efficiency")]
    pub e: f64,
    #[serde(rename = "weld_strength_reduction")]
    pub w: f64,
    #[serde(rename = "temperature_coefficient")]
    pub gamma: f64,
    pub mill_tolerance: f64,
}

impl Default for GlobalDesignParams {
    fn default() -> Self {
        Self {
            corrosion_allowance: 0.0,
            e: DEFAULT_E,
            w: DEFAULT_W,
            gamma: DEFAULT_GAMMA,
            mill_tolerance: DEFAULT_MILL_TOL,
        }
    }
}

/// 배관 한 줄. 길이는 in, 응력은 psi.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    pub id: Uuid,
    /// 호칭경 [in]
    pub nps: f64,
    pub dn: Option<u32>,
    pub schedule: Schedule,
    pub outer_diameter: f64,
    pub wall_thickness: f64,
    pub required_thickness: f64,
    /// 재료표에서 찾지 못하면 `None` (계산식에서는 0).
    pub allowable_stress: Option<f64>,
    /// 사용자가 직접 입력한 허용응력. 있으면 재료표보다 우선한다.
    pub stress_override: Option<f64>,
}

impl Pipe {
    fn new(nps: f64, schedule: Schedule) -> Self {
        Self {
            id: Uuid::new_v4(),
            nps,
            dn: nps_to_dn(nps),
            schedule,
            outer_diameter: 0.0,
            wall_thickness: 0.0,
            required_thickness: 0.0,
            allowable_stress: None,
            stress_override: None,
        }
    }

    /// 공칭 두께가 요구 두께 이상인지.
    pub fn is_adequate(&self) -> bool {
        self.wall_thickness >= self.required_thickness
    }

    /// 표시 단위로 환산한 보기.
    pub fn view(&self, units: Units) -> PipeView {
        let size = match (units, self.dn) {
            (Units::Metric, Some(dn)) => format!("DN {dn}"),
            _ => pipe_schedule::describe_nps(self.nps),
        };
        PipeView {
            id: self.id,
            size,
            schedule: self.schedule,
            outer_diameter: from_inch(self.outer_diameter, units),
            wall_thickness: from_inch(self.wall_thickness, units),
            required_thickness: from_inch(self.required_thickness, units),
            allowable_stress: self.allowable_stress.map(|s| from_psi(s, units)),
            adequate: self.is_adequate(),
        }
    }

    /// 설계 조건으로 치수/허용응력/요구 두께를 다시 계산한다.
    fn recalculate(
        &mut self,
        units: Units,
        global: &GlobalDesignParams,
        condition: &DesignCondition,
    ) -> Result<(), DesignError> {
        let dims = pipe_schedule::pipe_dimensions(self.nps, self.schedule, Units::Imperial)?;
        self.dn = nps_to_dn(self.nps);
        self.outer_diameter = dims.outer_diameter;
        self.wall_thickness = dims.wall_thickness;
        // 온도는 °F 로 저장되어 있으므로 표시 단위는 Imperial 로 넘긴다.
        self.allowable_stress = self.stress_override.or_else(|| {
            material_db::design_stress(&condition.material, units, condition.temperature, Units::Imperial)
        });
        self.required_thickness = b31_3::required_thickness(&ThicknessInput {
            pressure: condition.pressure,
            outer_diameter: self.outer_diameter,
            allowable_stress: self.allowable_stress,
            e: global.e,
            w: global.w,
            gamma: global.gamma,
            corrosion_allowance: global.corrosion_allowance,
            mill_tolerance: global.mill_tolerance,
        });
        debug!(
            id = %self.id,
            nps = self.nps,
            schedule = %self.schedule,
            t = self.wall_thickness,
            t_required = self.required_thickness,
            "pipe recalculated"
        );
        Ok(())
    }
}

/// 표시 단위 배관 정보.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeView {
    pub id: Uuid,
    /// `NPS 1-1/2` 또는 `DN 40`
    pub size: String,
    pub schedule: Schedule,
    pub outer_diameter: f64,
    pub wall_thickness: f64,
    pub required_thickness: f64,
    pub allowable_stress: Option<f64>,
    pub adequate: bool,
}

/// 압력 [psi], 온도 [°F], 재료 코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignCondition {
    pub pressure: f64,
    pub temperature: f64,
    pub material: String,
}

impl Default for DesignCondition {
    fn default() -> Self {
        Self {
            pressure: DEFAULT_PRESSURE_PSI,
            temperature: DEFAULT_TEMPERATURE_F,
            material: DEFAULT_MATERIAL.to_string(),
        }
    }
}

/// 호칭경 변경 시 현재 스케줄이 없으면 첫 번째 가용 스케줄로 바꾼다.
fn resolve_schedule(nps: f64, current: Schedule) -> Result<Schedule, DesignError> {
    let available = pipe_schedule::available_schedules(nps);
    if available.contains(&current) {
        return Ok(current);
    }
    available
        .first()
        .copied()
        .ok_or(DesignError::Schedule(ScheduleError::NpsNotFound(nps)))
}

fn validate(nps: f64, schedule: Schedule) -> Result<(), DesignError> {
    pipe_schedule::pipe_dimensions(nps, schedule, Units::Imperial)?;
    Ok(())
}

/// 단일 압력 설계: 모든 배관이 하나의 설계 조건을 공유한다.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SinglePressureDesign {
    global: GlobalDesignParams,
    condition: DesignCondition,
    units: Units,
    pipes: Vec<Pipe>,
}

impl SinglePressureDesign {
    pub fn new(global: GlobalDesignParams, condition: DesignCondition, units: Units) -> Self {
        Self {
            global,
            condition,
            units,
            pipes: Vec::new(),
        }
    }

    pub fn global(&self) -> &GlobalDesignParams {
        &self.global
    }

    pub fn condition(&self) -> &DesignCondition {
        &self.condition
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn pipe(&self, id: Uuid) -> Option<&Pipe> {
        self.pipes.iter().find(|p| p.id == id)
    }

    /// 배관을 추가하고 id 를 돌려준다.
    pub fn add_pipe(&mut self, nps: f64, schedule: Schedule) -> Result<Uuid, DesignError> {
        validate(nps, schedule)?;
        let mut pipe = Pipe::new(nps, schedule);
        pipe.recalculate(self.units, &self.global, &self.condition)?;
        let id = pipe.id;
        self.pipes.push(pipe);
        Ok(id)
    }

    pub fn remove_pipe(&mut self, id: Uuid) -> Result<Pipe, DesignError> {
        let index = self
            .pipes
            .iter()
            .position(|p| p.id == id)
            .ok_or(DesignError::PipeNotFound(id))?;
        Ok(self.pipes.remove(index))
    }

    pub fn set_nps(&mut self, id: Uuid, nps: f64) -> Result<(), DesignError> {
        let (units, global, condition) = (self.units, self.global, &self.condition);
        let pipe = find_mut(&mut self.pipes, id)?;
        let schedule = resolve_schedule(nps, pipe.schedule)?;
        pipe.nps = nps;
        pipe.schedule = schedule;
        pipe.recalculate(units, &global, condition)
    }

    pub fn set_schedule(&mut self, id: Uuid, schedule: Schedule) -> Result<(), DesignError> {
        let (units, global, condition) = (self.units, self.global, &self.condition);
        let pipe = find_mut(&mut self.pipes, id)?;
        validate(pipe.nps, schedule)?;
        pipe.schedule = schedule;
        pipe.recalculate(units, &global, condition)
    }

    /// 배관별 허용응력 [psi] 을 직접 지정한다. `None` 이면 재료표로 돌아간다.
    pub fn set_allowable_stress(&mut self, id: Uuid, stress: Option<f64>) -> Result<(), DesignError> {
        let (units, global, condition) = (self.units, self.global, &self.condition);
        let pipe = find_mut(&mut self.pipes, id)?;
        pipe.stress_override = stress;
        pipe.recalculate(units, &global, condition)
    }

    pub fn set_pressure(&mut self, pressure_psi: f64) -> Result<(), DesignError> {
        self.condition.pressure = pressure_psi;
        self.recalculate_all()
    }

    pub fn set_temperature(&mut self, temperature_f: f64) -> Result<(), DesignError> {
        self.condition.temperature = temperature_f;
        self.recalculate_all()
    }

    pub fn set_material(&mut self, material: &str) -> Result<(), DesignError> {
        self.condition.material = material.to_string();
        self.recalculate_all()
    }

    pub fn set_corrosion_allowance(&mut self, ca_in: f64) -> Result<(), DesignError> {
        self.global.corrosion_allowance = ca_in;
        self.recalculate_all()
    }

    pub fn set_global(&mut self, global: GlobalDesignParams) -> Result<(), DesignError> {
        self.global = global;
        self.recalculate_all()
    }

    /// 단위 체계를 바꾸면 재료표 카테고리도 바뀌므로 다시 계산한다.
    pub fn set_units(&mut self, units: Units) -> Result<(), DesignError> {
        self.units = units;
        self.recalculate_all()
    }

    /// 배관 목록과 조건을 기본값으로 되돌린다. 단위 체계는 유지한다.
    pub fn reset(&mut self) {
        *self = Self {
            units: self.units,
            ..Self::default()
        };
    }

    pub fn views(&self) -> Vec<PipeView> {
        self.pipes.iter().map(|p| p.view(self.units)).collect()
    }

    fn recalculate_all(&mut self) -> Result<(), DesignError> {
        for pipe in &mut self.pipes {
            pipe.recalculate(self.units, &self.global, &self.condition)?;
        }
        Ok(())
    }
}

/// 다중 압력 설계의 배관 한 줄: 배관마다 고유 설계 조건을 가진다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeCase {
    pub pipe: Pipe,
    pub condition: DesignCondition,
}

/// 다중 압력 설계.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiplePressureDesign {
    global: GlobalDesignParams,
    units: Units,
    cases: Vec<PipeCase>,
}

impl MultiplePressureDesign {
    pub fn new(global: GlobalDesignParams, units: Units) -> Self {
        Self {
            global,
            units,
            cases: Vec::new(),
        }
    }

    pub fn global(&self) -> &GlobalDesignParams {
        &self.global
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn cases(&self) -> &[PipeCase] {
        &self.cases
    }

    pub fn case(&self, id: Uuid) -> Option<&PipeCase> {
        self.cases.iter().find(|c| c.pipe.id == id)
    }

    /// 기본 조건(NPS 4", Sch 40, 1440 psi, 100 °F, A106B)으로 배관을 추가한다.
    pub fn add_pipe(&mut self) -> Result<Uuid, DesignError> {
        self.add_pipe_with(DEFAULT_NPS, DEFAULT_SCHEDULE, DesignCondition::default())
    }

    pub fn add_pipe_with(
        &mut self,
        nps: f64,
        schedule: Schedule,
        condition: DesignCondition,
    ) -> Result<Uuid, DesignError> {
        validate(nps, schedule)?;
        let mut pipe = Pipe::new(nps, schedule);
        pipe.recalculate(self.units, &self.global, &condition)?;
        let id = pipe.id;
        self.cases.push(PipeCase { pipe, condition });
        Ok(id)
    }

    pub fn remove_pipe(&mut self, id: Uuid) -> Result<PipeCase, DesignError> {
        let index = self
            .cases
            .iter()
            .position(|c| c.pipe.id == id)
            .ok_or(DesignError::PipeNotFound(id))?;
        Ok(self.cases.remove(index))
    }

    pub fn set_nps(&mut self, id: Uuid, nps: f64) -> Result<(), DesignError> {
        self.update(id, |case| {
            case.pipe.schedule = resolve_schedule(nps, case.pipe.schedule)?;
            case.pipe.nps = nps;
            Ok(())
        })
    }

    pub fn set_schedule(&mut self, id: Uuid, schedule: Schedule) -> Result<(), DesignError> {
        self.update(id, |case| {
            validate(case.pipe.nps, schedule)?;
            case.pipe.schedule = schedule;
            Ok(())
        })
    }

    pub fn set_pressure(&mut self, id: Uuid, pressure_psi: f64) -> Result<(), DesignError> {
        self.update(id, |case| {
            case.condition.pressure = pressure_psi;
            Ok(())
        })
    }

    pub fn set_temperature(&mut self, id: Uuid, temperature_f: f64) -> Result<(), DesignError> {
        self.update(id, |case| {
            case.condition.temperature = temperature_f;
            Ok(())
        })
    }

    pub fn set_material(&mut self, id: Uuid, material: &str) -> Result<(), DesignError> {
        self.update(id, |case| {
            case.condition.material = material.to_string();
            Ok(())
        })
    }

    pub fn set_corrosion_allowance(&mut self, ca_in: f64) -> Result<(), DesignError> {
        self.global.corrosion_allowance = ca_in;
        self.recalculate_all()
    }

    pub fn set_units(&mut self, units: Units) -> Result<(), DesignError> {
        self.units = units;
        self.recalculate_all()
    }

    pub fn views(&self) -> Vec<PipeView> {
        self.cases.iter().map(|c| c.pipe.view(self.units)).collect()
    }

    /// 변경을 적용한 뒤 해당 배관만 다시 계산한다.
    fn update<F>(&mut self, id: Uuid, apply: F) -> Result<(), DesignError>
    where
        F: FnOnce(&mut PipeCase) -> Result<(), DesignError>,
    {
        let (units, global) = (self.units, self.global);
        let case = self
            .cases
            .iter_mut()
            .find(|c| c.pipe.id == id)
            .ok_or(DesignError::PipeNotFound(id))?;
        apply(case)?;
        case.pipe.recalculate(units, &global, &case.condition)
    }

    fn recalculate_all(&mut self) -> Result<(), DesignError> {
        for case in &mut self.cases {
            case.pipe
                .recalculate(self.units, &self.global, &case.condition)?;
        }
        Ok(())
    }
}

fn find_mut(pipes: &mut [Pipe], id: Uuid) -> Result<&mut Pipe, DesignError> {
    pipes
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(DesignError::PipeNotFound(id))
}
