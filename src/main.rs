use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use pipe_wall_toolbox::app::{self, AppError};
use pipe_wall_toolbox::b31_3::{self, DesignParameters};
use pipe_wall_toolbox::config::{self, Config, DEFAULT_CONFIG_PATH};
use pipe_wall_toolbox::conversion::{self, parse_units};
use pipe_wall_toolbox::design::{DesignCondition, SinglePressureDesign};
use pipe_wall_toolbox::hydrotest::hydrotest_pressure;
use pipe_wall_toolbox::i18n::{self, Translator};
use pipe_wall_toolbox::interpolation::linear_interpolation;
use pipe_wall_toolbox::material_db;
use pipe_wall_toolbox::pipe_schedule::{self, Schedule, ScheduleError};
use pipe_wall_toolbox::ui_cli::parse_size;
use pipe_wall_toolbox::units::{
    from_inch, from_psi, length, pressure, to_fahrenheit, to_inch, to_psi, Units,
};
use pipe_wall_toolbox::z662::{self, FluidService, LocationClass, PipeJointType, Z662Input};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pipe_wall_toolbox")]
#[command(about = "Pipe wall thickness calculator (ASME B31.3 / CSA Z662)", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// UI language (ko, en, auto)
    #[arg(long, global = true)]
    lang: Option<String>,
    /// Display unit system (imperial, metric); overrides the config file
    #[arg(long, global = true, value_parser = parse_units)]
    units: Option<Units>,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a value between the internal Imperial basis and the display units
    Convert {
        /// pressure, length, temperature or nps
        quantity: String,
        value: f64,
        /// to, from, to-imperial, from-imperial
        #[arg(long, default_value = "to")]
        direction: String,
    },
    /// Look up the allowable stress of a material
    Stress {
        /// Material code (e.g. A106B, A312TP316L)
        material: String,
        /// Temperature in display units
        temperature: f64,
        /// Use the table column at or below the temperature instead of interpolating
        #[arg(long)]
        stepped: bool,
    },
    /// Required wall thickness per ASME B31.3
    Thickness {
        /// Design pressure in display units
        #[arg(long)]
        pressure: f64,
        /// Design temperature in display units
        #[arg(long)]
        temperature: Option<f64>,
        /// Nominal pipe size (e.g. 4, 1-1/2, or DN 100 with metric units)
        #[arg(long, default_value = "4")]
        nps: String,
        #[arg(long, default_value = "40")]
        schedule: String,
        /// Outer diameter in display units; bypasses the schedule table
        #[arg(long)]
        od: Option<f64>,
        #[arg(long)]
        material: Option<String>,
        /// Allowable stress override in display units
        #[arg(long)]
        stress: Option<f64>,
        /// Corrosion allowance in display units
        #[arg(long)]
        ca: Option<f64>,
    },
    /// Hydrostatic test pressure Pt = 1.5 P St / S
    Hydrotest {
        pressure: f64,
        /// Allowable stress at test temperature
        st: f64,
        /// Allowable stress at design temperature
        s: f64,
    },
    /// Linear interpolation between (x0, y0) and (x1, y1)
    Interpolate {
        x: f64,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
    },
    /// List schedules and wall thicknesses for a nominal size
    Schedule {
        nps: String,
    },
    /// Required wall thickness per CSA Z662
    Z662 {
        #[arg(long)]
        pressure: f64,
        #[arg(long)]
        od: f64,
        /// Specified minimum yield strength in display units
        #[arg(long)]
        smys: f64,
        #[arg(long, value_enum, default_value_t = ServiceArg::NonSourGas)]
        service: ServiceArg,
        /// Location class 1-4
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=4))]
        class: u8,
        #[arg(long, value_enum, default_value_t = JointArg::Seamless)]
        joint: JointArg,
        /// Design temperature in display units
        #[arg(long)]
        temperature: f64,
        #[arg(long, default_value_t = 0.0)]
        ca: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ServiceArg {
    NonSourGas,
    SourGas,
    Hvp,
    Lvp,
}

impl From<ServiceArg> for FluidService {
    fn from(value: ServiceArg) -> Self {
        match value {
            ServiceArg::NonSourGas => FluidService::NonSourGas,
            ServiceArg::SourGas => FluidService::SourGas,
            ServiceArg::Hvp => FluidService::HvpAndCo2,
            ServiceArg::Lvp => FluidService::Lvp,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum JointArg {
    Seamless,
    Erw,
    Saw,
    Flash,
    Continuous,
}

impl From<JointArg> for PipeJointType {
    fn from(value: JointArg) -> Self {
        match value {
            JointArg::Seamless => PipeJointType::Seamless,
            JointArg::Erw => PipeJointType::ElectricWelded,
            JointArg::Saw => PipeJointType::SubmergedArcWelded,
            JointArg::Flash => PipeJointType::FlashWelded,
            JointArg::Continuous => PipeJointType::ContinuousWelded,
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 서브커맨드 또는 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default(&cli.config)?;
    if let Some(units) = cli.units {
        cfg.units = units;
    }
    debug!(path = %cli.config.display(), units = %cfg.units, "configuration loaded");

    let Some(command) = cli.command else {
        let lang = i18n::resolve_language(cli.lang.as_deref(), cfg.language.as_deref());
        return app::run(&mut cfg, &cli.config, Translator::new(&lang));
    };

    match command {
        Commands::Convert {
            quantity,
            value,
            direction,
        } => cmd_convert(&cfg, &quantity, value, &direction),
        Commands::Stress {
            material,
            temperature,
            stepped,
        } => cmd_stress(&cfg, &material, temperature, stepped),
        Commands::Thickness {
            pressure,
            temperature,
            nps,
            schedule,
            od,
            material,
            stress,
            ca,
        } => cmd_thickness(
            &cfg,
            ThicknessArgs {
                pressure,
                temperature,
                nps,
                schedule,
                od,
                material,
                stress,
                ca,
            },
        ),
        Commands::Hydrotest { pressure, st, s } => {
            let pt = hydrotest_pressure(pressure, st, s)?;
            println!("Pt = {pt:.2} {}", pressure::unit_label(cfg.units));
            Ok(())
        }
        Commands::Interpolate { x, x0, y0, x1, y1 } => {
            println!("{}", linear_interpolation(x, x0, y0, x1, y1));
            Ok(())
        }
        Commands::Schedule { nps } => cmd_schedule(&cfg, &nps),
        Commands::Z662 {
            pressure,
            od,
            smys,
            service,
            class,
            joint,
            temperature,
            ca,
        } => {
            let units = cfg.units;
            let class = LocationClass::try_from(class)?;
            let result = z662::required_wall_thickness(&Z662Input {
                pressure: to_psi(pressure, units),
                outer_diameter: to_inch(od, units),
                smys: to_psi(smys, units),
                service: service.into(),
                class,
                joint: joint.into(),
                temperature: to_fahrenheit(temperature, units),
                corrosion_allowance: to_inch(ca, units),
            })?;
            println!(
                "F = {:.2}  L = {:.3}  J = {:.2}  T = {:.3}",
                result.design_factor,
                result.location_factor,
                result.joint_factor,
                result.temperature_factor
            );
            println!(
                "t = {:.4} {}",
                from_inch(result.required_thickness, units),
                length::unit_label(units)
            );
            Ok(())
        }
    }
}

fn cmd_convert(cfg: &Config, quantity: &str, value: f64, direction: &str) -> Result<(), AppError> {
    let kind = conversion::parse_quantity(quantity)?;
    let direction = conversion::parse_direction(direction)?;
    let result = conversion::convert(kind, cfg.units, value, direction)?;
    println!("{result}");
    Ok(())
}

fn cmd_stress(cfg: &Config, material: &str, temperature: f64, stepped: bool) -> Result<(), AppError> {
    let units = cfg.units;
    let value = if stepped {
        material_db::stepped_stress(material, units, temperature)?
    } else {
        material_db::allowable_stress(material, units, temperature, units)?
    };
    println!(
        "{:.1} {}{}",
        from_psi(value.stress_psi, units),
        pressure::unit_label(units),
        if value.interpolated { " (interpolated)" } else { "" }
    );
    Ok(())
}

struct ThicknessArgs {
    pressure: f64,
    temperature: Option<f64>,
    nps: String,
    schedule: String,
    od: Option<f64>,
    material: Option<String>,
    stress: Option<f64>,
    ca: Option<f64>,
}

fn cmd_thickness(cfg: &Config, args: ThicknessArgs) -> Result<(), AppError> {
    let units = cfg.units;
    let mut global = cfg.design;
    if let Some(ca) = args.ca {
        global.corrosion_allowance = to_inch(ca, units);
    }
    let condition = DesignCondition {
        pressure: to_psi(args.pressure, units),
        temperature: args
            .temperature
            .map(|t| to_fahrenheit(t, units))
            .unwrap_or(DesignCondition::default().temperature),
        material: args
            .material
            .unwrap_or_else(|| cfg.default_material.clone()),
    };
    let stress_override = args.stress.map(|s| to_psi(s, units));
    let len = length::unit_label(units);

    // 외경을 직접 받으면 치수표 없이 식만 계산한다.
    if let Some(od) = args.od {
        let allowable_stress = stress_override.or_else(|| {
            material_db::design_stress(&condition.material, units, condition.temperature, Units::Imperial)
        });
        let params = DesignParameters {
            units,
            pressure: condition.pressure,
            temperature: condition.temperature,
            corrosion_allowance: global.corrosion_allowance,
            allowable_stress,
            e: global.e,
            w: global.w,
            gamma: global.gamma,
            mill_tolerance: global.mill_tolerance,
        };
        let result = b31_3::evaluate(&params.thickness_input(to_inch(od, units)));
        println!("t = {:.4} {len}", from_inch(result.required_thickness, units));
        return Ok(());
    }

    let nps = parse_size(&args.nps, units)
        .ok_or_else(|| ScheduleError::InvalidNps(args.nps.clone()))?;
    let schedule: Schedule = args.schedule.parse()?;
    let mut design = SinglePressureDesign::new(global, condition, units);
    let id = design.add_pipe(nps, schedule)?;
    if stress_override.is_some() {
        design.set_allowable_stress(id, stress_override)?;
    }
    for view in design.views() {
        println!(
            "{} Sch {}: OD {:.3} {len}, t {:.3} {len}, t required {:.4} {len} -> {}",
            view.size,
            view.schedule,
            view.outer_diameter,
            view.wall_thickness,
            view.required_thickness,
            if view.adequate { "OK" } else { "NOT OK" }
        );
    }
    Ok(())
}

fn cmd_schedule(cfg: &Config, nps: &str) -> Result<(), AppError> {
    let units = cfg.units;
    let nps_in =
        parse_size(nps, units).ok_or_else(|| ScheduleError::InvalidNps(nps.to_string()))?;
    let len = length::unit_label(units);
    let od = pipe_schedule::outer_diameter(nps_in, units)?;
    println!("{}  OD {od:.3} {len}", pipe_schedule::describe_nps(nps_in));
    for schedule in pipe_schedule::available_schedules(nps_in) {
        let dims = pipe_schedule::pipe_dimensions(nps_in, schedule, units)?;
        println!("  {:<6} {:>8.3} {len}", schedule.label(), dims.wall_thickness);
    }
    Ok(())
}
