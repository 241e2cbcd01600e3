mod logging;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::NaiveTime;
use clap::{Args, Parser, Subcommand};
use tr_app::{AppError, AppResult, ConfigFactory, Runtime, project_service};
use tr_values::{Clock, Datum, FixedClock, FixedSensorBus, LocalClock};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "tr-cli")]
#[command(about = "Terrarium CLI - inspect values and controls from a config file", long_about = None)]
struct Cli {
    #[command(flatten)]
    env: EnvArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct EnvArgs {
    /// Freeze the clock at this time of day (HH:MM:SS)
    #[arg(long, global = true, value_parser = parse_time)]
    at: Option<NaiveTime>,

    /// Fixed sensor level for a GPIO pin (PIN=LEVEL, repeatable)
    #[arg(long = "sensor", global = true, value_parser = parse_sensor)]
    sensors: Vec<(u32, f64)>,

    /// Also append log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint a config file and check that every entry builds
    Validate {
        /// Path to the config file (.json, .yaml or .yml)
        config_path: PathBuf,
    },
    /// List values defined in a config
    Values {
        /// Path to the config file
        config_path: PathBuf,
    },
    /// Read a single value
    Read {
        /// Path to the config file
        config_path: PathBuf,
        /// Value name
        name: String,
    },
    /// Write a value, then read it back (nothing is persisted)
    Write {
        /// Path to the config file
        config_path: PathBuf,
        /// Value name
        name: String,
        /// New payload; parsed as bool, integer, float, then text
        #[arg(value_parser = parse_datum)]
        value: Datum,
    },
    /// List controls defined in a config
    Controls {
        /// Path to the config file
        config_path: PathBuf,
    },
    /// Read every value once
    Show {
        /// Path to the config file
        config_path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    logging::init(cli.env.log_file.as_deref())?;

    let factory = cli.env.factory();
    info!(
        "{} {}",
        cli.command.name(),
        cli.command.config_path().display()
    );
    let result = match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path, &factory),
        Commands::Values { config_path } => cmd_values(&config_path, &factory),
        Commands::Read { config_path, name } => cmd_read(&config_path, &factory, &name),
        Commands::Write {
            config_path,
            name,
            value,
        } => cmd_write(&config_path, &factory, &name, value),
        Commands::Controls { config_path } => cmd_controls(&config_path, &factory),
        Commands::Show { config_path } => cmd_show(&config_path, &factory),
    };
    if let Err(e) = &result {
        error!("{}", e);
    }
    result
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Validate { .. } => "validate",
            Self::Values { .. } => "values",
            Self::Read { .. } => "read",
            Self::Write { .. } => "write",
            Self::Controls { .. } => "controls",
            Self::Show { .. } => "show",
        }
    }

    fn config_path(&self) -> &Path {
        match self {
            Self::Validate { config_path }
            | Self::Values { config_path }
            | Self::Read { config_path, .. }
            | Self::Write { config_path, .. }
            | Self::Controls { config_path }
            | Self::Show { config_path } => config_path,
        }
    }
}

impl EnvArgs {
    fn factory(&self) -> ConfigFactory {
        let clock: Rc<dyn Clock> = match self.at {
            Some(t) => Rc::new(FixedClock(t)),
            None => Rc::new(LocalClock),
        };
        let sensors = self
            .sensors
            .iter()
            .fold(FixedSensorBus::new(), |bus, &(pin, level)| {
                bus.with_level(pin, level)
            });
        ConfigFactory::new(clock, Box::new(sensors))
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M:%S").map_err(|e| format!("expected HH:MM:SS: {e}"))
}

/// Bool, then integer, then float, falling back to text.
fn parse_datum(s: &str) -> Result<Datum, String> {
    s.parse::<Datum>().map_err(|e| match e {})
}

fn parse_sensor(s: &str) -> Result<(u32, f64), String> {
    let (pin, level) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PIN=LEVEL, got '{s}'"))?;
    let pin = pin
        .trim()
        .parse()
        .map_err(|e| format!("bad pin '{pin}': {e}"))?;
    let level: f64 = level
        .trim()
        .parse()
        .map_err(|e| format!("bad level '{level}': {e}"))?;
    if !level.is_finite() {
        return Err(format!("level must be finite, got {level}"));
    }
    Ok((pin, level))
}

fn build(config_path: &Path, factory: &ConfigFactory) -> AppResult<Runtime> {
    let runtime = project_service::load_runtime(config_path, factory)?;
    if !runtime.report.skipped.is_empty() {
        warn!(
            "{} config entries skipped; run `validate` for details",
            runtime.report.skipped.len()
        );
    }
    Ok(runtime)
}

fn cmd_validate(config_path: &Path, factory: &ConfigFactory) -> AppResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = project_service::load_config(config_path)?;

    let issues = project_service::lint(&config);
    for issue in &issues {
        println!("  warning: {}", issue);
    }

    let runtime = factory.build(&config);
    for err in &runtime.report.skipped {
        println!("  error: {}", err);
    }

    if runtime.report.skipped.is_empty() {
        println!(
            "✓ Config is valid ({} values, {} controls, {} warnings)",
            runtime.values.len(),
            runtime.controls.len(),
            issues.len()
        );
        Ok(())
    } else {
        Err(AppError::Config(format!(
            "{} entries could not be built",
            runtime.report.skipped.len()
        )))
    }
}

fn cmd_values(config_path: &Path, factory: &ConfigFactory) -> AppResult<()> {
    let runtime = build(config_path, factory)?;
    let values = project_service::list_values(&runtime.values);

    if values.is_empty() {
        println!("No values found in config");
    } else {
        println!("Values in config:");
        for v in values {
            match v.period {
                Some(p) => println!("  {} - {} (every {}s)", v.name, v.kind, p.as_secs_f64()),
                None => println!("  {} - {}", v.name, v.kind),
            }
        }
    }
    Ok(())
}

fn cmd_read(config_path: &Path, factory: &ConfigFactory, name: &str) -> AppResult<()> {
    let mut runtime = build(config_path, factory)?;
    let value = runtime.values.read(name)?;
    println!("{} = {}", name, value);
    Ok(())
}

fn cmd_write(
    config_path: &Path,
    factory: &ConfigFactory,
    name: &str,
    value: Datum,
) -> AppResult<()> {
    let mut runtime = build(config_path, factory)?;
    runtime.values.write(name, value)?;
    let value = runtime.values.read(name)?;
    println!("{} = {}", name, value);
    Ok(())
}

fn cmd_controls(config_path: &Path, factory: &ConfigFactory) -> AppResult<()> {
    let runtime = build(config_path, factory)?;
    let summaries = project_service::list_controls(&runtime.controls);

    if summaries.is_empty() {
        println!("No controls found in config");
        return Ok(());
    }

    println!("Controls in config:");
    for summary in summaries {
        let control = runtime.controls.require(&summary.name)?;
        let state = if summary.runnable { "" } else { " [no conditions]" };
        println!("  {}{}", summary.name, state);
        if let Some(setup) = control.setup() {
            println!("    setup: {}", setup);
        }
        for (condition, action) in control.conditions() {
            println!("    if {} then {}", condition, action);
        }
    }
    Ok(())
}

fn cmd_show(config_path: &Path, factory: &ConfigFactory) -> AppResult<()> {
    let mut runtime = build(config_path, factory)?;
    let names: Vec<String> = runtime.values.names().map(str::to_string).collect();
    for name in names {
        match runtime.values.read(&name) {
            Ok(value) => println!("{}: {}", name, value),
            Err(e) => println!("{}: <{}>", name, e),
        }
    }
    Ok(())
}
