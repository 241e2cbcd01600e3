//! Build value and control registries from a parsed config.
//!
//! Every entry is built independently. An entry that cannot be built is
//! logged, recorded in the [`BuildReport`] and skipped; the rest of the
//! config still loads.

use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use tr_controls::{ActionDescriptor, ConditionDescriptor, Control, ControlRegistry};
use tr_core::Interval;
use tr_project::schema::{ConfigDef, ControlDef, TriggerClass, TriggerDef, ValueClass, ValueDef};
use tr_values::{
    Clock, Constant, Datum, FixedSensorBus, GpioIndicator, Indicator, LocalClock,
    SampleEstimator, SensorBus, TimeIndicator, Value, ValueRegistry, Variable,
};
use tracing::{error, info, warn};

use crate::error::BuildError;

/// Registries built from one config, plus what happened along the way.
#[derive(Debug)]
pub struct Runtime {
    pub values: ValueRegistry,
    pub controls: ControlRegistry,
    pub report: BuildReport,
}

/// Entries skipped or overwritten while building.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub skipped: Vec<BuildError>,
    /// Value names defined more than once; the last definition won.
    pub overwritten_values: Vec<String>,
    /// Control names defined more than once; the last definition won.
    pub overwritten_controls: Vec<String>,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
            && self.overwritten_values.is_empty()
            && self.overwritten_controls.is_empty()
    }
}

/// Instantiates values and controls from config entries.
///
/// Time indicators share the factory's clock. GPIO indicators get their
/// sample source from the sensor bus, one per configured pin.
pub struct ConfigFactory {
    clock: Rc<dyn Clock>,
    sensors: Box<dyn SensorBus>,
}

impl Default for ConfigFactory {
    fn default() -> Self {
        Self::new(Rc::new(LocalClock), Box::new(FixedSensorBus::new()))
    }
}

impl ConfigFactory {
    pub fn new(clock: Rc<dyn Clock>, sensors: Box<dyn SensorBus>) -> Self {
        Self { clock, sensors }
    }

    pub fn build(&self, config: &ConfigDef) -> Runtime {
        let mut report = BuildReport::default();

        let mut values = Vec::with_capacity(config.values.len());
        let mut value_names = HashSet::new();
        for (index, def) in config.values.iter().enumerate() {
            match self.build_value(index, def) {
                Ok(value) => {
                    if !value_names.insert(value.name().to_string()) {
                        warn!(
                            "values.{} defined more than once; the later entry replaces the earlier one",
                            value.name()
                        );
                        report.overwritten_values.push(value.name().to_string());
                    }
                    values.push(value);
                }
                Err(err) => {
                    error!("skipping value entry: {}", err);
                    report.skipped.push(err);
                }
            }
        }

        let mut controls = Vec::with_capacity(config.controls.len());
        let mut control_names = HashSet::new();
        for (index, def) in config.controls.iter().enumerate() {
            match build_control(index, def) {
                Ok(control) => {
                    if !control_names.insert(control.name().to_string()) {
                        warn!(
                            "controls.{} defined more than once; the later entry replaces the earlier one",
                            control.name()
                        );
                        report.overwritten_controls.push(control.name().to_string());
                    }
                    controls.push(control);
                }
                Err(err) => {
                    error!("skipping control entry: {}", err);
                    report.skipped.push(err);
                }
            }
        }

        Runtime {
            values: values.into_iter().collect(),
            controls: controls.into_iter().collect(),
            report,
        }
    }

    pub fn build_value(&self, index: usize, def: &ValueDef) -> Result<Value, BuildError> {
        let name = def.name.as_deref().ok_or_else(|| BuildError::MissingField {
            entry: format!("values[{index}]"),
            field: "name",
        })?;

        match def.class() {
            ValueClass::Variable => {
                let default = payload(name, def)?;
                info!("values.{} default {}", name, default);
                Ok(Variable::new(name, default).into())
            }
            ValueClass::Constant => {
                let payload = payload(name, def)?;
                info!("values.{} constant {}", name, payload);
                Ok(Constant::new(name, payload).into())
            }
            ValueClass::Indicator => {
                let trigger = def
                    .trigger
                    .as_ref()
                    .ok_or_else(|| BuildError::MissingField {
                        entry: format!("values.{name}"),
                        field: "trigger",
                    })?;
                let period = seconds(name, "period", def.period)?;
                Ok(self.build_indicator(name, period, trigger)?.into())
            }
            ValueClass::Unknown(_) => Err(BuildError::UnknownValueType {
                name: name.to_string(),
                kind: def.kind.clone().unwrap_or_default(),
            }),
        }
    }

    fn build_indicator(
        &self,
        name: &str,
        period: Option<Duration>,
        trigger: &TriggerDef,
    ) -> Result<Indicator, BuildError> {
        let invalid = |e: serde_json::Error| BuildError::InvalidTrigger {
            name: name.to_string(),
            reason: e.to_string(),
        };

        match trigger.class() {
            TriggerClass::Time => {
                let time = trigger.time().map_err(invalid)?;
                let indicator = TimeIndicator::new(
                    name,
                    period,
                    &time.timeformat,
                    time.ranges
                        .iter()
                        .map(|r| (r.a.as_str(), r.b.as_str(), r.value.clone())),
                    Rc::clone(&self.clock),
                )?;
                let ranges: Vec<String> = time
                    .ranges
                    .iter()
                    .map(|r| format!("[{}, {})", r.a, r.b))
                    .collect();
                info!(
                    "values.{} ({}): [{}]",
                    name,
                    describe_period(period),
                    ranges.join(", ")
                );
                Ok(Indicator::Time(indicator))
            }
            TriggerClass::Gpio => {
                let gpio = trigger.gpio().map_err(invalid)?;
                let interval =
                    seconds(name, "sample_dt", Some(gpio.sample_dt))?.unwrap_or_default();
                let estimator = SampleEstimator::new(gpio.samples, interval)?;
                let source = self
                    .sensors
                    .open(gpio.pin)
                    .map_err(|source| BuildError::Sensor {
                        name: name.to_string(),
                        source,
                    })?;
                let ranges = gpio
                    .ranges
                    .iter()
                    .map(|r| (Interval::new(r.a, r.b), r.value.clone()))
                    .collect();
                info!(
                    "values.{} ({}): gpio pin {}",
                    name,
                    describe_period(period),
                    gpio.pin
                );
                Ok(Indicator::Gpio(GpioIndicator::new(
                    name, period, gpio.pin, estimator, ranges, source,
                )))
            }
            TriggerClass::Unknown(_) => Err(BuildError::UnknownTriggerType {
                name: name.to_string(),
                kind: trigger.kind.clone().unwrap_or_default(),
            }),
        }
    }
}

fn build_control(index: usize, def: &ControlDef) -> Result<Control, BuildError> {
    let name = def.name.as_deref().ok_or_else(|| BuildError::MissingField {
        entry: format!("controls[{index}]"),
        field: "name",
    })?;

    let setup = def.setup.clone().map(ActionDescriptor::new);
    let conditions = def
        .conditions
        .iter()
        .flatten()
        .map(|(condition, action)| {
            (
                ConditionDescriptor::new(condition.clone()),
                ActionDescriptor::new(action.clone()),
            )
        })
        .collect();

    let control = Control::new(name, setup, conditions)?;
    if control.is_runnable() {
        info!("controls.{} initialized", name);
    } else {
        info!("controls.{} initialized without conditions", name);
    }
    Ok(control)
}

fn payload(name: &str, def: &ValueDef) -> Result<Datum, BuildError> {
    def.default.clone().ok_or_else(|| BuildError::MissingField {
        entry: format!("values.{name}"),
        field: "default",
    })
}

fn seconds(
    name: &str,
    field: &'static str,
    secs: Option<f64>,
) -> Result<Option<Duration>, BuildError> {
    secs.map(|s| {
        Duration::try_from_secs_f64(s).map_err(|e| BuildError::InvalidTrigger {
            name: name.to_string(),
            reason: format!("{field} = {s}: {e}"),
        })
    })
    .transpose()
}

fn describe_period(period: Option<Duration>) -> String {
    match period {
        Some(p) => format!("{}s", p.as_secs_f64()),
        None => "no period".to_string(),
    }
}
