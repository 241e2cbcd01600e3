//! Sensor sources for GPIO indicators.
//!
//! Physical pin access lives outside this crate. A [`SensorBus`] hands out
//! one [`SampleSource`] per configured pin; the indicator only ever calls
//! [`SampleSource::read`].

use std::collections::BTreeMap;

use crate::error::SensorError;

/// Produces one scalar reading per call.
pub trait SampleSource {
    fn read(&mut self) -> Result<f64, SensorError>;
}

impl<F> SampleSource for F
where
    F: FnMut() -> Result<f64, SensorError>,
{
    fn read(&mut self) -> Result<f64, SensorError> {
        self()
    }
}

/// Opens sample sources for pins.
pub trait SensorBus {
    fn open(&self, pin: u32) -> Result<Box<dyn SampleSource>, SensorError>;
}

/// Bus returning a constant level per pin. Pins without a level are
/// unavailable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedSensorBus {
    levels: BTreeMap<u32, f64>,
}

impl FixedSensorBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, pin: u32, level: f64) -> Self {
        self.levels.insert(pin, level);
        self
    }

    pub fn set_level(&mut self, pin: u32, level: f64) {
        self.levels.insert(pin, level);
    }

    pub fn level(&self, pin: u32) -> Option<f64> {
        self.levels.get(&pin).copied()
    }
}

impl SensorBus for FixedSensorBus {
    fn open(&self, pin: u32) -> Result<Box<dyn SampleSource>, SensorError> {
        let level = self.level(pin).ok_or(SensorError::Unavailable { pin })?;
        Ok(Box::new(move || Ok::<_, SensorError>(level)))
    }
}
