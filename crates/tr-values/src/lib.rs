//! Named values for a terrarium: constants, user variables, and read-only
//! indicators computed from the clock or from a sensor.
//!
//! # Architecture
//!
//! - [`Datum`] is the untyped payload every value reads and writes
//! - [`Value`] dispatches `read`/`write` over the four variants
//! - Indicators classify a raw input (seconds of day, averaged sensor level)
//!   through a first-match [`tr_core::RangeTable`]
//! - [`ValueRegistry`] owns every value and gives uniform access by name
//!
//! Indicators are computed on demand; nothing here runs a timer.

pub mod clock;
pub mod datum;
pub mod error;
pub mod indicator;
pub mod registry;
pub mod sampler;
pub mod sensor;
pub mod value;

pub use clock::{Clock, FixedClock, LocalClock};
pub use datum::Datum;
pub use error::{SensorError, ValueError, ValueResult};
pub use indicator::{GpioIndicator, Indicator, TimeIndicator};
pub use registry::ValueRegistry;
pub use sampler::{Estimate, SampleEstimator};
pub use sensor::{FixedSensorBus, SampleSource, SensorBus};
pub use value::{Constant, Value, ValueKind, Variable};
