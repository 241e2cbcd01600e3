//! Read-only values computed from the clock or a sensor.

use core::fmt;
use std::rc::Rc;
use std::time::Duration;

use tr_core::{Interval, RangeTable, Real, TimeFormat, UnitWeights};
use tracing::{error, info, info_span};

use crate::clock::{Clock, weighted_seconds};
use crate::datum::Datum;
use crate::error::{ValueError, ValueResult};
use crate::sampler::SampleEstimator;
use crate::sensor::SampleSource;

/// Indicator variants.
#[derive(Debug)]
pub enum Indicator {
    Time(TimeIndicator),
    Gpio(GpioIndicator),
}

impl Indicator {
    pub fn name(&self) -> &str {
        match self {
            Self::Time(ind) => &ind.name,
            Self::Gpio(ind) => &ind.name,
        }
    }

    /// Advisory re-read interval. Nothing in this crate acts on it.
    pub fn period(&self) -> Option<Duration> {
        match self {
            Self::Time(ind) => ind.period,
            Self::Gpio(ind) => ind.period,
        }
    }

    pub fn read(&mut self) -> ValueResult<Datum> {
        match self {
            Self::Time(ind) => ind.read(),
            Self::Gpio(ind) => ind.read(),
        }
    }
}

fn not_found(name: &str, input: impl fmt::Display) -> ValueError {
    error!("couldn't find {} in ranges for values.{}", input, name);
    ValueError::RangeNotFound {
        name: name.to_string(),
        input: input.to_string(),
    }
}

/// Classifies the current time of day.
///
/// Range bounds are decoded with the configured format; the live sample is
/// taken from the clock fields directly, so the format never affects it.
pub struct TimeIndicator {
    name: String,
    period: Option<Duration>,
    format: TimeFormat,
    weights: UnitWeights,
    ranges: RangeTable<u32, Datum>,
    clock: Rc<dyn Clock>,
}

impl TimeIndicator {
    /// Create a time indicator from `(a, b, output)` bound strings.
    pub fn new<'a>(
        name: impl Into<String>,
        period: Option<Duration>,
        format: &str,
        bounds: impl IntoIterator<Item = (&'a str, &'a str, Datum)>,
        clock: Rc<dyn Clock>,
    ) -> ValueResult<Self> {
        let name = name.into();
        let format = TimeFormat::parse(format);
        let weights = UnitWeights::default();

        let mut ranges = RangeTable::new();
        for (a, b, output) in bounds {
            let decode = |s: &str| {
                format
                    .decode(s, &weights)
                    .map_err(|source| ValueError::TimeParse {
                        name: name.clone(),
                        source,
                    })
            };
            ranges.push(Interval::new(decode(a)?, decode(b)?), output);
        }

        Ok(Self {
            name,
            period,
            format,
            weights,
            ranges,
            clock,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> &TimeFormat {
        &self.format
    }

    pub fn ranges(&self) -> &RangeTable<u32, Datum> {
        &self.ranges
    }

    pub fn read(&self) -> ValueResult<Datum> {
        let t = self.clock.now();
        let now = weighted_seconds(t, &self.weights);
        info!("values.{}: {}", self.name, t.format("%H:%M:%S"));
        self.ranges
            .find(now)
            .cloned()
            .ok_or_else(|| not_found(&self.name, now))
    }
}

impl fmt::Debug for TimeIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeIndicator")
            .field("name", &self.name)
            .field("period", &self.period)
            .field("format", &self.format.as_str())
            .field("ranges", &self.ranges)
            .finish_non_exhaustive()
    }
}

/// Classifies the averaged level of a sensor pin.
pub struct GpioIndicator {
    name: String,
    period: Option<Duration>,
    pin: u32,
    estimator: SampleEstimator,
    ranges: RangeTable<Real, Datum>,
    source: Box<dyn SampleSource>,
}

impl GpioIndicator {
    pub fn new(
        name: impl Into<String>,
        period: Option<Duration>,
        pin: u32,
        estimator: SampleEstimator,
        ranges: RangeTable<Real, Datum>,
        source: Box<dyn SampleSource>,
    ) -> Self {
        Self {
            name: name.into(),
            period,
            pin,
            estimator,
            ranges,
            source,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pin(&self) -> u32 {
        self.pin
    }

    pub fn estimator(&self) -> &SampleEstimator {
        &self.estimator
    }

    pub fn ranges(&self) -> &RangeTable<Real, Datum> {
        &self.ranges
    }

    pub fn read(&mut self) -> ValueResult<Datum> {
        let _span = info_span!("gpio", value = %self.name, pin = self.pin).entered();
        let estimate =
            self.estimator
                .sample(self.source.as_mut())
                .map_err(|source| ValueError::SensorRead {
                    name: self.name.clone(),
                    source,
                })?;
        self.ranges
            .find(estimate.mean)
            .cloned()
            .ok_or_else(|| not_found(&self.name, estimate.mean))
    }
}

impl fmt::Debug for GpioIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GpioIndicator")
            .field("name", &self.name)
            .field("period", &self.period)
            .field("pin", &self.pin)
            .field("estimator", &self.estimator)
            .field("ranges", &self.ranges)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use chrono::NaiveTime;

    use crate::clock::FixedClock;
    use crate::error::SensorError;

    fn light_time(h: u32, m: u32, s: u32) -> TimeIndicator {
        let clock = Rc::new(FixedClock::at(h, m, s).unwrap());
        TimeIndicator::new(
            "light_time",
            Some(Duration::from_secs(60)),
            "%H:%M",
            [
                ("06:00", "18:00", Datum::from("day")),
                ("18:00", "06:00", Datum::from("night")),
            ],
            clock,
        )
        .unwrap()
    }

    #[test]
    fn time_indicator_day() {
        assert_eq!(light_time(12, 0, 0).read(), Ok(Datum::from("day")));
        assert_eq!(light_time(6, 0, 0).read(), Ok(Datum::from("day")));
    }

    /// Advances one second on every `now()` call.
    struct TickingClock {
        next: Cell<NaiveTime>,
        calls: Cell<u32>,
    }

    impl Clock for TickingClock {
        fn now(&self) -> NaiveTime {
            let t = self.next.get();
            self.next.set(t + chrono::TimeDelta::seconds(1));
            self.calls.set(self.calls.get() + 1);
            t
        }
    }

    #[test]
    fn time_indicator_samples_the_clock_once() {
        let clock = Rc::new(TickingClock {
            next: Cell::new(NaiveTime::from_hms_opt(17, 59, 59).unwrap()),
            calls: Cell::new(0),
        });
        let ind = TimeIndicator::new(
            "light_time",
            None,
            "%H:%M:%S",
            [
                ("06:00:00", "18:00:00", Datum::from("day")),
                ("18:00:00", "23:00:00", Datum::from("night")),
            ],
            Rc::clone(&clock) as Rc<dyn Clock>,
        )
        .unwrap();
        assert_eq!(ind.read(), Ok(Datum::from("day")));
        assert_eq!(clock.calls.get(), 1);
    }

    #[test]
    fn time_indicator_wrapping_range_never_matches() {
        let err = light_time(20, 0, 0).read().unwrap_err();
        assert!(matches!(err, ValueError::RangeNotFound { .. }));
        assert!(light_time(18, 0, 0).read().is_err());
    }

    #[test]
    fn time_indicator_rejects_malformed_bound() {
        let clock = Rc::new(FixedClock::at(0, 0, 0).unwrap());
        let err = TimeIndicator::new(
            "t",
            None,
            "%H:%M",
            [("6am", "18:00", Datum::Int(1))],
            clock,
        )
        .unwrap_err();
        assert!(matches!(err, ValueError::TimeParse { .. }));
    }

    #[test]
    fn time_indicator_ignores_format_for_live_sample() {
        // Hour-only bounds still compare against the full clock time.
        let clock = Rc::new(FixedClock::at(7, 59, 59).unwrap());
        let ind = TimeIndicator::new(
            "t",
            None,
            "%H",
            [("00", "08", Datum::from("early")), ("08", "24", Datum::from("late"))],
            clock,
        )
        .unwrap();
        assert_eq!(ind.read(), Ok(Datum::from("early")));
    }

    fn soil(level: f64) -> GpioIndicator {
        let ranges = [
            (Interval::new(0.0, 0.3), Datum::from("wet")),
            (Interval::new(0.3, 0.6), Datum::from("moist")),
            (Interval::new(0.6, 1.0), Datum::from("dry")),
        ]
        .into_iter()
        .collect();
        GpioIndicator::new(
            "soil_sensor",
            None,
            4,
            SampleEstimator::new(5, Duration::ZERO).unwrap(),
            ranges,
            Box::new(move || Ok::<_, SensorError>(level)),
        )
    }

    #[test]
    fn gpio_indicator_classifies_mean() {
        assert_eq!(soil(0.4).read(), Ok(Datum::from("moist")));
        assert_eq!(soil(0.5).read(), Ok(Datum::from("moist")));
        assert_eq!(soil(0.05).read(), Ok(Datum::from("wet")));
    }

    #[test]
    fn gpio_indicator_out_of_range() {
        let err = soil(1.5).read().unwrap_err();
        assert!(matches!(err, ValueError::RangeNotFound { .. }));
    }

    #[test]
    fn gpio_indicator_surfaces_sensor_failure() {
        let mut ind = GpioIndicator::new(
            "broken",
            None,
            9,
            SampleEstimator::new(3, Duration::ZERO).unwrap(),
            RangeTable::new(),
            Box::new(|| Err::<f64, _>(SensorError::Unavailable { pin: 9 })),
        );
        let err = ind.read().unwrap_err();
        assert!(matches!(err, ValueError::SensorRead { .. }));
    }
}
