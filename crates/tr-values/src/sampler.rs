//! Fixed-count sampling of a sensor source.
//!
//! The estimator draws `count` readings, waiting `interval` between
//! successive draws, and reduces them to a mean and a population standard
//! deviation. The calling thread blocks for `(count - 1) * interval`.

use std::thread;
use std::time::Duration;

use tr_core::{Real, ensure_finite, mean_and_population_stddev};
use tracing::info;

use crate::error::{SensorError, ValueError, ValueResult};
use crate::sensor::SampleSource;

/// Sampling configuration for a sensor indicator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleEstimator {
    count: usize,
    interval: Duration,
}

/// Result of one sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub samples: Vec<Real>,
    pub mean: Real,
    pub stddev: Real,
}

impl SampleEstimator {
    /// Create a new estimator.
    ///
    /// # Arguments
    ///
    /// * `count` - Readings per estimate (must be positive)
    /// * `interval` - Delay between successive readings
    pub fn new(count: usize, interval: Duration) -> ValueResult<Self> {
        if count == 0 {
            return Err(ValueError::InvalidArg {
                what: "sample count must be positive",
            });
        }
        Ok(Self { count, interval })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Draw `count` readings from `source` and reduce them.
    ///
    /// The first failing read aborts the run; nothing is retried.
    pub fn sample(&self, source: &mut dyn SampleSource) -> Result<Estimate, SensorError> {
        let mut samples = Vec::with_capacity(self.count);
        for n in 0..self.count {
            if n > 0 && !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
            let reading = source.read()?;
            let reading = ensure_finite(reading, "sensor reading").map_err(|e| {
                SensorError::Read {
                    what: e.to_string(),
                }
            })?;
            samples.push(reading);
        }

        let (mean, stddev) =
            mean_and_population_stddev(&samples).map_err(|e| SensorError::Read {
                what: e.to_string(),
            })?;

        let rounded: Vec<String> = samples.iter().map(|x| format!("{x:.6}")).collect();
        info!(
            "samples [{}], mean {:.6}, std {:.6}",
            rounded.join(", "),
            mean,
            stddev
        );

        Ok(Estimate {
            samples,
            mean,
            stddev,
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn constant_source_has_zero_spread(level in -10.0_f64..10.0, count in 1_usize..16) {
            let est = SampleEstimator::new(count, Duration::ZERO).unwrap();
            let mut source = move || Ok::<_, SensorError>(level);
            let e = est.sample(&mut source).unwrap();
            prop_assert!((e.mean - level).abs() < 1e-9);
            prop_assert!(e.stddev < 1e-6);
        }
    }
}
