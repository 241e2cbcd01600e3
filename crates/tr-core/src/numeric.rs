use crate::CoreError;

/// Floating point type used for sensor readings and range bounds.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Arithmetic mean and population standard deviation of `xs`.
///
/// The deviation is `sqrt(mean(x^2) - mean(x)^2)`, the biased estimator.
/// Rounding can push the variance slightly below zero for near-constant
/// input; it is clamped to zero before the square root.
pub fn mean_and_population_stddev(xs: &[Real]) -> Result<(Real, Real), CoreError> {
    if xs.is_empty() {
        return Err(CoreError::InvalidArg {
            what: "statistics need at least one sample",
        });
    }
    let n = xs.len() as Real;
    let mean = xs.iter().sum::<Real>() / n;
    let mean_sq = xs.iter().map(|x| x * x).sum::<Real>() / n;
    let var = (mean_sq - mean * mean).max(0.0);
    Ok((mean, var.sqrt()))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn stddev_is_never_nan(xs in prop::collection::vec(-1e3_f64..1e3_f64, 1..32)) {
            let (mean, std) = mean_and_population_stddev(&xs).unwrap();
            prop_assert!(mean.is_finite());
            prop_assert!(std.is_finite());
            prop_assert!(std >= 0.0);
        }

        #[test]
        fn mean_lies_within_sample_bounds(xs in prop::collection::vec(-1e3_f64..1e3_f64, 1..32)) {
            let (mean, _) = mean_and_population_stddev(&xs).unwrap();
            let lo = xs.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(mean >= lo - 1e-9 && mean <= hi + 1e-9);
        }
    }
}
