//! tr-core: stable foundation for terrarium.
//!
//! Contains:
//! - numeric (Real, finiteness check, sample statistics)
//! - range (half-open intervals and first-match range tables)
//! - time_codec (format-string driven time-of-day decoding)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod range;
pub mod time_codec;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use range::{Interval, RangeTable};
pub use time_codec::{TimeFormat, TimeUnit, UnitWeights, seconds_of_day};
