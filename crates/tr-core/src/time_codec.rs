//! Format-string driven time-of-day decoding.
//!
//! A time format such as `"%H:%M"` contains at most one placeholder per unit
//! (`%H`, `%M`, `%S`). Each placeholder captures exactly two ASCII digits
//! from the input; everything else in the format is matched literally. The
//! decoded value is `sum(value * weight)` over the units present, which with
//! the default weights is the number of seconds since midnight.
//!
//! Only the first occurrence of a placeholder is treated as a capture; any
//! repeat is ordinary literal text. A format with no placeholders decodes
//! every input to `0`.

use crate::{CoreError, CoreResult};

/// Unit of a time placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 3] = [TimeUnit::Hour, TimeUnit::Minute, TimeUnit::Second];

    /// Placeholder text in a format string.
    pub fn token(self) -> &'static str {
        match self {
            TimeUnit::Hour => "%H",
            TimeUnit::Minute => "%M",
            TimeUnit::Second => "%S",
        }
    }
}

/// Weight applied to each decoded unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitWeights {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl Default for UnitWeights {
    fn default() -> Self {
        Self {
            hour: 3600,
            minute: 60,
            second: 1,
        }
    }
}

impl UnitWeights {
    pub fn weight(&self, unit: TimeUnit) -> u32 {
        match unit {
            TimeUnit::Hour => self.hour,
            TimeUnit::Minute => self.minute,
            TimeUnit::Second => self.second,
        }
    }
}

/// Weighted sum of clock fields, independent of any format string.
pub fn seconds_of_day(hour: u32, minute: u32, second: u32, weights: &UnitWeights) -> u32 {
    hour * weights.hour + minute * weights.minute + second * weights.second
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Capture(TimeUnit),
}

/// Structural pattern derived from a format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFormat {
    source: String,
    segments: Vec<Segment>,
}

impl TimeFormat {
    pub fn parse(format: &str) -> Self {
        let mut found: Vec<(usize, TimeUnit)> = TimeUnit::ALL
            .iter()
            .filter_map(|&unit| format.find(unit.token()).map(|pos| (pos, unit)))
            .collect();
        found.sort_by_key(|&(pos, _)| pos);

        let mut segments = Vec::with_capacity(found.len() * 2 + 1);
        let mut cursor = 0;
        for (pos, unit) in found {
            if pos > cursor {
                segments.push(Segment::Literal(format[cursor..pos].to_string()));
            }
            segments.push(Segment::Capture(unit));
            cursor = pos + unit.token().len();
        }
        if cursor < format.len() {
            segments.push(Segment::Literal(format[cursor..].to_string()));
        }

        Self {
            source: format.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Units present in the format, in the order they appear.
    pub fn units(&self) -> Vec<TimeUnit> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Capture(unit) => Some(*unit),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Decode `input`, searching for the first position where the pattern
    /// matches.
    pub fn decode(&self, input: &str, weights: &UnitWeights) -> CoreResult<u32> {
        if self.units().is_empty() {
            return Ok(0);
        }

        let bytes = input.as_bytes();
        for start in 0..=bytes.len() {
            if let Some(captures) = self.match_at(bytes, start) {
                return Ok(captures
                    .into_iter()
                    .map(|(unit, value)| value * weights.weight(unit))
                    .sum());
            }
        }

        Err(CoreError::TimeParse {
            format: self.source.clone(),
            input: input.to_string(),
        })
    }

    fn match_at(&self, bytes: &[u8], start: usize) -> Option<Vec<(TimeUnit, u32)>> {
        let mut pos = start;
        let mut captures = Vec::with_capacity(3);
        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => {
                    let lit = lit.as_bytes();
                    if !bytes.get(pos..)?.starts_with(lit) {
                        return None;
                    }
                    pos += lit.len();
                }
                Segment::Capture(unit) => {
                    let digits = bytes.get(pos..pos + 2)?;
                    if !digits.iter().all(u8::is_ascii_digit) {
                        return None;
                    }
                    let value = u32::from(digits[0] - b'0') * 10 + u32::from(digits[1] - b'0');
                    captures.push((*unit, value));
                    pos += 2;
                }
            }
        }
        Some(captures)
    }
}

/// Parse `format` and decode `input` in one step.
pub fn decode(format: &str, input: &str, weights: &UnitWeights) -> CoreResult<u32> {
    TimeFormat::parse(format).decode(input, weights)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn formatted_clock_time_decodes_to_seconds_of_day(
            h in 0_u32..24,
            m in 0_u32..60,
            s in 0_u32..60,
        ) {
            let w = UnitWeights::default();
            let text = format!("{h:02}:{m:02}:{s:02}");
            prop_assert_eq!(decode("%H:%M:%S", &text, &w).unwrap(), seconds_of_day(h, m, s, &w));
        }
    }
}
