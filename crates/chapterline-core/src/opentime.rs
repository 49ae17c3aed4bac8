//! Frame-accurate time values.
//!
//! Durations are converted to frame counts with integer arithmetic so nothing
//! is rounded before quantization. Conversion always rounds down to the frame
//! that contains the instant.

use std::{cmp::Ordering, fmt, time::Duration};

use crate::error::{ChapterlineError, Result};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// NTSC-family rates, usually reported as truncated decimals.
const NTSC_BASES: [u32; 5] = [24, 30, 48, 60, 120];

/// A positive rational frame rate, `num / den` frames per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRate {
    num: u32,
    den: u32,
}

impl FrameRate {
    pub fn new(num: u32, den: u32) -> Result<Self> {
        if num == 0 || den == 0 {
            return Err(ChapterlineError::InvalidFrameRate {
                fps: num as f64 / den as f64,
            });
        }
        let g = gcd(num, den);
        Ok(Self {
            num: num / g,
            den: den / g,
        })
    }

    /// Build a rate from a decimal fps value as reported by yt-dlp or ffprobe.
    pub fn from_fps(fps: f64) -> Result<Self> {
        if !fps.is_finite() || fps <= 0.0 || fps > u32::MAX as f64 / 1000.0 {
            return Err(ChapterlineError::InvalidFrameRate { fps });
        }

        if fps.fract() == 0.0 {
            return Self::new(fps as u32, 1);
        }

        for base in NTSC_BASES {
            let ntsc = base as f64 * 1000.0 / 1001.0;
            if (fps - ntsc).abs() < 0.005 {
                return Self::new(base * 1000, 1001);
            }
        }

        let num = (fps * 1000.0).round() as u32;
        Self::new(num, 1000).map_err(|_| ChapterlineError::InvalidFrameRate { fps })
    }

    pub fn num(&self) -> u32 {
        self.num
    }

    pub fn den(&self) -> u32 {
        self.den
    }

    pub fn as_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// An integer frame count at a specific rate.
///
/// Two values only compare when their rates match; `partial_cmp` returns
/// `None` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTime {
    pub frames: u64,
    pub rate: FrameRate,
}

impl FrameTime {
    pub fn zero(rate: FrameRate) -> Self {
        Self { frames: 0, rate }
    }

    /// Quantize `duration` at `rate`, rounding down to the containing frame.
    pub fn from_duration(duration: Duration, rate: FrameRate) -> Self {
        let scaled = duration.as_nanos() * rate.num as u128;
        let frames = scaled / (rate.den as u128 * NANOS_PER_SEC);
        Self {
            frames: u64::try_from(frames).unwrap_or(u64::MAX),
            rate,
        }
    }

    pub fn to_seconds(&self) -> f64 {
        self.frames as f64 * self.rate.den as f64 / self.rate.num as f64
    }
}

impl PartialOrd for FrameTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.rate != other.rate {
            return None;
        }
        Some(self.frames.cmp(&other.frames))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: FrameTime,
    pub duration: FrameTime,
}

impl TimeRange {
    /// A zero-length range sitting on `start`.
    pub fn instant(start: FrameTime) -> Self {
        Self {
            start,
            duration: FrameTime::zero(start.rate),
        }
    }

    /// A range from frame zero covering `duration`.
    pub fn from_start(duration: FrameTime) -> Self {
        Self {
            start: FrameTime::zero(duration.rate),
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_and_negative_rates() {
        assert!(FrameRate::new(0, 1).is_err());
        assert!(FrameRate::new(24, 0).is_err());
        assert!(FrameRate::from_fps(0.0).is_err());
        assert!(FrameRate::from_fps(-25.0).is_err());
        assert!(FrameRate::from_fps(f64::NAN).is_err());
    }

    #[test]
    fn ntsc_rates_become_exact_fractions() {
        let rate = FrameRate::from_fps(29.97).unwrap();
        assert_eq!((rate.num(), rate.den()), (30000, 1001));
        let rate = FrameRate::from_fps(23.976).unwrap();
        assert_eq!((rate.num(), rate.den()), (24000, 1001));
    }

    #[test]
    fn odd_decimal_rates_are_reduced() {
        let rate = FrameRate::from_fps(12.5).unwrap();
        assert_eq!((rate.num(), rate.den()), (25, 2));
    }

    #[test]
    fn quantization_rounds_down() {
        let rate = FrameRate::new(24, 1).unwrap();
        let t = FrameTime::from_duration(Duration::from_millis(1_999), rate);
        assert_eq!(t.frames, 47);

        let ntsc = FrameRate::new(30000, 1001).unwrap();
        // 10s * 29.97 = 299.7
        assert_eq!(FrameTime::from_duration(Duration::from_secs(10), ntsc).frames, 299);
    }

    #[test]
    fn mixed_rates_do_not_compare() {
        let a = FrameTime::from_duration(Duration::from_secs(1), FrameRate::new(24, 1).unwrap());
        let b = FrameTime::from_duration(Duration::from_secs(1), FrameRate::new(25, 1).unwrap());
        assert_eq!(a.partial_cmp(&b), None);
        let later = FrameTime { frames: 25, ..a };
        assert!(a < later);
    }

    #[test]
    fn instant_has_zero_duration_at_same_rate() {
        let rate = FrameRate::new(25, 1).unwrap();
        let range = TimeRange::instant(FrameTime { frames: 50, rate });
        assert_eq!(range.duration.frames, 0);
        assert_eq!(range.duration.rate, rate);
        assert_eq!(range.start.to_seconds(), 2.0);
    }
}
