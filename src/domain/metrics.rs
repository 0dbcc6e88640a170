use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// A percentage held at one decimal place, rendered as `"12.3%"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percent(f64);

impl Percent {
    /// `part / max(whole, 1) * 100`, rounded to one decimal.
    pub fn of(part: u64, whole: u64) -> Self {
        let raw = part as f64 / whole.max(1) as f64 * 100.0;
        Self(round_exact(raw, 1))
    }

    /// Descending order on the displayed value.
    pub fn cmp_desc(&self, other: &Self) -> Ordering {
        other.0.total_cmp(&self.0)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Change in engagement against the previous period's likes, rendered as
/// `"+N%"`. Negative changes render as `"-N%"`, never `"+-N%"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Growth(i64);

impl Growth {
    /// Without a positive baseline, growth is a flat +100%.
    pub const NO_BASELINE: Growth = Growth(100);

    pub fn from_baseline(current: u64, previous: Option<u64>) -> Self {
        match previous {
            Some(prev) if prev > 0 => {
                let change = (current as f64 - prev as f64) / prev as f64 * 100.0;
                Self(round_exact(change, 0) as i64)
            }
            _ => Self::NO_BASELINE,
        }
    }
}

impl fmt::Display for Growth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= 0 {
            write!(f, "+{}%", self.0)
        } else {
            write!(f, "{}%", self.0)
        }
    }
}

impl Serialize for Growth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Round to `decimals` places using the exact binary value of `value`, ties
/// away from zero. 0.15 is stored as 0.1499.. and rounds to 0.1.
fn round_exact(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // Every finite f64 has a terminating expansion within 1100 places
    let exact = format!("{:.1100}", value.abs());
    let (whole, frac) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let kept = &frac[..decimals.min(frac.len())];
    let round_up = frac.as_bytes().get(decimals).is_some_and(|d| *d >= b'5');

    let mut scaled: f64 = format!("{}{}", whole, kept).parse().unwrap_or(0.0);
    if round_up {
        scaled += 1.0;
    }

    let rounded = scaled / 10f64.powi(decimals as i32);
    if value < 0.0 {
        -rounded
    } else {
        rounded
    }
}
