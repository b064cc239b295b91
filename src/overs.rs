use std::fmt;

use crate::constants::BALLS_PER_OVER;

/// Convert mixed-radix overs (`overs.balls`) to decimal overs.
///
/// `128.2` means 128 overs and 2 balls, which is `128.333..` decimal overs.
/// The balls digit must be in `0..=5`; anything else is the caller's problem.
pub fn to_decimal_overs(overs: f64) -> f64 {
    let whole = overs.floor();
    let balls = ((overs - whole) * 10.0).round();
    whole + balls / BALLS_PER_OVER as f64
}

/// Convert decimal overs back to mixed-radix overs.
///
/// Rounds to the nearest ball. A fraction that rounds up to a full over
/// carries into the whole part, so `19.99` becomes `20.0` rather than `19.6`.
pub fn to_mixed_radix_overs(decimal: f64) -> f64 {
    let mut whole = decimal.floor();
    let mut balls = ((decimal - whole) * BALLS_PER_OVER as f64).round();
    if balls >= BALLS_PER_OVER as f64 {
        whole += 1.0;
        balls = 0.0;
    }
    whole + balls / 10.0
}

/// Check that a value is a well-formed mixed-radix overs figure: finite,
/// non-negative, at most one decimal digit, and that digit in `0..=5`.
pub fn is_valid_mixed_radix(overs: f64) -> bool {
    if !overs.is_finite() || overs < 0.0 {
        return false;
    }
    let tenths = overs * 10.0;
    if (tenths - tenths.round()).abs() > 1e-6 {
        return false;
    }
    let balls = (tenths.round() as u64) % 10;
    balls < BALLS_PER_OVER as u64
}

/// An overs figure kept in both notations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Overs {
    /// `overs.balls` notation
    pub mixed: f64,
    /// True fractional overs
    pub decimal: f64,
}

impl Overs {
    pub fn from_mixed(mixed: f64) -> Self {
        Overs {
            mixed,
            decimal: to_decimal_overs(mixed),
        }
    }

    /// Keeps the decimal value as given; the mixed form is rounded to a ball.
    pub fn from_decimal(decimal: f64) -> Self {
        Overs {
            mixed: to_mixed_radix_overs(decimal),
            decimal,
        }
    }

    /// Exactly `balls` legal deliveries.
    pub fn from_balls(balls: u32) -> Self {
        let per_over = BALLS_PER_OVER;
        Overs {
            mixed: (balls / per_over) as f64 + (balls % per_over) as f64 / 10.0,
            decimal: balls as f64 / per_over as f64,
        }
    }

    /// Total legal deliveries, rounded to the nearest ball.
    pub fn balls(&self) -> u32 {
        (self.decimal * BALLS_PER_OVER as f64).round() as u32
    }
}

impl fmt::Display for Overs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.mixed.floor();
        let balls = ((self.mixed - whole) * 10.0).round();
        if balls == 0.0 {
            write!(f, "{}", whole as u64)
        } else {
            write!(f, "{}.{}", whole as u64, balls as u64)
        }
    }
}
