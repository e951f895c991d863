//! Numeric aggregates for revenue and ticket totals.
//!
//! Dataset numbers are plain JSON numbers. Totals over integer values stay
//! integers so `150` serializes as `150`, not `150.0`. A fractional
//! contribution, or an integer sum that would overflow `i64`, switches the
//! total to floating point for the rest of the aggregation.

use core::ops::{Add, AddAssign};

use serde::{Serialize, Serializer};
use serde_json::Value;

/// A revenue or ticket quantity, or a running total of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    /// An exact integer quantity.
    Int(i64),
    /// A floating point quantity.
    Float(f64),
}

impl Amount {
    /// The additive identity.
    pub const ZERO: Self = Self::Int(0);

    /// Read an amount from a JSON value.
    ///
    /// Returns `None` for anything that is not a JSON number, including
    /// numeric strings.
    pub fn from_json(value: &Value) -> Option<Self> {
        let Value::Number(n) = value else {
            return None;
        };
        n.as_i64()
            .map(Self::Int)
            .or_else(|| n.as_f64().map(Self::Float))
    }

    /// The amount as a float.
    // Integers above 2^53 round to the nearest representable double.
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// Returns `true` if the amount is an exact integer.
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Int(_))
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Amount {
    type Output = Self;

    #[allow(clippy::arithmetic_side_effects)]
    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => a
                .checked_add(b)
                .map_or_else(|| Self::Float(self.as_f64() + rhs.as_f64()), Self::Int),
            _ => Self::Float(self.as_f64() + rhs.as_f64()),
        }
    }
}

impl AddAssign for Amount {
    #[allow(clippy::arithmetic_side_effects)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Int(i) => serializer.serialize_i64(i),
            Self::Float(f) => serializer.serialize_f64(f),
        }
    }
}
