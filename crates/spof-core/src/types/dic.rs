//! DIC (confidentiality, integrity, availability) level triples.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::InvariantError;

/// Highest DIC level (critical).
pub const MAX_DIC_LEVEL: u8 = 4;

/// Availability at or above this level counts as "high".
pub const HIGH_AVAILABILITY: u8 = 3;

/// A triple of DIC levels, each in `0..=4` (negligible → critical).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dic {
    pub confidentiality: u8,
    pub integrity: u8,
    pub availability: u8,
}

impl Dic {
    pub const ZERO: Dic = Dic {
        confidentiality: 0,
        integrity: 0,
        availability: 0,
    };

    pub const fn new(confidentiality: u8, integrity: u8, availability: u8) -> Self {
        Self {
            confidentiality,
            integrity,
            availability,
        }
    }

    /// Build a triple from raw stored or user-supplied integers,
    /// rejecting any axis outside `0..=4`.
    pub fn checked(
        confidentiality: i64,
        integrity: i64,
        availability: i64,
    ) -> Result<Self, InvariantError> {
        Ok(Self {
            confidentiality: check_axis("confidentiality", confidentiality)?,
            integrity: check_axis("integrity", integrity)?,
            availability: check_axis("availability", availability)?,
        })
    }

    /// Re-validate a triple built with [`Dic::new`].
    pub fn validate(&self) -> Result<(), InvariantError> {
        Self::checked(
            i64::from(self.confidentiality),
            i64::from(self.integrity),
            i64::from(self.availability),
        )
        .map(|_| ())
    }

    /// Axis-wise maximum.
    pub fn max(self, other: Dic) -> Dic {
        Dic {
            confidentiality: self.confidentiality.max(other.confidentiality),
            integrity: self.integrity.max(other.integrity),
            availability: self.availability.max(other.availability),
        }
    }

    /// Axis-wise maximum over a set of triples; `Dic::ZERO` for an empty set.
    pub fn axis_max<I>(triples: I) -> Dic
    where
        I: IntoIterator<Item = Dic>,
    {
        triples.into_iter().fold(Dic::ZERO, Dic::max)
    }

    pub fn has_high_availability(&self) -> bool {
        self.availability >= HIGH_AVAILABILITY
    }
}

impl fmt::Display for Dic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(C={}, I={}, A={})",
            self.confidentiality, self.integrity, self.availability
        )
    }
}

fn check_axis(axis: &'static str, value: i64) -> Result<u8, InvariantError> {
    if (0..=i64::from(MAX_DIC_LEVEL)).contains(&value) {
        Ok(value as u8)
    } else {
        Err(InvariantError::LevelOutOfRange { axis, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_max_of_empty_set_is_zero() {
        assert_eq!(Dic::axis_max(Vec::new()), Dic::ZERO);
    }

    #[test]
    fn axis_max_is_per_axis() {
        let max = Dic::axis_max([Dic::new(4, 0, 1), Dic::new(0, 3, 2), Dic::new(1, 1, 0)]);
        assert_eq!(max, Dic::new(4, 3, 2));
    }

    #[test]
    fn checked_rejects_out_of_range_axis() {
        let err = Dic::checked(1, 5, 0).unwrap_err();
        assert_eq!(
            err,
            InvariantError::LevelOutOfRange {
                axis: "integrity",
                value: 5
            }
        );
        assert!(Dic::checked(-1, 0, 0).is_err());
        assert_eq!(Dic::checked(4, 4, 4).unwrap(), Dic::new(4, 4, 4));
    }

    #[test]
    fn high_availability_threshold() {
        assert!(!Dic::new(4, 4, 2).has_high_availability());
        assert!(Dic::new(0, 0, 3).has_high_availability());
    }
}
