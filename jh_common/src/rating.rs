use std::{cmp::Ordering, fmt::Display};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::price::lenient_f64;

/// A star rating clamped to the range [0, 5]. Absent or unparseable values become zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rating(f64);

impl Rating {
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 5.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

// Rating is always finite after clamping, so a total order exists.
impl Eq for Rating {}

impl PartialOrd for Rating {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rating {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Rating {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}★", self.0)
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::new(lenient_f64(deserializer)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rating_clamps() {
        assert_eq!(Rating::new(4.5).value(), 4.5);
        assert_eq!(Rating::new(7.0).value(), 5.0);
        assert_eq!(Rating::new(-1.0).value(), 0.0);
        assert_eq!(Rating::new(f64::INFINITY).value(), 0.0);
    }

    #[test]
    fn rating_is_lenient_on_the_wire() {
        let r: Rating = serde_json::from_str("4.5").unwrap();
        assert_eq!(r, Rating::new(4.5));
        let r: Rating = serde_json::from_str("\"N/A\"").unwrap();
        assert_eq!(r, Rating::default());
    }

    #[test]
    fn rating_orders_totally() {
        let mut ratings = vec![Rating::new(3.5), Rating::new(5.0), Rating::new(0.0)];
        ratings.sort();
        assert_eq!(ratings, vec![Rating::new(0.0), Rating::new(3.5), Rating::new(5.0)]);
    }
}
