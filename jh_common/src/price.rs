use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative rupee amount, stored as integer paise.
///
/// Product prices arrive from the remote store as JSON numbers, but older documents carry them as strings, and some
/// carry garbage. Prices are display/sort data, not money that moves, so deserialization is lenient: anything that
/// does not parse as a non-negative number becomes zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(i64);

impl Price {
    pub fn from_paise(paise: i64) -> Self {
        Self(paise.max(0))
    }

    pub fn from_rupees(rupees: f64) -> Self {
        if !rupees.is_finite() || rupees <= 0.0 {
            return Self(0);
        }
        #[allow(clippy::cast_possible_truncation)]
        Self((rupees * 100.0).round() as i64)
    }

    pub fn paise(&self) -> i64 {
        self.0
    }

    pub fn rupees(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Self::from_rupees(value)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{:.2}", self.rupees())
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.rupees())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_rupees(lenient_f64(deserializer)))
    }
}

/// Accept a JSON number, a numeric string, or anything else (which becomes 0.0).
pub(crate) fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> f64 {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Number(f64),
        Text(String),
        Other(serde_json::Value),
    }

    match Lenient::deserialize(deserializer) {
        Ok(Lenient::Number(n)) => n,
        Ok(Lenient::Text(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn price_from_rupees() {
        assert_eq!(Price::from_rupees(1000.0).paise(), 100_000);
        assert_eq!(Price::from_rupees(99.99).paise(), 9_999);
        assert_eq!(Price::from_rupees(-5.0), Price::default());
        assert_eq!(Price::from_rupees(f64::NAN), Price::default());
    }

    #[test]
    fn price_is_lenient_on_the_wire() {
        let p: Price = serde_json::from_str("1000").unwrap();
        assert_eq!(p, Price::from_rupees(1000.0));
        let p: Price = serde_json::from_str("\"450.50\"").unwrap();
        assert_eq!(p.paise(), 45_050);
        let p: Price = serde_json::from_str("\"not a price\"").unwrap();
        assert_eq!(p, Price::default());
        let p: Price = serde_json::from_str("null").unwrap();
        assert_eq!(p, Price::default());
    }

    #[test]
    fn display() {
        assert_eq!(Price::from_rupees(1000.0).to_string(), "₹1000.00");
    }
}
