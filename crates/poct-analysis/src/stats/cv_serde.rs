//! Serde for CV% values that may be `NaN` or `±Infinity`.
//!
//! JSON has no non-finite numbers, so those sentinels are written as the
//! strings `"NaN"`, `"Infinity"` and `"-Infinity"`. Finite values stay plain
//! numbers.

use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(cv: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if cv.is_finite() {
        serializer.serialize_f64(*cv)
    } else if cv.is_nan() {
        serializer.serialize_str("NaN")
    } else if cv.is_sign_positive() {
        serializer.serialize_str("Infinity")
    } else {
        serializer.serialize_str("-Infinity")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Text(String),
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Repr::deserialize(deserializer)? {
        Repr::Number(v) => Ok(v),
        Repr::Text(s) => match s.as_str() {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            other => Err(serde::de::Error::custom(format!(
                "expected a number, \"NaN\", \"Infinity\" or \"-Infinity\", found \"{other}\""
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::super::{DeviceRow, DeviceStats, PrecisionBand};

    #[test]
    fn sentinels_survive_json() {
        for cv in [f64::INFINITY, f64::NEG_INFINITY] {
            let stats = DeviceStats { mean: 0.0, sd: 1.0, cv, count: 2 };
            let json = serde_json::to_string(&stats).unwrap();
            let back: DeviceStats = serde_json::from_str(&json).unwrap();
            assert_eq!(back, stats);
        }

        let row = DeviceRow {
            device: "A".into(),
            stats: DeviceStats { mean: 0.0, sd: 0.0, cv: f64::NAN, count: 3 },
            band: PrecisionBand::Unacceptable,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["cv"], "NaN");
        let back: DeviceRow = serde_json::from_value(json).unwrap();
        assert!(back.stats.cv.is_nan());
    }

    #[test]
    fn finite_cv_stays_numeric() {
        let stats = DeviceStats { mean: 11.0, sd: 1.0, cv: 9.5, count: 2 };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["cv"], 9.5);
    }

    #[test]
    fn unknown_text_is_rejected() {
        let err = serde_json::from_str::<DeviceStats>(r#"{"mean":0,"sd":0,"cv":"huge","count":1}"#);
        assert!(err.is_err());
    }
}
