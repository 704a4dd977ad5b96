//! Loosely typed scalar values as delivered by the billing backend.
//!
//! The backend serializes the same column as a JSON number in one batch and
//! as a string in the next, so every input field is an `Option<Scalar>` and
//! consumers decide how to read it.

use serde::{Deserialize, Serialize};

/// A JSON scalar: boolean, integer, float or string.
///
/// Arrays and objects land in `Other` so one malformed field never rejects
/// the whole record. `Other` is falsy and has no numeric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Scalar {
    /// Returns false for `false`, `0`, `NaN`, the empty string and non-scalars.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Bool(value) => *value,
            Scalar::Int(value) => *value != 0,
            Scalar::Float(value) => *value != 0.0 && !value.is_nan(),
            Scalar::Text(value) => !value.is_empty(),
            Scalar::Other(_) => false,
        }
    }

    /// Text rendering of the value. Numbers print without a trailing `.0`.
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Bool(value) => value.to_string(),
            Scalar::Int(value) => value.to_string(),
            Scalar::Float(value) => format!("{value}"),
            Scalar::Text(value) => value.clone(),
            Scalar::Other(value) => value.to_string(),
        }
    }

    /// Numeric reading of the value, which may be non-finite.
    ///
    /// Blank strings read as zero; unparseable strings yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            Scalar::Int(value) => Some(*value as f64),
            Scalar::Float(value) => Some(*value),
            Scalar::Text(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Some(0.0);
                }
                trimmed.parse::<f64>().ok()
            }
            Scalar::Other(_) => None,
        }
    }

    /// Strict equality: numbers only match numbers, strings only strings.
    pub fn same_as(&self, other: &Scalar) -> bool {
        match (self.record_key(), other.record_key()) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }

    /// Hashable identity used to join children to their parent record.
    ///
    /// `NaN` and non-scalars have no identity and never join.
    pub fn record_key(&self) -> Option<RecordKey> {
        match self {
            Scalar::Bool(value) => Some(RecordKey::Bool(*value)),
            Scalar::Int(value) => Some(RecordKey::number(*value as f64)),
            Scalar::Float(value) if value.is_nan() => None,
            Scalar::Float(value) => Some(RecordKey::number(*value)),
            Scalar::Text(value) => Some(RecordKey::Text(value.clone())),
            Scalar::Other(_) => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

/// Join key derived from a [`Scalar`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Bool(bool),
    /// Bit pattern of the float, with `-0.0` folded into `0.0`.
    Number(u64),
    Text(String),
}

impl RecordKey {
    fn number(value: f64) -> Self {
        let folded = if value == 0.0 { 0.0 } else { value };
        RecordKey::Number(folded.to_bits())
    }
}

/// The value when present and truthy.
pub fn truthy(value: Option<&Scalar>) -> Option<&Scalar> {
    value.filter(|scalar| scalar.is_truthy())
}

/// Text of the value when present and truthy.
pub fn truthy_text(value: Option<&Scalar>) -> Option<String> {
    truthy(value).map(Scalar::to_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_float_keys_join() {
        assert!(Scalar::Int(1).same_as(&Scalar::Float(1.0)));
        assert!(Scalar::Float(-0.0).same_as(&Scalar::Int(0)));
    }

    #[test]
    fn text_never_joins_number() {
        assert!(!Scalar::Text("1".into()).same_as(&Scalar::Int(1)));
    }

    #[test]
    fn non_scalar_is_falsy_and_never_joins() {
        let list = Scalar::Other(serde_json::json!(["a"]));
        assert!(!list.is_truthy());
        assert_eq!(list.as_f64(), None);
        assert!(!list.same_as(&list));
    }

    #[test]
    fn nan_never_joins() {
        assert!(!Scalar::Float(f64::NAN).same_as(&Scalar::Float(f64::NAN)));
    }
}
