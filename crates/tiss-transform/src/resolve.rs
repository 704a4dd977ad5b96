//! Ordered field resolution.
//!
//! A field is described by a list of accessors tried in priority order. The
//! first accessor yielding a truthy value wins; otherwise the fallback is
//! used. Fields resolve independently, so one header may mix sources.

use tiss_model::scalar::truthy;
use tiss_model::{NOT_AVAILABLE, Scalar};

use crate::numeric::to_number;

/// Reads one candidate location from a source record.
pub type Accessor<S> = for<'s> fn(&'s S) -> Option<&'s Scalar>;

/// First truthy value among the candidates.
pub fn first_truthy<'s, S>(source: &'s S, candidates: &[Accessor<S>]) -> Option<&'s Scalar> {
    candidates
        .iter()
        .find_map(|accessor| truthy(accessor(source)))
}

/// Coerced number of the first truthy candidate, or `0.0`.
pub fn resolve_number<S>(source: &S, candidates: &[Accessor<S>]) -> f64 {
    to_number(first_truthy(source, candidates))
}

/// Text of the first truthy value among already-read candidates, or `fallback`.
pub fn resolve_candidates<'s, I>(candidates: I, fallback: &str) -> String
where
    I: IntoIterator<Item = Option<&'s Scalar>>,
{
    candidates
        .into_iter()
        .find_map(truthy)
        .map_or_else(|| fallback.to_string(), Scalar::to_text)
}

/// Text of a single optional field, `"N/A"` when absent or empty.
pub fn text_or_na(value: Option<&Scalar>) -> String {
    truthy(value).map_or_else(|| NOT_AVAILABLE.to_string(), Scalar::to_text)
}

/// A named header field with its candidate paths and fallback.
pub struct FieldRule<S: 'static> {
    /// Output key, as serialized.
    pub name: &'static str,
    pub candidates: &'static [Accessor<S>],
    /// `None` resolves to JSON null.
    pub fallback: Option<&'static str>,
}

impl<S: 'static> FieldRule<S> {
    pub fn resolve(&self, source: &S) -> Option<String> {
        first_truthy(source, self.candidates)
            .map(Scalar::to_text)
            .or_else(|| self.fallback.map(str::to_string))
    }

    /// Like [`FieldRule::resolve`], reading a null fallback as `"N/A"`.
    pub fn resolve_text(&self, source: &S) -> String {
        self.resolve(source)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Index of the candidate that supplied the value, if any.
    pub fn resolved_tier(&self, source: &S) -> Option<usize> {
        self.candidates
            .iter()
            .position(|accessor| truthy(accessor(source)).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair {
        first: Option<Scalar>,
        second: Option<Scalar>,
    }

    const RULE: FieldRule<Pair> = FieldRule {
        name: "pair",
        candidates: &[|pair| pair.first.as_ref(), |pair| pair.second.as_ref()],
        fallback: Some(NOT_AVAILABLE),
    };

    #[test]
    fn empty_string_falls_through() {
        let pair = Pair {
            first: Some(Scalar::Text(String::new())),
            second: Some(Scalar::Text("b".into())),
        };
        assert_eq!(RULE.resolve(&pair), Some("b".to_string()));
        assert_eq!(RULE.resolved_tier(&pair), Some(1));
    }

    #[test]
    fn fallback_when_no_candidate() {
        let pair = Pair {
            first: None,
            second: Some(Scalar::Int(0)),
        };
        assert_eq!(RULE.resolve_text(&pair), "N/A");
        assert_eq!(RULE.resolved_tier(&pair), None);
    }
}
