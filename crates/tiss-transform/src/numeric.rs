//! Numeric coercion for loosely typed billing values.

use tiss_model::Scalar;

/// Numeric value of a field, or `0.0` when it is absent, unparseable or not finite.
///
/// Every quantity and amount goes through this before it reaches a view or a sum.
///
/// # Examples
///
/// ```
/// use tiss_model::Scalar;
/// use tiss_transform::numeric::to_number;
///
/// assert_eq!(to_number(Some(&Scalar::Text("3.5".into()))), 3.5);
/// assert_eq!(to_number(Some(&Scalar::Text("abc".into()))), 0.0);
/// assert_eq!(to_number(None), 0.0);
/// ```
pub fn to_number(value: Option<&Scalar>) -> f64 {
    value
        .and_then(Scalar::as_f64)
        .filter(|number| number.is_finite())
        .unwrap_or(0.0)
}

/// Sum of an iterator of already-coerced amounts.
pub fn sum_amounts<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().fold(0.0, |acc, value| acc + value)
}
