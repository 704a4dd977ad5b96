//! Tests for numeric coercion.

use proptest::prelude::*;
use tiss_model::Scalar;
use tiss_transform::numeric::sum_amounts;
use tiss_transform::to_number;

fn text(value: &str) -> Scalar {
    Scalar::Text(value.to_string())
}

#[test]
fn to_number_zero_for_missing_and_invalid() {
    assert_eq!(to_number(None), 0.0);
    assert_eq!(to_number(Some(&text("abc"))), 0.0);
    assert_eq!(to_number(Some(&Scalar::Float(f64::NAN))), 0.0);
    assert_eq!(to_number(Some(&Scalar::Float(f64::INFINITY))), 0.0);
    assert_eq!(to_number(Some(&text("Infinity"))), 0.0);
}

#[test]
fn to_number_reads_numbers_and_numeric_strings() {
    assert_eq!(to_number(Some(&text("42"))), 42.0);
    assert_eq!(to_number(Some(&Scalar::Int(42))), 42.0);
    assert_eq!(to_number(Some(&text("3.5"))), 3.5);
    assert_eq!(to_number(Some(&text(" 7 "))), 7.0);
    assert_eq!(to_number(Some(&text(""))), 0.0);
    assert_eq!(to_number(Some(&Scalar::Bool(true))), 1.0);
}

#[test]
fn null_json_field_reads_as_zero() {
    let item: tiss_model::LineItem =
        serde_json::from_str(r#"{"valor_total": null}"#).expect("deserialize item");
    assert_eq!(to_number(item.valor_total.as_ref()), 0.0);
}

#[test]
fn sum_amounts_of_empty_is_zero() {
    assert_eq!(sum_amounts(Vec::new()), 0.0);
    assert_eq!(sum_amounts(vec![1.5, 2.5]), 4.0);
}

proptest! {
    #[test]
    fn finite_floats_pass_through(value in -1.0e12f64..1.0e12) {
        prop_assert_eq!(to_number(Some(&Scalar::Float(value))), value);
    }

    #[test]
    fn formatted_floats_round_trip(value in -1.0e12f64..1.0e12) {
        prop_assert_eq!(to_number(Some(&text(&value.to_string()))), value);
    }

    #[test]
    fn alphabetic_text_is_zero(value in "[a-zA-Z]{1,12}") {
        prop_assert_eq!(to_number(Some(&text(&value))), 0.0);
    }

    #[test]
    fn result_is_always_finite(value in ".*") {
        prop_assert!(to_number(Some(&text(&value))).is_finite());
    }
}
