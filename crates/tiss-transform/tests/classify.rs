//! Tests for line-item classification.

use serde_json::{Value, json};
use tiss_model::LineItem;
use tiss_transform::{ExpenseCategory, classify_expense, classify_items};

fn items(value: Value) -> Vec<LineItem> {
    serde_json::from_value(value).expect("deserialize items")
}

fn item(value: Value) -> LineItem {
    serde_json::from_value(value).expect("deserialize item")
}

#[test]
fn medication_check_wins_over_material_prefix() {
    let despesa = item(json!({"tipo_item": "despesa", "codigo_despesa": "02", "codigo_item": "7000"}));
    assert_eq!(classify_expense(&despesa), Some(ExpenseCategory::Medicamento));
}

#[test]
fn material_type_code_wins_over_fee_prefix() {
    let despesa = item(json!({"tipo_item": "despesa", "codigo_despesa": "03", "codigo_item": "6001"}));
    assert_eq!(classify_expense(&despesa), Some(ExpenseCategory::Material));
}

#[test]
fn code_prefixes_classify_without_type_code() {
    let medicamento = item(json!({"tipo_item": "despesa", "codigo_item": "90123"}));
    let material = item(json!({"tipo_item": "despesa", "codigo_item": "70001"}));
    let taxa = item(json!({"tipo_item": "despesa", "codigo_item": "60023"}));
    assert_eq!(classify_expense(&medicamento), Some(ExpenseCategory::Medicamento));
    assert_eq!(classify_expense(&material), Some(ExpenseCategory::Material));
    assert_eq!(classify_expense(&taxa), Some(ExpenseCategory::Taxa));
}

#[test]
fn prefix_90_beats_material_type_code() {
    let despesa = item(json!({"tipo_item": "despesa", "codigo_despesa": "03", "codigo_item": "9001"}));
    assert_eq!(classify_expense(&despesa), Some(ExpenseCategory::Medicamento));
}

#[test]
fn unmatched_expense_has_no_category() {
    let despesa = item(json!({"tipo_item": "despesa", "codigo_despesa": "05", "codigo_item": "8000"}));
    assert_eq!(classify_expense(&despesa), None);
    let numeric_type = item(json!({"tipo_item": "despesa", "codigo_despesa": 2, "codigo_item": "1"}));
    assert_eq!(classify_expense(&numeric_type), None);
}

#[test]
fn children_attach_to_their_claim_in_input_order() {
    let batch = items(json!([
        {"id": 2, "parent_id": 1, "tipo_item": "procedimento", "codigo_item": "B"},
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G1"},
        {"id": 3, "parent_id": 1, "tipo_item": "procedimento", "codigo_item": "C"},
        {"id": 4, "parent_id": 1, "tipo_item": "despesa", "codigo_despesa": "07"},
        {"id": 5, "parent_id": 1, "tipo_item": "despesa", "codigo_despesa": "99"}
    ]));
    let claims = classify_items(&batch);
    assert_eq!(claims.len(), 1);
    let claim = &claims[0];
    let codes: Vec<String> = claim
        .procedimentos
        .iter()
        .filter_map(|p| p.codigo_item.as_ref().map(tiss_model::Scalar::to_text))
        .collect();
    assert_eq!(codes, vec!["B", "C"]);
    assert_eq!(claim.taxas.len(), 1);
    assert_eq!(claim.unclassified.len(), 1);
    assert!(claim.medicamentos.is_empty());
    assert_eq!(claim.expenses(ExpenseCategory::Taxa).len(), 1);
}

#[test]
fn orphans_and_parentless_items_are_dropped() {
    let batch = items(json!([
        {"id": 1, "tipo_item": "guia"},
        {"id": 2, "parent_id": 99, "tipo_item": "procedimento"},
        {"id": 3, "tipo_item": "procedimento"},
        {"id": 4, "parent_id": "1", "tipo_item": "procedimento"}
    ]));
    let claims = classify_items(&batch);
    assert_eq!(claims.len(), 1);
    assert!(claims[0].procedimentos.is_empty());
}

#[test]
fn claims_sharing_an_id_share_children() {
    let batch = items(json!([
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G1"},
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G2"},
        {"id": 2, "parent_id": 1, "tipo_item": "procedimento"}
    ]));
    let claims = classify_items(&batch);
    assert_eq!(claims.len(), 2);
    assert_eq!(claims[0].procedimentos.len(), 1);
    assert_eq!(claims[1].procedimentos.len(), 1);
}

#[test]
fn claim_rows_are_never_children() {
    let batch = items(json!([
        {"id": 1, "tipo_item": "guia"},
        {"id": 2, "parent_id": 1, "tipo_item": "guia"}
    ]));
    let claims = classify_items(&batch);
    assert_eq!(claims.len(), 2);
    assert!(claims.iter().all(|claim| claim.procedimentos.is_empty()));
}
