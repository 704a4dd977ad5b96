//! Tests for the professional roster.

use serde_json::{Value, json};
use tiss_model::{LineItem, LoteData};
use tiss_transform::build_financeiro_visualization;

fn items(value: Value) -> Vec<LineItem> {
    serde_json::from_value(value).expect("deserialize items")
}

#[test]
fn same_executant_once_per_claim() {
    let batch = items(json!([
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G1"},
        {"id": 2, "parent_id": 1, "tipo_item": "procedimento", "executante_nome": "Dr. Paulo"},
        {"id": 3, "parent_id": 1, "tipo_item": "procedimento", "executante_nome": "Dr. Paulo"},
        {"id": 4, "tipo_item": "guia", "numero_guia_prestador": "G2"},
        {"id": 5, "parent_id": 4, "tipo_item": "procedimento", "executante_nome": "Dr. Paulo"}
    ]));
    let view = build_financeiro_visualization(&LoteData::default(), &batch);
    let roster = &view.processed_data.profissionais;
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].guia, "G1");
    assert_eq!(roster[1].guia, "G2");
    assert!(roster.iter().all(|entry| entry.nome == "Dr. Paulo"));
}

#[test]
fn claim_professional_comes_first_and_dedupes_with_executants() {
    let batch = items(json!([
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G1",
         "solicitante_nome": "Dra. Ana"},
        {"id": 2, "parent_id": 1, "tipo_item": "procedimento", "executante_nome": "Dr. Paulo"},
        {"id": 3, "parent_id": 1, "tipo_item": "procedimento", "executante_nome": "Dra. Ana"}
    ]));
    let view = build_financeiro_visualization(&LoteData::default(), &batch);
    let names: Vec<&str> = view
        .processed_data
        .profissionais
        .iter()
        .map(|entry| entry.nome.as_str())
        .collect();
    assert_eq!(names, vec!["Dra. Ana", "Dr. Paulo"]);
}

#[test]
fn placeholder_claim_professional_is_skipped() {
    let batch = items(json!([
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G1", "solicitante_nome": "N/A"},
        {"id": 2, "tipo_item": "guia", "numero_guia_prestador": "G2"}
    ]));
    let view = build_financeiro_visualization(&LoteData::default(), &batch);
    assert!(view.processed_data.profissionais.is_empty());
}

#[test]
fn placeholder_text_is_a_real_executant_name() {
    let batch = items(json!([
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G1", "solicitante_nome": "N/A"},
        {"id": 2, "parent_id": 1, "tipo_item": "procedimento", "executante_nome": "N/A"}
    ]));
    let view = build_financeiro_visualization(&LoteData::default(), &batch);
    let roster = &view.processed_data.profissionais;
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].nome, "N/A");
    assert_eq!(roster[0].guia, "G1");
}

#[test]
fn executant_without_name_is_skipped() {
    let batch = items(json!([
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G1"},
        {"id": 2, "parent_id": 1, "tipo_item": "procedimento", "executante_nome": "",
         "executante_conselho": "CRM"},
        {"id": 3, "parent_id": 1, "tipo_item": "procedimento", "executante_conselho": "CRM"}
    ]));
    let view = build_financeiro_visualization(&LoteData::default(), &batch);
    assert!(view.processed_data.profissionais.is_empty());
}

#[test]
fn uf_and_cbos_defaults_differ_by_source() {
    let lote: LoteData = serde_json::from_value(json!({
        "profissional_nome": "Dra. Ana",
        "profissional_uf": "SP",
        "profissional_cbos": "225125"
    }))
    .expect("deserialize lote");
    let batch = items(json!([
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G1"},
        {"id": 2, "parent_id": 1, "tipo_item": "procedimento", "executante_nome": "Dr. Paulo"}
    ]));
    let view = build_financeiro_visualization(&lote, &batch);
    let roster = &view.processed_data.profissionais;
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].nome, "Dra. Ana");
    assert_eq!(roster[0].uf, "SP");
    assert_eq!(roster[0].cbos, "225125");
    assert_eq!(roster[1].nome, "Dr. Paulo");
    assert_eq!(roster[1].uf, "N/A");
    assert_eq!(roster[1].cbos, "N/A");
}

#[test]
fn roster_entry_shape() {
    let batch = items(json!([
        {"id": 1, "tipo_item": "guia", "numero_guia_prestador": "G1"},
        {"id": 2, "parent_id": 1, "tipo_item": "procedimento",
         "executante_nome": "Dr. Paulo", "executante_conselho": "CRM",
         "executante_numero_conselho": "12345", "executante_uf": "RJ",
         "executante_cbos": "225120"}
    ]));
    let view = build_financeiro_visualization(&LoteData::default(), &batch);
    insta::assert_json_snapshot!(view.processed_data.profissionais, @r#"
    [
      {
        "nome": "Dr. Paulo",
        "conselho": "CRM",
        "numero_conselho": "12345",
        "uf": "RJ",
        "cbos": "225120",
        "guia": "G1"
      }
    ]
    "#);
}
