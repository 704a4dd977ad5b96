//! The nested financial view built from one batch.
//!
//! Field names serialize in camelCase, which is what the presentation layer
//! reads. Roster entries keep their snake_case keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scalar::Scalar;

/// Placeholder for text fields with no source value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Payment status assumed when an item carries none.
pub const DEFAULT_PAYMENT_STATUS: &str = "pendente";

/// Result of one transformation: the processed batch and a claim lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceiroVisualization {
    pub processed_data: ProcessedData,
    /// Claims keyed by provider claim number. Later duplicates overwrite earlier ones.
    /// Keys serialize in sorted order, not claim order; `processed_data.guias` keeps claim order.
    pub guias_map: BTreeMap<String, Guia>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedData {
    pub cabecalho: Cabecalho,
    pub lote: LoteInfo,
    pub guias: Vec<Guia>,
    pub totais: Totais,
    pub profissionais: Vec<ProfissionalRoster>,
}

/// Transaction header and payer/provider identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cabecalho {
    pub tipo_transacao: String,
    pub sequencial_transacao: String,
    pub data_registro_transacao: String,
    pub hora_registro_transacao: String,
    pub cnpj_prestador: String,
    #[serde(rename = "registroANS")]
    pub registro_ans: String,
    pub operadora_nome: String,
    pub nome_prestador: String,
    pub cnes: String,
    pub hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoteInfo {
    pub numero_lote: String,
    pub data_envio: String,
    pub competencia: String,
    pub valor_total: f64,
}

/// One claim with its normalized line items and subtotals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guia {
    pub id: Option<Scalar>,
    pub numero_guia_prestador: String,
    pub numero_guia_operadora: String,
    pub numero_carteira: String,
    pub nome_beneficiario: String,
    pub senha: String,
    pub data_autorizacao: String,
    pub data_validade_senha: String,
    pub dados_solicitante: DadosSolicitante,
    pub procedimentos: Vec<ProcedimentoView>,
    pub medicamentos: Vec<ItemView>,
    pub materiais: Vec<ItemView>,
    pub taxas: Vec<ItemView>,
    pub valor_total: ValorTotal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DadosSolicitante {
    pub profissional: Profissional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profissional {
    pub nome: String,
    pub conselho: String,
    pub numero_conselho: String,
    pub uf: String,
    pub cbos: String,
}

/// Normalized line item. Numeric fields are always finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub data_execucao: String,
    pub codigo: String,
    pub descricao: String,
    pub quantidade: f64,
    pub unidade: String,
    pub valor_unitario: f64,
    pub valor_total: f64,
    pub status_pagamento: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedimentoView {
    #[serde(flatten)]
    pub item: ItemView,
    #[serde(flatten)]
    pub executante: Executante,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Executante {
    pub executante_nome: String,
    pub executante_conselho: String,
    pub executante_numero_conselho: String,
    pub executante_uf: String,
    pub executante_cbos: String,
}

/// Category subtotals and the claim's authoritative grand total.
///
/// `valor_total_geral` comes from the claim record, not from the subtotals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValorTotal {
    pub valor_procedimentos: f64,
    pub valor_medicamentos: f64,
    pub valor_materiais: f64,
    pub valor_taxas: f64,
    pub valor_total_geral: f64,
}

impl ValorTotal {
    /// Sum of the four category subtotals.
    pub fn subtotal_sum(&self) -> f64 {
        self.valor_procedimentos + self.valor_medicamentos + self.valor_materiais + self.valor_taxas
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totais {
    pub valor_procedimentos: f64,
    pub valor_medicamentos: f64,
    pub valor_materiais: f64,
    pub valor_taxas: f64,
    pub valor_total_lote: f64,
    pub total_guias: usize,
    pub periodo_inicio: String,
    pub periodo_fim: String,
}

/// Roster entry, unique per `(nome, guia)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfissionalRoster {
    pub nome: String,
    pub conselho: String,
    pub numero_conselho: String,
    pub uf: String,
    pub cbos: String,
    pub guia: String,
}

impl ProcessedData {
    pub fn guia(&self, numero_guia_prestador: &str) -> Option<&Guia> {
        self.guias
            .iter()
            .find(|guia| guia.numero_guia_prestador == numero_guia_prestador)
    }
}

impl Guia {
    pub fn item_count(&self) -> usize {
        self.procedimentos.len() + self.medicamentos.len() + self.materiais.len() + self.taxas.len()
    }
}
