//! Raw records consumed by the transformer.
//!
//! Every field is optional and loosely typed; missing keys deserialize to
//! `None` and unknown keys are ignored.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TissError};
use crate::scalar::Scalar;

/// One row of a billing batch: a claim, a procedure or an expense.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_item: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_despesa: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codigo_item: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao_item: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantidade_executada: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unidade_medida: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valor_unitario: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valor_total: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_execucao: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_pagamento: Option<Scalar>,

    // Executant professional, present on procedures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executante_nome: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executante_conselho: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executante_numero_conselho: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executante_uf: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executante_cbos: Option<Scalar>,

    // Claim header, present on `guia` rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_guia_prestador: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_guia_operadora: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_carteira: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_beneficiario: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senha: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_autorizacao: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_validade_senha: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solicitante_nome: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solicitante_conselho: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solicitante_numero_conselho: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solicitante_uf: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solicitante_cbos: Option<Scalar>,
}

/// Discriminator read from `tipo_item`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Guia,
    Procedimento,
    Despesa,
    /// Present but not one of the known values.
    Other,
    Missing,
}

impl LineItem {
    /// Exact, case-sensitive match on `tipo_item`.
    pub fn kind(&self) -> ItemKind {
        match &self.tipo_item {
            None => ItemKind::Missing,
            Some(Scalar::Text(tipo)) => match tipo.as_str() {
                "guia" => ItemKind::Guia,
                "procedimento" => ItemKind::Procedimento,
                "despesa" => ItemKind::Despesa,
                _ => ItemKind::Other,
            },
            Some(_) => ItemKind::Other,
        }
    }

    pub fn is_guia(&self) -> bool {
        self.kind() == ItemKind::Guia
    }

    /// Display form of `id`, used in diagnostics.
    pub fn id_text(&self) -> String {
        self.id
            .as_ref()
            .map_or_else(|| "?".to_string(), Scalar::to_text)
    }
}

/// Nested transaction header some batches carry under `cabecalho`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CabecalhoSource {
    #[serde(alias = "tipo_transacao", skip_serializing_if = "Option::is_none")]
    pub tipo_transacao: Option<Scalar>,
    #[serde(alias = "sequencial_transacao", skip_serializing_if = "Option::is_none")]
    pub sequencial_transacao: Option<Scalar>,
    #[serde(alias = "data_registro_transacao", skip_serializing_if = "Option::is_none")]
    pub data_registro_transacao: Option<Scalar>,
    #[serde(alias = "hora_registro_transacao", skip_serializing_if = "Option::is_none")]
    pub hora_registro_transacao: Option<Scalar>,
    #[serde(alias = "cnpj_prestador", skip_serializing_if = "Option::is_none")]
    pub cnpj_prestador: Option<Scalar>,
    #[serde(
        rename = "registroANS",
        alias = "registroAns",
        alias = "registro_ans",
        skip_serializing_if = "Option::is_none"
    )]
    pub registro_ans: Option<Scalar>,
    #[serde(alias = "operadora_nome", skip_serializing_if = "Option::is_none")]
    pub operadora_nome: Option<Scalar>,
    #[serde(alias = "nome_prestador", skip_serializing_if = "Option::is_none")]
    pub nome_prestador: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnes: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<Scalar>,
}

/// Nested batch block some batches carry under `lote`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoteSource {
    #[serde(alias = "numeroLote", skip_serializing_if = "Option::is_none")]
    pub numero_lote: Option<Scalar>,
    #[serde(alias = "dataEnvio", skip_serializing_if = "Option::is_none")]
    pub data_envio: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competencia: Option<Scalar>,
    #[serde(alias = "valorTotal", skip_serializing_if = "Option::is_none")]
    pub valor_total: Option<Scalar>,
}

/// One billing batch as returned by the backend, nested or flat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoteData {
    #[serde(
        deserialize_with = "object_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub cabecalho: Option<CabecalhoSource>,
    #[serde(
        deserialize_with = "object_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub lote: Option<LoteSource>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub numero_lote: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_envio: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competencia: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valor_total: Option<Scalar>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_transacao: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequencial_transacao: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_registro_transacao: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hora_registro_transacao: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj_prestador: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registro_ans: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operadora_nome: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_prestador: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnes: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<Scalar>,

    // Batch-level professional used as the default requester.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profissional_nome: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profissional_conselho: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profissional_numero_conselho: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profissional_uf: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profissional_cbos: Option<Scalar>,
}

/// Nested blocks that are not JSON objects read as absent.
fn object_or_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsDocument {
    Bare(Vec<LineItem>),
    Wrapped { items: Vec<LineItem> },
}

/// Parse line items from either a bare JSON array or `{"items": [...]}`.
pub fn parse_items(json: &str) -> Result<Vec<LineItem>> {
    let document: ItemsDocument = serde_json::from_str(json)?;
    Ok(match document {
        ItemsDocument::Bare(items) | ItemsDocument::Wrapped { items } => items,
    })
}

/// Parse a batch record from JSON.
pub fn parse_lote(json: &str) -> Result<LoteData> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(TissError::Message(
            "batch document must be a JSON object".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| TissError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a batch record file.
pub fn load_lote(path: &Path) -> Result<LoteData> {
    parse_lote(&read_file(path)?)
}

/// Read and parse a line-item file.
pub fn load_items(path: &Path) -> Result<Vec<LineItem>> {
    parse_items(&read_file(path)?)
}
