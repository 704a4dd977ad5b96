//! Batch header and envelope normalization.
//!
//! Each output field lists its candidate locations in priority order: the
//! nested `cabecalho` (or `lote`) block first, then the flat top-level key.
//! Text fields fall back to `"N/A"`; `hash` falls back to null.

use tiss_model::{Cabecalho, LoteData, LoteInfo, NOT_AVAILABLE, Totais};
use tracing::trace;

use crate::resolve::{FieldRule, resolve_number};

pub const TIPO_TRANSACAO: FieldRule<LoteData> = FieldRule {
    name: "tipoTransacao",
    candidates: &[
        |l| l.cabecalho.as_ref().and_then(|c| c.tipo_transacao.as_ref()),
        |l| l.tipo_transacao.as_ref(),
    ],
    fallback: Some(NOT_AVAILABLE),
};

pub const SEQUENCIAL_TRANSACAO: FieldRule<LoteData> = FieldRule {
    name: "sequencialTransacao",
    candidates: &[
        |l| l.cabecalho.as_ref().and_then(|c| c.sequencial_transacao.as_ref()),
        |l| l.sequencial_transacao.as_ref(),
    ],
    fallback: Some(NOT_AVAILABLE),
};

pub const DATA_REGISTRO_TRANSACAO: FieldRule<LoteData> = FieldRule {
    name: "dataRegistroTransacao",
    candidates: &[
        |l| l.cabecalho.as_ref().and_then(|c| c.data_registro_transacao.as_ref()),
        |l| l.data_registro_transacao.as_ref(),
    ],
    fallback: Some(NOT_AVAILABLE),
};

pub const HORA_REGISTRO_TRANSACAO: FieldRule<LoteData> = FieldRule {
    name: "horaRegistroTransacao",
    candidates: &[
        |l| l.cabecalho.as_ref().and_then(|c| c.hora_registro_transacao.as_ref()),
        |l| l.hora_registro_transacao.as_ref(),
    ],
    fallback: Some(NOT_AVAILABLE),
};

pub const CNPJ_PRESTADOR: FieldRule<LoteData> = FieldRule {
    name: "cnpjPrestador",
    candidates: &[
        |l| l.cabecalho.as_ref().and_then(|c| c.cnpj_prestador.as_ref()),
        |l| l.cnpj_prestador.as_ref(),
    ],
    fallback: Some(NOT_AVAILABLE),
};

pub const REGISTRO_ANS: FieldRule<LoteData> = FieldRule {
    name: "registroANS",
    candidates: &[
        |l| l.cabecalho.as_ref().and_then(|c| c.registro_ans.as_ref()),
        |l| l.registro_ans.as_ref(),
    ],
    fallback: Some(NOT_AVAILABLE),
};

pub const OPERADORA_NOME: FieldRule<LoteData> = FieldRule {
    name: "operadoraNome",
    candidates: &[
        |l| l.cabecalho.as_ref().and_then(|c| c.operadora_nome.as_ref()),
        |l| l.operadora_nome.as_ref(),
    ],
    fallback: Some(NOT_AVAILABLE),
};

pub const NOME_PRESTADOR: FieldRule<LoteData> = FieldRule {
    name: "nomePrestador",
    candidates: &[
        |l| l.cabecalho.as_ref().and_then(|c| c.nome_prestador.as_ref()),
        |l| l.nome_prestador.as_ref(),
    ],
    fallback: Some(NOT_AVAILABLE),
};

pub const CNES: FieldRule<LoteData> = FieldRule {
    name: "cnes",
    candidates: &[
        |l| l.cabecalho.as_ref().and_then(|c| c.cnes.as_ref()),
        |l| l.cnes.as_ref(),
    ],
    fallback: Some(NOT_AVAILABLE),
};

pub const HASH: FieldRule<LoteData> = FieldRule {
    name: "hash",
    candidates: &[
        |l| l.cabecalho.as_ref().and_then(|c| c.hash.as_ref()),
        |l| l.hash.as_ref(),
    ],
    fallback: None,
};

/// Every header field, in `Cabecalho` field order.
pub const CABECALHO_FIELDS: [FieldRule<LoteData>; 10] = [
    TIPO_TRANSACAO,
    SEQUENCIAL_TRANSACAO,
    DATA_REGISTRO_TRANSACAO,
    HORA_REGISTRO_TRANSACAO,
    CNPJ_PRESTADOR,
    REGISTRO_ANS,
    OPERADORA_NOME,
    NOME_PRESTADOR,
    CNES,
    HASH,
];

pub const NUMERO_LOTE: FieldRule<LoteData> = FieldRule {
    name: "numeroLote",
    candidates: &[
        |l| l.lote.as_ref().and_then(|b| b.numero_lote.as_ref()),
        |l| l.numero_lote.as_ref(),
    ],
    fallback: Some(NOT_AVAILABLE),
};

pub const DATA_ENVIO: FieldRule<LoteData> = FieldRule {
    name: "dataEnvio",
    candidates: &[
        |l| l.lote.as_ref().and_then(|b| b.data_envio.as_ref()),
        |l| l.data_envio.as_ref(),
    ],
    fallback: Some(NOT_AVAILABLE),
};

pub const COMPETENCIA: FieldRule<LoteData> = FieldRule {
    name: "competencia",
    candidates: &[
        |l| l.lote.as_ref().and_then(|b| b.competencia.as_ref()),
        |l| l.competencia.as_ref(),
    ],
    fallback: Some(NOT_AVAILABLE),
};

pub const VALOR_TOTAL_LOTE: FieldRule<LoteData> = FieldRule {
    name: "valorTotal",
    candidates: &[
        |l| l.lote.as_ref().and_then(|b| b.valor_total.as_ref()),
        |l| l.valor_total.as_ref(),
    ],
    fallback: None,
};

pub fn build_cabecalho(lote: &LoteData) -> Cabecalho {
    let [
        tipo_transacao,
        sequencial_transacao,
        data_registro_transacao,
        hora_registro_transacao,
        cnpj_prestador,
        registro_ans,
        operadora_nome,
        nome_prestador,
        cnes,
        hash,
    ] = CABECALHO_FIELDS.each_ref().map(|rule| {
        trace!(
            field = rule.name,
            tier = ?rule.resolved_tier(lote),
            "header field resolved"
        );
        rule.resolve(lote)
    });
    let text = |value: Option<String>| value.unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Cabecalho {
        tipo_transacao: text(tipo_transacao),
        sequencial_transacao: text(sequencial_transacao),
        data_registro_transacao: text(data_registro_transacao),
        hora_registro_transacao: text(hora_registro_transacao),
        cnpj_prestador: text(cnpj_prestador),
        registro_ans: text(registro_ans),
        operadora_nome: text(operadora_nome),
        nome_prestador: text(nome_prestador),
        cnes: text(cnes),
        hash,
    }
}

pub fn build_lote_info(lote: &LoteData) -> LoteInfo {
    LoteInfo {
        numero_lote: NUMERO_LOTE.resolve_text(lote),
        data_envio: DATA_ENVIO.resolve_text(lote),
        competencia: COMPETENCIA.resolve_text(lote),
        valor_total: resolve_number(lote, VALOR_TOTAL_LOTE.candidates),
    }
}

/// Batch totals with empty category sums.
///
/// The period is not a range over the claims: both ends are the send date.
pub fn empty_totais(lote: &LoteInfo) -> Totais {
    Totais {
        valor_procedimentos: 0.0,
        valor_medicamentos: 0.0,
        valor_materiais: 0.0,
        valor_taxas: 0.0,
        valor_total_lote: lote.valor_total,
        total_guias: 0,
        periodo_inicio: lote.data_envio.clone(),
        periodo_fim: lote.data_envio.clone(),
    }
}
