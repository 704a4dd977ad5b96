//! Per-claim normalization and subtotals.

use tiss_model::scalar::truthy_text;
use tiss_model::{
    DEFAULT_PAYMENT_STATUS, DadosSolicitante, Executante, Guia, ItemView, LineItem, LoteData,
    NOT_AVAILABLE, ProcedimentoView, Profissional, Totais, ValorTotal,
};

use crate::classify::ClaimItems;
use crate::numeric::{sum_amounts, to_number};
use crate::resolve::{resolve_candidates, text_or_na};

/// Normalized view of any line item.
pub fn item_view(item: &LineItem) -> ItemView {
    ItemView {
        data_execucao: text_or_na(item.data_execucao.as_ref()),
        codigo: text_or_na(item.codigo_item.as_ref()),
        descricao: text_or_na(item.descricao_item.as_ref()),
        quantidade: to_number(item.quantidade_executada.as_ref()),
        unidade: text_or_na(item.unidade_medida.as_ref()),
        valor_unitario: to_number(item.valor_unitario.as_ref()),
        valor_total: to_number(item.valor_total.as_ref()),
        status_pagamento: truthy_text(item.status_pagamento.as_ref())
            .unwrap_or_else(|| DEFAULT_PAYMENT_STATUS.to_string()),
    }
}

/// Normalized view of a procedure, including its executant professional.
pub fn procedimento_view(item: &LineItem) -> ProcedimentoView {
    ProcedimentoView {
        item: item_view(item),
        executante: Executante {
            executante_nome: text_or_na(item.executante_nome.as_ref()),
            executante_conselho: text_or_na(item.executante_conselho.as_ref()),
            executante_numero_conselho: text_or_na(item.executante_numero_conselho.as_ref()),
            executante_uf: text_or_na(item.executante_uf.as_ref()),
            executante_cbos: text_or_na(item.executante_cbos.as_ref()),
        },
    }
}

/// Requesting professional: the claim's own fields, else the batch professional.
pub fn solicitante(guia: &LineItem, lote: &LoteData) -> Profissional {
    Profissional {
        nome: resolve_candidates(
            [guia.solicitante_nome.as_ref(), lote.profissional_nome.as_ref()],
            NOT_AVAILABLE,
        ),
        conselho: resolve_candidates(
            [guia.solicitante_conselho.as_ref(), lote.profissional_conselho.as_ref()],
            NOT_AVAILABLE,
        ),
        numero_conselho: resolve_candidates(
            [
                guia.solicitante_numero_conselho.as_ref(),
                lote.profissional_numero_conselho.as_ref(),
            ],
            NOT_AVAILABLE,
        ),
        uf: resolve_candidates(
            [guia.solicitante_uf.as_ref(), lote.profissional_uf.as_ref()],
            NOT_AVAILABLE,
        ),
        cbos: resolve_candidates(
            [guia.solicitante_cbos.as_ref(), lote.profissional_cbos.as_ref()],
            NOT_AVAILABLE,
        ),
    }
}

fn views(items: &[&LineItem]) -> Vec<ItemView> {
    items.iter().map(|item| item_view(item)).collect()
}

fn subtotal<'v, I>(views: I) -> f64
where
    I: IntoIterator<Item = &'v ItemView>,
{
    sum_amounts(views.into_iter().map(|view| view.valor_total))
}

/// Build the claim view. The grand total is the claim row's own `valor_total`.
pub fn build_guia(claim: &ClaimItems<'_>, lote: &LoteData) -> Guia {
    let guia = claim.guia;
    let procedimentos: Vec<ProcedimentoView> = claim
        .procedimentos
        .iter()
        .map(|item| procedimento_view(item))
        .collect();
    let medicamentos = views(&claim.medicamentos);
    let materiais = views(&claim.materiais);
    let taxas = views(&claim.taxas);

    let valor_total = ValorTotal {
        valor_procedimentos: subtotal(procedimentos.iter().map(|view| &view.item)),
        valor_medicamentos: subtotal(&medicamentos),
        valor_materiais: subtotal(&materiais),
        valor_taxas: subtotal(&taxas),
        valor_total_geral: to_number(guia.valor_total.as_ref()),
    };

    Guia {
        id: guia.id.clone(),
        numero_guia_prestador: text_or_na(guia.numero_guia_prestador.as_ref()),
        numero_guia_operadora: text_or_na(guia.numero_guia_operadora.as_ref()),
        numero_carteira: text_or_na(guia.numero_carteira.as_ref()),
        nome_beneficiario: text_or_na(guia.nome_beneficiario.as_ref()),
        senha: text_or_na(guia.senha.as_ref()),
        data_autorizacao: text_or_na(guia.data_autorizacao.as_ref()),
        data_validade_senha: text_or_na(guia.data_validade_senha.as_ref()),
        dados_solicitante: DadosSolicitante {
            profissional: solicitante(guia, lote),
        },
        procedimentos,
        medicamentos,
        materiais,
        taxas,
        valor_total,
    }
}

/// Add each claim's category subtotals into the batch totals.
pub fn accumulate_totais(totais: &mut Totais, guias: &[Guia]) {
    for guia in guias {
        totais.valor_procedimentos += guia.valor_total.valor_procedimentos;
        totais.valor_medicamentos += guia.valor_total.valor_medicamentos;
        totais.valor_materiais += guia.valor_total.valor_materiais;
        totais.valor_taxas += guia.valor_total.valor_taxas;
    }
    totais.total_guias += guias.len();
}
