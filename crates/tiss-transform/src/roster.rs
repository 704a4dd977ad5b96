//! Professional roster extraction.
//!
//! Walks the claims in order and collects the requesting professional of
//! each claim followed by the executants of its procedures. An entry is
//! unique per `(nome, guia)`: the same professional appears once per claim.

use std::collections::HashSet;

use tiss_model::scalar::truthy_text;
use tiss_model::{Guia, NOT_AVAILABLE, ProfissionalRoster};

use crate::classify::ClaimItems;
use crate::resolve::text_or_na;

#[derive(Default)]
struct RosterBuilder {
    seen: HashSet<(String, String)>,
    entries: Vec<ProfissionalRoster>,
}

impl RosterBuilder {
    fn push(&mut self, entry: ProfissionalRoster) {
        if self.seen.insert((entry.nome.clone(), entry.guia.clone())) {
            self.entries.push(entry);
        }
    }
}

/// Build the roster from classified claims and the claim views built from them.
///
/// `claims` and `guias` are parallel: `guias[i]` was built from `claims[i]`.
/// The claim-level entry takes its `uf`/`cbos` from the claim view, which
/// already defaulted them to the batch professional; procedure entries use
/// only the procedure's own `executante_*` fields.
pub fn build_roster(claims: &[ClaimItems<'_>], guias: &[Guia]) -> Vec<ProfissionalRoster> {
    let mut roster = RosterBuilder::default();
    for (claim, guia) in claims.iter().zip(guias) {
        let numero = &guia.numero_guia_prestador;
        let solicitante = &guia.dados_solicitante.profissional;
        if !solicitante.nome.is_empty() && solicitante.nome != NOT_AVAILABLE {
            roster.push(ProfissionalRoster {
                nome: solicitante.nome.clone(),
                conselho: solicitante.conselho.clone(),
                numero_conselho: solicitante.numero_conselho.clone(),
                uf: solicitante.uf.clone(),
                cbos: solicitante.cbos.clone(),
                guia: numero.clone(),
            });
        }
        for procedimento in &claim.procedimentos {
            let Some(nome) = truthy_text(procedimento.executante_nome.as_ref()) else {
                continue;
            };
            roster.push(ProfissionalRoster {
                nome,
                conselho: text_or_na(procedimento.executante_conselho.as_ref()),
                numero_conselho: text_or_na(procedimento.executante_numero_conselho.as_ref()),
                uf: text_or_na(procedimento.executante_uf.as_ref()),
                cbos: text_or_na(procedimento.executante_cbos.as_ref()),
                guia: numero.clone(),
            });
        }
    }
    roster.entries
}
