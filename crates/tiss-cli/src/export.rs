//! Writers for processed batches: JSON view and CSV claim summary.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use tiss_model::{FinanceiroVisualization, Guia, OutputOptions, ProcessedData};

/// One CSV row per claim. Amounts are formatted with two decimals.
#[derive(Debug, Serialize)]
pub struct GuiaSummaryRow {
    pub guia: String,
    pub guia_operadora: String,
    pub carteira: String,
    pub procedimentos: usize,
    pub medicamentos: usize,
    pub materiais: usize,
    pub taxas: usize,
    pub valor_procedimentos: String,
    pub valor_medicamentos: String,
    pub valor_materiais: String,
    pub valor_taxas: String,
    pub valor_total_geral: String,
}

impl From<&Guia> for GuiaSummaryRow {
    fn from(guia: &Guia) -> Self {
        let valor = &guia.valor_total;
        Self {
            guia: guia.numero_guia_prestador.clone(),
            guia_operadora: guia.numero_guia_operadora.clone(),
            carteira: guia.numero_carteira.clone(),
            procedimentos: guia.procedimentos.len(),
            medicamentos: guia.medicamentos.len(),
            materiais: guia.materiais.len(),
            taxas: guia.taxas.len(),
            valor_procedimentos: format_amount(valor.valor_procedimentos),
            valor_medicamentos: format_amount(valor.valor_medicamentos),
            valor_materiais: format_amount(valor.valor_materiais),
            valor_taxas: format_amount(valor.valor_taxas),
            valor_total_geral: format_amount(valor.valor_total_geral),
        }
    }
}

pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Write the per-claim summary as CSV, in claim order.
pub fn write_guia_summary_csv<W: Write>(writer: W, data: &ProcessedData) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for guia in &data.guias {
        csv_writer
            .serialize(GuiaSummaryRow::from(guia))
            .with_context(|| format!("write csv row for guia {}", guia.numero_guia_prestador))?;
    }
    csv_writer.flush().context("flush csv output")?;
    Ok(())
}

/// Write the full view as JSON followed by a newline.
pub fn write_visualization_json<W: Write>(
    mut writer: W,
    view: &FinanceiroVisualization,
    options: &OutputOptions,
) -> Result<()> {
    if options.pretty {
        serde_json::to_writer_pretty(&mut writer, view).context("serialize visualization")?;
    } else {
        serde_json::to_writer(&mut writer, view).context("serialize visualization")?;
    }
    writeln!(writer).context("write output")?;
    Ok(())
}
