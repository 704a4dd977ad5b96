use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tiss_cli::export::format_amount;
use tiss_model::{FinanceiroVisualization, InspectionReport, IssueSeverity};

/// Per-claim columns: four item counts, then four subtotals and the stored total.
const GUIA_COLUMNS: [&str; 10] = [
    "Guia",
    "Proc.",
    "Med.",
    "Mat.",
    "Tax.",
    "Procedimentos",
    "Medicamentos",
    "Materiais",
    "Taxas",
    "Total",
];

pub fn print_summary(view: &FinanceiroVisualization) {
    let data = &view.processed_data;
    println!("Lote: {} ({})", data.lote.numero_lote, data.lote.competencia);
    println!(
        "Operadora: {} [ANS {}]",
        data.cabecalho.operadora_nome, data.cabecalho.registro_ans
    );
    println!("Prestador: {}", data.cabecalho.nome_prestador);
    println!(
        "Periodo: {} a {}",
        data.totais.periodo_inicio, data.totais.periodo_fim
    );

    let mut table = Table::new();
    table.set_header(GUIA_COLUMNS.map(header_cell));
    apply_summary_table_style(&mut table);
    for index in 1..table.column_count() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for guia in &data.guias {
        let valor = &guia.valor_total;
        table.add_row(vec![
            guia_cell(&guia.numero_guia_prestador),
            count_cell(guia.procedimentos.len()),
            count_cell(guia.medicamentos.len()),
            count_cell(guia.materiais.len()),
            count_cell(guia.taxas.len()),
            amount_cell(valor.valor_procedimentos),
            amount_cell(valor.valor_medicamentos),
            amount_cell(valor.valor_materiais),
            amount_cell(valor.valor_taxas),
            amount_cell(valor.valor_total_geral).add_attribute(Attribute::Bold),
        ]);
    }
    let totais = &data.totais;
    table.add_row(vec![
        Cell::new(format!("TOTAL ({} guias)", totais.total_guias))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        amount_cell(totais.valor_procedimentos).add_attribute(Attribute::Bold),
        amount_cell(totais.valor_medicamentos).add_attribute(Attribute::Bold),
        amount_cell(totais.valor_materiais).add_attribute(Attribute::Bold),
        amount_cell(totais.valor_taxas).add_attribute(Attribute::Bold),
        amount_cell(totais.valor_total_lote).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_roster_table(view);
}

fn print_roster_table(view: &FinanceiroVisualization) {
    let roster = &view.processed_data.profissionais;
    if roster.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Profissional"),
        header_cell("Conselho"),
        header_cell("Numero"),
        header_cell("UF"),
        header_cell("CBOS"),
        header_cell("Guia"),
    ]);
    apply_table_style(&mut table);
    for entry in roster {
        table.add_row(vec![
            Cell::new(&entry.nome),
            Cell::new(&entry.conselho),
            Cell::new(&entry.numero_conselho),
            Cell::new(&entry.uf),
            Cell::new(&entry.cbos),
            guia_cell(&entry.guia),
        ]);
    }
    println!();
    println!("Profissionais:");
    println!("{table}");
}

/// Findings table, or nothing when the report is empty.
pub fn issue_table(report: &InspectionReport) -> Option<Table> {
    if report.is_empty() {
        return None;
    }
    let mut issues: Vec<_> = report.issues.iter().collect();
    issues.sort_by_key(|issue| severity_rank(issue.severity));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Guia"),
        header_cell("Item"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(issue.kind.code()),
            optional_cell(issue.guia.as_deref()),
            optional_cell(issue.item_id.as_deref()),
            Cell::new(&issue.message),
        ]);
    }
    Some(table)
}

pub fn print_issues(report: &InspectionReport) {
    match issue_table(report) {
        Some(table) => {
            println!("Issues:");
            println!("{table}");
        }
        None => println!("No issues found."),
    }
}

pub fn eprint_issues(report: &InspectionReport) {
    if let Some(table) = issue_table(report) {
        eprintln!("Issues:");
        eprintln!("{table}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_rank(severity: IssueSeverity) -> u8 {
    match severity {
        IssueSeverity::Error => 0,
        IssueSeverity::Warning => 1,
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn guia_cell(numero: &str) -> Cell {
    Cell::new(numero)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn amount_cell(value: f64) -> Cell {
    if value == 0.0 {
        dim_cell(format_amount(value))
    } else {
        Cell::new(format_amount(value))
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn guia_column_labels_are_unique() {
        let labels: HashSet<&str> = GUIA_COLUMNS.into_iter().collect();
        assert_eq!(labels.len(), GUIA_COLUMNS.len());
    }
}
