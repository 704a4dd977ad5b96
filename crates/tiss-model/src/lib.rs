pub mod error;
pub mod input;
pub mod inspection;
pub mod options;
pub mod scalar;
pub mod visualization;

pub use error::{Result, TissError};
pub use input::{
    CabecalhoSource, ItemKind, LineItem, LoteData, LoteSource, load_items, load_lote, parse_items,
    parse_lote,
};
pub use inspection::{InspectionIssue, InspectionReport, IssueKind, IssueSeverity};
pub use options::{InspectionMode, OutputOptions};
pub use scalar::{RecordKey, Scalar};
pub use visualization::{
    Cabecalho, DEFAULT_PAYMENT_STATUS, DadosSolicitante, Executante, FinanceiroVisualization, Guia,
    ItemView, LoteInfo, NOT_AVAILABLE, ProcedimentoView, ProcessedData, Profissional,
    ProfissionalRoster, Totais, ValorTotal,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspection_report_counts() {
        let report = InspectionReport {
            issues: vec![
                InspectionIssue::new(IssueKind::DuplicateGuia, "duplicate G1").with_guia("G1"),
                InspectionIssue::new(IssueKind::OrphanItem, "orphan").with_item("9"),
            ],
        };
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
        assert!(report.blocks(InspectionMode::Strict));
        assert!(!report.blocks(InspectionMode::Permissive));
    }
}
