use tiss_model::{FinanceiroVisualization, InspectionReport};

/// What a command produced, for printing and the exit code.
#[derive(Debug)]
pub struct RunResult {
    pub view: Option<FinanceiroVisualization>,
    pub inspection: InspectionReport,
    /// The run failed its inspection gate.
    pub blocked: bool,
}
