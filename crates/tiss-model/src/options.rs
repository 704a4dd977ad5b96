//! Configuration options for batch processing.

use serde::{Deserialize, Serialize};

/// How inspection findings affect a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InspectionMode {
    /// Report findings and carry on. The transformer is always permissive.
    #[default]
    Permissive,
    /// Fail the run when any finding is reported.
    Strict,
}

/// Options controlling how a processed batch is written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputOptions {
    /// Indent JSON output.
    pub pretty: bool,
    pub inspection: InspectionMode,
}

impl OutputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_inspection(mut self, mode: InspectionMode) -> Self {
        self.inspection = mode;
        self
    }
}
