use serde::{Deserialize, Serialize};

use crate::options::InspectionMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// Child item whose `parent_id` matches no claim.
    OrphanItem,
    /// Child item without `parent_id`.
    MissingParent,
    /// Expense matching no medication, material or fee rule.
    UnclassifiedExpense,
    /// Two claims sharing a provider claim number.
    DuplicateGuia,
    UnknownItemType,
    /// Claim subtotals disagree with the stored grand total.
    TotalMismatch,
}

impl IssueKind {
    pub fn code(self) -> &'static str {
        match self {
            IssueKind::OrphanItem => "orphan-item",
            IssueKind::MissingParent => "missing-parent",
            IssueKind::UnclassifiedExpense => "unclassified-expense",
            IssueKind::DuplicateGuia => "duplicate-guia",
            IssueKind::UnknownItemType => "unknown-item-type",
            IssueKind::TotalMismatch => "total-mismatch",
        }
    }

    pub fn severity(self) -> IssueSeverity {
        match self {
            IssueKind::DuplicateGuia => IssueSeverity::Error,
            _ => IssueSeverity::Warning,
        }
    }
}

/// A finding about the shape of a batch. Never affects the transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionIssue {
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    pub message: String,
    /// Line item the finding refers to, when it is about a single item.
    pub item_id: Option<String>,
    /// Provider claim number, when known.
    pub guia: Option<String>,
}

impl InspectionIssue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message: message.into(),
            item_id: None,
            guia: None,
        }
    }

    pub fn with_item(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    pub fn with_guia(mut self, guia: impl Into<String>) -> Self {
        self.guia = Some(guia.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InspectionReport {
    pub issues: Vec<InspectionIssue>,
}

impl InspectionReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count_of(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|issue| issue.kind == kind).count()
    }

    /// Whether the findings should fail a run in the given mode.
    pub fn blocks(&self, mode: InspectionMode) -> bool {
        match mode {
            InspectionMode::Permissive => false,
            InspectionMode::Strict => !self.issues.is_empty(),
        }
    }
}
