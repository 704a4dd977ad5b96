//! Line-item classification.
//!
//! Splits a flat batch into claims and, per claim, procedures and expenses.
//! Expenses are further split into medications, materials and fees.

use std::collections::HashMap;

use tiss_model::scalar::truthy_text;
use tiss_model::{ItemKind, LineItem, RecordKey, Scalar};

/// Expense category, in classification precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Medicamento,
    Material,
    Taxa,
}

impl ExpenseCategory {
    /// Checked in this order; the first match wins.
    pub const PRECEDENCE: [ExpenseCategory; 3] = [
        ExpenseCategory::Medicamento,
        ExpenseCategory::Material,
        ExpenseCategory::Taxa,
    ];

    /// TISS expense type code for the category.
    pub fn codigo_despesa(self) -> &'static str {
        match self {
            ExpenseCategory::Medicamento => "02",
            ExpenseCategory::Material => "03",
            ExpenseCategory::Taxa => "07",
        }
    }

    /// Item code prefix that identifies the category when the type code is absent.
    pub fn codigo_prefix(self) -> &'static str {
        match self {
            ExpenseCategory::Medicamento => "90",
            ExpenseCategory::Material => "7",
            ExpenseCategory::Taxa => "6",
        }
    }

    fn matches(self, item: &LineItem) -> bool {
        let by_type = matches!(
            &item.codigo_despesa,
            Some(Scalar::Text(code)) if code == self.codigo_despesa()
        );
        by_type
            || truthy_text(item.codigo_item.as_ref())
                .is_some_and(|code| code.starts_with(self.codigo_prefix()))
    }
}

/// Category of an expense item, or `None` when no rule matches.
pub fn classify_expense(item: &LineItem) -> Option<ExpenseCategory> {
    ExpenseCategory::PRECEDENCE
        .into_iter()
        .find(|category| category.matches(item))
}

/// A claim row with the raw items attached to it, in input order.
#[derive(Debug, Clone)]
pub struct ClaimItems<'a> {
    pub guia: &'a LineItem,
    pub procedimentos: Vec<&'a LineItem>,
    pub medicamentos: Vec<&'a LineItem>,
    pub materiais: Vec<&'a LineItem>,
    pub taxas: Vec<&'a LineItem>,
    /// Expenses matching no category; excluded from every subtotal.
    pub unclassified: Vec<&'a LineItem>,
}

impl<'a> ClaimItems<'a> {
    fn new(guia: &'a LineItem) -> Self {
        Self {
            guia,
            procedimentos: Vec::new(),
            medicamentos: Vec::new(),
            materiais: Vec::new(),
            taxas: Vec::new(),
            unclassified: Vec::new(),
        }
    }

    pub fn expenses(&self, category: ExpenseCategory) -> &[&'a LineItem] {
        match category {
            ExpenseCategory::Medicamento => &self.medicamentos,
            ExpenseCategory::Material => &self.materiais,
            ExpenseCategory::Taxa => &self.taxas,
        }
    }

    fn push_child(&mut self, item: &'a LineItem) {
        match item.kind() {
            ItemKind::Procedimento => self.procedimentos.push(item),
            ItemKind::Despesa => match classify_expense(item) {
                Some(ExpenseCategory::Medicamento) => self.medicamentos.push(item),
                Some(ExpenseCategory::Material) => self.materiais.push(item),
                Some(ExpenseCategory::Taxa) => self.taxas.push(item),
                None => self.unclassified.push(item),
            },
            _ => {}
        }
    }
}

/// Whether the item can belong to a claim.
pub fn is_child_kind(item: &LineItem) -> bool {
    matches!(item.kind(), ItemKind::Procedimento | ItemKind::Despesa)
}

/// Procedures and expenses grouped by their `parent_id`, in input order.
pub fn children_by_parent(items: &[LineItem]) -> HashMap<RecordKey, Vec<&LineItem>> {
    let mut children: HashMap<RecordKey, Vec<&LineItem>> = HashMap::new();
    for item in items.iter().filter(|item| is_child_kind(item)) {
        if let Some(key) = item.parent_id.as_ref().and_then(Scalar::record_key) {
            children.entry(key).or_default().push(item);
        }
    }
    children
}

/// Claims in input order, each with its classified children.
///
/// Items whose parent is not a claim of this batch are dropped silently.
pub fn classify_items(items: &[LineItem]) -> Vec<ClaimItems<'_>> {
    let children = children_by_parent(items);
    items
        .iter()
        .filter(|item| item.is_guia())
        .map(|guia| {
            let mut claim = ClaimItems::new(guia);
            let attached = guia
                .id
                .as_ref()
                .and_then(Scalar::record_key)
                .and_then(|key| children.get(&key));
            for &item in attached.into_iter().flatten() {
                claim.push_child(item);
            }
            claim
        })
        .collect()
}
