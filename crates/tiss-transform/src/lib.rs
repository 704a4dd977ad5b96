//! TISS financial reconciliation.
//!
//! This crate turns one billing batch and its flat line items into the
//! nested per-claim view used for financial reconciliation:
//!
//! - **classify**: claims, procedures and the medication/material/fee split of expenses
//! - **aggregate**: normalized item views and per-claim subtotals
//! - **roster**: professionals deduplicated per `(nome, guia)`
//! - **header**: batch header resolution with ordered per-field fallbacks
//! - **inspect**: diagnostics for the conditions the transformer tolerates
//! - **numeric**: loose number coercion

pub mod aggregate;
pub mod classify;
pub mod header;
pub mod inspect;
pub mod numeric;
pub mod resolve;
pub mod roster;
pub mod visualization;

// Re-export common functions for external use
pub use classify::{ClaimItems, ExpenseCategory, classify_expense, classify_items};
pub use inspect::inspect_batch;
pub use numeric::to_number;
pub use visualization::{build_financeiro_visualization, guias_by_numero};
