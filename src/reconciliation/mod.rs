//! Reconciliation of two pay results.
//!
//! The [`ReconciliationAnalyzer`] diffs a pair of [`PayResult`](crate::models::PayResult)s
//! field by field, derives timing metrics, and picks a winner with a
//! recommendation. It is pure: identical inputs always give identical output.
//!
//! [`ReconciliationAnalyzer::reconcile_for`] drives the whole side-by-side
//! flow: it runs two calculators on the same subject, times each, and compares.

mod analyzer;
mod dual_run;

pub use analyzer::{DIFFERENCE_EPSILON, ReconciliationAnalyzer, TIE_THRESHOLD, compare};
pub use dual_run::Reconciliation;
