//! Batch runs over every active subject.
//!
//! The [`BatchRunner`] drives one calculation path across the subjects a
//! [`SubjectSource`](crate::source::SubjectSource) reports as active. A failing
//! subject is tallied and the run carries on.

mod runner;

pub use runner::BatchRunner;
