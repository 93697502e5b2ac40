//! Dual-path crew payroll engine
//!
//! This crate calculates crew pay for a period along two independent paths, a
//! fixed legacy rule set and an extended intelligent rule set, and reconciles
//! the two results into a verdict with a recommendation. A batch runner drives
//! either path over every active subject.

#![warn(missing_docs)]

pub mod batch;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod reconciliation;
pub mod source;
