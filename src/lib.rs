//! Dashboard over a precomputed nurse-shift assignment matrix.
//!
//! The matrix (rows are nurses, columns are day x shift slots, cells are 0/1)
//! is loaded once from CSV and turned into a [`schedule::Roster`], which
//! answers the summary, per-nurse, per-slot, and chart queries. The text
//! report in [`display`] and the JSON API in [`web`] are thin views over it.

pub mod config;
pub mod display;
pub mod error;
pub mod parser;
pub mod schedule;
pub mod web;

pub use error::{DashboardError, Result};
