//! # neardup Report
//!
//! Drives the duplicate selector over every field of a dataset and renders
//! the results, either in the console layout or as a JSON summary.

pub mod driver;
pub mod render;

pub use driver::{FieldReport, ReportDriver, RunReport};
pub use render::{render_json, render_text};
