//! Library surface of json-merge.
//!
//! The merge itself lives in [`merge`]; everything else is plumbing around it.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod merge;
pub mod render;
pub mod scan;
pub mod utils;

pub use domain::{MergeJob, MergeReport, MergeSettings, OrderedRecord};
pub use error::MergeError;
pub use merge::{merge_folders, plan_folders};
