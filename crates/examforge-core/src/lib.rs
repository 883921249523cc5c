//! examforge core library
//!
//! Weighted test generation: competency quotas, complete-triplet topic
//! selection and atomic persistence of a session's question set.

pub mod allocation;
pub mod assembly;
pub mod catalog;
pub mod config;
pub mod coverage;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod selection;
pub mod store;
