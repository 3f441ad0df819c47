//! Staged keyword and summary pipelines
//!
//! - [`validation`]: config checks run before any graph work
//! - [`traits`]: graph construction strategies
//! - [`runner`]: the [`runner::Pipeline`] that drives the stages
//! - [`observer`]: stage boundary hooks
//! - [`batch`]: parallel ranking over many documents

pub mod batch;
pub mod observer;
pub mod runner;
pub mod traits;
pub mod validation;
