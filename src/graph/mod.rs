//! Graph construction and representation
//!
//! [`weighted::WeightedGraph`] is the mutable, symmetric graph the builders
//! produce. [`csr::CsrGraph`] is the compact read-only snapshot ranked by the
//! propagator.

pub mod builder;
pub mod csr;
pub mod weighted;
