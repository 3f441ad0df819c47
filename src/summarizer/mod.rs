//! Result selection
//!
//! Turns rank scores into an ordered top-T list, optionally restored to
//! document order for readable extractive summaries.

pub mod selector;
