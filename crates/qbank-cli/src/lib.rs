//! CLI library components for the question-bank ingester.

pub mod config;
pub mod export;
pub mod logging;
