//! Library components for the batch digital object CLI.

pub mod config;
pub mod handles;
pub mod logging;
pub mod pipeline;
pub mod types;
pub mod writers;
