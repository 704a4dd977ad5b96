//! CLI library components for the TISS financial transformer.

pub mod export;
pub mod logging;
