//! The tools module provides helper functions for the cmpt365 compressor.
//!
//! The tools are:
//! - cli: Command line interface for cmpt365.
//! - freq_count: Frequency count over the raw pixel bytes.
//!
pub mod cli;
pub mod freq_count;
