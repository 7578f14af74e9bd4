//! Utility functions for engine specs

pub mod ssl;
