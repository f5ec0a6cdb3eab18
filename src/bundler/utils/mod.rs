//! Shared helpers for build housekeeping.

pub mod fs;
