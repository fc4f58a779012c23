//! Shared utilities for gemorder.
//!
//! This crate provides cross-cutting concerns used by the other gemorder
//! crates: the unified error type, filesystem helpers, and a builder for
//! spawning and capturing external processes.

pub mod errors;
pub mod fs;
pub mod process;
