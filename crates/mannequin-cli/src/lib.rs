//! Mannequin CLI library.
//!
//! This crate provides the core functionality for the Mannequin CLI:
//! parameter input resolution, a file-backed avatar store, and the
//! subcommand implementations.

pub mod commands;
pub mod input;
pub mod store;
