//! Mannequin Integration Test Infrastructure
//!
//! This crate holds the cross-crate tests and the fixtures they share:
//!
//! - Proportions: property tests over the full parameter range
//! - Procedural rig: height scaling, joint continuity, hair dispatch
//! - Model pipeline: load, normalize and customize glTF fixtures
//! - Viewer session: strategy switching and load races against real files
//! - CLI: command runs end to end
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p mannequin-tests
//! ```

pub mod fixtures;
