//! CLI command implementations

pub mod build;
pub mod classify;
pub mod delete;
pub mod json_output;
pub mod load;
pub mod normalize;
pub mod save;
pub mod session;
pub mod validate;

mod reporting;
