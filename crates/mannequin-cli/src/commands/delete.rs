//! Delete command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use mannequin_spec::AvatarStore;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{CommandOutput, JsonError};
use crate::store::FileAvatarStore;

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResult {
    pub store: String,
}

/// Run the delete command
///
/// Deleting when nothing is stored succeeds.
///
/// # Arguments
/// * `store_path` - Record file to remove
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(store_path: &Path, json_output: bool) -> Result<ExitCode> {
    let mut store = FileAvatarStore::new(store_path);
    let file = store_path.display().to_string();

    if json_output {
        return match store.delete() {
            Ok(()) => {
                CommandOutput::success(DeleteResult { store: file }, vec![]).print()?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                let error = JsonError::from_backend(&e).with_file(file);
                CommandOutput::<DeleteResult>::failure(vec![error], vec![]).print()?;
                Ok(ExitCode::from(1))
            }
        };
    }

    store
        .delete()
        .with_context(|| format!("Failed to delete record: {}", file))?;
    println!("{} {}", "Deleted:".green().bold(), file);
    Ok(ExitCode::SUCCESS)
}
