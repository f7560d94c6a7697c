//! Load command implementation
//!
//! Reads an avatar record from a JSON-file store and shows the parameters it
//! restores to, including any clamping applied on import.

use anyhow::{Context, Result};
use colored::Colorize;
use mannequin_spec::{AvatarRecord, AvatarStore, CustomizationParams};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{error_codes, CommandOutput, JsonError, JsonWarning};
use super::reporting;
use crate::store::FileAvatarStore;

/// A stored record and the params it restores to.
#[derive(Debug, Clone, Serialize)]
pub struct LoadResult {
    pub record: AvatarRecord,
    pub params: CustomizationParams,
}

/// Run the load command
///
/// # Arguments
/// * `store_path` - Record file to read
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 when a record was restored, 1 when none exists or on error
pub fn run(store_path: &Path, json_output: bool) -> Result<ExitCode> {
    let store = FileAvatarStore::new(store_path);
    let file = store_path.display().to_string();

    if json_output {
        let record = match store.load() {
            Ok(Some(record)) => record,
            Ok(None) => {
                let error = JsonError::new(error_codes::NO_RECORD, "no saved avatar")
                    .with_file(file);
                CommandOutput::<LoadResult>::failure(vec![error], vec![]).print()?;
                return Ok(ExitCode::from(1));
            }
            Err(e) => {
                let error = JsonError::from_backend(&e).with_file(file);
                CommandOutput::<LoadResult>::failure(vec![error], vec![]).print()?;
                return Ok(ExitCode::from(1));
            }
        };
        let (params, notes) = record.clone().into_params();
        let warnings = notes.iter().map(JsonWarning::from).collect();
        CommandOutput::success(LoadResult { record, params }, warnings).print()?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Loading:".cyan().bold(), file);
    let Some(record) = store
        .load()
        .with_context(|| format!("Failed to load record: {}", file))?
    else {
        println!("\n{} No saved avatar", "EMPTY".yellow().bold());
        return Ok(ExitCode::from(1));
    };

    if let Some(user) = &record.user {
        println!("{} {}", "User:".dimmed(), user);
    }
    let (params, notes) = record.into_params();
    reporting::print_clamp_notes(&notes);
    println!("{}", params.to_json_pretty()?);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_record_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("none.json");
        assert_eq!(run(&path, true).unwrap(), ExitCode::from(1));
    }

    #[test]
    fn test_out_of_range_record_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.json");
        std::fs::write(
            &path,
            r##"{"height":250,"weight":70,"skinColor":"#FDBCB4","bmi":11.2}"##,
        )
        .unwrap();
        assert_eq!(run(&path, true).unwrap(), ExitCode::SUCCESS);

        let record = FileAvatarStore::new(&path).load().unwrap().unwrap();
        let (params, notes) = record.into_params();
        assert_eq!(params.height_cm, 200.0);
        assert_eq!(notes.len(), 1);
    }
}
