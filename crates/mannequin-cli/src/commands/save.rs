//! Save command implementation
//!
//! Writes the current parameters as an avatar record to a JSON-file store.

use anyhow::{Context, Result};
use colored::Colorize;
use mannequin_spec::{AvatarRecord, AvatarStore};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{error_codes, CommandOutput, JsonError, JsonWarning};
use super::reporting;
use crate::input::{resolve_params, ParamOverrides};
use crate::store::FileAvatarStore;

/// Run the save command
///
/// # Arguments
/// * `store_path` - Record file to create or replace
/// * `overrides` - Parameter file and flag overrides
/// * `user` - Optional owning account id
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    store_path: &Path,
    overrides: &ParamOverrides,
    user: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let resolved = match resolve_params(overrides) {
        Ok(resolved) => resolved,
        Err(e) if json_output => {
            let error = JsonError::new(error_codes::PARAM_INPUT, format!("{:#}", e));
            CommandOutput::<AvatarRecord>::failure(vec![error], vec![]).print()?;
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e),
    };
    let warnings: Vec<JsonWarning> = resolved.notes.iter().map(JsonWarning::from).collect();

    let mut record = AvatarRecord::from_params(&resolved.params);
    record.user = user.map(str::to_string);

    let mut store = FileAvatarStore::new(store_path);
    let saved = store.save(&record);

    if json_output {
        match saved {
            Ok(()) => CommandOutput::success(record, warnings).print()?,
            Err(e) => {
                let error = JsonError::from_backend(&e).with_file(store_path.display().to_string());
                CommandOutput::<AvatarRecord>::failure(vec![error], warnings).print()?;
                return Ok(ExitCode::from(1));
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Saving:".cyan().bold(), store_path.display());
    reporting::print_clamp_notes(&resolved.notes);
    saved.with_context(|| format!("Failed to save record: {}", store_path.display()))?;
    println!(
        "{} {} {} cm, {} kg, BMI {:.1}",
        "Record:".dimmed(),
        record.gender,
        record.height,
        record.weight,
        record.bmi
    );
    println!("\n{} Avatar saved", "SUCCESS".green().bold());
    Ok(ExitCode::SUCCESS)
}
