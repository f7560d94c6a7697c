//! Validate command implementation
//!
//! Clamps a parameter set and reports every adjustment. Clamping never
//! rejects input; `--strict` turns any adjustment into a failure.

use anyhow::Result;
use colored::Colorize;
use mannequin_spec::{derive_proportions, params_hash, CustomizationParams, DerivedProportions};
use serde::Serialize;
use std::process::ExitCode;

use super::json_output::{error_codes, CommandOutput, JsonError, JsonWarning};
use super::reporting;
use crate::input::{resolve_params, ParamOverrides};

/// Result of validating one parameter set.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResult {
    pub source: String,
    /// Parameters after clamping
    pub params: CustomizationParams,
    pub params_hash: String,
    pub proportions: DerivedProportions,
    /// Whether any field had to be adjusted
    pub adjusted: bool,
}

/// Run the validate command
///
/// # Arguments
/// * `overrides` - Parameter file and flag overrides
/// * `strict` - Fail when any field was adjusted
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if usable as-is (or not strict), 1 otherwise
pub fn run(overrides: &ParamOverrides, strict: bool, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(overrides, strict)
    } else {
        run_human(overrides, strict)
    }
}

fn run_human(overrides: &ParamOverrides, strict: bool) -> Result<ExitCode> {
    let label = overrides
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(defaults)".to_string());
    println!("{} {}", "Validating:".cyan().bold(), label);

    let resolved = resolve_params(overrides)?;
    let params = &resolved.params;
    println!("{} {}", "Source:".dimmed(), resolved.source.as_str());
    reporting::print_clamp_notes(&resolved.notes);

    let proportions = derive_proportions(params);
    println!(
        "{} {} cm, {} kg (BMI {:.1})",
        "Params:".dimmed(),
        params.height_cm,
        params.weight_kg,
        proportions.bmi
    );
    for (category, item) in params.clothing.iter() {
        println!("  {} {}: {}", "-".dimmed(), category, item);
    }

    if resolved.notes.is_empty() {
        println!("\n{} Parameters are in range", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else if strict {
        println!(
            "\n{} {} field(s) adjusted",
            "FAILED".red().bold(),
            resolved.notes.len()
        );
        Ok(ExitCode::from(1))
    } else {
        println!(
            "\n{} {} field(s) adjusted",
            "CLAMPED".yellow().bold(),
            resolved.notes.len()
        );
        Ok(ExitCode::SUCCESS)
    }
}

fn run_json(overrides: &ParamOverrides, strict: bool) -> Result<ExitCode> {
    let resolved = match resolve_params(overrides) {
        Ok(resolved) => resolved,
        Err(e) => {
            let mut error = JsonError::new(error_codes::PARAM_INPUT, format!("{:#}", e));
            if let Some(file) = &overrides.file {
                error = error.with_file(file.display().to_string());
            }
            CommandOutput::<ValidateResult>::failure(vec![error], vec![]).print()?;
            return Ok(ExitCode::from(1));
        }
    };
    let warnings: Vec<JsonWarning> = resolved.notes.iter().map(JsonWarning::from).collect();
    let adjusted = !resolved.notes.is_empty();

    let hash = params_hash(&resolved.params)?;
    let result = ValidateResult {
        source: resolved.source.as_str().to_string(),
        proportions: derive_proportions(&resolved.params),
        params: resolved.params,
        params_hash: hash,
        adjusted,
    };

    let mut output = CommandOutput::success(result, warnings);
    if strict && adjusted {
        output.success = false;
    }
    output.print()?;
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
