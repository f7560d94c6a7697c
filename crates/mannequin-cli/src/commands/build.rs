//! Build command implementation
//!
//! Generates the procedural avatar for a parameter set and reports its
//! structure and fingerprint, optionally writing the hierarchy as JSON.

use anyhow::Result;
use colored::Colorize;
use mannequin_backend_procedural::build_procedural_avatar;
use mannequin_spec::{derive_proportions, hierarchy_fingerprint, params_hash, DerivedProportions};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    error_codes, CommandOutput, HierarchySummary, JsonError, JsonWarning,
};
use super::reporting;
use crate::input::{resolve_params, ParamOverrides};

/// Result of a procedural build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildResult {
    pub source: String,
    pub params_hash: String,
    pub fingerprint: String,
    pub proportions: DerivedProportions,
    pub summary: HierarchySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Run the build command
///
/// # Arguments
/// * `overrides` - Parameter file and flag overrides
/// * `output` - Optional path for the hierarchy JSON
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(overrides: &ParamOverrides, output: Option<&Path>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(overrides, output)
    } else {
        run_human(overrides, output)
    }
}

fn run_human(overrides: &ParamOverrides, output: Option<&Path>) -> Result<ExitCode> {
    let resolved = resolve_params(overrides)?;
    let params = &resolved.params;

    println!(
        "{} {} cm, {} kg, {}, {} hair, skin {}",
        "Building:".cyan().bold(),
        params.height_cm,
        params.weight_kg,
        params.gender,
        params.hair_type,
        params.skin_color
    );
    reporting::print_clamp_notes(&resolved.notes);

    let proportions = derive_proportions(params);
    let hierarchy = build_procedural_avatar(params, &proportions);
    let fingerprint = hierarchy_fingerprint(&hierarchy)?;
    let summary = HierarchySummary::of(&hierarchy);

    println!(
        "{} height scale {:.3}, BMI {:.1}, body width {:.3}",
        "Proportions:".dimmed(),
        proportions.height_scale,
        proportions.bmi,
        proportions.body_width_factor
    );
    reporting::print_summary(&summary);
    println!(
        "{} {}",
        "Bounds:".dimmed(),
        reporting::format_bounds(&hierarchy.visible_bounds())
    );
    println!("{} {}", "Fingerprint:".dimmed(), &fingerprint[..16]);

    if let Some(path) = output {
        reporting::write_json(&hierarchy, path)?;
        println!("{} {}", "Wrote:".dimmed(), path.display());
    }

    println!("\n{} Avatar built", "SUCCESS".green().bold());
    Ok(ExitCode::SUCCESS)
}

fn run_json(overrides: &ParamOverrides, output: Option<&Path>) -> Result<ExitCode> {
    let resolved = match resolve_params(overrides) {
        Ok(resolved) => resolved,
        Err(e) => {
            let error = JsonError::new(error_codes::PARAM_INPUT, format!("{:#}", e));
            CommandOutput::<BuildResult>::failure(vec![error], vec![]).print()?;
            return Ok(ExitCode::from(1));
        }
    };
    let warnings: Vec<JsonWarning> = resolved.notes.iter().map(JsonWarning::from).collect();
    let params = &resolved.params;

    let proportions = derive_proportions(params);
    let hierarchy = build_procedural_avatar(params, &proportions);
    let (fingerprint, params_hash) = match (hierarchy_fingerprint(&hierarchy), params_hash(params)) {
        (Ok(f), Ok(p)) => (f, p),
        (Err(e), _) | (_, Err(e)) => {
            let error = JsonError::new(error_codes::JSON_SERIALIZE, e.to_string());
            CommandOutput::<BuildResult>::failure(vec![error], warnings).print()?;
            return Ok(ExitCode::from(1));
        }
    };

    if let Some(path) = output {
        if let Err(e) = reporting::write_json(&hierarchy, path) {
            let error = JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e))
                .with_file(path.display().to_string());
            CommandOutput::<BuildResult>::failure(vec![error], warnings).print()?;
            return Ok(ExitCode::from(1));
        }
    }

    let result = BuildResult {
        source: resolved.source.as_str().to_string(),
        params_hash,
        fingerprint,
        proportions,
        summary: HierarchySummary::of(&hierarchy),
        output: output.map(|p| p.display().to_string()),
    };
    CommandOutput::success(result, warnings).print()?;
    Ok(ExitCode::SUCCESS)
}
