//! Normalize command implementation
//!
//! Loads an external model, normalizes it to the reference height, applies
//! the customization parameters and reports what changed.

use anyhow::{Context, Result};
use colored::Colorize;
use mannequin_backend_model::{
    prepare_model, AnimationClip, CustomizeReport, NormalizeReport, ScaleStrategy,
};
use mannequin_spec::hierarchy_fingerprint;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{error_codes, CommandOutput, HierarchySummary, JsonError, JsonWarning};
use super::reporting;
use crate::input::{resolve_params, ParamOverrides};

/// Parses a scale strategy name (`reference_height` or `fixed_micro`).
pub fn parse_strategy(name: &str) -> Result<ScaleStrategy> {
    match name {
        "reference_height" => Ok(ScaleStrategy::ReferenceHeight),
        "fixed_micro" => Ok(ScaleStrategy::FixedMicro),
        other => anyhow::bail!(
            "unknown scale strategy: {} (expected reference_height or fixed_micro)",
            other
        ),
    }
}

/// Result of normalizing and customizing one model.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizeResult {
    pub input: String,
    pub format: String,
    pub strategy: ScaleStrategy,
    pub normalize: NormalizeReport,
    pub customize: CustomizeReport,
    pub clips: Vec<AnimationClip>,
    pub fingerprint: String,
    pub summary: HierarchySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Run the normalize command
///
/// # Arguments
/// * `input` - Path to a `.gltf` or `.glb` model
/// * `overrides` - Parameter file and flag overrides
/// * `strategy` - Base scale strategy
/// * `output` - Optional path for the prepared hierarchy JSON
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    input: &Path,
    overrides: &ParamOverrides,
    strategy: ScaleStrategy,
    output: Option<&Path>,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(input, overrides, strategy, output)
    } else {
        run_human(input, overrides, strategy, output)
    }
}

fn run_human(
    input: &Path,
    overrides: &ParamOverrides,
    strategy: ScaleStrategy,
    output: Option<&Path>,
) -> Result<ExitCode> {
    let resolved = resolve_params(overrides)?;
    println!("{} {}", "Normalizing:".cyan().bold(), input.display());
    reporting::print_clamp_notes(&resolved.notes);

    let asset = reporting::load_model_blocking(input)?
        .with_context(|| format!("Failed to load model: {}", input.display()))?;
    println!(
        "{} {} ({} parts, {} clips)",
        "Format:".dimmed(),
        asset.format(),
        asset.hierarchy().part_count(),
        asset.clips().len()
    );

    let prepared = prepare_model(&asset, &resolved.params, strategy);
    let report = &prepared.normalize;
    println!(
        "{} {}",
        "Natural:".dimmed(),
        reporting::format_bounds(&report.natural_bounds)
    );
    println!(
        "{} {:.6} ({:?})",
        "Scale:".dimmed(),
        report.scale,
        strategy
    );
    println!(
        "{} {}",
        "Final:".dimmed(),
        reporting::format_bounds(&report.final_bounds)
    );
    for warning in &report.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }

    let custom = &prepared.customize;
    println!(
        "{} {} recolored, {} hair, {} scaled (torso x{:.3})",
        "Customized:".dimmed(),
        custom.recolored.len(),
        custom.hair_parts.len(),
        custom.scaled.len(),
        custom.torso_scale
    );
    for clip in asset.clips() {
        println!(
            "  {} clip {} ({:.2}s)",
            "-".dimmed(),
            clip.name,
            clip.duration_secs
        );
    }

    let fingerprint = hierarchy_fingerprint(&prepared.hierarchy)?;
    println!("{} {}", "Fingerprint:".dimmed(), &fingerprint[..16]);

    if let Some(path) = output {
        reporting::write_json(&prepared.hierarchy, path)?;
        println!("{} {}", "Wrote:".dimmed(), path.display());
    }

    println!("\n{} Model prepared", "SUCCESS".green().bold());
    Ok(ExitCode::SUCCESS)
}

fn run_json(
    input: &Path,
    overrides: &ParamOverrides,
    strategy: ScaleStrategy,
    output: Option<&Path>,
) -> Result<ExitCode> {
    let file = input.display().to_string();
    let resolved = match resolve_params(overrides) {
        Ok(resolved) => resolved,
        Err(e) => {
            let error = JsonError::new(error_codes::PARAM_INPUT, format!("{:#}", e));
            CommandOutput::<NormalizeResult>::failure(vec![error], vec![]).print()?;
            return Ok(ExitCode::from(1));
        }
    };
    let mut warnings: Vec<JsonWarning> = resolved.notes.iter().map(JsonWarning::from).collect();

    let asset = match reporting::load_model_blocking(input)? {
        Ok(asset) => asset,
        Err(e) => {
            let error = JsonError::from_backend(&e).with_file(file);
            CommandOutput::<NormalizeResult>::failure(vec![error], warnings).print()?;
            return Ok(ExitCode::from(1));
        }
    };

    let prepared = prepare_model(&asset, &resolved.params, strategy);
    warnings.extend(prepared.normalize.warnings.iter().map(JsonWarning::from));

    let fingerprint = match hierarchy_fingerprint(&prepared.hierarchy) {
        Ok(f) => f,
        Err(e) => {
            let error = JsonError::new(error_codes::JSON_SERIALIZE, e.to_string());
            CommandOutput::<NormalizeResult>::failure(vec![error], warnings).print()?;
            return Ok(ExitCode::from(1));
        }
    };

    if let Some(path) = output {
        if let Err(e) = reporting::write_json(&prepared.hierarchy, path) {
            let error = JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e))
                .with_file(path.display().to_string());
            CommandOutput::<NormalizeResult>::failure(vec![error], warnings).print()?;
            return Ok(ExitCode::from(1));
        }
    }

    let result = NormalizeResult {
        input: file,
        format: asset.format().to_string(),
        strategy,
        summary: HierarchySummary::of(&prepared.hierarchy),
        normalize: prepared.normalize,
        customize: prepared.customize,
        clips: asset.clips().to_vec(),
        fingerprint,
        output: output.map(|p| p.display().to_string()),
    };
    CommandOutput::success(result, warnings).print()?;
    Ok(ExitCode::SUCCESS)
}
