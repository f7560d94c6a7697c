//! Classify command implementation
//!
//! Shows which customization roles (skin, hair, torso) each part of an
//! external model would receive from the name-based classifier.

use anyhow::{Context, Result};
use colored::Colorize;
use mannequin_backend_model::{KeywordClassifier, PartClassifier, PartRoles};
use mannequin_spec::PartHierarchy;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{CommandOutput, JsonError};
use super::reporting;

/// Roles assigned to one part.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassifiedPart {
    pub name: String,
    pub depth: usize,
    pub has_mesh: bool,
    /// Whether the material accepts a color tint
    pub tintable: bool,
    pub roles: PartRoles,
}

/// Result of classifying a model's parts.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyResult {
    pub input: String,
    pub parts: Vec<ClassifiedPart>,
    pub skin: usize,
    pub hair: usize,
    pub torso: usize,
}

/// Classifies every part of `hierarchy`, depth-first.
pub fn classify_parts(
    hierarchy: &PartHierarchy,
    classifier: &dyn PartClassifier,
) -> Vec<ClassifiedPart> {
    let mut parts = Vec::new();
    hierarchy.walk(|part, _, depth| {
        parts.push(ClassifiedPart {
            name: part.name.clone(),
            depth,
            has_mesh: part.mesh.is_some(),
            tintable: part.mesh.is_some_and(|m| m.material.is_tintable()),
            roles: classifier.classify(&part.name),
        });
    });
    parts
}

/// Run the classify command
///
/// # Arguments
/// * `input` - Path to a `.gltf` or `.glb` model
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(input: &Path, json_output: bool) -> Result<ExitCode> {
    let loaded = reporting::load_model_blocking(input)?;
    let classifier = KeywordClassifier::default();

    if json_output {
        let asset = match loaded {
            Ok(asset) => asset,
            Err(e) => {
                let error = JsonError::from_backend(&e).with_file(input.display().to_string());
                CommandOutput::<ClassifyResult>::failure(vec![error], vec![]).print()?;
                return Ok(ExitCode::from(1));
            }
        };
        let parts = classify_parts(asset.hierarchy(), &classifier);
        let count = |f: fn(&PartRoles) -> bool| parts.iter().filter(|p| f(&p.roles)).count();
        let result = ClassifyResult {
            input: input.display().to_string(),
            skin: count(|r| r.skin),
            hair: count(|r| r.hair),
            torso: count(|r| r.torso),
            parts,
        };
        CommandOutput::success(result, vec![]).print()?;
        return Ok(ExitCode::SUCCESS);
    }

    let asset = loaded.with_context(|| format!("Failed to load model: {}", input.display()))?;
    println!("{} {}", "Classifying:".cyan().bold(), input.display());

    for part in classify_parts(asset.hierarchy(), &classifier) {
        let indent = "  ".repeat(part.depth + 1);
        let roles = if part.roles.is_empty() {
            "-".dimmed().to_string()
        } else {
            part.roles.names().join(",").green().to_string()
        };
        let kind = match (part.has_mesh, part.tintable) {
            (false, _) => "group",
            (true, true) => "mesh",
            (true, false) => "mesh, untinted",
        };
        println!("{}{} ({}) {}", indent, part.name, kind.dimmed(), roles);
    }
    Ok(ExitCode::SUCCESS)
}
