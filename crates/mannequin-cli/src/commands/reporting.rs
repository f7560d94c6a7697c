//! Shared human-readable printing helpers.

use colored::Colorize;
use mannequin_spec::{Aabb, ClampNote};

use super::json_output::HierarchySummary;

/// Prints clamp notes as yellow warnings.
pub(crate) fn print_clamp_notes(notes: &[ClampNote]) {
    for note in notes {
        println!(
            "  {} [{}] {}: {}",
            "!".yellow(),
            note.code,
            note.field.dimmed(),
            note.message
        );
    }
}

pub(crate) fn format_bounds(bounds: &Aabb) -> String {
    if bounds.is_empty() {
        return "(empty)".to_string();
    }
    let size = bounds.size();
    format!(
        "[{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}] (size {:.3} x {:.3} x {:.3})",
        bounds.min.x,
        bounds.min.y,
        bounds.min.z,
        bounds.max.x,
        bounds.max.y,
        bounds.max.z,
        size.x,
        size.y,
        size.z
    )
}

pub(crate) fn print_summary(summary: &HierarchySummary) {
    println!(
        "{} {} parts, {} meshes, {} visible",
        "Hierarchy:".dimmed(),
        summary.part_count,
        summary.mesh_count,
        summary.visible_count
    );
    println!(
        "{} {} geometries, {} materials",
        "Resources:".dimmed(),
        summary.geometries,
        summary.materials
    );
}

/// Writes pretty JSON to `path`.
pub(crate) fn write_json<T: serde::Serialize>(value: &T, path: &std::path::Path) -> anyhow::Result<()> {
    use anyhow::Context;
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Loads a model on a single-threaded runtime.
///
/// The outer error is a runtime setup failure; the inner one is the model
/// backend's own error, kept so callers can report its code.
pub(crate) fn load_model_blocking(
    path: &std::path::Path,
) -> anyhow::Result<mannequin_backend_model::ModelResult<mannequin_backend_model::ExternalModelAsset>>
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(mannequin_backend_model::load_model(path)))
}
