//! Parameter input resolution.
//!
//! Commands accept an optional parameter file plus per-field flag overrides.
//! A parameter file is either a params document (`height_cm`, `weight_kg`,
//! ...) or a saved avatar record (`height`, `weight`, `skinColor`, ...).

use anyhow::{Context, Result};
use mannequin_spec::{
    clamp_params, AvatarRecord, ClampNote, CustomizationParams, Gender, HairType, Rgb,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Parameter sources gathered from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamOverrides {
    /// Params or record JSON file.
    pub file: Option<PathBuf>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub gender: Option<Gender>,
    pub skin_color: Option<Rgb>,
    pub hair_type: Option<HairType>,
}

/// Kind of document a parameter file contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSourceKind {
    /// No file given; defaults plus flags.
    Defaults,
    Params,
    Record,
}

impl ParamSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamSourceKind::Defaults => "defaults",
            ParamSourceKind::Params => "params",
            ParamSourceKind::Record => "record",
        }
    }
}

/// Clamped parameters ready for generation.
#[derive(Debug, Clone)]
pub struct ResolvedParams {
    pub params: CustomizationParams,
    /// Every adjustment made while importing and clamping.
    pub notes: Vec<ClampNote>,
    pub source: ParamSourceKind,
}

/// Resolves overrides into clamped parameters.
///
/// # Arguments
/// * `overrides` - Optional file plus per-field flag values
///
/// # Returns
/// The clamped parameters and the notes describing each adjustment.
pub fn resolve_params(overrides: &ParamOverrides) -> Result<ResolvedParams> {
    let (mut params, mut notes, source) = match overrides.file.as_deref() {
        Some(path) => read_param_file(path)?,
        None => (
            CustomizationParams::default(),
            Vec::new(),
            ParamSourceKind::Defaults,
        ),
    };

    if let Some(height) = overrides.height_cm {
        params.height_cm = height;
    }
    if let Some(weight) = overrides.weight_kg {
        params.weight_kg = weight;
    }
    if let Some(gender) = overrides.gender {
        params.gender = gender;
    }
    if let Some(skin) = overrides.skin_color {
        params.skin_color = skin;
    }
    if let Some(hair) = overrides.hair_type {
        params.hair_type = hair;
    }

    let outcome = clamp_params(&params);
    notes.extend(outcome.notes);
    Ok(ResolvedParams {
        params: outcome.params,
        notes,
        source,
    })
}

/// Reads a params or record document.
///
/// Records are recognized by their camelCase `height` field and are clamped
/// on import; plain params are returned unclamped.
fn read_param_file(path: &Path) -> Result<(CustomizationParams, Vec<ClampNote>, ParamSourceKind)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read parameter file: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;

    if value.get("height").is_some() {
        let record: AvatarRecord = serde_json::from_value(value)
            .with_context(|| format!("Malformed avatar record: {}", path.display()))?;
        let (params, notes) = record.into_params();
        Ok((params, notes, ParamSourceKind::Record))
    } else {
        let params = CustomizationParams::from_json(&text)
            .with_context(|| format!("Malformed params document: {}", path.display()))?;
        Ok((params, Vec::new(), ParamSourceKind::Params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mannequin_spec::{ClampCode, SkinTone};
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let resolved = resolve_params(&ParamOverrides::default()).unwrap();
        assert_eq!(resolved.params, CustomizationParams::default());
        assert!(resolved.notes.is_empty());
        assert_eq!(resolved.source, ParamSourceKind::Defaults);
    }

    #[test]
    fn test_flags_are_clamped() {
        let overrides = ParamOverrides {
            height_cm: Some(230.0),
            hair_type: Some(HairType::Curly),
            ..Default::default()
        };
        let resolved = resolve_params(&overrides).unwrap();
        assert_eq!(resolved.params.height_cm, 200.0);
        assert_eq!(resolved.params.hair_type, HairType::Curly);
        assert_eq!(resolved.notes[0].code, ClampCode::HeightOutOfRange);
    }

    #[test]
    fn test_record_file_detected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"{{"gender":"female","height":165,"weight":55,"skinColor":"#AE5D29","hairType":"long","bmi":20.2}}"##
        )
        .unwrap();

        let overrides = ParamOverrides {
            file: Some(file.path().to_path_buf()),
            weight_kg: Some(60.0),
            ..Default::default()
        };
        let resolved = resolve_params(&overrides).unwrap();
        assert_eq!(resolved.source, ParamSourceKind::Record);
        assert_eq!(resolved.params.gender, Gender::Female);
        assert_eq!(resolved.params.weight_kg, 60.0);
        assert_eq!(resolved.params.skin_color, SkinTone::MediumDark.color());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let overrides = ParamOverrides {
            file: Some(PathBuf::from("/nonexistent/params.json")),
            ..Default::default()
        };
        assert!(resolve_params(&overrides).is_err());
    }
}
