//! JSON output types for machine-readable CLI output.
//!
//! Every command emits the same envelope under `--json`: a success flag,
//! structured errors and warnings, and a command-specific result.

use mannequin_backend_model::NormalizeWarning;
use mannequin_spec::{Aabb, BackendError, ClampNote, PartHierarchy};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// Backend failures pass their own codes (`MODEL_002`, `STORE_003`, ...)
/// through unchanged.
pub mod error_codes {
    /// Parameter file could not be read or parsed
    pub const PARAM_INPUT: &str = "CLI_001";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_002";
    /// Output file could not be written
    pub const FILE_WRITE: &str = "CLI_003";
    /// Viewer configuration could not be loaded
    pub const CONFIG: &str = "CLI_004";
    /// No record saved in the store
    pub const NO_RECORD: &str = "CLI_005";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "MODEL_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Wraps a backend error, keeping its stable code.
    pub fn from_backend<E: BackendError>(err: &E) -> Self {
        Self::new(err.code(), err.message())
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "C001", "W_MODEL_001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Parameter field the warning refers to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&ClampNote> for JsonWarning {
    fn from(note: &ClampNote) -> Self {
        Self {
            code: note.code.code().to_string(),
            message: note.message.clone(),
            path: Some(note.field.clone()),
        }
    }
}

impl From<&NormalizeWarning> for JsonWarning {
    fn from(warning: &NormalizeWarning) -> Self {
        Self {
            code: warning.code().to_string(),
            message: warning.to_string(),
            path: None,
        }
    }
}

/// Output envelope shared by all commands.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput<T: Serialize> {
    /// Whether the command succeeded
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    /// Command result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }

    /// Prints the envelope as pretty JSON on stdout.
    pub fn print(&self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

/// Axis-aligned bounds as plain arrays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundsJson {
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub size: [f32; 3],
}

impl BoundsJson {
    /// `None` for empty bounds.
    pub fn of(bounds: &Aabb) -> Option<Self> {
        if bounds.is_empty() {
            return None;
        }
        Some(Self {
            min: bounds.min.to_array(),
            max: bounds.max.to_array(),
            size: bounds.size().to_array(),
        })
    }
}

/// Structural metrics for one part hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HierarchySummary {
    pub part_count: usize,
    pub mesh_count: usize,
    /// Parts with their own visibility flag set
    pub visible_count: usize,
    pub geometries: usize,
    pub materials: usize,
    /// World bounds of the visible meshes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundsJson>,
}

impl HierarchySummary {
    pub fn of(hierarchy: &PartHierarchy) -> Self {
        let mut visible_count = 0;
        hierarchy.walk(|part, _, _| {
            if part.visible {
                visible_count += 1;
            }
        });
        let resources = hierarchy.resources();
        Self {
            part_count: hierarchy.part_count(),
            mesh_count: hierarchy.mesh_count(),
            visible_count,
            geometries: resources.geometries,
            materials: resources.materials,
            bounds: BoundsJson::of(&hierarchy.visible_bounds()),
        }
    }
}
