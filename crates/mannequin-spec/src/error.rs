//! Error and clamp-note types shared across the workspace.

use thiserror::Error;

/// Clamp codes recorded when out-of-range parameters are pulled back to a
/// valid boundary.
///
/// Clamping never rejects input; each adjustment is reported as a
/// [`ClampNote`] so callers can surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClampCode {
    /// C001: Height outside [140, 200] cm
    HeightOutOfRange,
    /// C002: Weight outside [40, 120] kg
    WeightOutOfRange,
    /// C003: Non-finite numeric input replaced by the default value
    NonFiniteValue,
    /// C004: Skin color not in the palette, snapped to the nearest tone
    SkinColorOffPalette,
    /// C005: Unknown clothing item replaced by "none"
    UnknownClothingItem,
    /// C006: Fractional value rounded to an integer
    FractionalValue,
}

impl ClampCode {
    /// Returns the clamp code string (e.g., "C001").
    pub fn code(&self) -> &'static str {
        match self {
            ClampCode::HeightOutOfRange => "C001",
            ClampCode::WeightOutOfRange => "C002",
            ClampCode::NonFiniteValue => "C003",
            ClampCode::SkinColorOffPalette => "C004",
            ClampCode::UnknownClothingItem => "C005",
            ClampCode::FractionalValue => "C006",
        }
    }
}

impl std::fmt::Display for ClampCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single parameter adjustment made while clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct ClampNote {
    /// The clamp code.
    pub code: ClampCode,
    /// Human-readable description of the adjustment.
    pub message: String,
    /// Field that was adjusted (e.g., "height_cm", "clothing.shirts").
    pub field: String,
}

impl ClampNote {
    /// Creates a new clamp note.
    pub fn new(code: ClampCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: field.into(),
        }
    }
}

impl std::fmt::Display for ClampNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (at {})", self.code, self.message, self.field)
    }
}

/// A color string that is not `#RRGGBB` hex.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{input}': expected #RRGGBB")]
pub struct ColorParseError {
    pub input: String,
}

/// Errors that can occur while reading parameter documents.
#[derive(Debug, Error)]
pub enum ParamsError {
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown enum value in a record (e.g., an unrecognized hair type).
    #[error("unknown {field} value '{value}'")]
    UnknownValue { field: &'static str, value: String },

    /// Color field could not be parsed.
    #[error(transparent)]
    Color(#[from] ColorParseError),
}

/// Trait for errors raised by generation backends and collaborators.
///
/// Each error exposes a stable code and a category so the CLI and viewer can
/// report failures uniformly.
///
/// # Example
///
/// ```
/// use mannequin_spec::BackendError;
///
/// fn report<E: BackendError>(err: &E) -> String {
///     format!("[{}] {}", err.code(), err.message())
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Stable error code such as "MODEL_001".
    fn code(&self) -> &'static str;

    /// Human-readable message; defaults to `Display`.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Error category such as "model" or "persistence".
    fn category(&self) -> &'static str;
}
