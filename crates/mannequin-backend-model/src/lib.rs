//! Mannequin External Model Backend
//!
//! Loads externally authored character models and adapts them to the
//! customization parameters:
//!
//! - **Format detection**: gltf, glb and fbx by extension
//! - **Loading**: glTF-family documents decoded off the calling task
//! - **Normalization**: rescale to a reference height, recenter on X/Z,
//!   ground at `y = 0`
//! - **Customization**: name-classified skin, hair and torso parts
//! - **Playback**: all embedded clips looped when present
//!
//! # Example
//!
//! ```no_run
//! use mannequin_backend_model::{load_model, prepare_model, ScaleStrategy};
//! use mannequin_spec::CustomizationParams;
//!
//! # async fn run() -> Result<(), mannequin_backend_model::ModelError> {
//! let asset = load_model("models/male.glb").await?;
//! let prepared = prepare_model(
//!     &asset,
//!     &CustomizationParams::default(),
//!     ScaleStrategy::ReferenceHeight,
//! );
//! println!("{} parts", prepared.hierarchy.part_count());
//! # Ok(())
//! # }
//! ```

pub mod asset;
pub mod customize;
pub mod error;
pub mod format;
pub mod gltf_loader;
pub mod loader;
pub mod normalize;
pub mod pipeline;
pub mod playback;

pub use asset::{AnimationClip, ExternalModelAsset};
pub use customize::{
    apply_customization, apply_customization_with, external_torso_scale, CustomizeReport,
    KeywordClassifier, PartClassifier, PartRoles, EXTERNAL_TORSO_SCALE_PER_BMI,
};
pub use error::{ModelError, ModelResult, NormalizeWarning};
pub use format::{detect_format, ModelFormat};
pub use loader::{load_model, load_model_as};
pub use normalize::{normalize, NormalizeReport, ScaleStrategy, REFERENCE_HEIGHT_UNITS};
pub use pipeline::{prepare_model, prepare_model_with, PreparedModel};
pub use playback::AnimationPlayer;
