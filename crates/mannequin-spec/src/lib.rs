//! Mannequin Core Types
//!
//! This crate holds everything the avatar generators share: customization
//! parameters and their clamping rules, the body-proportion engine, the part
//! hierarchy model, canonical fingerprints, and the persistence record.
//!
//! # Example
//!
//! ```
//! use mannequin_spec::{clamp_params, derive_proportions, CustomizationParams};
//!
//! let raw = CustomizationParams::default().with_height(140.0).with_weight(120.0);
//! let params = clamp_params(&raw).params;
//! let proportions = derive_proportions(&params);
//! assert_eq!(proportions.body_width_factor, 0.65);
//! ```
//!
//! # Modules
//!
//! - [`color`]: RGB colors and the skin palette
//! - [`error`]: Clamp notes, parse errors, and the [`BackendError`] trait
//! - [`params`]: Customization parameters and the clothing catalog
//! - [`validation`]: Parameter clamping
//! - [`proportions`]: Derived body proportions
//! - [`scene`]: Part hierarchy, geometry, and bounds
//! - [`hash`]: Canonical hashing
//! - [`record`]: Persistence record and store trait

pub mod color;
pub mod error;
pub mod hash;
pub mod params;
pub mod proportions;
pub mod record;
pub mod scene;
pub mod validation;

pub use color::{Rgb, SkinTone};
pub use error::{BackendError, ClampCode, ClampNote, ColorParseError, ParamsError};
pub use hash::{canonical_value_hash, hierarchy_fingerprint, params_hash};
pub use params::{
    ClothingCategory, ClothingSelection, CustomizationParams, Gender, HairType, CURLY_HAIR_COLOR,
    DEFAULT_HEIGHT_CM, DEFAULT_WEIGHT_KG, HAIR_COLOR, MAX_HEIGHT_CM, MAX_WEIGHT_KG, MIN_HEIGHT_CM,
    MIN_WEIGHT_KG, NO_CLOTHING,
};
pub use proportions::{
    body_width_factor, derive_proportions, DerivedProportions, BASE_BODY_WIDTH,
    BODY_WIDTH_PER_BMI, MAX_BODY_WIDTH, MIN_BODY_WIDTH, NEUTRAL_BMI, REFERENCE_HEIGHT_CM,
};
pub use record::{
    AvatarRecord, AvatarStore, MemoryAvatarStore, PersistenceError, PersistenceResult,
};
pub use scene::{
    Aabb, Geometry, Material, MaterialKind, MeshPart, Part, PartHierarchy, ResourceCount,
    Transform,
};
pub use validation::{clamp_params, ClampOutcome};
