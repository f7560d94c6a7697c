//! Mannequin Procedural Backend
//!
//! Builds a proportioned humanoid part hierarchy from customization
//! parameters. Generation is total and deterministic: the same parameters
//! always yield the same hierarchy, and no input can make it fail.
//!
//! # Example
//!
//! ```
//! use mannequin_backend_procedural::build_procedural_avatar;
//! use mannequin_spec::{derive_proportions, CustomizationParams, HairType};
//!
//! let params = CustomizationParams::default().with_hair(HairType::Bald);
//! let avatar = build_procedural_avatar(&params, &derive_proportions(&params));
//! assert!(avatar.find("hair").is_none());
//! ```

pub mod chain;
pub mod dims;
pub mod face;
pub mod hair;
pub mod rig;

pub use chain::{Segment, Side};
pub use hair::{hair_part, HAIR_PART};
pub use rig::{build_procedural_avatar, AVATAR_ROOT};
