//! Name-based part customization for external models.
//!
//! Authored rigs carry no semantic tags, so parts are classified by their
//! names. Classification is a [`PartClassifier`] so a rig with a different
//! naming convention can supply its own rules.

use glam::Vec3;
use mannequin_spec::{derive_proportions, CustomizationParams, PartHierarchy, NEUTRAL_BMI};
use serde::Serialize;

/// Torso X/Z scale change per BMI point on external models.
pub const EXTERNAL_TORSO_SCALE_PER_BMI: f64 = 0.02;

/// Roles a part can play; a part may have several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PartRoles {
    /// Recolored with the skin color.
    pub skin: bool,
    /// Shown or hidden by hair type and recolored with the hair color.
    pub hair: bool,
    /// Widened or narrowed by BMI.
    pub torso: bool,
}

impl PartRoles {
    pub const NONE: PartRoles = PartRoles {
        skin: false,
        hair: false,
        torso: false,
    };

    /// No role matched; the part is left untouched.
    pub fn is_empty(&self) -> bool {
        !(self.skin || self.hair || self.torso)
    }

    /// Role names, for reports.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.skin {
            names.push("skin");
        }
        if self.hair {
            names.push("hair");
        }
        if self.torso {
            names.push("torso");
        }
        names
    }
}

/// Maps a part name to its roles.
pub trait PartClassifier {
    fn classify(&self, name: &str) -> PartRoles;
}

/// Case-insensitive substring matching against keyword lists.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    pub skin: Vec<String>,
    pub hair: Vec<String>,
    pub torso: Vec<String>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        let list = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            skin: list(&["skin", "body", "head", "arm", "leg", "hand", "foot"]),
            hair: list(&["hair"]),
            torso: list(&["body", "torso", "chest"]),
        }
    }
}

impl PartClassifier for KeywordClassifier {
    fn classify(&self, name: &str) -> PartRoles {
        let lower = name.to_lowercase();
        let any = |words: &[String]| words.iter().any(|w| lower.contains(w.as_str()));
        PartRoles {
            skin: any(&self.skin),
            hair: any(&self.hair),
            torso: any(&self.torso),
        }
    }
}

/// Parts touched by one customization pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomizeReport {
    pub recolored: Vec<String>,
    pub hair_parts: Vec<String>,
    pub scaled: Vec<String>,
    pub torso_scale: f32,
}

/// X/Z scale for torso parts at a given BMI.
pub fn external_torso_scale(bmi: f64) -> f32 {
    (1.0 + (bmi - NEUTRAL_BMI) * EXTERNAL_TORSO_SCALE_PER_BMI) as f32
}

/// Applies customization with the default [`KeywordClassifier`].
pub fn apply_customization(
    hierarchy: &mut PartHierarchy,
    params: &CustomizationParams,
) -> CustomizeReport {
    apply_customization_with(hierarchy, params, &KeywordClassifier::default())
}

/// Applies skin color, hair visibility/color and torso width to the mesh
/// parts of a hierarchy.
///
/// Every write is an absolute assignment derived from `params`, so applying
/// the same parameters twice yields the same hierarchy. Only standard and
/// phong materials are recolored; group parts and unmatched parts are left
/// as they are.
pub fn apply_customization_with(
    hierarchy: &mut PartHierarchy,
    params: &CustomizationParams,
    classifier: &dyn PartClassifier,
) -> CustomizeReport {
    let bmi = derive_proportions(params).bmi;
    let torso_scale = external_torso_scale(bmi);
    let hair_visible = params.hair_type.has_hair();
    let hair_color = params.hair_type.color();

    let mut report = CustomizeReport {
        torso_scale,
        ..CustomizeReport::default()
    };

    hierarchy.walk_mut(|part| {
        let Some(mesh) = part.mesh.as_mut() else {
            return;
        };
        let roles = classifier.classify(&part.name);
        if roles.is_empty() {
            return;
        }

        if roles.skin && mesh.material.is_tintable() {
            mesh.material.color = params.skin_color;
            report.recolored.push(part.name.clone());
        }
        if roles.hair {
            part.visible = hair_visible;
            if mesh.material.is_tintable() {
                mesh.material.color = hair_color;
            }
            report.hair_parts.push(part.name.clone());
        }
        if roles.torso {
            let y = part.transform.scale.y;
            part.transform.scale = Vec3::new(torso_scale, y, torso_scale);
            report.scaled.push(part.name.clone());
        }
    });

    tracing::debug!(
        recolored = report.recolored.len(),
        hair = report.hair_parts.len(),
        scaled = report.scaled.len(),
        torso_scale,
        "customized model"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use mannequin_spec::{
        Geometry, HairType, Material, MaterialKind, MeshPart, Part, Rgb, CURLY_HAIR_COLOR,
    };

    fn rig() -> PartHierarchy {
        let mesh = |name: &str| {
            Part::mesh(
                name,
                MeshPart::new(Geometry::sphere(1.0), Rgb::from_hex(0x808080)),
                Vec3::ZERO,
            )
        };
        PartHierarchy::new(
            Part::group("model")
                .with_child(mesh("Body_Mesh"))
                .with_child(mesh("HairStrands"))
                .with_child(mesh("Left_Arm"))
                .with_child(mesh("Shirt"))
                .with_child(Part::group("Armature_Hand")),
        )
    }

    #[test]
    fn test_default_classifier() {
        let c = KeywordClassifier::default();
        let body = c.classify("BODY");
        assert!(body.skin && body.torso && !body.hair);
        assert!(c.classify("ponytail_hair").hair);
        assert!(c.classify("Chest").torso);
        assert!(c.classify("Eyelashes").is_empty());
    }

    #[test]
    fn test_apply_customization() {
        let mut h = rig();
        let params = CustomizationParams::default()
            .with_skin_color(Rgb::from_hex(0xAE5D29))
            .with_hair(HairType::Curly);
        let report = apply_customization(&mut h, &params);

        let color = |h: &PartHierarchy, n: &str| h.find(n).unwrap().mesh.unwrap().material.color;
        assert_eq!(color(&h, "Body_Mesh"), params.skin_color);
        assert_eq!(color(&h, "Left_Arm"), params.skin_color);
        assert_eq!(color(&h, "HairStrands"), CURLY_HAIR_COLOR);
        assert_eq!(color(&h, "Shirt"), Rgb::from_hex(0x808080));
        assert_eq!(report.scaled, vec!["Body_Mesh".to_string()]);

        let expected = external_torso_scale(derive_proportions(&params).bmi);
        let scale = h.find("Body_Mesh").unwrap().transform.scale;
        assert_eq!(scale, Vec3::new(expected, 1.0, expected));
    }

    #[test]
    fn test_bald_hides_hair() {
        let mut h = rig();
        apply_customization(&mut h, &CustomizationParams::default().with_hair(HairType::Bald));
        assert!(!h.find("HairStrands").unwrap().visible);

        apply_customization(&mut h, &CustomizationParams::default());
        assert!(h.find("HairStrands").unwrap().visible);
    }

    #[test]
    fn test_idempotent() {
        let params = CustomizationParams::default().with_weight(110.0);
        let mut once = rig();
        apply_customization(&mut once, &params);
        let mut twice = once.clone();
        apply_customization(&mut twice, &params);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_basic_material_not_recolored() {
        let mut h = rig();
        h.find_mut("Left_Arm").unwrap().mesh.as_mut().unwrap().material = Material {
            color: Rgb::WHITE,
            kind: MaterialKind::Basic,
        };
        apply_customization(&mut h, &CustomizationParams::default());
        assert_eq!(
            h.find("Left_Arm").unwrap().mesh.unwrap().material.color,
            Rgb::WHITE
        );
    }

    #[test]
    fn test_custom_classifier() {
        struct OnlyShirts;
        impl PartClassifier for OnlyShirts {
            fn classify(&self, name: &str) -> PartRoles {
                PartRoles {
                    skin: name == "Shirt",
                    ..PartRoles::NONE
                }
            }
        }
        let mut h = rig();
        let report =
            apply_customization_with(&mut h, &CustomizationParams::default(), &OnlyShirts);
        assert_eq!(report.recolored, vec!["Shirt".to_string()]);
    }

    #[test]
    fn test_neutral_bmi_scale_is_one() {
        assert_eq!(external_torso_scale(NEUTRAL_BMI), 1.0);
    }
}
