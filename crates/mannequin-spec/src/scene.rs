//! Part hierarchy types shared by the procedural and external-model generators.
//!
//! A [`PartHierarchy`] is a tree of named [`Part`]s. Each part has a local
//! [`Transform`], an optional [`MeshPart`] (geometry + material + shadow
//! flags) and a visibility flag. Group parts carry no geometry.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::color::Rgb;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// An empty box that any point extends.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered at the origin with the given half extents.
    pub fn from_half_extents(half: Vec3) -> Self {
        Self {
            min: -half,
            max: half,
        }
    }

    /// Whether no point has been added.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn extend_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Size per axis; zero for an empty box.
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Center point; origin for an empty box.
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    /// Largest dimension.
    pub fn max_extent(&self) -> f32 {
        self.size().max_element()
    }

    /// The eight corners of a non-empty box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Bounds of this box after an affine transform.
    pub fn transformed(&self, m: &Mat4) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        let mut out = Aabb::EMPTY;
        for c in self.corners() {
            out.extend_point(m.transform_point3(c));
        }
        out
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Aabb::EMPTY
    }
}

/// Local transform of a part relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local-to-parent matrix (scale, then rotate, then translate).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

/// Shape descriptor of a mesh part. Primitive shapes are centered at the
/// part origin with their long axis along +Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    /// Sphere, optionally truncated to a cap of `polar_extent` radians from
    /// the top pole (a full sphere is `PI`).
    Sphere { radius: f32, polar_extent: f32 },
    /// Cylinder or truncated cone along Y.
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
    },
    /// Axis-aligned box.
    Box { width: f32, height: f32, depth: f32 },
    /// Torus in the XY plane swept from angle 0 to `arc` around +Z.
    Torus { radius: f32, tube: f32, arc: f32 },
    /// Authored triangle mesh, described by its local bounds.
    Mesh {
        bounds: Aabb,
        vertex_count: u32,
        triangle_count: u32,
    },
}

impl Geometry {
    /// A full sphere.
    pub fn sphere(radius: f32) -> Self {
        Geometry::Sphere {
            radius,
            polar_extent: PI,
        }
    }

    /// Bounds in the part's local space.
    pub fn local_bounds(&self) -> Aabb {
        match *self {
            Geometry::Sphere {
                radius,
                polar_extent,
            } => {
                let extent = polar_extent.clamp(0.0, PI);
                let horizontal = if extent >= PI / 2.0 {
                    radius
                } else {
                    radius * extent.sin()
                };
                Aabb::new(
                    Vec3::new(-horizontal, radius * extent.cos(), -horizontal),
                    Vec3::new(horizontal, radius, horizontal),
                )
            }
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => {
                let r = radius_top.max(radius_bottom);
                Aabb::from_half_extents(Vec3::new(r, height * 0.5, r))
            }
            Geometry::Box {
                width,
                height,
                depth,
            } => Aabb::from_half_extents(Vec3::new(width, height, depth) * 0.5),
            Geometry::Torus { radius, tube, arc } => {
                let arc = arc.clamp(0.0, 2.0 * PI);
                let mut centerline = Aabb::EMPTY;
                let mut candidates = vec![0.0, arc];
                for quarter in [PI / 2.0, PI, 1.5 * PI] {
                    if quarter <= arc {
                        candidates.push(quarter);
                    }
                }
                for phi in candidates {
                    centerline.extend_point(Vec3::new(radius * phi.cos(), radius * phi.sin(), 0.0));
                }
                Aabb::new(
                    centerline.min - Vec3::splat(tube),
                    centerline.max + Vec3::splat(tube),
                )
            }
            Geometry::Mesh { bounds, .. } => bounds,
        }
    }

    /// Every linear measurement of the shape (radii, lengths, extents).
    pub fn linear_dimensions(&self) -> Vec<f32> {
        match *self {
            Geometry::Sphere { radius, .. } => vec![radius],
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => vec![radius_top, radius_bottom, height],
            Geometry::Box {
                width,
                height,
                depth,
            } => vec![width, height, depth],
            Geometry::Torus { radius, tube, .. } => vec![radius, tube],
            Geometry::Mesh { bounds, .. } => bounds.size().to_array().to_vec(),
        }
    }
}

/// Shading model of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    /// Physically based (metallic/roughness).
    Standard,
    /// Blinn-Phong.
    Phong,
    /// Unlit.
    Basic,
}

/// Material descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Rgb,
    pub kind: MaterialKind,
}

impl Material {
    pub fn standard(color: Rgb) -> Self {
        Self {
            color,
            kind: MaterialKind::Standard,
        }
    }

    /// Whether this material's color can be retinted.
    pub fn is_tintable(&self) -> bool {
        matches!(self.kind, MaterialKind::Standard | MaterialKind::Phong)
    }
}

/// Renderable payload of a part. Owns one geometry and one material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshPart {
    pub geometry: Geometry,
    pub material: Material,
    pub casts_shadow: bool,
    pub receives_shadow: bool,
}

impl MeshPart {
    /// Standard-material mesh that casts shadows.
    pub fn new(geometry: Geometry, color: Rgb) -> Self {
        Self {
            geometry,
            material: Material::standard(color),
            casts_shadow: true,
            receives_shadow: false,
        }
    }

    /// Same mesh with shadow casting disabled.
    pub fn without_shadow(mut self) -> Self {
        self.casts_shadow = false;
        self
    }
}

/// A named node of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub name: String,
    pub transform: Transform,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshPart>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Part>,
}

fn default_visible() -> bool {
    true
}

impl Part {
    /// Creates an empty group part.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            visible: true,
            mesh: None,
            children: Vec::new(),
        }
    }

    /// Creates a mesh part at `translation`.
    pub fn mesh(name: impl Into<String>, mesh: MeshPart, translation: Vec3) -> Self {
        Self {
            name: name.into(),
            transform: Transform::from_translation(translation),
            visible: true,
            mesh: Some(mesh),
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform.rotation = rotation;
        self
    }

    pub fn with_child(mut self, child: Part) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: Part) {
        self.children.push(child);
    }
}

/// Geometry/material resources held by a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceCount {
    pub geometries: usize,
    pub materials: usize,
}

impl std::ops::Add for ResourceCount {
    type Output = ResourceCount;

    fn add(self, rhs: ResourceCount) -> ResourceCount {
        ResourceCount {
            geometries: self.geometries + rhs.geometries,
            materials: self.materials + rhs.materials,
        }
    }
}

/// A tree of parts representing one avatar instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartHierarchy {
    pub root: Part,
}

impl PartHierarchy {
    pub fn new(root: Part) -> Self {
        Self { root }
    }

    /// Visits every part depth-first with its world matrix and depth.
    pub fn walk<F: FnMut(&Part, &Mat4, usize)>(&self, mut f: F) {
        fn visit<F: FnMut(&Part, &Mat4, usize)>(part: &Part, parent: &Mat4, depth: usize, f: &mut F) {
            let world = *parent * part.transform.matrix();
            f(part, &world, depth);
            for child in &part.children {
                visit(child, &world, depth + 1, f);
            }
        }
        visit(&self.root, &Mat4::IDENTITY, 0, &mut f);
    }

    /// Visits every part mutably, depth-first.
    pub fn walk_mut<F: FnMut(&mut Part)>(&mut self, mut f: F) {
        fn visit<F: FnMut(&mut Part)>(part: &mut Part, f: &mut F) {
            f(part);
            for child in &mut part.children {
                visit(child, f);
            }
        }
        visit(&mut self.root, &mut f);
    }

    /// Total number of parts including groups and the root.
    pub fn part_count(&self) -> usize {
        let mut n = 0;
        self.walk(|_, _, _| n += 1);
        n
    }

    /// Number of parts with geometry.
    pub fn mesh_count(&self) -> usize {
        let mut n = 0;
        self.walk(|p, _, _| {
            if p.mesh.is_some() {
                n += 1;
            }
        });
        n
    }

    /// Geometry/material resources owned by this hierarchy.
    pub fn resources(&self) -> ResourceCount {
        let meshes = self.mesh_count();
        ResourceCount {
            geometries: meshes,
            materials: meshes,
        }
    }

    /// First part with the given name, depth-first.
    pub fn find(&self, name: &str) -> Option<&Part> {
        fn search<'a>(part: &'a Part, name: &str) -> Option<&'a Part> {
            if part.name == name {
                return Some(part);
            }
            part.children.iter().find_map(|c| search(c, name))
        }
        search(&self.root, name)
    }

    /// First part with the given name, depth-first, mutably.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Part> {
        fn search<'a>(part: &'a mut Part, name: &str) -> Option<&'a mut Part> {
            if part.name == name {
                return Some(part);
            }
            part.children.iter_mut().find_map(|c| search(c, name))
        }
        search(&mut self.root, name)
    }

    /// World matrix of the first part with the given name.
    pub fn world_matrix(&self, name: &str) -> Option<Mat4> {
        let mut found = None;
        self.walk(|p, world, _| {
            if found.is_none() && p.name == name {
                found = Some(*world);
            }
        });
        found
    }

    /// World-space bounds of all mesh parts, visible or not.
    pub fn world_bounds(&self) -> Aabb {
        let mut bounds = Aabb::EMPTY;
        self.walk(|p, world, _| {
            if let Some(mesh) = &p.mesh {
                bounds = bounds.union(&mesh.geometry.local_bounds().transformed(world));
            }
        });
        bounds
    }

    /// World-space bounds of visible mesh parts only (hidden ancestors hide
    /// their subtree).
    pub fn visible_bounds(&self) -> Aabb {
        fn visit(part: &Part, parent: &Mat4, out: &mut Aabb) {
            if !part.visible {
                return;
            }
            let world = *parent * part.transform.matrix();
            if let Some(mesh) = &part.mesh {
                *out = out.union(&mesh.geometry.local_bounds().transformed(&world));
            }
            for child in &part.children {
                visit(child, &world, out);
            }
        }
        let mut bounds = Aabb::EMPTY;
        visit(&self.root, &Mat4::IDENTITY, &mut bounds);
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_aabb_empty_union() {
        let a = Aabb::EMPTY;
        assert!(a.is_empty());
        assert_eq!(a.size(), Vec3::ZERO);
        let b = Aabb::from_half_extents(Vec3::ONE);
        assert_eq!(a.union(&b), b);
        assert_eq!(b.union(&a), b);
    }

    #[test]
    fn test_aabb_transformed_by_rotation() {
        let b = Aabb::from_half_extents(Vec3::new(1.0, 2.0, 0.5));
        let m = Mat4::from_rotation_z(PI / 2.0);
        let t = b.transformed(&m);
        assert!(approx(t.size(), Vec3::new(4.0, 2.0, 1.0)));
    }

    #[test]
    fn test_sphere_cap_bounds() {
        let full = Geometry::sphere(1.0).local_bounds();
        assert!(approx(full.min, Vec3::splat(-1.0)));
        let cap = Geometry::Sphere {
            radius: 1.0,
            polar_extent: PI / 1.5,
        }
        .local_bounds();
        assert!(approx(cap.max, Vec3::ONE));
        assert!((cap.min.y - (PI / 1.5).cos()).abs() < 1e-6);
    }

    #[test]
    fn test_half_torus_bounds() {
        let b = Geometry::Torus {
            radius: 1.0,
            tube: 0.1,
            arc: PI,
        }
        .local_bounds();
        assert!(approx(b.min, Vec3::new(-1.1, -0.1, -0.1)));
        assert!(approx(b.max, Vec3::new(1.1, 1.1, 0.1)));
    }

    #[test]
    fn test_hierarchy_walk_and_bounds() {
        let child = Part::mesh(
            "hand",
            MeshPart::new(Geometry::sphere(0.5), Rgb::WHITE),
            Vec3::new(2.0, 0.0, 0.0),
        );
        let root = Part::group("root")
            .with_transform(Transform::from_translation(Vec3::new(0.0, 1.0, 0.0)))
            .with_child(child);
        let h = PartHierarchy::new(root);

        assert_eq!(h.part_count(), 2);
        assert_eq!(h.mesh_count(), 1);
        assert_eq!(h.resources().materials, 1);
        let bounds = h.world_bounds();
        assert!(approx(bounds.center(), Vec3::new(2.0, 1.0, 0.0)));
        assert!(approx(bounds.size(), Vec3::ONE));

        let world = h.world_matrix("hand").unwrap();
        assert!(approx(world.transform_point3(Vec3::ZERO), Vec3::new(2.0, 1.0, 0.0)));
    }

    #[test]
    fn test_visible_bounds_skips_hidden_subtrees() {
        let mut h = PartHierarchy::new(
            Part::group("root")
                .with_child(Part::mesh(
                    "a",
                    MeshPart::new(Geometry::sphere(1.0), Rgb::WHITE),
                    Vec3::ZERO,
                ))
                .with_child(Part::mesh(
                    "b",
                    MeshPart::new(Geometry::sphere(1.0), Rgb::WHITE),
                    Vec3::new(10.0, 0.0, 0.0),
                )),
        );
        h.find_mut("b").unwrap().visible = false;
        assert!(approx(h.visible_bounds().max, Vec3::ONE));
        assert!((h.world_bounds().max.x - 11.0).abs() < 1e-5);
    }
}
