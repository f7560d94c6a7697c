//! Test fixture utilities for writing synthetic glTF models.
//!
//! Fixtures are real glTF 2.0 documents: every accessor is backed by bytes
//! in an embedded base64 buffer, and POSITION accessors carry the min/max
//! the loader relies on.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

const FLOAT: u32 = 5126;

/// One mesh node under the fixture root.
#[derive(Debug, Clone)]
pub struct FixtureMesh {
    pub name: String,
    pub translation: [f32; 3],
    /// Local bounds of the mesh's POSITION data.
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub color: [f32; 4],
}

/// One animation clip: a two-key translation track on the root.
#[derive(Debug, Clone)]
pub struct FixtureClip {
    pub name: String,
    pub duration: f32,
}

/// Builder for a single-scene glTF model with one root node.
#[derive(Debug, Clone)]
pub struct GltfFixture {
    root_name: String,
    root_scale: f32,
    meshes: Vec<FixtureMesh>,
    clips: Vec<FixtureClip>,
}

impl GltfFixture {
    /// Creates an empty fixture whose root node has the given name.
    pub fn new(root_name: &str) -> Self {
        Self {
            root_name: root_name.to_string(),
            root_scale: 1.0,
            meshes: Vec::new(),
            clips: Vec::new(),
        }
    }

    /// A humanoid authored in centimeters: 180 units tall, feet at y = 10,
    /// offset on X/Z so normalization has something to recenter.
    ///
    /// Parts: `Body` (skin + torso), `Head` (skin), `Hair_Mesh` (hair) and
    /// `Shoes` (unclassified).
    pub fn humanoid() -> Self {
        Self::new("Armature")
            .mesh(
                "Body",
                [20.0, 10.0, -5.0],
                [-25.0, 0.0, -15.0],
                [25.0, 140.0, 15.0],
                [0.8, 0.8, 0.8, 1.0],
            )
            .mesh(
                "Head",
                [20.0, 160.0, -5.0],
                [-12.0, -12.0, -12.0],
                [12.0, 12.0, 12.0],
                [0.8, 0.8, 0.8, 1.0],
            )
            .mesh(
                "Hair_Mesh",
                [20.0, 176.0, -5.0],
                [-13.0, -6.0, -13.0],
                [13.0, 14.0, 13.0],
                [0.1, 0.05, 0.0, 1.0],
            )
            .mesh(
                "Shoes",
                [20.0, 10.0, -5.0],
                [-15.0, -10.0, -10.0],
                [15.0, 0.0, 20.0],
                [0.1, 0.1, 0.1, 1.0],
            )
    }

    /// Sets a uniform scale on the root node.
    pub fn with_root_scale(mut self, scale: f32) -> Self {
        self.root_scale = scale;
        self
    }

    /// Adds a mesh node.
    pub fn mesh(
        mut self,
        name: &str,
        translation: [f32; 3],
        min: [f32; 3],
        max: [f32; 3],
        color: [f32; 4],
    ) -> Self {
        self.meshes.push(FixtureMesh {
            name: name.to_string(),
            translation,
            min,
            max,
            color,
        });
        self
    }

    /// Adds an animation clip of the given length.
    pub fn clip(mut self, name: &str, duration: f32) -> Self {
        self.clips.push(FixtureClip {
            name: name.to_string(),
            duration,
        });
        self
    }

    /// Builds the glTF JSON document.
    pub fn to_json(&self) -> Value {
        let mut bytes: Vec<u8> = Vec::new();
        let mut views = Vec::new();
        let mut accessors = Vec::new();

        let push_floats = |bytes: &mut Vec<u8>, values: &[f32]| -> (usize, usize) {
            let offset = bytes.len();
            for v in values {
                bytes.extend_from_slice(&v.to_le_bytes());
            }
            (offset, values.len() * 4)
        };

        let mut nodes = vec![json!({
            "name": self.root_name,
            "scale": [self.root_scale, self.root_scale, self.root_scale],
            "children": (1..=self.meshes.len()).collect::<Vec<_>>(),
        })];
        let mut meshes = Vec::new();
        let mut materials = Vec::new();

        for (i, mesh) in self.meshes.iter().enumerate() {
            let [x0, y0, z0] = mesh.min;
            let [x1, y1, z1] = mesh.max;
            // Three vertices whose component-wise extremes are exactly min/max.
            let positions = [x0, y0, z0, x1, y1, z1, x0, y1, z1];
            let (offset, len) = push_floats(&mut bytes, &positions);
            views.push(json!({"buffer": 0, "byteOffset": offset, "byteLength": len}));
            accessors.push(json!({
                "bufferView": views.len() - 1,
                "componentType": FLOAT,
                "count": 3,
                "type": "VEC3",
                "min": mesh.min,
                "max": mesh.max,
            }));
            meshes.push(json!({
                "name": format!("{}_geo", mesh.name),
                "primitives": [{"attributes": {"POSITION": accessors.len() - 1}, "material": i}],
            }));
            materials.push(json!({
                "name": format!("{}_mat", mesh.name),
                "pbrMetallicRoughness": {"baseColorFactor": mesh.color},
            }));
            nodes.push(json!({
                "name": mesh.name,
                "mesh": i,
                "translation": mesh.translation,
            }));
        }

        let mut animations = Vec::new();
        for clip in &self.clips {
            let (offset, len) = push_floats(&mut bytes, &[0.0, clip.duration]);
            views.push(json!({"buffer": 0, "byteOffset": offset, "byteLength": len}));
            accessors.push(json!({
                "bufferView": views.len() - 1,
                "componentType": FLOAT,
                "count": 2,
                "type": "SCALAR",
                "min": [0.0],
                "max": [clip.duration],
            }));
            let input = accessors.len() - 1;

            let (offset, len) = push_floats(&mut bytes, &[0.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
            views.push(json!({"buffer": 0, "byteOffset": offset, "byteLength": len}));
            accessors.push(json!({
                "bufferView": views.len() - 1,
                "componentType": FLOAT,
                "count": 2,
                "type": "VEC3",
            }));
            let output = accessors.len() - 1;

            animations.push(json!({
                "name": clip.name,
                "channels": [{"sampler": 0, "target": {"node": 0, "path": "translation"}}],
                "samplers": [{"input": input, "output": output, "interpolation": "LINEAR"}],
            }));
        }

        let mut doc = json!({
            "asset": {"version": "2.0", "generator": "mannequin-tests"},
            "scene": 0,
            "scenes": [{"nodes": [0]}],
            "nodes": nodes,
        });
        if !meshes.is_empty() {
            doc["meshes"] = json!(meshes);
            doc["materials"] = json!(materials);
        }
        if !bytes.is_empty() {
            doc["buffers"] = json!([{
                "byteLength": bytes.len(),
                "uri": format!("data:application/octet-stream;base64,{}", STANDARD.encode(&bytes)),
            }]);
            doc["bufferViews"] = json!(views);
            doc["accessors"] = json!(accessors);
        }
        if !animations.is_empty() {
            doc["animations"] = json!(animations);
        }
        doc
    }

    /// Writes the fixture as a `.gltf` file.
    ///
    /// # Arguments
    /// * `dir` - Target directory (usually a `TempDir`)
    /// * `file_name` - File name including the extension
    pub fn write(&self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        let json = serde_json::to_string_pretty(&self.to_json()).expect("Failed to serialize glTF");
        fs::write(&path, json).expect("Failed to write glTF fixture");
        path
    }
}

/// Expected natural bounds of [`GltfFixture::humanoid`]: x in [-5, 45],
/// y in [0, 190], z in [-20, 15].
pub const HUMANOID_NATURAL_HEIGHT: f32 = 190.0;
