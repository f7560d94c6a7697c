//! glTF / GLB decoding into a part hierarchy.
//!
//! Only the document is read: mesh bounds come from the POSITION accessor
//! min/max, which glTF requires, so buffers are never decoded.

use glam::{Quat, Vec3};
use mannequin_spec::{
    Aabb, Geometry, Material, MaterialKind, MeshPart, Part, PartHierarchy, Rgb, Transform,
};
use std::path::Path;

use crate::asset::{AnimationClip, ExternalModelAsset};
use crate::error::{ModelError, ModelResult};
use crate::format::ModelFormat;

/// Reads a glTF or GLB file synchronously.
pub fn read_gltf(path: &Path, format: ModelFormat) -> ModelResult<ExternalModelAsset> {
    let gltf = gltf::Gltf::open(path).map_err(|e| ModelError::asset_load(path, e))?;
    Ok(convert_document(&gltf.document, path, format))
}

/// Parses glTF JSON or GLB bytes.
pub fn parse_gltf_slice(
    bytes: &[u8],
    path: &Path,
    format: ModelFormat,
) -> ModelResult<ExternalModelAsset> {
    let gltf = gltf::Gltf::from_slice(bytes).map_err(|e| ModelError::asset_load(path, e))?;
    Ok(convert_document(&gltf.document, path, format))
}

fn convert_document(doc: &gltf::Document, path: &Path, format: ModelFormat) -> ExternalModelAsset {
    let root_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("model")
        .to_string();
    let mut root = Part::group(root_name);

    let scene = doc.default_scene().or_else(|| doc.scenes().next());
    if let Some(scene) = scene {
        for node in scene.nodes() {
            root.push(convert_node(&node));
        }
    }

    let clips = doc.animations().map(|a| convert_animation(&a)).collect();
    let asset = ExternalModelAsset::new(path, format, PartHierarchy::new(root), clips)
        .with_skin_count(doc.skins().count());

    tracing::info!(
        path = %path.display(),
        %format,
        nodes = doc.nodes().count(),
        clips = asset.clips().len(),
        skins = asset.skin_count(),
        "decoded glTF model"
    );
    asset
}

fn convert_node(node: &gltf::Node) -> Part {
    let name = node
        .name()
        .map(str::to_string)
        .or_else(|| node.mesh().and_then(|m| m.name().map(str::to_string)))
        .unwrap_or_else(|| format!("node_{}", node.index()));

    let (t, r, s) = node.transform().decomposed();
    let transform = Transform {
        translation: Vec3::from_array(t),
        rotation: Quat::from_array(r),
        scale: Vec3::from_array(s),
    };

    let mut part = Part::group(name.clone()).with_transform(transform);

    if let Some(mesh) = node.mesh() {
        let meshes: Vec<MeshPart> = mesh.primitives().map(|p| convert_primitive(&p)).collect();
        match meshes.as_slice() {
            [single] => part.mesh = Some(*single),
            many => {
                for (i, m) in many.iter().enumerate() {
                    part.push(Part::mesh(format!("{}_{}", name, i), *m, Vec3::ZERO));
                }
            }
        }
    }

    for child in node.children() {
        part.push(convert_node(&child));
    }
    part
}

fn convert_primitive(primitive: &gltf::Primitive) -> MeshPart {
    let positions = primitive.get(&gltf::Semantic::Positions);
    let bounds = positions
        .as_ref()
        .and_then(|a| Some(Aabb::new(read_vec3(a.min()?)?, read_vec3(a.max()?)?)))
        .unwrap_or(Aabb::EMPTY);
    let vertex_count = positions.as_ref().map(|a| a.count()).unwrap_or(0);
    let triangle_count = match primitive.indices() {
        Some(indices) => indices.count() / 3,
        None => vertex_count / 3,
    };

    let [r, g, b, _] = primitive
        .material()
        .pbr_metallic_roughness()
        .base_color_factor();

    MeshPart {
        geometry: Geometry::Mesh {
            bounds,
            vertex_count: vertex_count as u32,
            triangle_count: triangle_count as u32,
        },
        material: Material {
            color: Rgb::from_unit([r, g, b]),
            kind: MaterialKind::Standard,
        },
        casts_shadow: false,
        receives_shadow: false,
    }
}

fn read_vec3(value: serde_json::Value) -> Option<Vec3> {
    let arr = value.as_array()?;
    if arr.len() < 3 {
        return None;
    }
    Some(Vec3::new(
        arr[0].as_f64()? as f32,
        arr[1].as_f64()? as f32,
        arr[2].as_f64()? as f32,
    ))
}

fn convert_animation(animation: &gltf::Animation) -> AnimationClip {
    let mut duration = 0.0f32;
    for channel in animation.channels() {
        let input = channel.sampler().input();
        if let Some(t) = input
            .max()
            .and_then(|m| m.as_array().and_then(|v| v.first().and_then(|t| t.as_f64())))
        {
            duration = duration.max(t as f32);
        }
    }
    AnimationClip {
        name: animation
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("clip_{}", animation.index())),
        duration_secs: duration,
    }
}
