//! Utilities for loading Wavefront OBJ files as a [Scene].
//!
//! # Notes
//!
//! * Every OBJ object becomes a child of a single root node named [ROOT_NODE], so the first
//!   object of `box.obj` is found at `/obj/<object name>`.
//! * Faces are kept as polygons; nothing is triangulated.
//! * Texture coordinates become a per-vertex `"uv"` attribute when the file indexes them per
//!   face corner, and a per-point `"uv"` attribute when they line up one-to-one with positions.
//! * Materials and normals are ignored.
//!
//! # See Also
//!
//! * [tobj](https://docs.rs/tobj)

use std::{collections::HashSet, path::Path};

use mygeo::{
    source::{AttribClass, Attribute, UV_ATTRIBUTE},
    Position,
};

use crate::{Error, Geometry, NodeParent, Scene};

/// Name of the node under which OBJ objects are placed.
pub const ROOT_NODE: &str = "obj";

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Load the OBJ file at `path`.
#[tracing::instrument(skip_all, fields(path = ?path.as_ref()))]
pub fn load(path: impl AsRef<Path>) -> Result<Scene, Error> {
    let (models, _materials) = tobj::load_obj(path.as_ref(), &load_options())?;
    tracing::debug!(models = models.len(), "loaded OBJ");
    from_models(&models)
}

/// Build a scene from already-loaded OBJ models.
pub fn from_models(models: &[tobj::Model]) -> Result<Scene, Error> {
    let mut scene = Scene::empty();
    let root = scene.add_node(NodeParent::Root, ROOT_NODE, None, Geometry::new())?;
    let mut used = HashSet::new();
    for (i, model) in models.iter().enumerate() {
        let name = node_name(&model.name, i, &mut used);
        scene.add_node(NodeParent::Node(root), &name, None, geometry(&model.mesh)?)?;
    }
    Ok(scene)
}

/// A unique node name for an OBJ object, which may be unnamed or share its name.
fn node_name(raw: &str, i: usize, used: &mut HashSet<String>) -> String {
    let mut name = raw.trim().replace('/', "_");
    if name.is_empty() {
        name = format!("object{i}");
    }
    if !used.insert(name.clone()) {
        name = format!("{name}_{i}");
        used.insert(name.clone());
    }
    name
}

fn texcoord(texcoords: &[f32], index: usize) -> [f32; 2] {
    [
        texcoords.get(2 * index).copied().unwrap_or(0.0),
        texcoords.get(2 * index + 1).copied().unwrap_or(0.0),
    ]
}

fn geometry(mesh: &tobj::Mesh) -> Result<Geometry, Error> {
    let mut geo = Geometry::with_points(
        mesh.positions
            .chunks_exact(3)
            .map(|p| Position::new(p[0], p[1], p[2]))
            .collect(),
    );

    // an empty arity list means every face is a triangle
    if mesh.face_arities.is_empty() {
        for tri in mesh.indices.chunks_exact(3) {
            geo.add_primitive(tri)?;
        }
    } else {
        let mut offset = 0;
        for &arity in &mesh.face_arities {
            let end = offset + arity as usize;
            let Some(corners) = mesh.indices.get(offset..end) else {
                tracing::warn!(offset, arity, "OBJ face runs past the index list; skipping the rest");
                break;
            };
            geo.add_primitive(corners)?;
            offset = end;
        }
    }

    if !mesh.texcoord_indices.is_empty() {
        let values = mesh
            .texcoord_indices
            .iter()
            .take(geo.vertex_count())
            .flat_map(|&t| texcoord(&mesh.texcoords, t as usize))
            .collect();
        geo.set_attribute(AttribClass::Vertex, UV_ATTRIBUTE, Attribute::new(2, values))?;
    } else if !mesh.texcoords.is_empty() && mesh.texcoords.len() == 2 * geo.point_count() {
        geo.set_attribute(
            AttribClass::Point,
            UV_ATTRIBUTE,
            Attribute::new(2, mesh.texcoords.clone()),
        )?;
    }
    Ok(geo)
}
