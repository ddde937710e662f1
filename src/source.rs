//! Extraction of [Meshes](Mesh) from a host scene.
//!
//! The host is modelled by three traits covering what extraction needs: looking nodes up by
//! path ([SceneGraph]), a node's world transform ([SourceNode]), and its points, primitive
//! corners, and named attributes ([GeometrySource]).

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use nalgebra::Matrix4;

use crate::{ser, Error, Flags, Mesh, Position, Primitive, Result, Space, Texcoord, UvBinding};

/// Name of the attribute read as UVs.
pub const UV_ATTRIBUTE: &str = "uv";

/// The element class an attribute is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttribClass {
    /// One value per point.
    Point,
    /// One value per vertex, i.e. per primitive corner.
    Vertex,
}

/// A named float-tuple attribute, stored flat.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    tuple_size: usize,
    values: Vec<f32>,
}

impl Attribute {
    /// # Panics
    ///
    /// * `tuple_size == 0`
    pub fn new(tuple_size: usize, values: Vec<f32>) -> Self {
        assert!(tuple_size > 0, "attribute tuple size must be non-zero");
        Self { tuple_size, values }
    }

    #[inline]
    pub fn tuple_size(&self) -> usize {
        self.tuple_size
    }

    /// The number of elements with a value.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len() / self.tuple_size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The tuple stored for `element`.
    pub fn get(&self, element: usize) -> Option<&[f32]> {
        let start = element.checked_mul(self.tuple_size)?;
        self.values.get(start..start + self.tuple_size)
    }
}

/// One corner of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vertex {
    /// Geometry-wide vertex number; indexes [AttribClass::Vertex] attributes.
    pub number: u32,
    /// The point this corner references.
    pub point: u32,
}

/// Read-only access to a node's geometry.
pub trait GeometrySource {
    /// Point positions in the node's local frame, in point-number order.
    fn points(&self) -> &[Position];
    fn primitive_count(&self) -> usize;
    /// The ordered corners of primitive `prim`.
    ///
    /// # Panics
    ///
    /// May panic if `prim >= self.primitive_count()`.
    fn vertices(&self, prim: usize) -> &[Vertex];
    fn attribute(&self, class: AttribClass, name: &str) -> Option<&Attribute>;
}

/// A scene node with geometry.
pub trait SourceNode {
    type Geometry: GeometrySource;

    fn geometry(&self) -> &Self::Geometry;
    /// The local-to-world transform, or `None` if it can't be determined.
    fn world_transform(&self) -> Option<Matrix4<f32>>;
}

/// A collection of nodes addressed by path.
pub trait SceneGraph {
    type Node<'s>: SourceNode
    where
        Self: 's;

    fn node(&self, path: &str) -> Option<Self::Node<'_>>;
}

/// Apply `m` to `p` as a position (w = 1), discarding the resulting homogeneous coordinate.
#[inline]
pub fn transform_position(m: &Matrix4<f32>, p: &Position) -> Position {
    Position::from((m * p.to_homogeneous()).xyz())
}

/// Pick the UV attribute: per-vertex `"uv"` wins over per-point `"uv"`.
fn resolve_uv<G: GeometrySource>(geo: &G) -> Option<(UvBinding, &Attribute)> {
    geo.attribute(AttribClass::Vertex, UV_ATTRIBUTE)
        .map(|a| (UvBinding::PerCorner, a))
        .or_else(|| {
            geo.attribute(AttribClass::Point, UV_ATTRIBUTE)
                .map(|a| (UvBinding::PerPoint, a))
        })
}

/// The first two components of a UV tuple; absent components read as 0.
fn uv_value(tuple: Option<&[f32]>) -> Texcoord {
    let tuple = tuple.unwrap_or(&[]);
    Texcoord::new(
        tuple.first().copied().unwrap_or(0.0),
        tuple.get(1).copied().unwrap_or(0.0),
    )
}

/// Build a [Mesh] from `node`'s geometry.
///
/// With [Space::World], positions are baked through the node's world transform. If that
/// transform is unavailable the local positions are kept and the mesh is marked
/// [Space::Object].
pub fn extract<N: SourceNode>(node: &N, space: Space) -> Mesh {
    let geo = node.geometry();

    let world = match space {
        Space::World => {
            let xf = node.world_transform();
            if xf.is_none() {
                tracing::warn!("world transform unavailable; exporting object-space positions");
            }
            xf
        }
        Space::Object => None,
    };

    let points = match &world {
        Some(m) => geo
            .points()
            .iter()
            .map(|p| transform_position(m, p))
            .collect(),
        None => geo.points().to_vec(),
    };

    let uv = resolve_uv(geo);
    let primitives = (0..geo.primitive_count())
        .map(|prim| {
            let verts = geo.vertices(prim);
            let indices = verts.iter().map(|v| v.point).collect();
            let uvs = match uv {
                Some((UvBinding::PerCorner, attr)) => verts
                    .iter()
                    .map(|v| uv_value(attr.get(v.number as usize)))
                    .collect(),
                Some((UvBinding::PerPoint, attr)) => verts
                    .iter()
                    .map(|v| uv_value(attr.get(v.point as usize)))
                    .collect(),
                None => Vec::new(),
            };
            Primitive::with_uvs(indices, uvs)
        })
        .collect();

    Mesh {
        points,
        primitives,
        uv: uv.map(|(binding, _)| binding),
        space: if world.is_some() {
            Space::World
        } else {
            Space::Object
        },
    }
}

/// Settings for [export].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExportOptions {
    /// The space positions should be written in.
    pub space: Space,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { space: Space::World }
    }
}

/// What [export] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub point_count: usize,
    pub prim_count: usize,
    /// The space actually written, which is [Space::Object] if a world transform was unavailable.
    pub space: Space,
    pub flags: Flags,
}

impl Display for ExportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MYGEO v3 exported: {} pts, {} prims -> {}",
            self.point_count,
            self.prim_count,
            self.path.display()
        )
    }
}

/// Extract the node at `node_path` and write it as MYGEO v3 to `destination`.
#[tracing::instrument(skip(scene, destination), fields(destination = ?destination.as_ref()))]
pub fn export<S: SceneGraph>(
    scene: &S,
    node_path: &str,
    destination: impl AsRef<Path>,
    options: &ExportOptions,
) -> Result<ExportSummary> {
    let node = scene
        .node(node_path)
        .ok_or_else(|| Error::NodeNotFound(node_path.to_owned()))?;
    let destination = destination.as_ref();
    if destination.as_os_str().is_empty() {
        return Err(Error::invalid_argument("destination path is required"));
    }

    let mesh = extract(&node, options.space);
    let path = ser::v3::write_file(&mesh, destination)?;
    let summary = ExportSummary {
        path,
        point_count: mesh.points.len(),
        prim_count: mesh.primitives.len(),
        space: mesh.space,
        flags: mesh.flags(),
    };
    tracing::info!(
        points = summary.point_count,
        primitives = summary.prim_count,
        space = %summary.space,
        "exported"
    );
    Ok(summary)
}
