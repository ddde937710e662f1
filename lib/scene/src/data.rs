//! # See Also
//!
//! * [mygeo::source] for the traits implemented here

mod geometry;
use std::collections::HashMap;

pub use geometry::*;

use mygeo::source::{SceneGraph, SourceNode};
use nalgebra::Matrix4;

use crate::Error;

/// A tree of nodes, each with geometry and an optional local transform.
///
/// Nodes are addressed by slash-separated paths built from their ancestors' names, e.g.
/// `/obj/box`.
#[derive(Debug, Default)]
pub struct Scene {
    pub(crate) names: HashMap<String, usize>,
    pub(crate) nodes: Vec<Node>,
    /// Emptied slots are transforms that have been cleared; nodes referencing them have no
    /// world transform.
    pub(crate) transforms: Vec<Option<Matrix4<f32>>>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum NodeParent {
    Root,
    Node(usize),
}

#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    path: String,
    parent: NodeParent,
    children: Vec<usize>,
    /// Local transform, relative to the parent. Identity if unset.
    transform: Option<usize>,
    geometry: Geometry,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn parent(&self) -> NodeParent {
        self.parent
    }

    pub fn children(&self) -> &[usize] {
        &self.children
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }
}

impl Scene {
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Store a transform, returning its index.
    pub fn add_transform(&mut self, transform: Matrix4<f32>) -> usize {
        self.transforms.push(Some(transform));
        self.transforms.len() - 1
    }

    /// Drop a stored transform. Nodes still referencing it lose their world transform.
    pub fn clear_transform(&mut self, index: usize) -> Result<Matrix4<f32>, Error> {
        self.transforms
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(Error::InvalidTransform(index))
    }

    /// Add a node beneath `parent`, returning its index.
    pub fn add_node(
        &mut self,
        parent: NodeParent,
        name: &str,
        transform: Option<usize>,
        geometry: Geometry,
    ) -> Result<usize, Error> {
        if name.is_empty() || name.contains('/') {
            return Err(Error::InvalidName(name.to_owned()));
        }
        let path = match parent {
            NodeParent::Root => format!("/{name}"),
            NodeParent::Node(p) => {
                let parent = self.nodes.get(p).ok_or(Error::InvalidNode(p))?;
                format!("{}/{name}", parent.path)
            }
        };
        if self.names.contains_key(&path) {
            return Err(Error::DuplicatePath(path));
        }
        if let Some(t) = transform {
            if t >= self.transforms.len() {
                return Err(Error::InvalidTransform(t));
            }
        }

        let index = self.nodes.len();
        if let NodeParent::Node(p) = parent {
            self.nodes[p].children.push(index);
        }
        tracing::trace!(index, path = %path, "adding scene node");
        self.names.insert(path.clone(), index);
        self.nodes.push(Node {
            name: name.to_owned(),
            path,
            parent,
            children: Vec::new(),
            transform,
            geometry,
        });
        Ok(index)
    }

    /// Set (or, with `None`, unset) the local transform of a node.
    pub fn set_node_transform(
        &mut self,
        node: usize,
        transform: Option<usize>,
    ) -> Result<(), Error> {
        if let Some(t) = transform {
            if t >= self.transforms.len() {
                return Err(Error::InvalidTransform(t));
            }
        }
        self.nodes
            .get_mut(node)
            .ok_or(Error::InvalidNode(node))?
            .transform = transform;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    /// The index of the node at `path`.
    pub fn find(&self, path: &str) -> Option<usize> {
        self.names.get(path).copied()
    }

    /// Iterate through all nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// The product of local transforms from the root down to `index`, or `None` if any of them
    /// has been cleared.
    pub fn world_transform(&self, mut index: usize) -> Option<Matrix4<f32>> {
        let mut world = Matrix4::identity();
        loop {
            let node = self.nodes.get(index)?;
            if let Some(t) = node.transform {
                world = (*self.transforms.get(t)?.as_ref()?) * world;
            }
            match node.parent {
                NodeParent::Root => break Some(world),
                NodeParent::Node(p) => index = p,
            }
        }
    }
}

/// A borrowed [Node] together with the [Scene] it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'s> {
    scene: &'s Scene,
    index: usize,
}

impl<'s> NodeRef<'s> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn node(&self) -> &'s Node {
        &self.scene.nodes[self.index]
    }
}

impl SourceNode for NodeRef<'_> {
    type Geometry = Geometry;

    fn geometry(&self) -> &Geometry {
        &self.node().geometry
    }

    fn world_transform(&self) -> Option<Matrix4<f32>> {
        self.scene.world_transform(self.index)
    }
}

impl SceneGraph for Scene {
    type Node<'s> = NodeRef<'s>;

    fn node(&self, path: &str) -> Option<NodeRef<'_>> {
        self.find(path).map(|index| NodeRef { scene: self, index })
    }
}
