use std::{collections::HashMap, ops::Range};

use mygeo::{
    source::{AttribClass, Attribute, GeometrySource, Vertex},
    Position,
};

use crate::Error;

/// Points, polygons built from ordered vertices, and named point/vertex attributes.
///
/// Vertices are numbered geometry-wide in the order primitives are added, so a primitive's
/// corners always occupy a contiguous run of vertex numbers.
#[derive(Debug, Default, Clone)]
pub struct Geometry {
    points: Vec<Position>,
    vertices: Vec<Vertex>,
    primitives: Vec<Range<usize>>,
    point_attribs: HashMap<String, Attribute>,
    vertex_attribs: HashMap<String, Attribute>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_points(points: Vec<Position>) -> Self {
        Self {
            points,
            ..Default::default()
        }
    }

    /// Add a point, returning its number.
    pub fn add_point(&mut self, p: Position) -> u32 {
        self.points.push(p);
        (self.points.len() - 1) as u32
    }

    /// Add a polygon whose corners reference `points`, in order, returning the primitive number.
    pub fn add_primitive(&mut self, points: &[u32]) -> Result<usize, Error> {
        if let Some(&index) = points
            .iter()
            .find(|&&p| p as usize >= self.points.len())
        {
            return Err(Error::PointOutOfRange {
                index,
                point_count: self.points.len(),
            });
        }
        let start = self.vertices.len();
        self.vertices
            .extend(points.iter().enumerate().map(|(i, &point)| Vertex {
                number: (start + i) as u32,
                point,
            }));
        self.primitives.push(start..self.vertices.len());
        Ok(self.primitives.len() - 1)
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Attach an attribute, replacing any existing attribute of the same class and name.
    ///
    /// The attribute must hold exactly one tuple per point (or per vertex).
    pub fn set_attribute(
        &mut self,
        class: AttribClass,
        name: &str,
        attribute: Attribute,
    ) -> Result<Option<Attribute>, Error> {
        let expected = match class {
            AttribClass::Point => self.points.len(),
            AttribClass::Vertex => self.vertices.len(),
        };
        if attribute.len() != expected {
            return Err(Error::AttributeLength {
                class,
                name: name.to_owned(),
                expected,
                actual: attribute.len(),
            });
        }
        let map = match class {
            AttribClass::Point => &mut self.point_attribs,
            AttribClass::Vertex => &mut self.vertex_attribs,
        };
        Ok(map.insert(name.to_owned(), attribute))
    }

    pub fn remove_attribute(&mut self, class: AttribClass, name: &str) -> Option<Attribute> {
        match class {
            AttribClass::Point => self.point_attribs.remove(name),
            AttribClass::Vertex => self.vertex_attribs.remove(name),
        }
    }
}

impl GeometrySource for Geometry {
    fn points(&self) -> &[Position] {
        &self.points
    }

    fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    fn vertices(&self, prim: usize) -> &[Vertex] {
        &self.vertices[self.primitives[prim].clone()]
    }

    fn attribute(&self, class: AttribClass, name: &str) -> Option<&Attribute> {
        match class {
            AttribClass::Point => self.point_attribs.get(name),
            AttribClass::Vertex => self.vertex_attribs.get(name),
        }
    }
}
