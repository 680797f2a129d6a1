//! Polygon meshes and the operations the generator runs on them
//!
//! A [`Mesh`] stores positions in object space plus faces as vertex loops
//! wound counter-clockwise when seen from outside. Faces may be triangles,
//! quads or larger polygons, and are exported as-is.

pub mod export;
pub mod modifiers;
pub mod sphere;

pub use modifiers::{Displace, MeshApply, MeshModifier, Subdivide};
pub use sphere::uv_sphere;

use crate::math::AABB;
use glam::Vec3;
use std::collections::HashSet;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub faces: Vec<Vec<u32>>,
}

impl Mesh {
    pub fn new(positions: Vec<Vec3>, faces: Vec<Vec<u32>>) -> Self {
        Self { positions, faces }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of distinct undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    pub fn edges(&self) -> HashSet<(u32, u32)> {
        self.faces
            .iter()
            .flat_map(|face| {
                face.iter()
                    .zip(face.iter().cycle().skip(1))
                    .map(|(&a, &b)| edge_key(a, b))
            })
            .collect()
    }

    pub fn bounds(&self) -> Option<AABB> {
        AABB::from_points(&self.positions)
    }

    /// True when every face index refers to an existing vertex
    pub fn indices_valid(&self) -> bool {
        let count = self.positions.len() as u32;
        self.faces.iter().flatten().all(|&i| i < count)
    }

    /// Euler characteristic V - E + F (2 for a closed sphere-like mesh)
    pub fn euler_characteristic(&self) -> i64 {
        self.vertex_count() as i64 - self.edge_count() as i64 + self.face_count() as i64
    }
}

/// Undirected edge key with the smaller index first
pub(crate) fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        Mesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3]],
        )
    }

    #[test]
    fn test_counts() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.edge_count(), 4);
    }

    #[test]
    fn test_bounds() {
        let bounds = quad().bounds().unwrap();
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 0.0));
        assert!(Mesh::default().bounds().is_none());
    }

    #[test]
    fn test_indices_valid() {
        let mut mesh = quad();
        assert!(mesh.indices_valid());
        mesh.faces.push(vec![0, 1, 9]);
        assert!(!mesh.indices_valid());
    }
}
