//! Mesh modifiers
//!
//! Modifiers transform a [`Mesh`] in place. They are applied once and
//! baked: nothing stays attached to the mesh afterwards.
//!
//! ```no_run
//! use meatball_gen::mesh::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand_pcg::Pcg64::seed_from_u64(1);
//! let mut mesh = uv_sphere(2.0, 32, 32);
//! mesh.apply(Displace::new(0.1, &mut rng))?
//!     .apply(Subdivide { iterations: 2 })?;
//! # Ok::<(), meatball_gen::MeatballError>(())
//! ```

use super::{edge_key, Mesh};
use crate::error::{MeatballError, Result};
use crate::math::Interval;
use glam::Vec3;
use rand::Rng;
use std::collections::HashMap;

/// A destructive in-place mesh operation
pub trait MeshModifier {
    fn apply(self, mesh: &mut Mesh) -> Result<()>;
}

/// Chainable modifier application
pub trait MeshApply {
    fn apply<M: MeshModifier>(&mut self, modifier: M) -> Result<&mut Self>;
}

impl MeshApply for Mesh {
    fn apply<M: MeshModifier>(&mut self, modifier: M) -> Result<&mut Self> {
        modifier.apply(self)?;
        Ok(self)
    }
}

/// Offsets every vertex by an independent random vector whose components
/// are uniform in `[-factor, factor]`.
///
/// Offsets are not renormalised, so the local radius of a sphere changes
/// unevenly from vertex to vertex.
pub struct Displace<'r, R: Rng> {
    pub factor: f32,
    pub rng: &'r mut R,
}

impl<'r, R: Rng> Displace<'r, R> {
    pub fn new(factor: f32, rng: &'r mut R) -> Self {
        Self { factor, rng }
    }
}

impl<R: Rng> MeshModifier for Displace<'_, R> {
    fn apply(self, mesh: &mut Mesh) -> Result<()> {
        if !(self.factor.is_finite() && self.factor >= 0.0) {
            return Err(MeatballError::InvalidSpec(format!(
                "distortion factor must be finite and >= 0, got {}",
                self.factor
            )));
        }
        let Displace { factor, rng } = self;
        let range = Interval::symmetric(factor);
        for position in &mut mesh.positions {
            *position += range.sample_vec3(&mut *rng);
        }
        Ok(())
    }
}

/// Catmull-Clark subdivision surface, applied `iterations` times.
///
/// Every pass turns an n-sided face into n quads. Open edges follow the
/// crease rules (edge point at the midpoint, boundary vertex from its two
/// boundary neighbours). Edges shared by more than two faces are rejected.
#[derive(Debug, Clone, Copy)]
pub struct Subdivide {
    pub iterations: u32,
}

impl Default for Subdivide {
    fn default() -> Self {
        Self { iterations: 2 }
    }
}

impl MeshModifier for Subdivide {
    fn apply(self, mesh: &mut Mesh) -> Result<()> {
        for _ in 0..self.iterations {
            *mesh = subdivide_once(mesh)?;
        }
        Ok(())
    }
}

struct Edge {
    a: u32,
    b: u32,
    faces: Vec<usize>,
}

impl Edge {
    fn is_boundary(&self) -> bool {
        self.faces.len() == 1
    }
}

/// Perform a single Catmull-Clark pass
fn subdivide_once(mesh: &Mesh) -> Result<Mesh> {
    let vertex_count = mesh.positions.len();

    for face in &mesh.faces {
        if face.len() < 3 {
            return Err(MeatballError::Geometry(format!(
                "face with {} vertices",
                face.len()
            )));
        }
    }
    if !mesh.indices_valid() {
        return Err(MeatballError::Geometry(
            "face index out of range".to_string(),
        ));
    }

    // Edges are numbered in first-seen order so output is deterministic
    let mut edges: Vec<Edge> = Vec::new();
    let mut edge_index: HashMap<(u32, u32), usize> = HashMap::new();
    for (face_idx, face) in mesh.faces.iter().enumerate() {
        for (&a, &b) in face.iter().zip(face.iter().cycle().skip(1)) {
            let key = edge_key(a, b);
            let idx = *edge_index.entry(key).or_insert_with(|| {
                edges.push(Edge {
                    a: key.0,
                    b: key.1,
                    faces: Vec::new(),
                });
                edges.len() - 1
            });
            edges[idx].faces.push(face_idx);
        }
    }

    if let Some(edge) = edges.iter().find(|e| e.faces.len() > 2) {
        return Err(MeatballError::Geometry(format!(
            "non-manifold edge ({}, {}) shared by {} faces",
            edge.a,
            edge.b,
            edge.faces.len()
        )));
    }

    let face_points: Vec<Vec3> = mesh
        .faces
        .iter()
        .map(|face| {
            face.iter()
                .map(|&i| mesh.positions[i as usize])
                .sum::<Vec3>()
                / face.len() as f32
        })
        .collect();

    let edge_points: Vec<Vec3> = edges
        .iter()
        .map(|edge| {
            let pa = mesh.positions[edge.a as usize];
            let pb = mesh.positions[edge.b as usize];
            if edge.is_boundary() {
                (pa + pb) * 0.5
            } else {
                (pa + pb + face_points[edge.faces[0]] + face_points[edge.faces[1]]) * 0.25
            }
        })
        .collect();

    let mut face_sum = vec![Vec3::ZERO; vertex_count];
    let mut face_n = vec![0u32; vertex_count];
    for (face, &point) in mesh.faces.iter().zip(&face_points) {
        for &v in face {
            face_sum[v as usize] += point;
            face_n[v as usize] += 1;
        }
    }

    let mut mid_sum = vec![Vec3::ZERO; vertex_count];
    let mut mid_n = vec![0u32; vertex_count];
    let mut boundary_neighbours: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];
    for edge in &edges {
        let mid = (mesh.positions[edge.a as usize] + mesh.positions[edge.b as usize]) * 0.5;
        for (v, other) in [(edge.a, edge.b), (edge.b, edge.a)] {
            mid_sum[v as usize] += mid;
            mid_n[v as usize] += 1;
            if edge.is_boundary() {
                boundary_neighbours[v as usize].push(other);
            }
        }
    }

    let mut positions = Vec::with_capacity(vertex_count + face_points.len() + edge_points.len());
    for (v, &p) in mesh.positions.iter().enumerate() {
        let boundary = &boundary_neighbours[v];
        let moved = match boundary.len() {
            2 => {
                let n0 = mesh.positions[boundary[0] as usize];
                let n1 = mesh.positions[boundary[1] as usize];
                p * 0.75 + (n0 + n1) * 0.125
            }
            0 if face_n[v] > 0 => {
                let n = face_n[v] as f32;
                let f = face_sum[v] / n;
                let r = mid_sum[v] / mid_n[v] as f32;
                (f + 2.0 * r + (n - 3.0) * p) / n
            }
            // isolated, or a border vertex that is not a simple crease: pinned
            _ => p,
        };
        positions.push(moved);
    }
    positions.extend_from_slice(&face_points);
    positions.extend_from_slice(&edge_points);

    let face_base = vertex_count as u32;
    let edge_base = face_base + face_points.len() as u32;
    let edge_vertex = |a: u32, b: u32| edge_base + edge_index[&edge_key(a, b)] as u32;

    let mut faces = Vec::with_capacity(mesh.faces.iter().map(Vec::len).sum());
    for (face_idx, face) in mesh.faces.iter().enumerate() {
        let k = face.len();
        let center = face_base + face_idx as u32;
        for i in 0..k {
            let prev = face[(i + k - 1) % k];
            let cur = face[i];
            let next = face[(i + 1) % k];
            faces.push(vec![cur, edge_vertex(cur, next), center, edge_vertex(prev, cur)]);
        }
    }

    Ok(Mesh::new(positions, faces))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::uv_sphere;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn cube() -> Mesh {
        let positions = vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ];
        let faces = vec![
            vec![0, 3, 2, 1],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![1, 2, 6, 5],
            vec![2, 3, 7, 6],
            vec![3, 0, 4, 7],
        ];
        Mesh::new(positions, faces)
    }

    #[test]
    fn test_displace_bounded_per_axis() {
        let mut rng = Pcg64::seed_from_u64(3);
        let original = uv_sphere(2.0, 16, 16);
        let mut mesh = original.clone();
        mesh.apply(Displace::new(0.1, &mut rng)).unwrap();

        assert_eq!(mesh.vertex_count(), original.vertex_count());
        for (moved, ideal) in mesh.positions.iter().zip(&original.positions) {
            let delta = (*moved - *ideal).abs();
            assert!(delta.max_element() <= 0.1 + 1e-6);
        }
        assert_ne!(mesh.positions, original.positions);
    }

    #[test]
    fn test_displace_zero_factor_is_identity() {
        let mut rng = Pcg64::seed_from_u64(3);
        let original = uv_sphere(1.0, 8, 8);
        let mut mesh = original.clone();
        mesh.apply(Displace::new(0.0, &mut rng)).unwrap();
        assert_eq!(mesh, original);
    }

    #[test]
    fn test_displace_rejects_negative_factor() {
        let mut rng = Pcg64::seed_from_u64(3);
        let mut mesh = uv_sphere(1.0, 8, 8);
        let result = mesh.apply(Displace::new(-0.5, &mut rng));
        assert!(matches!(result, Err(MeatballError::InvalidSpec(_))));
    }

    #[test]
    fn test_subdivide_cube_counts() {
        let mut mesh = cube();
        mesh.apply(Subdivide { iterations: 1 }).unwrap();
        // V + F + E = 8 + 6 + 12
        assert_eq!(mesh.vertex_count(), 26);
        assert_eq!(mesh.face_count(), 24);
        assert!(mesh.faces.iter().all(|f| f.len() == 4));
        assert_eq!(mesh.euler_characteristic(), 2);
    }

    #[test]
    fn test_subdivide_cube_corner_position() {
        let mut mesh = cube();
        mesh.apply(Subdivide { iterations: 1 }).unwrap();
        // Valence-3 cube corner moves to 5/9 of its distance on each axis
        let corner = mesh.positions[6];
        assert!((corner - Vec3::splat(5.0 / 9.0)).length() < 1e-5);
    }

    #[test]
    fn test_subdivide_shrinks_toward_limit_surface() {
        let mut mesh = cube();
        mesh.apply(Subdivide { iterations: 2 }).unwrap();
        let bounds = mesh.bounds().unwrap();
        assert!(bounds.max.max_element() < 1.0);
        assert!(bounds.min.min_element() > -1.0);
    }

    #[test]
    fn test_subdivide_sphere_twice() {
        let mut mesh = uv_sphere(1.0, 32, 32);
        let (v, e, f) = (mesh.vertex_count(), mesh.edge_count(), mesh.face_count());
        mesh.apply(Subdivide::default()).unwrap();

        let v1 = v + e + f;
        let f1: usize = 32 * 30 * 4 + 64 * 3;
        assert_eq!(f1, 4032);
        assert_eq!(mesh.face_count(), f1 * 4);
        assert!(mesh.vertex_count() > v1);
        assert_eq!(mesh.euler_characteristic(), 2);
        assert!(mesh.indices_valid());
    }

    #[test]
    fn test_subdivide_open_quad() {
        let mut mesh = Mesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(2.0, 2.0, 0.0),
                Vec3::new(0.0, 2.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3]],
        );
        mesh.apply(Subdivide { iterations: 1 }).unwrap();
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.face_count(), 4);
        // corner follows the crease rule, the face point sits in the middle
        assert!((mesh.positions[0] - Vec3::new(0.25, 0.25, 0.0)).length() < 1e-6);
        assert_eq!(mesh.positions[4], Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_subdivide_rejects_non_manifold_edge() {
        let mut mesh = Mesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(0.0, -1.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
            ],
            vec![vec![0, 1, 2], vec![1, 0, 3], vec![0, 1, 4]],
        );
        let result = mesh.apply(Subdivide { iterations: 1 });
        assert!(matches!(result, Err(MeatballError::Geometry(_))));
    }

    #[test]
    fn test_subdivide_zero_iterations_is_identity() {
        let mut mesh = cube();
        mesh.apply(Subdivide { iterations: 0 }).unwrap();
        assert_eq!(mesh, cube());
    }
}
