//! UV sphere tessellation

use super::Mesh;
use crate::generator::{MAX_RINGS, MAX_SEGMENTS};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Creates a closed UV sphere centered at the origin, Z up.
///
/// Vertex layout: top pole, then `rings - 1` latitude rings of `segments`
/// vertices each, then the bottom pole. The longitude seam is welded so the
/// mesh is manifold. Faces are quads between rings and triangle fans at
/// the poles.
///
/// `segments` is clamped to `3..=MAX_SEGMENTS` and `rings` to
/// `2..=MAX_RINGS`.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Mesh {
    let segments = segments.clamp(3, MAX_SEGMENTS);
    let rings = rings.clamp(2, MAX_RINGS);

    let mut positions = Vec::with_capacity((2 + (rings - 1) * segments) as usize);
    positions.push(Vec3::new(0.0, 0.0, radius));
    for ring in 1..rings {
        let phi = PI * ring as f32 / rings as f32;
        for segment in 0..segments {
            let theta = TAU * segment as f32 / segments as f32;
            positions.push(
                Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos()) * radius,
            );
        }
    }
    positions.push(Vec3::new(0.0, 0.0, -radius));

    let bottom = positions.len() as u32 - 1;
    let ring_vertex = |ring: u32, segment: u32| 1 + (ring - 1) * segments + segment % segments;

    let mut faces = Vec::with_capacity((segments * rings) as usize);
    for segment in 0..segments {
        faces.push(vec![0, ring_vertex(1, segment), ring_vertex(1, segment + 1)]);
    }
    for ring in 1..rings - 1 {
        for segment in 0..segments {
            faces.push(vec![
                ring_vertex(ring, segment),
                ring_vertex(ring + 1, segment),
                ring_vertex(ring + 1, segment + 1),
                ring_vertex(ring, segment + 1),
            ]);
        }
    }
    for segment in 0..segments {
        faces.push(vec![
            bottom,
            ring_vertex(rings - 1, segment + 1),
            ring_vertex(rings - 1, segment),
        ]);
    }

    Mesh::new(positions, faces)
}
