//! Unit cube centered on the origin, 36 non-indexed vertices with outward
//! face normals.

use crate::types::CubeVertex;

const fn v(position: [f32; 3], normal: [f32; 3]) -> CubeVertex {
    CubeVertex { position, normal }
}

const XP: [f32; 3] = [1.0, 0.0, 0.0];
const XN: [f32; 3] = [-1.0, 0.0, 0.0];
const YP: [f32; 3] = [0.0, 1.0, 0.0];
const YN: [f32; 3] = [0.0, -1.0, 0.0];
const ZP: [f32; 3] = [0.0, 0.0, 1.0];
const ZN: [f32; 3] = [0.0, 0.0, -1.0];

/// Number of vertices in [`CUBE_VERTICES`].
pub const CUBE_VERTEX_COUNT: usize = 36;

/// Twelve triangles, two per face.
pub const CUBE_VERTICES: [CubeVertex; CUBE_VERTEX_COUNT] = [
    // +X
    v([0.5, -0.5, -0.5], XP),
    v([0.5, 0.5, -0.5], XP),
    v([0.5, 0.5, 0.5], XP),
    v([0.5, -0.5, -0.5], XP),
    v([0.5, 0.5, 0.5], XP),
    v([0.5, -0.5, 0.5], XP),
    // -X
    v([-0.5, -0.5, -0.5], XN),
    v([-0.5, 0.5, 0.5], XN),
    v([-0.5, 0.5, -0.5], XN),
    v([-0.5, -0.5, -0.5], XN),
    v([-0.5, -0.5, 0.5], XN),
    v([-0.5, 0.5, 0.5], XN),
    // +Y
    v([-0.5, 0.5, -0.5], YP),
    v([0.5, 0.5, 0.5], YP),
    v([0.5, 0.5, -0.5], YP),
    v([-0.5, 0.5, -0.5], YP),
    v([-0.5, 0.5, 0.5], YP),
    v([0.5, 0.5, 0.5], YP),
    // -Y
    v([-0.5, -0.5, -0.5], YN),
    v([0.5, -0.5, -0.5], YN),
    v([0.5, -0.5, 0.5], YN),
    v([-0.5, -0.5, -0.5], YN),
    v([0.5, -0.5, 0.5], YN),
    v([-0.5, -0.5, 0.5], YN),
    // +Z
    v([-0.5, -0.5, 0.5], ZP),
    v([0.5, 0.5, 0.5], ZP),
    v([-0.5, 0.5, 0.5], ZP),
    v([-0.5, -0.5, 0.5], ZP),
    v([0.5, -0.5, 0.5], ZP),
    v([0.5, 0.5, 0.5], ZP),
    // -Z
    v([-0.5, -0.5, -0.5], ZN),
    v([0.5, 0.5, -0.5], ZN),
    v([0.5, -0.5, -0.5], ZN),
    v([-0.5, -0.5, -0.5], ZN),
    v([-0.5, 0.5, -0.5], ZN),
    v([0.5, 0.5, -0.5], ZN),
];

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn every_vertex_lies_on_its_face() {
        for vertex in CUBE_VERTICES {
            let p = Vec3::from(vertex.position);
            let n = Vec3::from(vertex.normal);
            assert!((n.length() - 1.0).abs() < f32::EPSILON);
            assert!((p.dot(n) - 0.5).abs() < f32::EPSILON, "{vertex:?}");
        }
    }

    #[test]
    fn six_vertices_per_face() {
        for normal in [XP, XN, YP, YN, ZP, ZN] {
            let count = CUBE_VERTICES.iter().filter(|v| v.normal == normal).count();
            assert_eq!(count, 6);
        }
    }

    #[test]
    fn triangles_are_non_degenerate() {
        for tri in CUBE_VERTICES.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|i| Vec3::from(tri[i].position));
            let area = (b - a).cross(c - a).length() / 2.0;
            assert!((area - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn fits_the_byte_layout() {
        let bytes: &[u8] = bytemuck::cast_slice(&CUBE_VERTICES);
        assert_eq!(bytes.len(), CUBE_VERTEX_COUNT * 6 * 4);
    }
}
