//! UV sphere tessellation

use std::f32::consts::{PI, TAU};

use super::GeometryError;

/// Unit-radius UV sphere centered at the origin
///
/// Vertices form a `(latitude + 1) × (longitude + 1)` grid; the seam column is
/// duplicated so texture coordinates stay continuous.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereGeometry {
    /// Vertex positions, xyz each
    pub positions: Vec<f32>,

    /// Texture coordinates, one uv pair per vertex
    pub texture_uv: Vec<f32>,

    /// Triangle indices
    pub triangles: Vec<u16>,
}

impl SphereGeometry {
    /// Tessellate a sphere with the given latitude and longitude segment counts
    pub fn new(latitude_segments: u32, longitude_segments: u32) -> Result<Self, GeometryError> {
        if latitude_segments < 2 || longitude_segments < 3 {
            return Err(GeometryError::InvalidGeometry(format!(
                "sphere needs at least 2x3 segments, got {latitude_segments}x{longitude_segments}"
            )));
        }

        let rows = latitude_segments as usize + 1;
        let columns = longitude_segments as usize + 1;
        if rows * columns > usize::from(u16::MAX) + 1 {
            return Err(GeometryError::InvalidGeometry(format!(
                "{latitude_segments}x{longitude_segments} sphere exceeds 16-bit indices"
            )));
        }

        let mut positions = Vec::with_capacity(rows * columns * 3);
        let mut texture_uv = Vec::with_capacity(rows * columns * 2);
        for row in 0..rows {
            let v = row as f32 / latitude_segments as f32;
            let theta = v * PI;
            for column in 0..columns {
                let u = column as f32 / longitude_segments as f32;
                let phi = u * TAU;
                positions.extend_from_slice(&[
                    theta.sin() * phi.cos(),
                    theta.cos(),
                    theta.sin() * phi.sin(),
                ]);
                texture_uv.extend_from_slice(&[u, 1.0 - v]);
            }
        }

        let mut triangles = Vec::with_capacity(latitude_segments as usize * longitude_segments as usize * 6);
        for row in 0..latitude_segments as usize {
            for column in 0..longitude_segments as usize {
                let a = (row * columns + column) as u16;
                let b = a + columns as u16;
                triangles.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }

        Ok(Self { positions, texture_uv, triangles })
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_counts() {
        let sphere = SphereGeometry::new(20, 20).unwrap();
        assert_eq!(sphere.vertex_count(), 21 * 21);
        assert_eq!(sphere.texture_uv.len(), 21 * 21 * 2);
        assert_eq!(sphere.triangles.len(), 20 * 20 * 6);
        for &idx in &sphere.triangles {
            assert!((idx as usize) < sphere.vertex_count());
        }
    }

    #[test]
    fn test_sphere_vertices_on_unit_radius() {
        let sphere = SphereGeometry::new(10, 10).unwrap();
        for vertex in sphere.positions.chunks(3) {
            let length = (vertex[0] * vertex[0] + vertex[1] * vertex[1] + vertex[2] * vertex[2]).sqrt();
            assert_relative_eq!(length, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_sphere_rejects_degenerate_tessellation() {
        assert!(SphereGeometry::new(1, 10).is_err());
        assert!(SphereGeometry::new(10, 2).is_err());
        assert!(SphereGeometry::new(300, 300).is_err());
    }
}
