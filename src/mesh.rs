//! Triangle mesh data and OBJ loading.
//!
//! A [`Mesh`] is immutable once built: per-vertex positions, normals and
//! optional texture coordinates, plus a flat list of triangle vertex indices.
//! Indices are 16-bit, which caps a mesh at 65536 vertices; the loader
//! rejects anything larger rather than silently truncating.

use std::error::Error;
use std::fmt;
use std::path::Path;

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// Errors produced while loading or validating a mesh.
#[derive(Debug)]
pub enum LoadError {
    /// The OBJ parser failed (missing file, malformed content).
    Obj(tobj::LoadError),
    /// The file contained no triangles.
    NoGeometry,
    /// More vertices than a 16-bit index can address.
    TooManyVertices { count: usize },
    /// The index list length is not a multiple of three.
    InvalidTriangleList { index_count: usize },
    /// A triangle references a vertex that does not exist.
    IndexOutOfBounds { index: u32, vertex_count: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj(e) => write!(f, "failed to parse OBJ file: {e}"),
            LoadError::NoGeometry => write!(f, "mesh contains no triangles"),
            LoadError::TooManyVertices { count } => {
                write!(f, "mesh has {count} vertices, more than 16-bit indices can address")
            }
            LoadError::InvalidTriangleList { index_count } => {
                write!(f, "index count {index_count} is not a multiple of 3")
            }
            LoadError::IndexOutOfBounds { index, vertex_count } => {
                write!(f, "index {index} out of bounds for {vertex_count} vertices")
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Obj(e) => Some(e),
            _ => None,
        }
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

/// An immutable triangle mesh in object space.
pub struct Mesh {
    name: String,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    indices: Vec<u16>,
}

impl Mesh {
    /// Build a mesh from raw attribute arrays, validating the index list.
    ///
    /// Normals are regenerated from face geometry when the supplied array
    /// does not line up with the positions. Texture coordinates are optional;
    /// a mismatched array is dropped rather than partially applied.
    pub fn new(
        name: impl Into<String>,
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        texcoords: Vec<Vec2>,
        indices: Vec<u16>,
    ) -> Result<Self, LoadError> {
        if indices.is_empty() {
            return Err(LoadError::NoGeometry);
        }
        if indices.len() % 3 != 0 {
            return Err(LoadError::InvalidTriangleList {
                index_count: indices.len(),
            });
        }
        if positions.len() > usize::from(u16::MAX) + 1 {
            return Err(LoadError::TooManyVertices {
                count: positions.len(),
            });
        }
        for &index in &indices {
            if usize::from(index) >= positions.len() {
                return Err(LoadError::IndexOutOfBounds {
                    index: u32::from(index),
                    vertex_count: positions.len(),
                });
            }
        }

        let normals = if normals.len() == positions.len() {
            normals
        } else {
            generate_vertex_normals(&positions, &indices)
        };
        let texcoords = if texcoords.len() == positions.len() {
            texcoords
        } else {
            Vec::new()
        };

        Ok(Self {
            name: name.into(),
            positions,
            normals,
            texcoords,
            indices,
        })
    }

    /// Load a mesh from an OBJ file.
    ///
    /// All objects/groups in the file are merged into a single mesh so one
    /// file maps to one renderable model.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let name = path
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mesh".to_string());

        let (models, _materials) = tobj::load_obj(path.as_ref(), &tobj::GPU_LOAD_OPTIONS)?;

        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut texcoords = Vec::new();
        let mut indices: Vec<u16> = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            let base = positions.len();

            for chunk in mesh.positions.chunks_exact(3) {
                positions.push(Vec3::new(chunk[0], chunk[1], chunk[2]));
            }
            for chunk in mesh.normals.chunks_exact(3) {
                normals.push(Vec3::new(chunk[0], chunk[1], chunk[2]));
            }
            for chunk in mesh.texcoords.chunks_exact(2) {
                texcoords.push(Vec2::new(chunk[0], chunk[1]));
            }

            if positions.len() > usize::from(u16::MAX) + 1 {
                return Err(LoadError::TooManyVertices {
                    count: positions.len(),
                });
            }
            for &index in &mesh.indices {
                let global = index as usize + base;
                if global >= positions.len() {
                    return Err(LoadError::IndexOutOfBounds {
                        index,
                        vertex_count: positions.len(),
                    });
                }
                indices.push(global as u16);
            }
        }

        Self::new(name, positions, normals, texcoords, indices)
    }

    /// A unit square in the z=0 plane, facing +z, with texture coordinates.
    pub fn unit_quad() -> Self {
        let positions = vec![
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
        ];
        let normals = vec![Vec3::FORWARD; 4];
        let texcoords = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let indices = vec![0, 1, 2, 0, 2, 3];
        Self::new("quad", positions, normals, texcoords, indices)
            .expect("built-in quad is valid")
    }

    /// A 2x2x2 cube centered on the origin, faces wound counter-clockwise
    /// when seen from outside.
    pub fn cube() -> Self {
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
        let normals = positions.iter().map(|p| p.normalize()).collect();
        #[rustfmt::skip]
        let indices = vec![
            4, 5, 6,  4, 6, 7, // front (+z)
            1, 0, 3,  1, 3, 2, // back (-z)
            0, 4, 7,  0, 7, 3, // left (-x)
            5, 1, 2,  5, 2, 6, // right (+x)
            7, 6, 2,  7, 2, 3, // top (+y)
            0, 1, 5,  0, 5, 4, // bottom (-y)
        ];
        Self::new("cube", positions, normals, Vec::new(), indices)
            .expect("built-in cube is valid")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn texcoords(&self) -> &[Vec2] {
        &self.texcoords
    }

    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as vertex index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                usize::from(t[0]),
                usize::from(t[1]),
                usize::from(t[2]),
            ]
        })
    }
}

/// Area-weighted vertex normals from face geometry.
///
/// Each face's unnormalized cross product is accumulated onto its three
/// vertices, then normalized once; larger faces contribute more.
fn generate_vertex_normals(positions: &[Vec3], indices: &[u16]) -> Vec<Vec3> {
    let mut accumulated = vec![Vec3::ZERO; positions.len()];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [
            usize::from(triangle[0]),
            usize::from(triangle[1]),
            usize::from(triangle[2]),
        ];
        let face_normal =
            (positions[i1] - positions[i0]).cross(positions[i2] - positions[i0]);
        accumulated[i0] = accumulated[i0] + face_normal;
        accumulated[i1] = accumulated[i1] + face_normal;
        accumulated[i2] = accumulated[i2] + face_normal;
    }

    accumulated
        .into_iter()
        .map(|n| {
            if n.magnitude() > f32::EPSILON {
                n.normalize()
            } else {
                Vec3::FORWARD
            }
        })
        .collect()
}
