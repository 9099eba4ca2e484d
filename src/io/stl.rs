// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Aerocg Team

//! STL loader (binary and ASCII)

use crate::geometry::{Mesh, Triangle, Vertex};
use crate::io::error::{ImportError, ImportResult};
use std::fs::File;
use std::path::Path;
use stl_io::read_stl;

/// Load an STL file into a mesh.
///
/// stl_io detects binary vs ASCII and returns an indexed mesh; indices are
/// preserved so vertex and face counts match the file. Parse failures are
/// caught here and surfaced as [`ImportError::MeshParse`] — a malformed file
/// never panics past this boundary.
pub fn load_stl(path: &Path) -> ImportResult<Mesh> {
    let mut file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ImportError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ImportError::Io(e)
        }
    })?;

    let stl = read_stl(&mut file)
        .map_err(|e| ImportError::mesh_parse(path, e.to_string()))?;

    let mut mesh = Mesh::with_capacity(stl.vertices.len(), stl.faces.len());

    for vertex in &stl.vertices {
        mesh.add_vertex(Vertex::at(
            f64::from(vertex[0]),
            f64::from(vertex[1]),
            f64::from(vertex[2]),
        ));
    }

    for face in &stl.faces {
        // stl_io has already validated indices against the vertex table
        mesh.add_triangle(Triangle::new([
            face.vertices[0],
            face.vertices[1],
            face.vertices[2],
        ]));
    }

    if mesh.is_empty() {
        return Err(ImportError::mesh_parse(path, "file contains no geometry"));
    }

    mesh.recompute_normals();

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TRIANGLE_STL: &str = "\
solid fixture
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid fixture
";

    #[test]
    fn test_load_ascii_stl() -> anyhow::Result<()> {
        let mut file = NamedTempFile::with_suffix(".stl")?;
        file.write_all(TRIANGLE_STL.as_bytes())?;

        let mesh = load_stl(file.path())?;
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);

        Ok(())
    }

    #[test]
    fn test_load_nonexistent() {
        let result = load_stl(Path::new("no_such_file_98765.stl"));
        assert!(matches!(result, Err(ImportError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_garbage() -> anyhow::Result<()> {
        let mut file = NamedTempFile::with_suffix(".stl")?;
        file.write_all(b"not an stl file at all")?;

        let result = load_stl(file.path());
        assert!(matches!(result, Err(ImportError::MeshParse { .. })));

        Ok(())
    }
}
