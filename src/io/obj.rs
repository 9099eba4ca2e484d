// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Aerocg Team

//! Wavefront OBJ loader
//!
//! Reads `v` and `f` records only. Texture coordinates, normals, material
//! references and grouping records are skipped; normals are recomputed from
//! the faces instead. Polygonal faces are fan-triangulated.

use crate::geometry::{Mesh, Triangle, Vertex};
use crate::io::error::{ImportError, ImportResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load an OBJ file into a mesh.
///
/// Any parse failure is caught here and surfaced as
/// [`ImportError::MeshParse`].
pub fn load_obj(path: &Path) -> ImportResult<Mesh> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ImportError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ImportError::Io(e)
        }
    })?;
    let reader = BufReader::new(file);

    let mut mesh = Mesh::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();

        match parts[0] {
            "v" => {
                if parts.len() < 4 {
                    return Err(ImportError::mesh_parse(
                        path,
                        format!("line {}: vertex record needs 3 coordinates", line_no + 1),
                    ));
                }
                let coords = parse_coords(&parts[1..4]).ok_or_else(|| {
                    ImportError::mesh_parse(
                        path,
                        format!("line {}: invalid vertex coordinate", line_no + 1),
                    )
                })?;
                mesh.add_vertex(Vertex::at(coords[0], coords[1], coords[2]));
            }
            "f" => {
                if parts.len() < 4 {
                    return Err(ImportError::mesh_parse(
                        path,
                        format!("line {}: face needs at least 3 vertices", line_no + 1),
                    ));
                }

                let mut face_indices = Vec::with_capacity(parts.len() - 1);
                for corner in &parts[1..] {
                    let index = parse_face_index(corner, mesh.vertex_count()).ok_or_else(|| {
                        ImportError::mesh_parse(
                            path,
                            format!("line {}: invalid face index '{}'", line_no + 1, corner),
                        )
                    })?;
                    face_indices.push(index);
                }

                // Fan triangulation for polygonal faces
                for i in 1..face_indices.len() - 1 {
                    mesh.add_triangle(Triangle::new([
                        face_indices[0],
                        face_indices[i],
                        face_indices[i + 1],
                    ]));
                }
            }
            // vt, vn, mtllib, usemtl, o, g, s and anything else
            _ => {}
        }
    }

    if mesh.is_empty() {
        return Err(ImportError::mesh_parse(path, "file contains no geometry"));
    }

    mesh.recompute_normals();

    Ok(mesh)
}

fn parse_coords(parts: &[&str]) -> Option<[f64; 3]> {
    let x = parts[0].parse().ok()?;
    let y = parts[1].parse().ok()?;
    let z = parts[2].parse().ok()?;
    Some([x, y, z])
}

/// Parse the position index out of a face corner (`7`, `7/1`, `7//3`, `7/1/3`).
///
/// OBJ indices are 1-based; the result is 0-based and bounds-checked.
fn parse_face_index(corner: &str, vertex_count: usize) -> Option<usize> {
    let position = corner.split('/').next()?;
    let index: i64 = position.parse().ok()?;

    // Negative indices count back from the most recent vertex
    let resolved = if index > 0 {
        (index - 1) as usize
    } else if index < 0 {
        vertex_count.checked_sub(index.unsigned_abs() as usize)?
    } else {
        return None;
    };

    (resolved < vertex_count).then_some(resolved)
}
