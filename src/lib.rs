// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Aerocg Team

//! Aerocg
//!
//! An aircraft weight-and-balance toolkit. Imports 3D geometry from
//! multiple CAD/mesh formats into one triangulated representation, derives
//! the bounding-box dimensions and geometric center used to align geometry
//! with the CG coordinate system, and computes mass-weighted centers of
//! gravity from component lists.

pub mod geometry;
pub mod io;
pub mod model;

pub use geometry::{BoundingBox, Mesh};
pub use io::{CadConverter, ImportError, ImportResult, Importer, ModelFormat, VendorFormat};
pub use model::{CgModel, Component};

/// Import a model file with the default bridge configuration.
///
/// Routes on the file extension: STL/OBJ are parsed directly, STEP/STP go
/// through the FreeCAD bridge, vendor formats get re-export guidance.
pub fn import_model(path: impl AsRef<std::path::Path>) -> ImportResult<Mesh> {
    Importer::new().import(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_missing_file() {
        let result = import_model("no_such_model.stl");
        assert!(matches!(result, Err(ImportError::FileNotFound { .. })));
    }
}
