// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Aerocg Team

//! Model import entry point and format dispatch

use crate::geometry::Mesh;
use crate::io::bridge::CadConverter;
use crate::io::error::{ImportError, ImportResult, VendorFormat};
use crate::io::{obj, stl};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// How a model file is brought into memory, keyed by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// Triangulated format parsed directly (STL).
    Stl,
    /// Triangulated format parsed directly (Wavefront OBJ).
    Obj,
    /// Boundary representation, bridged through the external CAD kernel.
    Step,
    /// Vendor format that must be re-exported before import.
    Vendor(VendorFormat),
}

impl ModelFormat {
    /// Detect format from the file extension, case-insensitively.
    ///
    /// Returns `None` for extensions with no direct, bridged, or advisory
    /// handling.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "stl" => Some(Self::Stl),
            "obj" => Some(Self::Obj),
            "step" | "stp" => Some(Self::Step),
            "f3d" => Some(Self::Vendor(VendorFormat::Fusion360)),
            "vsp" => Some(Self::Vendor(VendorFormat::OpenVsp)),
            _ => None,
        }
    }
}

/// Imports model files into meshes.
///
/// Holds only the bridge configuration; each import call is otherwise
/// stateless, so one `Importer` can serve concurrent calls. Nothing is
/// cached — importing the same file twice parses or converts it twice.
#[derive(Debug, Clone, Default)]
pub struct Importer {
    converter: CadConverter,
}

impl Importer {
    pub fn new() -> Self {
        Self {
            converter: CadConverter::new(),
        }
    }

    /// Use a specific bridge configuration (executable, timeout).
    pub fn with_converter(converter: CadConverter) -> Self {
        Self { converter }
    }

    /// Import a model file, routing on its extension.
    pub fn import(&self, path: impl AsRef<Path>) -> ImportResult<Mesh> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ImportError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let format = ModelFormat::from_path(path).ok_or_else(|| ImportError::UnsupportedFormat {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)")
                .to_lowercase(),
        })?;

        log::debug!("importing {} as {:?}", path.display(), format);

        match format {
            ModelFormat::Stl => stl::load_stl(path),
            ModelFormat::Obj => obj::load_obj(path),
            ModelFormat::Step => self.converter.convert(path),
            ModelFormat::Vendor(format) => Err(ImportError::VendorFormat { format }),
        }
    }

    /// Import a batch of model files in parallel.
    ///
    /// Each file gets its own result; one corrupt file never aborts the
    /// rest. Calls share no mutable state — conversion workspaces are
    /// per-call — so the batch parallelizes freely.
    pub fn import_all(&self, paths: &[PathBuf]) -> Vec<(PathBuf, ImportResult<Mesh>)> {
        paths
            .par_iter()
            .map(|path| {
                let result = self.import(path);
                if let Err(ref e) = result {
                    log::warn!("import failed for {}: {}", path.display(), e);
                }
                (path.clone(), result)
            })
            .collect()
    }
}
