// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Aerocg Team

//! Error types for model import

use std::path::PathBuf;
use thiserror::Error;

/// Result type for model import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// CAD packages whose native files cannot be read directly.
///
/// These formats only exist inside their vendor's tooling; the fix is to
/// re-export from that tooling into a supported interchange format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorFormat {
    Fusion360,
    OpenVsp,
}

impl VendorFormat {
    /// Fixed operator guidance for this format.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Fusion360 => "Fusion 360 files must be exported to STL, OBJ, or STEP format first",
            Self::OpenVsp => "OpenVSP files must be exported to STL or OBJ format first",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fusion360 => "Fusion 360",
            Self::OpenVsp => "OpenVSP",
        }
    }
}

/// Errors that can occur while importing a 3D model.
///
/// Every failure an import can hit surfaces as one of these kinds; callers
/// that batch many files can match on the kind and keep going past a single
/// bad one.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The given path does not reference an existing file.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Extension is not a supported or bridged model format.
    #[error("unsupported model format: .{extension}")]
    UnsupportedFormat {
        /// The unrecognized extension (lowercased), or `(none)`.
        extension: String,
    },

    /// A vendor format that must be re-exported before import.
    #[error("{}", format.advice())]
    VendorFormat {
        /// Which vendor tool the file belongs to.
        format: VendorFormat,
    },

    /// The file exists but its content could not be parsed into a mesh.
    #[error("failed to parse mesh from {path}: {message}")]
    MeshParse {
        /// File that failed to parse.
        path: PathBuf,
        /// Description of what was invalid.
        message: String,
    },

    /// The external CAD kernel could not be launched or exited abnormally.
    #[error("CAD conversion failed: {message}")]
    ConversionLaunch {
        /// Launch or exit-status detail.
        message: String,
    },

    /// The CAD kernel ran to completion but left no output mesh on disk.
    #[error("CAD conversion produced no output for {path}")]
    ConversionOutputMissing {
        /// Input file whose conversion yielded nothing.
        path: PathBuf,
    },

    /// The external CAD kernel exceeded the configured deadline.
    #[error("CAD conversion timed out after {seconds}s")]
    ConversionTimeout {
        /// Configured timeout in seconds.
        seconds: u64,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImportError {
    /// Create a `MeshParse` error for the given file.
    pub fn mesh_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MeshParse {
            path: path.into(),
            message: message.into(),
        }
    }
}
