// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Aerocg Team

//! STEP conversion bridge via an external FreeCAD process
//!
//! Boundary-representation CAD files need a full solid-modeling kernel to
//! interpret their topology. Rather than linking one in, the bridge shells
//! out to FreeCAD in scripting mode: a generated python script reads the
//! shape and exports a meshed STL into a private scratch directory, which
//! is then loaded through the normal STL path. The kernel is only required
//! when a STEP file is actually imported.

use crate::geometry::Mesh;
use crate::io::error::{ImportError, ImportResult};
use crate::io::stl;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Default executable name; FreeCAD installs this headless entry point.
const DEFAULT_EXECUTABLE: &str = "freecad";

/// Default deadline for one conversion.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Poll interval while waiting for the kernel process.
const WAIT_POLL: Duration = Duration::from_millis(50);

/// Converter for CAD formats that need the external kernel.
#[derive(Debug, Clone)]
pub struct CadConverter {
    executable: PathBuf,
    timeout: Duration,
}

impl CadConverter {
    pub fn new() -> Self {
        Self {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use a different kernel executable (path or name on PATH).
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Override the conversion deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check if the kernel executable can be launched.
    pub fn is_available(&self) -> bool {
        Command::new(&self.executable)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .is_ok()
    }

    /// Convert a STEP/STP file to a mesh.
    ///
    /// The scratch workspace lives only for the duration of this call and is
    /// removed on every exit path, success or failure. The kernel's exit
    /// status alone is not trusted: the output file is probed independently
    /// before loading.
    pub fn convert(&self, input: &Path) -> ImportResult<Mesh> {
        // The script embeds the input path, so it must be absolute
        let input_abs = input.canonicalize().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ImportError::FileNotFound {
                    path: input.to_path_buf(),
                }
            } else {
                ImportError::Io(e)
            }
        })?;

        let workspace = TempDir::new()?;
        let output = workspace.path().join("converted.stl");
        let script = workspace.path().join("convert.py");

        std::fs::write(&script, conversion_script(&input_abs, &output))?;

        log::debug!(
            "converting {} via {} (timeout {}s)",
            input_abs.display(),
            self.executable.display(),
            self.timeout.as_secs()
        );

        let child = Command::new(&self.executable)
            .arg("-c")
            .arg(&script)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ImportError::ConversionLaunch {
                message: format!("could not launch {}: {}", self.executable.display(), e),
            })?;

        let status = self.wait_with_deadline(child)?;

        if !status.success() {
            return Err(ImportError::ConversionLaunch {
                message: format!("{} exited with {}", self.executable.display(), status),
            });
        }

        if !output.exists() {
            return Err(ImportError::ConversionOutputMissing {
                path: input.to_path_buf(),
            });
        }

        let mesh = stl::load_stl(&output)?;
        log::info!(
            "converted {}: {} vertices, {} triangles",
            input.display(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(mesh)
    }

    /// Wait for the kernel, killing it if the deadline passes.
    fn wait_with_deadline(&self, mut child: Child) -> ImportResult<ExitStatus> {
        let start = Instant::now();

        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }

            if start.elapsed() >= self.timeout {
                log::warn!(
                    "killing {} after {}s",
                    self.executable.display(),
                    self.timeout.as_secs()
                );
                let _ = child.kill();
                let _ = child.wait();
                return Err(ImportError::ConversionTimeout {
                    seconds: self.timeout.as_secs(),
                });
            }

            std::thread::sleep(WAIT_POLL);
        }
    }
}

impl Default for CadConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// FreeCAD python that reads the shape and exports a meshed STL.
fn conversion_script(input: &Path, output: &Path) -> String {
    format!(
        r#"import FreeCAD
import Part
import Mesh

doc = FreeCAD.newDocument()
shape = Part.Shape()
shape.read("{input}")
doc.addObject("Part::Feature", "Part").Shape = shape
Mesh.export([doc.Part], "{output}")
"#,
        input = input.display(),
        output = output.display(),
    )
}
