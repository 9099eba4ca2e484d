// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Aerocg Team

//! Import pipeline tests over minimal on-disk fixtures

use aerocg::geometry::props;
use aerocg::{import_model, CadConverter, ImportError, Importer};
use anyhow::Result;
use approx::assert_relative_eq;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// ASCII STL of a unit cube centered at the origin (12 facets).
fn unit_cube_stl() -> String {
    let corners = [
        [-0.5, -0.5, -0.5],
        [0.5, -0.5, -0.5],
        [0.5, 0.5, -0.5],
        [-0.5, 0.5, -0.5],
        [-0.5, -0.5, 0.5],
        [0.5, -0.5, 0.5],
        [0.5, 0.5, 0.5],
        [-0.5, 0.5, 0.5],
    ];
    let faces = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [2, 3, 7],
        [2, 7, 6],
        [1, 2, 6],
        [1, 6, 5],
        [3, 0, 4],
        [3, 4, 7],
    ];

    let mut stl = String::from("solid cube\n");
    for [a, b, c] in faces {
        stl.push_str("  facet normal 0 0 0\n    outer loop\n");
        for corner in [corners[a], corners[b], corners[c]] {
            stl.push_str(&format!(
                "      vertex {} {} {}\n",
                corner[0], corner[1], corner[2]
            ));
        }
        stl.push_str("    endloop\n  endfacet\n");
    }
    stl.push_str("endsolid cube\n");
    stl
}

fn write_fixture(dir: &TempDir, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path)?;
    file.write_all(content.as_bytes())?;
    Ok(path)
}

#[test]
fn test_stl_fixture_counts() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_fixture(&dir, "cube.stl", &unit_cube_stl())?;

    let mesh = import_model(&path)?;
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);

    Ok(())
}

#[test]
fn test_obj_fixture_counts() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_fixture(
        &dir,
        "tri.obj",
        "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
    )?;

    let mesh = import_model(&path)?;
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);

    Ok(())
}

#[test]
fn test_unit_cube_dimensions_and_center() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_fixture(&dir, "cube.stl", &unit_cube_stl())?;

    let mesh = import_model(&path)?;
    let dims = props::dimensions(Some(&mesh)).unwrap();
    let center = props::center(Some(&mesh)).unwrap();

    assert_relative_eq!(dims.x, 1.0, epsilon = 1e-6);
    assert_relative_eq!(dims.y, 1.0, epsilon = 1e-6);
    assert_relative_eq!(dims.z, 1.0, epsilon = 1e-6);
    assert_relative_eq!(center.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(center.y, 0.0, epsilon = 1e-6);
    assert_relative_eq!(center.z, 0.0, epsilon = 1e-6);

    Ok(())
}

#[test]
fn test_repeat_import_is_deterministic() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_fixture(&dir, "cube.stl", &unit_cube_stl())?;

    let first = import_model(&path)?;
    let second = import_model(&path)?;

    assert_eq!(first.vertex_count(), second.vertex_count());
    assert_eq!(first.triangle_count(), second.triangle_count());
    assert!(first
        .bounding_box()
        .approx_eq(&second.bounding_box(), 1e-12));

    Ok(())
}

#[test]
fn test_nonexistent_path() {
    let result = import_model("definitely/not/here.stl");
    match result {
        Err(ImportError::FileNotFound { path }) => {
            assert!(path.to_string_lossy().contains("here.stl"));
        }
        other => panic!("expected FileNotFound, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_vendor_formats_get_advisory() -> Result<()> {
    let dir = TempDir::new()?;

    let f3d = write_fixture(&dir, "design.f3d", "opaque vendor data")?;
    let err = import_model(&f3d).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Fusion 360 files must be exported to STL, OBJ, or STEP format first"
    );

    let vsp = write_fixture(&dir, "plane.vsp", "opaque vendor data")?;
    let err = import_model(&vsp).unwrap_err();
    assert_eq!(
        err.to_string(),
        "OpenVSP files must be exported to STL or OBJ format first"
    );

    Ok(())
}

#[test]
fn test_unknown_extension() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_fixture(&dir, "model.iges", "whatever")?;

    let result = import_model(&path);
    match result {
        Err(ImportError::UnsupportedFormat { extension }) => assert_eq!(extension, "iges"),
        other => panic!("expected UnsupportedFormat, got {:?}", other.map(|_| ())),
    }

    Ok(())
}

#[test]
fn test_batch_import_continues_past_failures() -> Result<()> {
    let dir = TempDir::new()?;
    let good = write_fixture(&dir, "cube.stl", &unit_cube_stl())?;
    let bad = write_fixture(&dir, "broken.obj", "f 1 2 3\n")?;
    let missing = dir.path().join("missing.stl");

    let importer = Importer::new();
    let results = importer.import_all(&[good.clone(), bad.clone(), missing.clone()]);

    assert_eq!(results.len(), 3);
    assert!(results[0].1.is_ok());
    assert!(matches!(
        results[1].1,
        Err(ImportError::MeshParse { .. })
    ));
    assert!(matches!(
        results[2].1,
        Err(ImportError::FileNotFound { .. })
    ));

    Ok(())
}

/// Bridge tests drive the conversion sequence with a stub kernel script.
#[cfg(unix)]
mod bridge {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use std::time::Duration;

    /// Write an executable stub that stands in for the CAD kernel.
    ///
    /// The stub is invoked as `stub -c <script>`; `$2` is the generated
    /// conversion script inside the scratch workspace.
    fn write_stub(dir: &TempDir, body: &str) -> Result<PathBuf> {
        let path = dir.path().join("fake-kernel");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body))?;
        let mut perms = std::fs::metadata(&path)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms)?;
        Ok(path)
    }

    fn step_input(dir: &TempDir) -> Result<PathBuf> {
        write_fixture(dir, "wing.step", "ISO-10303-21;\nEND-ISO-10303-21;\n")
    }

    #[test]
    fn test_successful_exit_without_output_is_reported() -> Result<()> {
        let dir = TempDir::new()?;
        let input = step_input(&dir)?;
        // Exits 0 but produces nothing; records the script path it was given
        let record = dir.path().join("recorded-script");
        let stub = write_stub(&dir, &format!("echo \"$2\" > {}", record.display()))?;

        let importer =
            Importer::with_converter(CadConverter::new().with_executable(&stub));
        let result = importer.import(&input);

        assert!(matches!(
            result,
            Err(ImportError::ConversionOutputMissing { .. })
        ));

        // The scratch workspace must be gone on the failure path too
        let script_path = PathBuf::from(std::fs::read_to_string(&record)?.trim());
        let workspace = script_path.parent().expect("script had a parent dir");
        assert!(
            !workspace.exists(),
            "workspace {} should have been removed",
            workspace.display()
        );

        Ok(())
    }

    #[test]
    fn test_nonzero_exit_is_launch_failure() -> Result<()> {
        let dir = TempDir::new()?;
        let input = step_input(&dir)?;
        let stub = write_stub(&dir, "exit 3")?;

        let importer =
            Importer::with_converter(CadConverter::new().with_executable(&stub));
        let result = importer.import(&input);

        assert!(matches!(result, Err(ImportError::ConversionLaunch { .. })));

        Ok(())
    }

    #[test]
    fn test_missing_kernel_is_launch_failure() -> Result<()> {
        let dir = TempDir::new()?;
        let input = step_input(&dir)?;

        let importer = Importer::with_converter(
            CadConverter::new().with_executable("no-such-kernel-31415"),
        );
        let result = importer.import(&input);

        assert!(matches!(result, Err(ImportError::ConversionLaunch { .. })));

        Ok(())
    }

    #[test]
    fn test_bridge_loads_converted_output() -> Result<()> {
        let dir = TempDir::new()?;
        let input = step_input(&dir)?;

        // Emits a one-triangle STL where the conversion script says to
        let stub = write_stub(
            &dir,
            r#"out="$(dirname "$2")/converted.stl"
cat > "$out" <<'EOF'
solid converted
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid converted
EOF"#,
        )?;

        let importer =
            Importer::with_converter(CadConverter::new().with_executable(&stub));
        let mesh = importer.import(&input)?;

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);

        Ok(())
    }

    #[test]
    fn test_hung_kernel_times_out() -> Result<()> {
        let dir = TempDir::new()?;
        let input = step_input(&dir)?;
        let stub = write_stub(&dir, "sleep 30")?;

        let importer = Importer::with_converter(
            CadConverter::new()
                .with_executable(&stub)
                .with_timeout(Duration::from_millis(300)),
        );
        let result = importer.import(&input);

        assert!(matches!(
            result,
            Err(ImportError::ConversionTimeout { .. })
        ));

        Ok(())
    }

    #[test]
    fn test_stub_is_not_reported_available_when_missing() {
        let converter = CadConverter::new().with_executable(Path::new("/no/such/kernel"));
        assert!(!converter.is_available());
    }
}
