// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Aerocg Team

//! Aerocg CLI

use aerocg::geometry::props;
use aerocg::{CadConverter, CgModel, Component, Importer};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use nalgebra::Point3;
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "aerocg")]
#[command(about = "Aircraft weight-and-balance toolkit - model import and CG analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// CAD kernel executable for STEP conversion
    #[arg(long, global = true, default_value = "freecad")]
    freecad: String,

    /// STEP conversion timeout in seconds
    #[arg(long, global = true, default_value = "120")]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Import model files and report dimensions and geometric center
    Inspect {
        /// Model files or directories to scan
        #[arg(required = true)]
        inputs: Vec<String>,
    },

    /// Create a new CG model
    Create {
        /// Aircraft name
        #[arg(long, default_value = "Aircraft")]
        name: String,

        /// JSON file with a component array
        #[arg(long)]
        components: Option<String>,

        /// 3D model file (STL, OBJ, STEP)
        #[arg(long)]
        model: Option<String>,

        /// Output file for the model
        #[arg(long, default_value = "model.json")]
        output: String,
    },

    /// Report CG for an existing model
    Cg {
        /// JSON model file
        #[arg(long)]
        model: String,

        /// Simulate consumption for this many hours
        #[arg(long)]
        time: Option<f64>,

        /// Also report per-category CG
        #[arg(long)]
        categories: bool,
    },

    /// Create sample component and model files
    Sample {
        /// Output directory
        #[arg(long, default_value = "sample")]
        output: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let converter = CadConverter::new()
        .with_executable(&cli.freecad)
        .with_timeout(Duration::from_secs(cli.timeout));
    let importer = Importer::with_converter(converter);

    match &cli.command {
        Commands::Inspect { inputs } => {
            inspect_command(&importer, inputs, cli.verbose)?;
        }
        Commands::Create {
            name,
            components,
            model,
            output,
        } => {
            create_command(
                &importer,
                name,
                components.as_deref(),
                model.as_deref(),
                output,
            )?;
        }
        Commands::Cg {
            model,
            time,
            categories,
        } => {
            cg_command(&importer, model, *time, *categories, cli.verbose)?;
        }
        Commands::Sample { output } => {
            sample_command(output)?;
        }
        Commands::Version => {
            println!("Aerocg v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// Expand files and directories into a list of candidate model files.
fn collect_model_files(inputs: &[String]) -> Vec<PathBuf> {
    const MODEL_EXTENSIONS: [&str; 6] = ["stl", "obj", "step", "stp", "f3d", "vsp"];

    let mut files = Vec::new();

    for input in inputs {
        let path = PathBuf::from(input);
        if path.is_dir() {
            for entry in WalkDir::new(&path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| {
                    e.path()
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .map(|ext| MODEL_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                        .unwrap_or(false)
                })
            {
                files.push(entry.path().to_path_buf());
            }
        } else {
            // Nonexistent paths stay in the list so the importer reports them
            files.push(path);
        }
    }

    files
}

fn inspect_command(importer: &Importer, inputs: &[String], verbose: bool) -> Result<()> {
    let files = collect_model_files(inputs);

    if files.is_empty() {
        eprintln!("{}", "No model files found".red());
        std::process::exit(1);
    }

    if verbose {
        println!("Importing {} file(s)", files.len());
    }

    let progress = if files.len() > 1 {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} importing {len} models [{elapsed_precise}]")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let results = importer.import_all(&files);

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let mut failed = 0;
    for (path, result) in &results {
        match result {
            Ok(mesh) => {
                let dims = props::dimensions(Some(mesh));
                let center = props::center(Some(mesh));
                println!("{} {}", "✓".green(), path.display());
                println!(
                    "    {} {} vertices, {} triangles",
                    "mesh:".bright_black(),
                    mesh.vertex_count(),
                    mesh.triangle_count()
                );
                if let (Some(dims), Some(center)) = (dims, center) {
                    println!(
                        "    {} {:.3} x {:.3} x {:.3}",
                        "dimensions:".bright_black(),
                        dims.x,
                        dims.y,
                        dims.z
                    );
                    println!(
                        "    {} ({:.3}, {:.3}, {:.3})",
                        "center:".bright_black(),
                        center.x,
                        center.y,
                        center.z
                    );
                }
            }
            Err(e) => {
                failed += 1;
                println!("{} {}", "✗".red(), path.display());
                println!("    {}", e.to_string().bright_black());
            }
        }
    }

    println!(
        "\n{} {} imported, {} failed",
        "Summary:".bold(),
        (results.len() - failed).to_string().green(),
        if failed > 0 {
            failed.to_string().red()
        } else {
            failed.to_string().green()
        }
    );

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn load_components(path: &str) -> Result<Vec<Component>> {
    let json = std::fs::read_to_string(path)
        .context(format!("Failed to read component file: {}", path))?;
    serde_json::from_str(&json).context(format!("Failed to parse component file: {}", path))
}

fn create_command(
    importer: &Importer,
    name: &str,
    components: Option<&str>,
    model_file: Option<&str>,
    output: &str,
) -> Result<()> {
    let mut model = CgModel::new(name);

    if let Some(components_path) = components {
        for component in load_components(components_path)? {
            model.add_component(component);
        }
    }

    if let Some(path) = model_file {
        // The path is stored either way; an unusable file is surfaced now
        match importer.import(path) {
            Ok(_) => model.model_path = Some(PathBuf::from(path)),
            Err(e) => {
                eprintln!("{} 3D model not usable: {}", "Warning:".yellow(), e);
                model.model_path = Some(PathBuf::from(path));
            }
        }
    }

    model.save(output)?;
    println!(
        "Created CG model with {} components",
        model.components.len()
    );
    println!("Model saved to {}", output);

    print_cg_summary(&model);

    Ok(())
}

fn cg_command(
    importer: &Importer,
    model_path: &str,
    time: Option<f64>,
    categories: bool,
    verbose: bool,
) -> Result<()> {
    let model = CgModel::load(model_path)?;
    println!(
        "Loaded CG model '{}' with {} components",
        model.aircraft_name,
        model.components.len()
    );

    print_cg_summary(&model);

    if let Some(hours) = time {
        let shifted = model.after_consumption(hours);
        println!(
            "CG after {:.1}h consumption: ({:.3}, {:.3}, {:.3})",
            hours, shifted.x, shifted.y, shifted.z
        );
    }

    if categories {
        println!("{}", "Per-category CG:".bold());
        for (category, cg) in model.category_cg() {
            println!("  {}: ({:.3}, {:.3}, {:.3})", category, cg.x, cg.y, cg.z);
        }
    }

    // Align against 3D geometry when the model references some
    if let Some(ref path) = model.model_path {
        if path.exists() {
            match importer.import(path) {
                Ok(mesh) => {
                    if verbose {
                        println!("Loaded 3D model from {}", path.display());
                    }
                    if let (Some(dims), Some(center)) =
                        (props::dimensions(Some(&mesh)), props::center(Some(&mesh)))
                    {
                        println!(
                            "Geometry dimensions: {:.3} x {:.3} x {:.3}",
                            dims.x, dims.y, dims.z
                        );
                        println!(
                            "Geometric center (bounding box, not CG): ({:.3}, {:.3}, {:.3})",
                            center.x, center.y, center.z
                        );
                    }
                }
                Err(e) => {
                    eprintln!(
                        "{} failed to load 3D model {}: {}",
                        "Warning:".yellow(),
                        path.display(),
                        e
                    );
                }
            }
        }
    }

    Ok(())
}

fn print_cg_summary(model: &CgModel) {
    let cg = model.center_of_gravity();
    println!(
        "Center of Gravity: ({:.2}, {:.2}, {:.2})",
        cg.x, cg.y, cg.z
    );
    println!("Total Weight: {:.2}", model.total_weight());
}

/// The sample aircraft from the project documentation.
fn sample_components() -> Vec<Component> {
    let mut components = vec![
        Component::new("Fuselage", 500.0, Point3::new(0.0, 0.0, 0.0)),
        Component::new("Left Wing", 150.0, Point3::new(0.0, 1.0, 0.0)),
        Component::new("Right Wing", 150.0, Point3::new(0.0, -1.0, 0.0)),
        Component::new("Engine", 200.0, Point3::new(-1.5, 0.0, 0.0)),
        Component::new("Fuel Tank", 100.0, Point3::new(0.5, 0.0, 0.0)),
        Component::new("Pilot", 80.0, Point3::new(1.0, 0.0, 0.0)),
        Component::new("Payload", 120.0, Point3::new(-0.5, 0.0, 0.0)),
    ];

    components[3].category = "equipment".to_string();
    components[3].color = "#d62728".to_string();
    components[4].category = "fuel".to_string();
    components[4].color = "#2ca02c".to_string();
    components[4].is_consumable = true;
    components[4].consumption_rate = 20.0;
    components[5].category = "crew".to_string();
    components[5].color = "#9467bd".to_string();
    components[6].category = "payload".to_string();
    components[6].color = "#ff7f0e".to_string();

    components
}

fn sample_command(output: &str) -> Result<()> {
    let output_dir = Path::new(output);
    std::fs::create_dir_all(output_dir)
        .context(format!("Failed to create directory: {}", output))?;

    let components = sample_components();
    let components_path = output_dir.join("sample_components.json");
    std::fs::write(
        &components_path,
        serde_json::to_string_pretty(&components)?,
    )?;
    println!("Created sample components at {}", components_path.display());

    let mut model = CgModel::new("Sample Aircraft");
    for component in components {
        model.add_component(component);
    }

    let model_path = output_dir.join("sample_model.json");
    model.save(&model_path)?;
    println!("Created sample model at {}", model_path.display());

    print_cg_summary(&model);

    Ok(())
}
