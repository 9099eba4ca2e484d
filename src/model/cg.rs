// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Aerocg Team

//! Center-of-gravity model
//!
//! The mass-weighted CG computed here is a different quantity from the
//! geometric bounding-box center produced by [`crate::geometry::props`]:
//! one comes from component weights, the other from mesh extents. They are
//! never substituted for one another.

use super::Component;
use anyhow::{Context, Result};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

fn default_units() -> String {
    "metric".to_string()
}

fn origin() -> Point3<f64> {
    Point3::origin()
}

/// Weight-and-balance model: a named aircraft and its component masses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CgModel {
    pub aircraft_name: String,
    /// CG reported for an empty or weightless model.
    #[serde(default = "origin")]
    pub reference_point: Point3<f64>,
    /// Optional 3D geometry file to align the CG against.
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    /// "metric" or "imperial"; informational only.
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl CgModel {
    pub fn new(aircraft_name: impl Into<String>) -> Self {
        Self {
            aircraft_name: aircraft_name.into(),
            reference_point: Point3::origin(),
            model_path: None,
            units: default_units(),
            components: Vec::new(),
        }
    }

    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Remove a component by name. Returns whether one was removed.
    pub fn remove_component(&mut self, name: &str) -> bool {
        if let Some(pos) = self.components.iter().position(|c| c.name == name) {
            self.components.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.components.iter().map(|c| c.weight).sum()
    }

    /// Mass-weighted center of gravity.
    ///
    /// Falls back to the reference point when there are no components or
    /// the total weight is zero.
    pub fn center_of_gravity(&self) -> Point3<f64> {
        let total = self.total_weight();
        if self.components.is_empty() || total == 0.0 {
            return self.reference_point;
        }

        let moment: Vector3<f64> = self.components.iter().map(Component::moment).sum();
        Point3::from(moment / total)
    }

    /// CG per component category.
    pub fn category_cg(&self) -> BTreeMap<String, Point3<f64>> {
        let mut groups: BTreeMap<String, Vec<&Component>> = BTreeMap::new();
        for comp in &self.components {
            groups.entry(comp.category.clone()).or_default().push(comp);
        }

        groups
            .into_iter()
            .map(|(category, comps)| {
                let total: f64 = comps.iter().map(|c| c.weight).sum();
                let cg = if total == 0.0 {
                    self.reference_point
                } else {
                    let moment: Vector3<f64> = comps.iter().map(|c| c.moment()).sum();
                    Point3::from(moment / total)
                };
                (category, cg)
            })
            .collect()
    }

    /// CG after consumables have been drawn down for the given time.
    pub fn after_consumption(&self, hours: f64) -> Point3<f64> {
        let total: f64 = self.components.iter().map(|c| c.weight_after(hours)).sum();
        if total == 0.0 {
            return self.reference_point;
        }

        let moment: Vector3<f64> = self
            .components
            .iter()
            .map(|c| c.location.coords * c.weight_after(hours))
            .sum();
        Point3::from(moment / total)
    }

    /// Save the model as pretty JSON, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context(format!("Failed to create directory: {}", parent.display()))?;
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .context(format!("Failed to write model file: {}", path.display()))?;

        Ok(())
    }

    /// Load a model from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .context(format!("Failed to read model file: {}", path.display()))?;

        serde_json::from_str(&json)
            .context(format!("Failed to parse model file: {}", path.display()))
    }
}
