// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Aerocg Team

//! Aircraft component with weight and location

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

fn default_size() -> Vector3<f64> {
    Vector3::new(0.1, 0.1, 0.1)
}

fn default_color() -> String {
    "#1f77b4".to_string()
}

fn default_category() -> String {
    "structure".to_string()
}

/// A named mass at a location in the aircraft coordinate system.
///
/// Consumable components (fuel, expendable payload) lose weight over time at
/// `consumption_rate` per hour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    /// Weight in the model's units (kg or lbs; consistency is the caller's job).
    pub weight: f64,
    /// (x, y, z) location of the component's own CG.
    pub location: Point3<f64>,
    /// (length, width, height), used by downstream visualization.
    #[serde(default = "default_size")]
    pub size: Vector3<f64>,
    #[serde(default = "default_color")]
    pub color: String,
    /// Grouping key: structure, fuel, payload, crew, equipment, ...
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub is_consumable: bool,
    /// Weight lost per hour while consuming.
    #[serde(default)]
    pub consumption_rate: f64,
}

impl Component {
    /// A fixed (non-consumable) component.
    pub fn new(name: impl Into<String>, weight: f64, location: Point3<f64>) -> Self {
        Self {
            name: name.into(),
            weight,
            location,
            size: default_size(),
            color: default_color(),
            category: default_category(),
            is_consumable: false,
            consumption_rate: 0.0,
        }
    }

    /// Moment (weight x distance) about the origin, per axis.
    pub fn moment(&self) -> Vector3<f64> {
        self.location.coords * self.weight
    }

    /// Weight remaining after consuming for the given number of hours.
    ///
    /// Non-consumable components are unaffected; consumables never go
    /// negative.
    pub fn weight_after(&self, hours: f64) -> f64 {
        if self.is_consumable {
            (self.weight - self.consumption_rate * hours).max(0.0)
        } else {
            self.weight
        }
    }
}
