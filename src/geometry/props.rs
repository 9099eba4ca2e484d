// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Aerocg Team

//! Geometric property projections over an imported mesh
//!
//! These are the values the weight-and-balance layer aligns physical
//! geometry against. Both functions are pure and tolerate an absent mesh:
//! `None` in means `None` out, never an error.

use super::Mesh;
use nalgebra::{Point3, Vector3};

/// Bounding-box extents of a model, per axis.
pub fn dimensions(mesh: Option<&Mesh>) -> Option<Vector3<f64>> {
    let mesh = mesh?;
    if mesh.is_empty() {
        return None;
    }
    Some(mesh.bounding_box().extents())
}

/// Geometric center of a model: the bounding-box midpoint.
///
/// Not the mass-weighted center of gravity — see
/// [`crate::model::CgModel::center_of_gravity`] for that.
pub fn center(mesh: Option<&Mesh>) -> Option<Point3<f64>> {
    let mesh = mesh?;
    if mesh.is_empty() {
        return None;
    }
    Some(mesh.bounding_box().center())
}
