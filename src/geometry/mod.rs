// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Aerocg Team

//! Geometry module - mesh representation and derived properties

mod bbox;
mod mesh;
pub mod props;

pub use bbox::BoundingBox;
pub use mesh::{Mesh, Triangle, Vertex};
