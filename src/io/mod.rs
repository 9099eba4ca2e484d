// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Aerocg Team

//! I/O module - model import across formats

mod bridge;
mod error;
mod importer;
mod obj;
mod stl;

pub use bridge::CadConverter;
pub use error::{ImportError, ImportResult, VendorFormat};
pub use importer::{Importer, ModelFormat};
pub use obj::load_obj;
pub use stl::load_stl;
