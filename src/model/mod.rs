// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Aerocg Team

//! Weight-and-balance model - components and CG arithmetic

mod cg;
mod component;

pub use cg::CgModel;
pub use component::Component;
