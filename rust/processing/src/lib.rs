// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IDF-Lite Processing
//!
//! Zone metric normalization and HVAC system inference over a parsed
//! EnergyPlus model.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use idf_lite_processing::{run_file, ExtractionConfig};
//!
//! let report = run_file("office.idf", &ExtractionConfig::default())?;
//! for zone in &report.zones {
//!     println!("{}: {:.2} W/m2 lighting", zone.name, zone.lights);
//! }
//! ```
//!
//! Individual extractors can also be called on their own with a store and a
//! geometry map from `idf-lite-geometry`.

pub mod config;
pub mod error;
pub mod hvac;
pub mod metrics;
pub mod pipeline;

pub use config::{
    ExtractionConfig, HvacConfig, InfiltrationConfig, ProcessConfig, VentilationConfig,
    WaterConfig,
};
pub use error::{Error, Result};
pub use hvac::{infer_hvac, BuildingCapabilities, EquipmentRule, HvacClassification, TemplateBases};
pub use metrics::{
    extract_building_process_loads, extract_infiltration, extract_loads, extract_loads_for,
    extract_people, extract_process_loads, extract_thermostats, extract_ventilation,
    extract_water_use, resolve_schedule_value, ProcessLoadRecord, Setpoints, Ventilation,
};
pub use pipeline::{run, run_file, BuildingReport, ZoneReport};
