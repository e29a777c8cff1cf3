// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extraction pipeline
//!
//! Runs tokenizer → geometry → {metrics, HVAC} over one model and assembles
//! a serializable [`BuildingReport`].

use crate::config::ExtractionConfig;
use crate::error::Result;
use crate::hvac::{infer_hvac, HvacClassification};
use crate::metrics::{
    extract_building_process_loads, extract_infiltration, extract_loads, extract_people,
    extract_process_loads, extract_thermostats, extract_ventilation, extract_water_use,
    ProcessLoadRecord,
};
use idf_lite_core::{parse_file, IdfType, ObjectStore};
use idf_lite_geometry::{resolve_geometry_with, ZoneGeometry, ZoneMap};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// One zone's geometry joined with every normalized metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneReport {
    pub name: String,
    /// m²
    pub floor_area: f64,
    /// m², exterior walls only
    pub facade_area: f64,
    /// m³
    pub volume: f64,
    pub multiplier: f64,
    /// people/m²
    pub people: f64,
    /// W/m²
    pub lights: f64,
    /// W/m²
    pub electric: f64,
    /// W/m²
    pub gas: f64,
    /// L/h·m²
    pub water: f64,
    /// m³/s per m² facade
    pub infiltration: f64,
    /// m³/s per person
    pub vent_person: f64,
    /// m³/s per m²
    pub vent_area: f64,
    /// °C
    pub htg_sp: f64,
    /// °C
    pub clg_sp: f64,
    /// W/m²
    pub process: f64,
}

/// Everything extracted from one model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingReport {
    pub source: String,
    /// Sorted by zone name
    pub zones: Vec<ZoneReport>,
    /// In zone declaration order
    pub hvac: ZoneMap<HvacClassification>,
    pub process_loads: Vec<ProcessLoadRecord>,
}

impl BuildingReport {
    pub fn zone(&self, name: &str) -> Option<&ZoneReport> {
        self.zones.iter().find(|z| z.name == name)
    }
}

/// Run the full extraction over an already parsed model
pub fn run(store: &ObjectStore, source: &str, config: &ExtractionConfig) -> BuildingReport {
    let start = Instant::now();
    tracing::info!(
        source,
        keywords = store.len(),
        records = store.record_count(),
        "Starting extraction"
    );

    let geometry = resolve_geometry_with(store, &config.geometry);
    let geometry_ms = start.elapsed().as_millis() as u64;

    let metrics_start = Instant::now();
    let people = extract_people(store, &geometry);
    let lights = extract_loads(store, &geometry, IdfType::Lights, &people);
    let electric = extract_loads(store, &geometry, IdfType::ElectricEquipment, &people);
    let gas = extract_loads(store, &geometry, IdfType::GasEquipment, &people);
    let water = extract_water_use(store, &geometry, &config.water);
    let infiltration = extract_infiltration(store, &geometry, &config.infiltration);
    let ventilation = extract_ventilation(store, &geometry, &config.ventilation);
    let setpoints = extract_thermostats(store, &geometry);
    let process = extract_process_loads(store, &geometry, &config.process);
    let process_loads = extract_building_process_loads(store, &config.process);
    let metrics_ms = metrics_start.elapsed().as_millis() as u64;

    let hvac_start = Instant::now();
    let hvac = infer_hvac(store, geometry.keys(), &config.hvac);
    let hvac_ms = hvac_start.elapsed().as_millis() as u64;

    let value = |map: &ZoneMap<f64>, zone: &str| map.get(zone).copied().unwrap_or_default();

    let mut zones: Vec<ZoneReport> = geometry
        .iter()
        .map(|(name, g): (&String, &ZoneGeometry)| {
            let vent = ventilation.get(name).copied().unwrap_or_default();
            let sp = setpoints.get(name).copied().unwrap_or_default();
            ZoneReport {
                name: name.clone(),
                floor_area: g.floor_area,
                facade_area: g.facade_area,
                volume: g.volume,
                multiplier: g.multiplier,
                people: value(&people, name),
                lights: value(&lights, name),
                electric: value(&electric, name),
                gas: value(&gas, name),
                water: value(&water, name),
                infiltration: value(&infiltration, name),
                vent_person: vent.per_person,
                vent_area: vent.per_area,
                htg_sp: sp.heating,
                clg_sp: sp.cooling,
                process: value(&process, name),
            }
        })
        .collect();
    zones.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::info!(
        source,
        zones = zones.len(),
        process_loads = process_loads.len(),
        geometry_ms,
        metrics_ms,
        hvac_ms,
        total_ms = start.elapsed().as_millis() as u64,
        "Extraction complete"
    );

    BuildingReport {
        source: source.to_string(),
        zones,
        hvac,
        process_loads,
    }
}

/// Parse a model file and run the extraction over it
///
/// The report's source label is the file name.
pub fn run_file(path: impl AsRef<Path>, config: &ExtractionConfig) -> Result<BuildingReport> {
    let path = path.as_ref();
    let parse_start = Instant::now();
    let store = parse_file(path)?;
    tracing::debug!(
        path = %path.display(),
        parse_ms = parse_start.elapsed().as_millis() as u64,
        "Parsed model"
    );

    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(run(&store, &source, config))
}
