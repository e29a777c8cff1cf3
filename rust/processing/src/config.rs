// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extraction configuration
//!
//! Every heuristic constant the extractors use. `Default` holds the stock
//! values; a JSON file only needs to name the values it overrides.
//!
//! ```json
//! { "ventilation": { "count_outdoor_air_per_person": false },
//!   "hvac": { "node_suffixes": [" ATU Inlet"] } }
//! ```

use crate::error::{Error, Result};
use crate::hvac::EquipmentRule;
use idf_lite_core::{Pattern, RuleTable};
use idf_lite_geometry::GeometryOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration, one section per extractor family
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub geometry: GeometryOptions,
    pub infiltration: InfiltrationConfig,
    pub water: WaterConfig,
    pub ventilation: VentilationConfig,
    pub process: ProcessConfig,
    pub hvac: HvacConfig,
}

impl ExtractionConfig {
    /// Parse a (partial) JSON configuration
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load a (partial) JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Infiltration constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfiltrationConfig {
    /// Leakage areas above this are taken to be in cm²
    pub cm2_threshold: f64,
    /// Flow per unit leakage area at 4 Pa, √(2·4 / 1.2) m/s
    pub flow_coefficient: f64,
}

impl Default for InfiltrationConfig {
    fn default() -> Self {
        Self {
            cm2_threshold: 1.0,
            flow_coefficient: 2.58,
        }
    }
}

impl InfiltrationConfig {
    /// Leakage area in m², applying the cm² heuristic
    pub fn leakage_m2(&self, raw: f64) -> f64 {
        if raw > self.cm2_threshold {
            raw / 10_000.0
        } else {
            raw
        }
    }
}

/// Service hot water zone-matching heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    /// Object-name suffix marker, followed by digits (`_unit3`)
    pub unit_marker: String,
    /// Substring identifying the dwelling's main zone
    pub living_marker: String,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            unit_marker: "_unit".into(),
            living_marker: "LIVING".into(),
        }
    }
}

/// Ventilation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VentilationConfig {
    /// Count `ZoneVentilation:DesignFlowRate` Flow/Person values
    pub count_outdoor_air_per_person: bool,
}

impl Default for VentilationConfig {
    fn default() -> Self {
        Self {
            count_outdoor_air_per_person: true,
        }
    }
}

/// Process-load keywords
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    /// An equipment object mentioning any of these is a process load
    pub keywords: Vec<String>,
    /// Subcategory marker of zone-assigned elevators
    pub elevator_marker: String,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            keywords: ["elevator", "refrig", "process", "laundry", "kitchen"]
                .into_iter()
                .map(String::from)
                .collect(),
            elevator_marker: "elevator".into(),
        }
    }
}

/// HVAC inference policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HvacConfig {
    /// Zone equipment type → decision, first match wins
    pub equipment_rules: RuleTable<EquipmentRule>,
    /// Air terminal type behind an air distribution unit → decision
    pub terminal_rules: RuleTable<EquipmentRule>,
    /// Equipment name token → decision, used when no type rule resolved
    pub name_rules: RuleTable<EquipmentRule>,
    /// Stripped from splitter outlet node names to recover the zone, first match
    pub node_suffixes: Vec<String>,
    /// Stripped from a splitter name to recover its air loop
    pub splitter_suffix: String,
    pub default_economizer: String,
    pub default_dcv: String,
}

impl Default for HvacConfig {
    fn default() -> Self {
        let template = |label: &str| EquipmentRule::Template(label.to_string());

        let equipment_rules = RuleTable::new()
            .with(Pattern::contains("PACKAGEDTERMINALAIRCONDITIONER"), template("PTAC"))
            .with(Pattern::contains("PACKAGEDTERMINALHEATPUMP"), template("PTHP"))
            .with(Pattern::contains("WATERTOAIRHEATPUMP"), template("WSHP"))
            .with(Pattern::contains("FOURPIPEFANCOIL"), template("FCUwithDOASAbridged"))
            .with(Pattern::contains("IDEALLOADSAIRSYSTEM"), template("IdealLoads"))
            .with(Pattern::contains("UNITHEATER"), template("UnitHeater"))
            .with(Pattern::contains("HIGHTEMPERATURERADIANT"), template("Radiant"))
            .with(Pattern::contains("LOWTEMPERATURERADIANT"), template("Radiant"))
            .with(Pattern::contains("BASEBOARD"), template("Baseboard"))
            .with(Pattern::contains("DEHUMIDIFIER"), template("Dehumidifier"))
            .with(Pattern::contains("AIRDISTRIBUTIONUNIT"), EquipmentRule::AirDistributionUnit)
            // 8.x name of the 9.x ConstantVolume:NoReheat terminal
            .with(Pattern::contains("SINGLEDUCT:UNCONTROLLED"), EquipmentRule::SingleZone)
            .with(
                Pattern::contains("SINGLEDUCT:CONSTANTVOLUME:NOREHEAT"),
                EquipmentRule::SingleZone,
            );

        let terminal_rules = RuleTable::new()
            .with(Pattern::contains("VAV"), EquipmentRule::VariableVolume)
            .with(Pattern::contains("CONSTANTVOLUME"), EquipmentRule::SingleZone);

        let name_rules = RuleTable::new()
            .with(Pattern::contains("PSZ"), EquipmentRule::SingleZone)
            .with(Pattern::contains("VAV"), EquipmentRule::VariableVolume)
            .with(Pattern::contains("FCU"), template("FCUwithDOASAbridged"));

        Self {
            equipment_rules,
            terminal_rules,
            name_rules,
            node_suffixes: vec![
                " VAV Box Inlet Node".into(),
                " VAV Box".into(),
                " Inlet Node".into(),
            ],
            splitter_suffix: " Supply Air Splitter".into(),
            default_economizer: "NoEconomizer".into(),
            default_dcv: "No".into(),
        }
    }
}
