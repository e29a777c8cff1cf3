// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Equipment rule evaluation

use super::templates::TemplateBases;
use crate::config::HvacConfig;
use idf_lite_core::{AirDistributionUnit, ObjectStore};
use serde::{Deserialize, Serialize};

/// Label produced when no rule resolves
pub const UNKNOWN: &str = "Unknown";

/// Outcome of an equipment rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentRule {
    /// Fixed template label
    Template(String),
    /// Follow the named `ZoneHVAC:AirDistributionUnit` to its terminal
    AirDistributionUnit,
    /// Packaged single-zone base for the building
    SingleZone,
    /// VAV or PVAV base, depending on the cooling plant
    VariableVolume,
}

/// Evaluates equipment entries against the configured rule tables
pub struct Classifier<'a> {
    store: &'a ObjectStore,
    bases: &'a TemplateBases,
    config: &'a HvacConfig,
}

impl<'a> Classifier<'a> {
    pub fn new(store: &'a ObjectStore, bases: &'a TemplateBases, config: &'a HvacConfig) -> Self {
        Self {
            store,
            bases,
            config,
        }
    }

    /// Template label for a zone's ordered equipment
    ///
    /// Equipment types are tried first, in list order; the first entry that
    /// resolves commits. Equipment names are only consulted when no type
    /// resolved.
    pub fn classify(&self, equipment: &[(&str, &str)]) -> String {
        let by_type = equipment.iter().find_map(|(equipment_type, name)| {
            self.config
                .equipment_rules
                .first_match(equipment_type)
                .and_then(|rule| self.resolve(rule, name))
        });
        if let Some(label) = by_type {
            return label;
        }

        let by_name = equipment.iter().find_map(|(_, name)| {
            self.config
                .name_rules
                .first_match(name)
                .and_then(|rule| self.resolve(rule, name))
        });
        match by_name {
            Some(label) => label,
            None => {
                tracing::debug!(entries = equipment.len(), "No equipment rule matched");
                UNKNOWN.to_string()
            }
        }
    }

    fn resolve(&self, rule: &EquipmentRule, name: &str) -> Option<String> {
        match rule {
            EquipmentRule::Template(label) => Some(label.clone()),
            EquipmentRule::SingleZone => Some(self.bases.psz.clone()),
            EquipmentRule::VariableVolume => Some(self.bases.variable_volume().to_string()),
            EquipmentRule::AirDistributionUnit => self.resolve_terminal(name),
        }
    }

    /// Classify the terminal unit behind an air distribution unit
    fn resolve_terminal(&self, name: &str) -> Option<String> {
        let Some(unit) = self.store.find::<AirDistributionUnit>(name) else {
            tracing::trace!(unit = name, "Air distribution unit not found");
            return None;
        };
        match self.config.terminal_rules.first_match(unit.terminal_type())? {
            // A terminal cannot route back through another distribution unit
            EquipmentRule::AirDistributionUnit => None,
            rule => self.resolve(rule, name),
        }
    }
}
