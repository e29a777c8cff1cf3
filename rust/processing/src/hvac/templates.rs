// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Template labels derived from the building's plant
//!
//! Labels follow the Honeybee HVAC template vocabulary: `VAV_{cool}_{heat}`
//! for chilled-water VAV, `PVAV_{heat}` for packaged DX VAV and `PSZAC_*`
//! for packaged single-zone systems.

use super::BuildingCapabilities;
use serde::Serialize;

/// Template bases for one building
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateBases {
    pub vav: String,
    pub pvav: String,
    pub psz: String,
    /// VAV terminals without chilled water fall back to packaged VAV
    pvav_routing: bool,
}

impl TemplateBases {
    pub fn new(caps: &BuildingCapabilities) -> Self {
        Self {
            vav: vav_base(caps),
            pvav: pvav_base(caps),
            psz: psz_base(caps),
            pvav_routing: !(caps.chiller || caps.district_cooling) && caps.dx_cooling,
        }
    }

    /// Label for a VAV-class zone: chilled water → VAV, DX only → PVAV
    pub fn variable_volume(&self) -> &str {
        if self.pvav_routing {
            &self.pvav
        } else {
            &self.vav
        }
    }
}

fn vav_base(caps: &BuildingCapabilities) -> String {
    let cool = if caps.district_cooling {
        "DCW"
    } else if caps.air_cooled_chiller {
        "ACChiller"
    } else {
        "Chiller"
    };
    let heat = if caps.district_heating {
        "DHW"
    } else if caps.boiler {
        "Boiler"
    } else if caps.heat_pump_coil {
        "ASHP"
    } else if caps.gas_coil {
        "GasCoil"
    } else {
        "PFP"
    };
    format!("VAV_{cool}_{heat}")
}

fn pvav_base(caps: &BuildingCapabilities) -> String {
    let heat = if caps.district_heating {
        "DHW"
    } else if caps.boiler {
        "Boiler"
    } else if caps.heat_pump_coil {
        "ASHP"
    } else if caps.gas_coil {
        "BoilerElectricReheat"
    } else {
        "PFP"
    };
    format!("PVAV_{heat}")
}

fn psz_base(caps: &BuildingCapabilities) -> String {
    let with_baseboard = |plain: &'static str, baseboard: &'static str| {
        if caps.baseboard {
            baseboard
        } else {
            plain
        }
    };
    let label = if caps.district_heating {
        with_baseboard("PSZAC_DHW", "PSZAC_DHWBaseboard")
    } else if caps.boiler {
        with_baseboard("PSZAC_Boiler", "PSZAC_BoilerBaseboard")
    } else if caps.heat_pump_coil {
        "PSZAC_ASHP"
    } else if caps.gas_coil {
        with_baseboard("PSZAC_GasCoil", "PSZAC_GasHeaters")
    } else if caps.electric_coil {
        with_baseboard("PSZAC_ElectricCoil", "PSZAC_ElectricBaseboard")
    } else {
        "PSZAC"
    };
    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boiler_gas_coil() {
        let caps = BuildingCapabilities {
            boiler: true,
            gas_coil: true,
            ..Default::default()
        };
        let bases = TemplateBases::new(&caps);
        assert_eq!(bases.vav, "VAV_Chiller_Boiler");
        assert_eq!(bases.pvav, "PVAV_Boiler");
        assert_eq!(bases.psz, "PSZAC_Boiler");
        assert_eq!(bases.variable_volume(), "VAV_Chiller_Boiler");
    }

    #[test]
    fn test_district_plant() {
        let caps = BuildingCapabilities {
            district_heating: true,
            district_cooling: true,
            air_cooled_chiller: true,
            baseboard: true,
            dx_cooling: true,
            ..Default::default()
        };
        let bases = TemplateBases::new(&caps);
        assert_eq!(bases.vav, "VAV_DCW_DHW");
        assert_eq!(bases.psz, "PSZAC_DHWBaseboard");
        // District cooling keeps VAV zones on the chilled-water template
        assert_eq!(bases.variable_volume(), "VAV_DCW_DHW");
    }

    #[test]
    fn test_dx_only_routes_to_pvav() {
        let caps = BuildingCapabilities {
            dx_cooling: true,
            gas_coil: true,
            ..Default::default()
        };
        let bases = TemplateBases::new(&caps);
        assert_eq!(bases.variable_volume(), "PVAV_BoilerElectricReheat");
        assert_eq!(bases.vav, "VAV_Chiller_GasCoil");
        assert_eq!(bases.psz, "PSZAC_GasCoil");
    }

    #[test]
    fn test_psz_variants() {
        let psz = |caps: BuildingCapabilities| TemplateBases::new(&caps).psz;
        assert_eq!(psz(BuildingCapabilities::default()), "PSZAC");
        assert_eq!(
            psz(BuildingCapabilities {
                heat_pump_coil: true,
                baseboard: true,
                ..Default::default()
            }),
            "PSZAC_ASHP"
        );
        assert_eq!(
            psz(BuildingCapabilities {
                gas_coil: true,
                baseboard: true,
                ..Default::default()
            }),
            "PSZAC_GasHeaters"
        );
        assert_eq!(
            psz(BuildingCapabilities {
                electric_coil: true,
                baseboard: true,
                ..Default::default()
            }),
            "PSZAC_ElectricBaseboard"
        );
        assert_eq!(
            psz(BuildingCapabilities {
                electric_coil: true,
                ..Default::default()
            }),
            "PSZAC_ElectricCoil"
        );
    }

    #[test]
    fn test_no_cooling_plant_defaults_to_vav() {
        let bases = TemplateBases::new(&BuildingCapabilities::default());
        assert_eq!(bases.variable_volume(), "VAV_Chiller_PFP");
        assert_eq!(bases.pvav, "PVAV_PFP");
    }
}
