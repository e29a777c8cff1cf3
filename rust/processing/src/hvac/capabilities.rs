// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building-wide plant and coil inventory

use idf_lite_core::{IdfType, ObjectStore};
use serde::Serialize;

/// Which plant and coil families exist anywhere in the model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildingCapabilities {
    pub boiler: bool,
    pub district_heating: bool,
    pub district_cooling: bool,
    pub chiller: bool,
    pub air_cooled_chiller: bool,
    pub gas_coil: bool,
    pub electric_coil: bool,
    pub heat_pump_coil: bool,
    pub baseboard: bool,
    pub dx_cooling: bool,
}

const CHILLERS: &[IdfType] = &[IdfType::ChillerElectricEir, IdfType::ChillerElectric];

impl BuildingCapabilities {
    /// Detect capabilities from object presence
    pub fn detect(store: &ObjectStore) -> Self {
        use IdfType::*;

        let air_cooled_chiller = CHILLERS
            .iter()
            .flat_map(|ty| store.of(*ty))
            .flat_map(|record| record.fields())
            .any(|field| {
                field
                    .chars()
                    .filter(|c| *c != ' ')
                    .collect::<String>()
                    .to_ascii_uppercase()
                    .contains("AIRCOOLED")
            });

        let caps = Self {
            boiler: store.has(BoilerHotWater),
            district_heating: store.has_any(&[DistrictHeating, DistrictHeatingWater]),
            district_cooling: store.has_any(&[DistrictCooling, DistrictCoolingWater]),
            chiller: store.has_any(CHILLERS),
            air_cooled_chiller,
            gas_coil: store.has_any(&[CoilHeatingFuel, CoilHeatingGas]),
            electric_coil: store.has(CoilHeatingElectric),
            heat_pump_coil: store.has_any(&[
                CoilHeatingDxSingleSpeed,
                CoilHeatingDxMultiSpeed,
                CoilHeatingDxSingleMixed,
            ]),
            baseboard: store.has_any(&[BaseboardConvectiveWater, BaseboardConvectiveElectric]),
            // CoilSystem:Cooling:DX wraps the coil in 8.x models
            dx_cooling: store.has_any(&[
                CoilCoolingDxSingleSpeed,
                CoilCoolingDxTwoSpeed,
                CoilCoolingDxMultiSpeed,
                CoilCoolingDxVariableSpeed,
                CoilSystemCoolingDx,
            ]),
        };

        tracing::debug!(?caps, "Building capabilities");
        caps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idf_lite_core::parse;

    #[test]
    fn test_detect_flags() {
        let store = parse(
            "Boiler:HotWater, Boiler 1;\n\
             Coil:Heating:Gas, Gas Coil;\n\
             CoilSystem:Cooling:DX, DX Sys;\n\
             Chiller:Electric:EIR, Chiller 1, 500, 5.5, , , Air Cooled;",
        );
        let caps = BuildingCapabilities::detect(&store);
        assert!(caps.boiler && caps.gas_coil && caps.dx_cooling);
        assert!(caps.chiller && caps.air_cooled_chiller);
        assert!(!caps.district_heating && !caps.district_cooling);
        assert!(!caps.heat_pump_coil && !caps.baseboard && !caps.electric_coil);
    }

    #[test]
    fn test_water_cooled_chiller() {
        let store = parse("Chiller:Electric, Chiller 1, WaterCooled, 500;\nDistrictHeating:Water, DH;");
        let caps = BuildingCapabilities::detect(&store);
        assert!(caps.chiller && !caps.air_cooled_chiller);
        assert!(caps.district_heating);
    }

    #[test]
    fn test_empty_model() {
        assert_eq!(BuildingCapabilities::detect(&parse("")), BuildingCapabilities::default());
    }
}
