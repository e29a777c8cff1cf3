// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IDF object types
//!
//! The keywords the extraction pipeline understands. The store itself keeps
//! every keyword it sees; this enum only names the ones with a consumer.

use std::fmt;

macro_rules! idf_types {
    ($($variant:ident => $keyword:literal,)*) => {
        /// IDF object types consumed by the pipeline
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum IdfType {
            $($variant,)*
        }

        impl IdfType {
            /// Every known type, in declaration order
            pub const ALL: &'static [IdfType] = &[$(IdfType::$variant,)*];

            /// Uppercase keyword as stored in the object store
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(IdfType::$variant => $keyword,)*
                }
            }

            fn from_upper(s: &str) -> Option<Self> {
                match s {
                    $($keyword => Some(IdfType::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

idf_types! {
    // Geometry
    Zone => "ZONE",
    BuildingSurfaceDetailed => "BUILDINGSURFACE:DETAILED",

    // Internal loads
    People => "PEOPLE",
    Lights => "LIGHTS",
    ElectricEquipment => "ELECTRICEQUIPMENT",
    GasEquipment => "GASEQUIPMENT",
    OtherEquipment => "OTHEREQUIPMENT",
    WaterUseEquipment => "WATERUSE:EQUIPMENT",

    // Infiltration and airflow network
    InfiltrationDesignFlowRate => "ZONEINFILTRATION:DESIGNFLOWRATE",
    InfiltrationEffectiveLeakageArea => "ZONEINFILTRATION:EFFECTIVELEAKAGEAREA",
    AfnSurfaceEffectiveLeakageArea => "AIRFLOWNETWORK:MULTIZONE:SURFACE:EFFECTIVELEAKAGEAREA",
    AfnSurface => "AIRFLOWNETWORK:MULTIZONE:SURFACE",

    // Ventilation
    DesignSpecificationOutdoorAir => "DESIGNSPECIFICATION:OUTDOORAIR",
    ZoneVentilationDesignFlowRate => "ZONEVENTILATION:DESIGNFLOWRATE",

    // Controls and schedules
    ZoneControlThermostat => "ZONECONTROL:THERMOSTAT",
    DualSetpoint => "THERMOSTATSETPOINT:DUALSETPOINT",
    SingleHeatingSetpoint => "THERMOSTATSETPOINT:SINGLEHEATING",
    SingleCoolingSetpoint => "THERMOSTATSETPOINT:SINGLECOOLING",
    SingleHeatingOrCoolingSetpoint => "THERMOSTATSETPOINT:SINGLEHEATINGORCOOLING",
    ScheduleConstant => "SCHEDULE:CONSTANT",
    ScheduleCompact => "SCHEDULE:COMPACT",

    // Zone equipment and air loops
    EquipmentConnections => "ZONEHVAC:EQUIPMENTCONNECTIONS",
    EquipmentList => "ZONEHVAC:EQUIPMENTLIST",
    AirDistributionUnit => "ZONEHVAC:AIRDISTRIBUTIONUNIT",
    ZoneSplitter => "AIRLOOPHVAC:ZONESPLITTER",
    SupplyPath => "AIRLOOPHVAC:SUPPLYPATH",
    ControllerOutdoorAir => "CONTROLLER:OUTDOORAIR",
    ControllerMechanicalVentilation => "CONTROLLER:MECHANICALVENTILATION",

    // Plant and coils
    BoilerHotWater => "BOILER:HOTWATER",
    DistrictHeating => "DISTRICTHEATING",
    DistrictHeatingWater => "DISTRICTHEATING:WATER",
    DistrictCooling => "DISTRICTCOOLING",
    DistrictCoolingWater => "DISTRICTCOOLING:WATER",
    ChillerElectricEir => "CHILLER:ELECTRIC:EIR",
    ChillerElectric => "CHILLER:ELECTRIC",
    CoilHeatingFuel => "COIL:HEATING:FUEL",
    CoilHeatingGas => "COIL:HEATING:GAS",
    CoilHeatingElectric => "COIL:HEATING:ELECTRIC",
    CoilHeatingDxSingleSpeed => "COIL:HEATING:DX:SINGLESPEED",
    CoilHeatingDxMultiSpeed => "COIL:HEATING:DX:MULTISPEED",
    CoilHeatingDxSingleMixed => "COIL:HEATING:DX:SINGLEMIXED",
    CoilCoolingDxSingleSpeed => "COIL:COOLING:DX:SINGLESPEED",
    CoilCoolingDxTwoSpeed => "COIL:COOLING:DX:TWOSPEED",
    CoilCoolingDxMultiSpeed => "COIL:COOLING:DX:MULTISPEED",
    CoilCoolingDxVariableSpeed => "COIL:COOLING:DX:VARIABLESPEED",
    CoilSystemCoolingDx => "COILSYSTEM:COOLING:DX",
    BaseboardConvectiveWater => "ZONEHVAC:BASEBOARD:CONVECTIVE:WATER",
    BaseboardConvectiveElectric => "ZONEHVAC:BASEBOARD:CONVECTIVE:ELECTRIC",

    // Building-level process loads
    ExteriorLights => "EXTERIOR:LIGHTS",
    ExteriorFuelEquipment => "EXTERIOR:FUELEQUIPMENT",
    RefrigerationCase => "REFRIGERATION:CASE",
    RefrigerationCompressorRack => "REFRIGERATION:COMPRESSORRACK",
}

impl IdfType {
    /// Parse a keyword, ignoring case
    pub fn from_keyword(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.bytes().any(|b| b.is_ascii_lowercase()) {
            Self::from_upper(&s.to_ascii_uppercase())
        } else {
            Self::from_upper(s)
        }
    }
}

impl fmt::Display for IdfType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_roundtrip() {
        for ty in IdfType::ALL {
            assert_eq!(IdfType::from_keyword(ty.as_str()), Some(*ty));
        }
    }

    #[test]
    fn test_from_keyword_case_insensitive() {
        assert_eq!(
            IdfType::from_keyword("BuildingSurface:Detailed"),
            Some(IdfType::BuildingSurfaceDetailed)
        );
        assert_eq!(IdfType::from_keyword(" zone "), Some(IdfType::Zone));
        assert_eq!(IdfType::from_keyword("Output:Variable"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(IdfType::WaterUseEquipment.to_string(), "WATERUSE:EQUIPMENT");
    }
}
