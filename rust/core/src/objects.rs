// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed object views
//!
//! Zero-copy views over positional [`ObjectRecord`]s with named accessors.
//! Field positions live here and nowhere else. Text accessors return `""`
//! for missing fields; numeric accessors return `None` for missing, blank or
//! unparsable fields.
//!
//! Two types changed layout between format revisions:
//!
//! - `BuildingSurface:Detailed` gained a *Space Name* field after the zone
//!   name, see [`SurfaceLayout`].
//! - `ZoneHVAC:EquipmentList` gained an optional *Load Distribution Scheme*
//!   field before the first equipment type, see [`EquipmentListLayout`].

use crate::fast_parse::{parse_count, parse_declared, parse_f64};
use crate::rules::{contains_ignore_case, Pattern, RuleTable};
use crate::schema::IdfType;
use crate::store::{ObjectRecord, ObjectStore};
use std::sync::OnceLock;

/// A typed view over one record of a known object type
pub trait ObjectView<'a>: Sized {
    const TYPE: IdfType;

    fn new(record: &'a ObjectRecord) -> Self;

    fn record(&self) -> &'a ObjectRecord;

    /// Object name (field 0 for every viewed type)
    fn name(&self) -> &'a str {
        self.record().name()
    }
}

impl ObjectStore {
    /// Iterate all records of `V::TYPE` through the view `V`
    pub fn objects<'a, V: ObjectView<'a> + 'a>(&'a self) -> impl Iterator<Item = V> + 'a {
        self.of(V::TYPE).iter().map(V::new)
    }

    /// First record of `V::TYPE` whose name equals `name` exactly
    pub fn find<'a, V: ObjectView<'a> + 'a>(&'a self, name: &str) -> Option<V> {
        self.objects::<V>().find(|v| v.name() == name)
    }
}

macro_rules! object_view {
    ($(#[$doc:meta])* $view:ident => $ty:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $view<'a> {
            record: &'a ObjectRecord,
        }

        impl<'a> ObjectView<'a> for $view<'a> {
            const TYPE: IdfType = $ty;

            #[inline]
            fn new(record: &'a ObjectRecord) -> Self {
                Self { record }
            }

            #[inline]
            fn record(&self) -> &'a ObjectRecord {
                self.record
            }
        }
    };
}

/// Iterate `(type, name)` pairs starting at `start`, stepping by two
fn pairs_from(record: &ObjectRecord, start: usize) -> impl Iterator<Item = (&str, &str)> {
    record
        .fields_from(start)
        .chunks_exact(2)
        .map(|pair| (pair[0].as_str(), pair[1].as_str()))
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

object_view! {
    /// `Zone`: name, direction, origin x/y/z, type, multiplier, ceiling
    /// height, volume, floor area, ...
    ZoneObject => IdfType::Zone
}

impl<'a> ZoneObject<'a> {
    /// Zone multiplier, 1.0 when blank or unparsable
    pub fn multiplier(&self) -> f64 {
        self.record.number(6).unwrap_or(1.0)
    }

    /// Declared volume, `None` when blank or autocalculate
    pub fn declared_volume(&self) -> Option<f64> {
        self.record.field(8).and_then(parse_declared)
    }

    /// Declared floor area, `None` when blank or autocalculate
    pub fn declared_floor_area(&self) -> Option<f64> {
        self.record.field(9).and_then(parse_declared)
    }
}

/// Outside boundary condition of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryCondition {
    Outdoors,
    Ground,
    Surface,
    Zone,
    OtherSideCoefficients,
    OtherSideConditionsModel,
    Adiabatic,
    Foundation,
}

impl BoundaryCondition {
    /// The boundary-condition vocabulary as an exact-match rule table
    pub fn rules() -> &'static RuleTable<BoundaryCondition> {
        static RULES: OnceLock<RuleTable<BoundaryCondition>> = OnceLock::new();
        RULES.get_or_init(|| {
            RuleTable::new()
                .with(Pattern::exact("outdoors"), BoundaryCondition::Outdoors)
                .with(Pattern::exact("ground"), BoundaryCondition::Ground)
                .with(Pattern::exact("surface"), BoundaryCondition::Surface)
                .with(Pattern::exact("zone"), BoundaryCondition::Zone)
                .with(
                    Pattern::exact("othersidecoefficients"),
                    BoundaryCondition::OtherSideCoefficients,
                )
                .with(
                    Pattern::exact("othersideconditionsmodel"),
                    BoundaryCondition::OtherSideConditionsModel,
                )
                .with(Pattern::exact("adiabatic"), BoundaryCondition::Adiabatic)
                .with(Pattern::exact("foundation"), BoundaryCondition::Foundation)
        })
    }

    /// Classify a field value, `None` if it is not a boundary condition
    pub fn classify(value: &str) -> Option<Self> {
        Self::rules().first_match(value.trim()).copied()
    }
}

/// Field layout of `BuildingSurface:Detailed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceLayout {
    /// No Space Name field (8.x)
    Legacy,
    /// Space Name field after the zone name (9.x and later)
    WithSpaceName,
}

/// Field positions for one surface layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceFieldMap {
    pub zone: usize,
    pub boundary: usize,
    pub vertex_count: usize,
    pub first_vertex: usize,
}

impl SurfaceLayout {
    /// Position the legacy layout uses for the outside boundary condition
    pub const PROBE_FIELD: usize = 4;

    /// Detect the layout of a surface record
    ///
    /// If the field at the legacy boundary position holds a known boundary
    /// condition, the record has no Space Name field.
    pub fn detect(record: &ObjectRecord) -> Self {
        match record.field(Self::PROBE_FIELD).and_then(BoundaryCondition::classify) {
            Some(_) => SurfaceLayout::Legacy,
            None => SurfaceLayout::WithSpaceName,
        }
    }

    pub const fn fields(self) -> SurfaceFieldMap {
        match self {
            SurfaceLayout::Legacy => SurfaceFieldMap {
                zone: 3,
                boundary: 4,
                vertex_count: 9,
                first_vertex: 10,
            },
            SurfaceLayout::WithSpaceName => SurfaceFieldMap {
                zone: 3,
                boundary: 5,
                vertex_count: 10,
                first_vertex: 11,
            },
        }
    }
}

object_view! {
    /// `BuildingSurface:Detailed`
    BuildingSurface => IdfType::BuildingSurfaceDetailed
}

/// Declared number of vertices of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexCount {
    /// Blank or autocalculate: consume every remaining coordinate
    Auto,
    Declared(usize),
    /// Present but not a count
    Invalid,
}

impl<'a> BuildingSurface<'a> {
    pub fn layout(&self) -> SurfaceLayout {
        SurfaceLayout::detect(self.record)
    }

    fn map(&self) -> SurfaceFieldMap {
        self.layout().fields()
    }

    /// Surface type (Floor, Wall, Roof, Ceiling, ...)
    pub fn surface_type(&self) -> &'a str {
        self.record.text(1)
    }

    pub fn is_floor(&self) -> bool {
        self.surface_type().trim().eq_ignore_ascii_case("floor")
    }

    pub fn is_wall(&self) -> bool {
        self.surface_type().trim().eq_ignore_ascii_case("wall")
    }

    pub fn zone(&self) -> &'a str {
        self.record.text(self.map().zone)
    }

    /// Raw outside boundary condition text
    pub fn boundary(&self) -> &'a str {
        self.record.text(self.map().boundary)
    }

    /// Whether the outside boundary condition mentions outdoors
    pub fn is_exterior(&self) -> bool {
        contains_ignore_case(self.boundary(), "outdoors")
    }

    pub fn vertex_count(&self) -> VertexCount {
        let raw = self.record.text(self.map().vertex_count).trim();
        if raw.is_empty() || crate::fast_parse::is_autocalculate(raw) {
            return VertexCount::Auto;
        }
        match parse_count(raw) {
            Some(n) => VertexCount::Declared(n),
            None => VertexCount::Invalid,
        }
    }

    /// Raw coordinate fields from the first vertex onward
    pub fn coordinate_fields(&self) -> &'a [String] {
        self.record.fields_from(self.map().first_vertex)
    }

    /// Whether the record is long enough to hold at least the first coordinate
    pub fn has_vertices(&self) -> bool {
        self.record.len() > self.map().first_vertex
    }
}

// ---------------------------------------------------------------------------
// Internal loads
// ---------------------------------------------------------------------------

object_view! {
    /// `People`: name, zone, schedule, method, count, per area, area per person
    PeopleObject => IdfType::People
}

impl<'a> PeopleObject<'a> {
    pub fn zone(&self) -> &'a str {
        self.record.text(1)
    }

    pub fn method(&self) -> &'a str {
        self.record.text(3)
    }

    pub fn number_of_people(&self) -> Option<f64> {
        self.record.number(4)
    }

    pub fn people_per_area(&self) -> Option<f64> {
        self.record.number(5)
    }

    pub fn area_per_person(&self) -> Option<f64> {
        self.record.number(6)
    }
}

/// Shared layout of `Lights`, `ElectricEquipment`, `GasEquipment` and
/// `OtherEquipment`: name, zone, schedule, method, level, per area, per person
#[derive(Debug, Clone, Copy)]
pub struct LoadObject<'a> {
    record: &'a ObjectRecord,
}

impl<'a> LoadObject<'a> {
    pub fn new(record: &'a ObjectRecord) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &'a ObjectRecord {
        self.record
    }

    pub fn name(&self) -> &'a str {
        self.record.name()
    }

    pub fn zone(&self) -> &'a str {
        self.record.text(1)
    }

    pub fn method(&self) -> &'a str {
        self.record.text(3)
    }

    pub fn design_level(&self) -> Option<f64> {
        self.record.number(4)
    }

    pub fn per_area(&self) -> Option<f64> {
        self.record.number(5)
    }

    pub fn per_person(&self) -> Option<f64> {
        self.record.number(6)
    }

    /// End-use subcategory of `ElectricEquipment`
    pub fn subcategory(&self) -> &'a str {
        self.record.text(10)
    }

    /// Whether any field contains one of the keywords (case-insensitive)
    pub fn mentions_any<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        self.record.fields().iter().any(|field| {
            keywords
                .iter()
                .any(|k| contains_ignore_case(field, k.as_ref()))
        })
    }
}

object_view! {
    /// `WaterUse:Equipment`: name, end-use subcategory, peak flow, flow
    /// schedule, target temperature schedule, hot/cold supply, zone, ...
    WaterUseEquipment => IdfType::WaterUseEquipment
}

impl<'a> WaterUseEquipment<'a> {
    /// Peak flow rate in m³/s
    pub fn peak_flow(&self) -> Option<f64> {
        self.record.number(2)
    }

    /// Zone name, `None` when the optional field is absent or blank
    pub fn zone(&self) -> Option<&'a str> {
        self.record.field(7).filter(|z| !z.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Infiltration and airflow network
// ---------------------------------------------------------------------------

object_view! {
    /// `ZoneInfiltration:DesignFlowRate`
    InfiltrationDesignFlow => IdfType::InfiltrationDesignFlowRate
}

impl<'a> InfiltrationDesignFlow<'a> {
    pub fn zone(&self) -> &'a str {
        self.record.text(1)
    }

    pub fn method(&self) -> &'a str {
        self.record.text(3)
    }

    /// Design flow rate, m³/s
    pub fn design_flow(&self) -> Option<f64> {
        self.record.number(4)
    }

    /// Flow per zone floor area, m³/s·m²
    pub fn flow_per_floor_area(&self) -> Option<f64> {
        self.record.number(5)
    }

    /// Flow per exterior surface area, m³/s·m²
    pub fn flow_per_exterior_area(&self) -> Option<f64> {
        self.record.number(6)
    }

    pub fn air_changes_per_hour(&self) -> Option<f64> {
        self.record.number(7)
    }
}

object_view! {
    /// `ZoneInfiltration:EffectiveLeakageArea`
    InfiltrationLeakageArea => IdfType::InfiltrationEffectiveLeakageArea
}

impl<'a> InfiltrationLeakageArea<'a> {
    pub fn zone(&self) -> &'a str {
        self.record.text(1)
    }

    /// Effective leakage area, nominally cm²
    pub fn leakage_area(&self) -> Option<f64> {
        self.record.number(3)
    }
}

object_view! {
    /// `AirflowNetwork:MultiZone:Surface:EffectiveLeakageArea`
    AfnLeakageComponent => IdfType::AfnSurfaceEffectiveLeakageArea
}

impl<'a> AfnLeakageComponent<'a> {
    /// Effective leakage area, m² (cm² in some hand-written models)
    pub fn leakage_area(&self) -> Option<f64> {
        self.record.number(1)
    }
}

object_view! {
    /// `AirflowNetwork:MultiZone:Surface`
    AfnSurface => IdfType::AfnSurface
}

impl<'a> AfnSurface<'a> {
    pub fn surface(&self) -> &'a str {
        self.record.text(0)
    }

    pub fn leakage_component(&self) -> &'a str {
        self.record.text(1)
    }
}

// ---------------------------------------------------------------------------
// Ventilation
// ---------------------------------------------------------------------------

object_view! {
    /// `DesignSpecification:OutdoorAir`: name, method, per person, per
    /// area, per zone, ACH, ...
    OutdoorAirSpec => IdfType::DesignSpecificationOutdoorAir
}

/// Flow rates are 0 when blank or absent and `None` when unparsable
impl<'a> OutdoorAirSpec<'a> {
    pub fn flow_per_person(&self) -> Option<f64> {
        self.optional_flow(2)
    }

    pub fn flow_per_area(&self) -> Option<f64> {
        self.optional_flow(3)
    }

    pub fn flow_per_zone(&self) -> Option<f64> {
        self.optional_flow(4)
    }

    fn optional_flow(&self, index: usize) -> Option<f64> {
        self.record.field(index).map_or(Some(0.0), blank_as_zero)
    }
}

object_view! {
    /// `ZoneVentilation:DesignFlowRate`
    ZoneVentilationDesignFlow => IdfType::ZoneVentilationDesignFlowRate
}

impl<'a> ZoneVentilationDesignFlow<'a> {
    pub fn zone(&self) -> &'a str {
        self.record.text(1)
    }

    pub fn method(&self) -> &'a str {
        self.record.text(3)
    }

    pub fn design_flow(&self) -> Option<f64> {
        self.record.number(4)
    }

    pub fn flow_per_area(&self) -> Option<f64> {
        self.record.number(5)
    }

    pub fn flow_per_person(&self) -> Option<f64> {
        self.record.number(6)
    }
}

// ---------------------------------------------------------------------------
// Controls and schedules
// ---------------------------------------------------------------------------

object_view! {
    /// `ZoneControl:Thermostat`: name, zone, control type schedule, then
    /// (control object type, control name) pairs
    ZoneThermostat => IdfType::ZoneControlThermostat
}

impl<'a> ZoneThermostat<'a> {
    pub fn zone(&self) -> &'a str {
        self.record.text(1)
    }

    pub fn controls(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        pairs_from(self.record, 3)
    }
}

/// Any `ThermostatSetpoint:*` object: name followed by schedule names
#[derive(Debug, Clone, Copy)]
pub struct SetpointObject<'a> {
    record: &'a ObjectRecord,
}

impl<'a> SetpointObject<'a> {
    pub fn new(record: &'a ObjectRecord) -> Self {
        Self { record }
    }

    pub fn name(&self) -> &'a str {
        self.record.name()
    }

    /// Schedule name at position `n` (0 = first schedule field)
    pub fn schedule(&self, n: usize) -> Option<&'a str> {
        self.record.field(1 + n).filter(|s| !s.is_empty())
    }
}

object_view! {
    /// `Schedule:Constant`: name, type limits, value
    ScheduleConstant => IdfType::ScheduleConstant
}

impl<'a> ScheduleConstant<'a> {
    pub fn value(&self) -> Option<f64> {
        self.record.number(2)
    }
}

object_view! {
    /// `Schedule:Compact`: name, type limits, then interleaved
    /// Through/For/Until/value fields
    ScheduleCompact => IdfType::ScheduleCompact
}

impl<'a> ScheduleCompact<'a> {
    pub fn data_fields(&self) -> &'a [String] {
        self.record.fields_from(2)
    }
}

// ---------------------------------------------------------------------------
// Zone equipment and air loops
// ---------------------------------------------------------------------------

object_view! {
    /// `ZoneHVAC:EquipmentConnections`: zone, equipment list, inlet node
    /// list, exhaust node list, air node, return node
    EquipmentConnections => IdfType::EquipmentConnections
}

impl<'a> EquipmentConnections<'a> {
    pub fn zone(&self) -> &'a str {
        self.record.text(0)
    }

    pub fn equipment_list(&self) -> &'a str {
        self.record.text(1)
    }

    /// Whether the record carries the node fields after the list name
    pub fn is_complete(&self) -> bool {
        self.record.len() > 4
    }
}

/// Field layout of `ZoneHVAC:EquipmentList`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentListLayout {
    /// First equipment type directly after the name (8.x)
    Legacy,
    /// Load Distribution Scheme field before the first equipment type
    WithLoadDistribution,
}

/// Prefixes every zone equipment object type starts with
pub fn equipment_type_prefixes() -> &'static RuleTable<()> {
    static PREFIXES: OnceLock<RuleTable<()>> = OnceLock::new();
    PREFIXES.get_or_init(|| {
        RuleTable::vocabulary([
            Pattern::prefix("ZONEHVAC:"),
            Pattern::prefix("AIRTERMINAL:"),
            Pattern::prefix("FAN:"),
        ])
    })
}

object_view! {
    /// `ZoneHVAC:EquipmentList`
    EquipmentList => IdfType::EquipmentList
}

impl<'a> EquipmentList<'a> {
    pub fn layout(&self) -> EquipmentListLayout {
        if equipment_type_prefixes().matches_any(self.record.text(1)) {
            EquipmentListLayout::Legacy
        } else {
            EquipmentListLayout::WithLoadDistribution
        }
    }

    /// Ordered `(equipment type, equipment name)` pairs
    ///
    /// Sequence and fraction fields between entries vary in number across
    /// revisions, so entries are located by their type prefix rather than by
    /// a fixed stride.
    pub fn equipment(&self) -> Vec<(&'a str, &'a str)> {
        let start = match self.layout() {
            EquipmentListLayout::Legacy => 1,
            EquipmentListLayout::WithLoadDistribution => 2,
        };
        let fields = self.record.fields();
        let prefixes = equipment_type_prefixes();

        let mut entries = Vec::new();
        let mut i = start;
        while i + 1 < fields.len() {
            if prefixes.matches_any(&fields[i]) {
                entries.push((fields[i].as_str(), fields[i + 1].as_str()));
                i += 2;
            } else {
                i += 1;
            }
        }
        entries
    }
}

object_view! {
    /// `ZoneHVAC:AirDistributionUnit`: name, outlet node, terminal type
    AirDistributionUnit => IdfType::AirDistributionUnit
}

impl<'a> AirDistributionUnit<'a> {
    pub fn terminal_type(&self) -> &'a str {
        self.record.text(2)
    }
}

object_view! {
    /// `AirLoopHVAC:ZoneSplitter`: name, inlet node, outlet nodes...
    ZoneSplitter => IdfType::ZoneSplitter
}

impl<'a> ZoneSplitter<'a> {
    pub fn outlet_nodes(&self) -> impl Iterator<Item = &'a str> {
        self.record.fields_from(2).iter().map(String::as_str)
    }
}

object_view! {
    /// `AirLoopHVAC:SupplyPath`: name, inlet node, (component type, name)...
    SupplyPath => IdfType::SupplyPath
}

impl<'a> SupplyPath<'a> {
    pub fn components(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        pairs_from(self.record, 2)
    }
}

object_view! {
    /// `Controller:OutdoorAir`
    OutdoorAirController => IdfType::ControllerOutdoorAir
}

impl<'a> OutdoorAirController<'a> {
    /// Economizer control type, `None` when the record is too short
    pub fn economizer(&self) -> Option<&'a str> {
        self.record.field(7)
    }
}

object_view! {
    /// `Controller:MechanicalVentilation`
    MechanicalVentilationController => IdfType::ControllerMechanicalVentilation
}

impl<'a> MechanicalVentilationController<'a> {
    /// Demand controlled ventilation flag, `None` when the record is too short
    pub fn demand_controlled(&self) -> Option<&'a str> {
        self.record.field(2)
    }
}

// ---------------------------------------------------------------------------
// Building-level process loads
// ---------------------------------------------------------------------------

object_view! {
    /// `Exterior:Lights`: name, schedule, design level, control option,
    /// subcategory
    ExteriorLights => IdfType::ExteriorLights
}

impl<'a> ExteriorLights<'a> {
    /// Design level in W; blank counts as zero, missing or garbage as `None`
    pub fn design_level(&self) -> Option<f64> {
        self.record.field(2).and_then(blank_as_zero)
    }

    pub fn control_option(&self) -> Option<&'a str> {
        self.record.field(3)
    }

    pub fn subcategory(&self) -> Option<&'a str> {
        self.record.field(4)
    }
}

object_view! {
    /// `Exterior:FuelEquipment`: name, fuel, schedule, design level,
    /// subcategory
    ExteriorFuelEquipment => IdfType::ExteriorFuelEquipment
}

impl<'a> ExteriorFuelEquipment<'a> {
    pub fn fuel(&self) -> &'a str {
        self.record.text(1)
    }

    pub fn design_level(&self) -> Option<f64> {
        self.record.field(3).and_then(blank_as_zero)
    }

    pub fn subcategory(&self) -> Option<&'a str> {
        self.record.field(4)
    }
}

object_view! {
    /// `Refrigeration:Case`
    RefrigerationCase => IdfType::RefrigerationCase
}

impl<'a> RefrigerationCase<'a> {
    pub fn zone(&self) -> &'a str {
        self.record.text(2)
    }

    /// Rated total cooling capacity per unit length, W/m
    pub fn capacity_per_length(&self) -> Option<f64> {
        self.record.field(5).and_then(blank_as_zero)
    }

    /// Case length, m
    pub fn length(&self) -> Option<f64> {
        self.record.field(8).and_then(blank_as_zero)
    }
}

object_view! {
    /// `Refrigeration:CompressorRack`
    CompressorRack => IdfType::RefrigerationCompressorRack
}

impl<'a> CompressorRack<'a> {
    /// Heat rejection location (Zone or Outdoors)
    pub fn location(&self) -> &'a str {
        self.record.text(1)
    }

    pub fn design_cop(&self) -> Option<&'a str> {
        self.record.field(2)
    }

    pub fn fan_power(&self) -> Option<f64> {
        self.record.field(4).and_then(blank_as_zero)
    }

    pub fn subcategory(&self) -> Option<&'a str> {
        self.record.field(23)
    }
}

/// Blank → 0.0, number → value, anything else → `None`
fn blank_as_zero(field: &str) -> Option<f64> {
    if field.trim().is_empty() {
        Some(0.0)
    } else {
        parse_f64(field)
    }
}
