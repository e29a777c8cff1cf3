// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IDF-Lite Core Parser
//!
//! Tolerant tokenizer and object store for EnergyPlus IDF files, built with
//! [nom](https://docs.rs/nom) and [memchr](https://docs.rs/memchr).
//!
//! ## Overview
//!
//! - **Tokenization**: comment stripping and `;`/`,` splitting
//! - **Object Store**: keyword-indexed records in file order
//! - **Typed Views**: named field accessors over positional records
//! - **Rule Tables**: ordered case-insensitive keyword classification
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use idf_lite_core::{parse, ObjectView, ZoneObject};
//!
//! let store = parse("Zone, Core, 0, 0,0,0, 1, 1, , 300, 100;");
//! for zone in store.objects::<ZoneObject>() {
//!     println!("{}: {:?} m2", zone.name(), zone.declared_floor_area());
//! }
//! ```
//!
//! Malformed content never fails the parse. Numeric helpers report
//! unparsable fields as `None` and callers skip the contribution.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for records and rule tables

pub mod error;
pub mod fast_parse;
pub mod objects;
pub mod parser;
pub mod rules;
pub mod schema;
pub mod store;

pub use error::{Error, Result};
pub use fast_parse::{first_number, is_autocalculate, parse_count, parse_declared, parse_f64};
pub use objects::{
    equipment_type_prefixes, AfnLeakageComponent, AfnSurface, AirDistributionUnit,
    BoundaryCondition, BuildingSurface, CompressorRack, EquipmentConnections, EquipmentList,
    EquipmentListLayout, ExteriorFuelEquipment, ExteriorLights, InfiltrationDesignFlow,
    InfiltrationLeakageArea, LoadObject, MechanicalVentilationController, ObjectView,
    OutdoorAirController, OutdoorAirSpec, PeopleObject, RefrigerationCase, ScheduleCompact,
    ScheduleConstant, SetpointObject, SupplyPath, SurfaceFieldMap, SurfaceLayout, VertexCount,
    WaterUseEquipment, ZoneObject, ZoneSplitter, ZoneThermostat, ZoneVentilationDesignFlow,
};
pub use parser::{parse_statement, strip_comments, StatementFields, StatementScanner};
pub use rules::{
    contains_ignore_case, ends_with_ignore_case, starts_with_ignore_case, Pattern, Rule, RuleTable,
};
pub use schema::IdfType;
pub use store::{parse, parse_file, ObjectRecord, ObjectStore};
