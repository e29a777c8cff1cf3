// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use approx::assert_relative_eq;
use idf_lite_core::parse;
use idf_lite_geometry::{resolve_geometry, resolve_geometry_file, Error, ZoneLookup};

/// Two-zone model mixing both surface layouts, as produced when a 9.x file
/// is assembled from 8.x snippets.
const TWO_ZONES: &str = r#"
Version, 9.4;

Zone,
  Perimeter_ZN_1,          !- Name
  0,                       !- Direction of Relative North {deg}
  0, 0, 0,                 !- X,Y,Z Origin {m}
  1,                       !- Type
  1,                       !- Multiplier
  autocalculate,           !- Ceiling Height {m}
  300,                     !- Volume {m3}
  autocalculate;           !- Floor Area {m2}

Zone,
  Core_ZN,                 !- Name
  0, 0, 0, 0, 1,
  2,                       !- Multiplier
  , , 150;                 !- Ceiling Height, Volume, Floor Area

BuildingSurface:Detailed,
  Perimeter_ZN_1_Floor,    !- Name
  Floor,                   !- Surface Type
  Slab,                    !- Construction Name
  Perimeter_ZN_1,          !- Zone Name
  ,                        !- Space Name
  Ground,                  !- Outside Boundary Condition
  ,                        !- Outside Boundary Condition Object
  NoSun, NoWind,
  ,                        !- View Factor to Ground
  4,                       !- Number of Vertices
  0, 10, 0,
  20, 10, 0,
  20, 0, 0,
  0, 0, 0;

BuildingSurface:Detailed,
  Perimeter_ZN_1_Wall_South, Wall, ExtWall, Perimeter_ZN_1, Outdoors, ,
  SunExposed, WindExposed, 0.5, 4,
  0, 0, 3,   0, 0, 0,   20, 0, 0,   20, 0, 3;

BuildingSurface:Detailed,
  Core_ZN_Wall_North, Wall, ExtWall, Core_ZN, , Outdoors, ,
  SunExposed, WindExposed, 0.5, autocalculate,
  0, 30, 3,   0, 30, 0,   15, 30, 0,   15, 30, 3;

BuildingSurface:Detailed,
  Core_ZN_Floor, Floor, Slab, Core_ZN, Ground, , NoSun, NoWind, , 4,
  0, 10, 0,  0, 30, 0,  15, 30, 0,  15, 10, 0;
"#;

#[test]
fn test_resolves_mixed_layout_model() {
    let store = parse(TWO_ZONES);
    let zones = resolve_geometry(&store);

    assert_eq!(zones.len(), 2);

    let perimeter = zones.zone("perimeter_zn_1").unwrap();
    assert_relative_eq!(perimeter.floor_area, 200.0, epsilon = 1e-9);
    assert_relative_eq!(perimeter.facade_area, 60.0, epsilon = 1e-9);
    assert_relative_eq!(perimeter.volume, 300.0);
    assert_relative_eq!(perimeter.multiplier, 1.0);

    let core = zones.zone("Core_ZN").unwrap();
    // Declared 150 m² wins over the 300 m² floor polygon
    assert_relative_eq!(core.floor_area, 150.0);
    assert_relative_eq!(core.facade_area, 45.0, epsilon = 1e-9);
    assert_relative_eq!(core.multiplier, 2.0);
    assert_eq!(core.volume, 0.0);
}

#[test]
fn test_resolution_is_repeatable() {
    let store = parse(TWO_ZONES);
    assert_eq!(resolve_geometry(&store), resolve_geometry(&store));
}

#[test]
fn test_missing_file_is_reported() {
    let err = resolve_geometry_file("/no/such/model.idf").unwrap_err();
    match err {
        Error::CoreError(core) => assert!(core.is_not_found()),
        other => panic!("unexpected error: {other}"),
    }
}
