// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Representative schedule values

use idf_lite_core::{first_number, ObjectStore, ObjectView, ScheduleCompact, ScheduleConstant};

/// Markers of compact-schedule fields that are not values
const COMPACT_KEYWORDS: [&str; 5] = ["THROUGH", "FOR", "UNTIL", ":", "/"];

/// A representative numeric value for a schedule, matched by name ignoring
/// case
///
/// `Schedule:Constant` yields its value. For `Schedule:Compact` the first
/// data field that is not a Through/For/Until line gives the value, which is
/// the first period's first level.
pub fn resolve_schedule_value(store: &ObjectStore, name: &str) -> Option<f64> {
    let constant = store
        .objects::<ScheduleConstant>()
        .filter(|s| s.name().eq_ignore_ascii_case(name))
        .find_map(|s| s.value());
    if constant.is_some() {
        return constant;
    }

    store
        .objects::<ScheduleCompact>()
        .filter(|s| s.name().eq_ignore_ascii_case(name))
        .find_map(|s| {
            s.data_fields()
                .iter()
                .filter(|field| {
                    let upper = field.to_ascii_uppercase();
                    !COMPACT_KEYWORDS.iter().any(|k| upper.contains(k))
                })
                .find_map(|field| first_number(field))
        })
}
