// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading surface geometry
///
/// Zone resolution never fails as a whole: a surface producing one of these
/// is skipped and the rest of the model is still resolved.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Surface {surface}: no vertex fields")]
    MissingVertices { surface: String },

    #[error("Surface {surface}: invalid vertex count")]
    InvalidVertexCount { surface: String },

    #[error("Surface {surface}: coordinate {index} is not a number")]
    InvalidCoordinate { surface: String, index: usize },

    #[error("Core parser error: {0}")]
    CoreError(#[from] idf_lite_core::Error),
}
