// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort one extraction run
///
/// Anything wrong inside a model is absorbed by the extractors; only
/// failures to obtain the model or the configuration surface here.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read configuration {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Core(#[from] idf_lite_core::Error),
}

impl Error {
    /// Whether the model file itself was missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Core(e) if e.is_not_found())
    }
}
