// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for IDF parsing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading an IDF file
///
/// Malformed content inside a file never produces an error; only failures to
/// obtain the text at all are reported.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IDF file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O error for the given path, mapping `NotFound` to [`Error::FileNotFound`]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path)
        } else {
            Error::Io { path, source }
        }
    }

    /// Whether this is the missing-file condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::FileNotFound(_))
    }
}
