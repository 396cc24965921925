// Copyright 2023 rust-dns-sdk authors
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Error types returned by the SDK.

use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A default was written for `var` but could not be read back.
    #[error("environment variable {var} could not be set to its default")]
    EnvNotPersisted { var: String },

    /// `var` is set but its value is not valid unicode.
    #[error("environment variable {var} is not valid unicode")]
    EnvNotUnicode { var: String },

    #[error("invalid host url: {0}")]
    InvalidHost(String),

    /// An id or name was empty, `.` or `..` and cannot address a resource.
    #[error("invalid path segment: {0:?}")]
    InvalidPathSegment(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a non-success status.
    #[error("vinyldns returned {status}: {message}")]
    Api { status: u16, message: String },
}

impl Error {
    /// Status code of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_exposes_status() {
        let err = Error::Api {
            status: 404,
            message: "Zone with id abc does not exist".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "vinyldns returned 404: Zone with id abc does not exist"
        );
    }

    #[test]
    fn non_api_error_has_no_status() {
        let err = Error::InvalidHost("::".into());
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }
}
