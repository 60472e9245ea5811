// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all errors surfaced by the `nenufar-xst` binary. This should
//! be the *only* error enum that the binary displays.

use thiserror::Error;

use super::cross_corr::CrossCorrArgsError;
use crate::{
    io::read::XstReadError,
    math::{CrossCorrError, PolarisationError},
};

#[derive(Error, Debug)]
pub enum XstError {
    /// The XST file couldn't be found or isn't a file.
    #[error("{0}")]
    XstPath(String),

    /// The XST file isn't structured like an XST file.
    #[error("{0}\n\nAn XST file starts with a 5-line header (HeaderStart, Freq.List=..., Mr.List=..., accumulation=..., HeaderStop) followed by whole records")]
    XstFormat(String),

    /// A polarisation wasn't understood.
    #[error("{0}")]
    Polarisation(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files must be toml or json, with the same keys as the long command-line arguments")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<XstReadError> for XstError {
    fn from(e: XstReadError) -> Self {
        let s = e.to_string();
        match e {
            XstReadError::InvalidPath { .. } | XstReadError::DoesNotExist { .. } => {
                Self::XstPath(s)
            }
            XstReadError::HeaderTooShort { .. }
            | XstReadError::HeaderStart { .. }
            | XstReadError::HeaderStop { .. }
            | XstReadError::HeaderNotUtf8 { .. }
            | XstReadError::MissingKey { .. }
            | XstReadError::EmptyKey { .. }
            | XstReadError::ParseValue { .. }
            | XstReadError::BadAccumulation { .. }
            | XstReadError::ShapeTooLarge { .. }
            | XstReadError::BodySize { .. }
            | XstReadError::NoTimesteps { .. } => Self::XstFormat(s),
            XstReadError::IO(e) => Self::from(e),
        }
    }
}

impl From<PolarisationError> for XstError {
    fn from(e: PolarisationError) -> Self {
        Self::Polarisation(e.to_string())
    }
}

impl From<CrossCorrError> for XstError {
    fn from(e: CrossCorrError) -> Self {
        match e {
            CrossCorrError::Polarisation(e) => Self::from(e),
            CrossCorrError::BadPackedLength { .. } => Self::Generic(e.to_string()),
        }
    }
}

impl From<CrossCorrArgsError> for XstError {
    fn from(e: CrossCorrArgsError) -> Self {
        match e {
            CrossCorrArgsError::NoData => Self::XstPath(e.to_string()),
            CrossCorrArgsError::NoTimesteps => Self::Generic(e.to_string()),
            CrossCorrArgsError::Polarisation(e) => Self::from(e),
            CrossCorrArgsError::TimestepOutOfRange { .. } => Self::Generic(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for XstError {
    fn from(e: serde_json::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<std::io::Error> for XstError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
