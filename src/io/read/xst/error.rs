// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error-handling code associated with reading XST snapshot files.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum XstReadError {
    #[error("'{path}' is not a usable XST file path; expected a path to a regular file")]
    InvalidPath { path: String },

    #[error("Unable to find {path}")]
    DoesNotExist { path: String },

    #[error("When reading {file}, expected a {expected}-line header, but only {lines} line(s) were found")]
    HeaderTooShort {
        file: String,
        expected: usize,
        lines: usize,
    },

    #[error("When reading {file}, expected 'HeaderStart' as the first line, got '{got}' instead!")]
    HeaderStart { file: String, got: String },

    #[error("When reading {file}, expected 'HeaderStop' as the last header line, got '{got}' instead!")]
    HeaderStop { file: String, got: String },

    #[error("The header of {file} is not valid UTF-8")]
    HeaderNotUtf8 { file: String },

    #[error("The header of {file} doesn't contain the required '{tag}' line (needed for '{key}')")]
    MissingKey {
        file: String,
        tag: &'static str,
        key: &'static str,
    },

    #[error("The '{tag}' line in the header of {file} doesn't list any values")]
    EmptyKey { file: String, tag: &'static str },

    #[error("Couldn't parse '{value}' from the '{tag}' line in the header of {file} as a number")]
    ParseValue {
        file: String,
        tag: &'static str,
        value: String,
    },

    #[error("Expected a single positive accumulation count in the header of {file}, got '{got}'")]
    BadAccumulation { file: String, got: String },

    #[error("The header of {file} declares {num_subbands} subbands and {num_mini_arrays} mini-arrays; a record of that shape can't be addressed")]
    ShapeTooLarge {
        file: String,
        num_subbands: usize,
        num_mini_arrays: usize,
    },

    #[error("The body of {file} is {body_bytes} bytes, which is not a multiple of the {record_bytes}-byte record size")]
    BodySize {
        file: String,
        body_bytes: usize,
        record_bytes: usize,
    },

    #[error("{file} contains no timesteps")]
    NoTimesteps { file: String },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
