// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with reconstructing correlation matrices.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolarisationError {
    #[error("Polarisation '{0}' not understood; supported polarisations are: xx, xy, yx, yy")]
    Unsupported(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrossCorrError {
    #[error("Expected {expected} packed visibilities for {num_mini_arrays} mini-arrays, but got {got}")]
    BadPackedLength {
        num_mini_arrays: usize,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Polarisation(#[from] PolarisationError),
}
