// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Correlation-matrix mathematics.
//!
//! The correlator treats each mini-array as two inputs (X and Y), so `n`
//! mini-arrays form a `2n x 2n` Hermitian matrix. Row/column `2k` is mini-array
//! `k`'s X polarisation and `2k + 1` is its Y polarisation. Only the lower
//! triangle (including the diagonal) is written to disk, row by row, which
//! needs `2n^2 + n` complex numbers.

mod error;

pub use error::{CrossCorrError, PolarisationError};

use marlu::c32;
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// One of the four products of two orthogonal polarisations.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Polarisation {
    #[default]
    #[strum(serialize = "xx")]
    XX,
    #[strum(serialize = "xy")]
    XY,
    #[strum(serialize = "yx")]
    YX,
    #[strum(serialize = "yy")]
    YY,
}

impl Polarisation {
    /// Parse a polarisation token (case-insensitive).
    pub fn parse(s: &str) -> Result<Polarisation, PolarisationError> {
        s.parse()
            .map_err(|_| PolarisationError::Unsupported(s.to_string()))
    }

    /// The (row, column) offsets of this polarisation product inside a 2x2
    /// block of the dual-polarisation matrix.
    fn offsets(self) -> (usize, usize) {
        match self {
            Polarisation::XX => (0, 0),
            Polarisation::XY => (0, 1),
            Polarisation::YX => (1, 0),
            Polarisation::YY => (1, 1),
        }
    }
}

/// The number of packed visibilities needed for the lower triangle of the
/// dual-polarisation matrix of `num_mini_arrays` mini-arrays.
pub fn num_packed_vis(num_mini_arrays: usize) -> usize {
    2 * num_mini_arrays * num_mini_arrays + num_mini_arrays
}

/// Expand packed visibilities into the full `2n x 2n` dual-polarisation
/// matrix.
///
/// The lower triangle is filled row by row. The element just above each
/// diagonal element is then set to the conjugate of the element just below it;
/// for even rows this is the XY product of a single mini-array, which is
/// otherwise only stored as YX. The rest of the upper triangle is left as
/// zeros.
pub fn unpack_dual_pol_matrix(
    vis: ArrayView1<c32>,
    num_mini_arrays: usize,
) -> Result<Array2<c32>, CrossCorrError> {
    let expected = num_packed_vis(num_mini_arrays);
    if vis.len() != expected {
        return Err(CrossCorrError::BadPackedLength {
            num_mini_arrays,
            expected,
            got: vis.len(),
        });
    }

    Ok(fill_dual_pol_matrix(vis, num_mini_arrays))
}

/// The guts of [`unpack_dual_pol_matrix`]. The length of `vis` is not checked;
/// if it's short, the trailing elements of the lower triangle stay zero.
pub(crate) fn fill_dual_pol_matrix(vis: ArrayView1<c32>, num_mini_arrays: usize) -> Array2<c32> {
    let size = 2 * num_mini_arrays;
    let mut full = Array2::zeros((size, size));
    let lower_triangle = (0..size).flat_map(|row| (0..=row).map(move |col| (row, col)));
    for ((row, col), v) in lower_triangle.zip(vis.iter()) {
        full[(row, col)] = *v;
    }

    for i in 0..size.saturating_sub(1) {
        full[(i, i + 1)] = full[(i + 1, i)].conj();
    }

    full
}

/// Pull a single polarisation product out of a full dual-polarisation matrix.
/// Only the lower triangle (including the diagonal) of the returned `n x n`
/// matrix is populated; the upper triangle is zero.
pub fn extract_polarisation(full: ArrayView2<c32>, pol: Polarisation) -> Array2<c32> {
    let num_mini_arrays = full.nrows() / 2;
    let (row_offset, col_offset) = pol.offsets();
    let mut out = Array2::zeros((num_mini_arrays, num_mini_arrays));
    for p in 0..num_mini_arrays {
        for q in 0..=p {
            out[(p, q)] = full[(2 * p + row_offset, 2 * q + col_offset)];
        }
    }
    out
}

/// Reconstruct the `n x n` cross-correlation matrix of one polarisation from
/// packed visibilities.
pub fn cross_correlation_matrix(
    vis: ArrayView1<c32>,
    num_mini_arrays: usize,
    pol: Polarisation,
) -> Result<Array2<c32>, CrossCorrError> {
    let full = unpack_dual_pol_matrix(vis, num_mini_arrays)?;
    Ok(extract_polarisation(full.view(), pol))
}

/// Get the index of the value closest to `target`. Ties go to the lower index.
/// Returns 0 if `values` is empty or nothing compares (e.g. `target` is NaN).
pub fn closest_index(values: &[f64], target: f64) -> usize {
    let mut best = 0;
    let mut best_diff = f64::INFINITY;
    for (i, v) in values.iter().enumerate() {
        let diff = (v - target).abs();
        if diff < best_diff {
            best = i;
            best_diff = diff;
        }
    }
    best
}
