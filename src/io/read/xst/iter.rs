// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use marlu::c32;
use ndarray::prelude::*;

use crate::math::{extract_polarisation, fill_dual_pol_matrix, Polarisation};

/// An iterator over the cross-correlation matrices of each timestep at a
/// single subband. Matrices are reconstructed one at a time, as they're
/// requested. Created by [`super::XstReader::iter_cross_corr`].
#[derive(Debug, Clone)]
pub struct CrossCorrIter<'a> {
    /// (num_timesteps, num_subbands, num_packed_vis)
    data: ArrayView3<'a, c32>,
    num_mini_arrays: usize,
    subband: usize,
    pol: Polarisation,
    timestep: usize,
}

impl<'a> CrossCorrIter<'a> {
    pub(super) fn new(
        data: ArrayView3<'a, c32>,
        num_mini_arrays: usize,
        subband: usize,
        pol: Polarisation,
    ) -> CrossCorrIter<'a> {
        CrossCorrIter {
            data,
            num_mini_arrays,
            subband,
            pol,
            timestep: 0,
        }
    }

    /// The subband index that the matrices come from.
    pub fn subband(&self) -> usize {
        self.subband
    }

    pub fn polarisation(&self) -> Polarisation {
        self.pol
    }
}

impl Iterator for CrossCorrIter<'_> {
    type Item = Array2<c32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.timestep >= self.data.len_of(Axis(0)) {
            return None;
        }
        let vis = self.data.slice(s![self.timestep, self.subband, ..]);
        self.timestep += 1;
        let full = fill_dual_pol_matrix(vis, self.num_mini_arrays);
        Some(extract_polarisation(full.view(), self.pol))
    }

    // Skipped timesteps are never reconstructed.
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.timestep = self
            .timestep
            .saturating_add(n)
            .min(self.data.len_of(Axis(0)));
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.len_of(Axis(0)).saturating_sub(self.timestep);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CrossCorrIter<'_> {}
