// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Instrument stuff: where NenuFAR is, and how its mini-arrays pair up.
 */

#[cfg(test)]
mod tests;

use itertools::Itertools;
use marlu::LatLngHeight;

use crate::constants::{NENUFAR_HEIGHT_M, NENUFAR_LAT_DEG, NENUFAR_LONG_DEG};

/// The geodetic position of the NenuFAR array.
pub fn nenufar_position() -> LatLngHeight {
    LatLngHeight {
        longitude_rad: NENUFAR_LONG_DEG.to_radians(),
        latitude_rad: NENUFAR_LAT_DEG.to_radians(),
        height_metres: NENUFAR_HEIGHT_M,
    }
}

/// All baselines formed by `mini_arrays`. Every ordered pair of distinct
/// mini-arrays comes first (i.e. both (a, b) and (b, a) are present, in
/// permutation order), followed by the auto-correlation "baselines" (a, a) in
/// the order of `mini_arrays`.
pub fn baselines(mini_arrays: &[u16]) -> Vec<(u16, u16)> {
    let mut baselines: Vec<(u16, u16)> = mini_arrays
        .iter()
        .copied()
        .permutations(2)
        .map(|pair| (pair[0], pair[1]))
        .collect();
    baselines.extend(mini_arrays.iter().map(|&m| (m, m)));
    baselines
}
