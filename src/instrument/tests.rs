// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;

#[test]
fn test_baselines() {
    let bls = baselines(&[0, 1, 5]);
    assert_eq!(
        bls,
        vec![
            (0, 1),
            (0, 5),
            (1, 0),
            (1, 5),
            (5, 0),
            (5, 1),
            (0, 0),
            (1, 1),
            (5, 5)
        ]
    );
}

#[test]
fn test_baselines_count() {
    let mini_arrays: Vec<u16> = (0..96).collect();
    let bls = baselines(&mini_arrays);
    // n(n-1) crosses and n autos.
    assert_eq!(bls.len(), 96 * 96);
}

#[test]
fn test_baselines_single_mini_array() {
    assert_eq!(baselines(&[12]), vec![(12, 12)]);
    assert!(baselines(&[]).is_empty());
}

#[test]
fn test_nenufar_position() {
    let pos = nenufar_position();
    assert_abs_diff_eq!(pos.latitude_rad.to_degrees(), 47.375944, epsilon = 1e-10);
    assert_abs_diff_eq!(pos.longitude_rad.to_degrees(), 2.193361, epsilon = 1e-10);
    assert_abs_diff_eq!(pos.height_metres, 136.195);
}
